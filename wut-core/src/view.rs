//! Active view and breakdown edit-mode.

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three chart views. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Breakdown,
    Weekly,
    Daily,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Breakdown, ViewMode::Weekly, ViewMode::Daily];

    /// Token used by the view menu ("breakdown", "weekly", "daily").
    pub fn id(&self) -> &'static str {
        match self {
            ViewMode::Breakdown => "breakdown",
            ViewMode::Weekly => "weekly",
            ViewMode::Daily => "daily",
        }
    }

    /// Menu caption.
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Breakdown => "Water Usage Breakdown",
            ViewMode::Weekly => "Weekly Trends",
            ViewMode::Daily => "Daily Comparison",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ViewMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "breakdown" => Ok(ViewMode::Breakdown),
            "weekly" => Ok(ViewMode::Weekly),
            "daily" => Ok(ViewMode::Daily),
            other => Err(TrackerError::UnknownView(other.to_string())),
        }
    }
}

/// UI flags derived from the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    /// Caption of the edit toggle button
    pub edit_label: &'static str,
    /// Whether the "New" button is shown
    pub show_new: bool,
}

/// View selection plus the breakdown-only edit sub-state.
///
/// Edit-mode can only be on while the breakdown view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    editing: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Breakdown,
            editing: false,
        }
    }
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Switch views. Always leaves edit-mode, including when re-selecting
    /// the breakdown view.
    pub fn select(&mut self, mode: ViewMode) {
        log::debug!("View {} -> {}", self.mode, mode);
        self.mode = mode;
        self.editing = false;
    }

    /// Flip edit-mode. Returns the new edit flag.
    pub fn toggle_edit(&mut self) -> Result<bool, TrackerError> {
        if self.mode != ViewMode::Breakdown {
            return Err(TrackerError::EditingUnavailable);
        }
        self.editing = !self.editing;
        Ok(self.editing)
    }

    pub fn affordances(&self) -> Affordances {
        Affordances {
            edit_label: if self.editing { "Done" } else { "Edit" },
            show_new: self.mode == ViewMode::Breakdown && self.editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.mode(), ViewMode::Breakdown);
        assert!(!state.is_editing());
        assert_eq!(
            state.affordances(),
            Affordances {
                edit_label: "Edit",
                show_new: false
            }
        );
    }

    #[test]
    fn test_toggle_edit_in_breakdown() {
        let mut state = ViewState::default();
        assert_eq!(state.toggle_edit(), Ok(true));
        assert!(state.affordances().show_new);
        assert_eq!(state.affordances().edit_label, "Done");
        assert_eq!(state.toggle_edit(), Ok(false));
        assert!(!state.affordances().show_new);
    }

    #[test]
    fn test_toggle_edit_refused_outside_breakdown() {
        let mut state = ViewState::default();
        state.select(ViewMode::Daily);
        assert_eq!(state.toggle_edit(), Err(TrackerError::EditingUnavailable));
        assert!(!state.is_editing());
    }

    #[test]
    fn test_view_switch_clears_edit_mode() {
        let mut state = ViewState::default();
        state.toggle_edit().unwrap();
        state.select("weekly".parse().unwrap());
        assert!(!state.is_editing());
        state.select("breakdown".parse().unwrap());
        assert_eq!(state.mode(), ViewMode::Breakdown);
        assert!(!state.is_editing());
    }

    #[test]
    fn test_parse_view_ids() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.id().parse::<ViewMode>().unwrap(), mode);
        }
        assert_eq!(
            "monthly".parse::<ViewMode>(),
            Err(TrackerError::UnknownView("monthly".to_string()))
        );
    }
}
