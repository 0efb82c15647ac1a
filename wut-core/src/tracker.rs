//! Owned application state for one chart instance.
//!
//! `WaterTracker` bundles the category store, view state, edit workflow and
//! feedback sink behind a single construction point. Input handlers translate
//! user events into the command methods below; each command reports whether a
//! redraw is owed via [`Redraw`], and the caller honours it with
//! [`WaterTracker::render`].

use crate::category::{CategoryStore, UsageCategory};
use crate::config::ChartConfig;
use crate::edit::{Applied, Confirm, EditSession, EditWorkflow};
use crate::error::{Result, TrackerError, ValidationError};
use crate::feedback::{Cue, FeedbackEvent, FeedbackSink};
use crate::geometry::{compute_wedges, hit_test, PieLayout, Point};
use crate::render::{self, LegendEntry, Summary};
use crate::series::{daily_series, weekly_series};
use crate::surface::Surface;
use crate::view::{Affordances, ViewMode, ViewState};
use serde::Serialize;

/// Redraw obligation returned by every command.
#[must_use = "a Full redraw must be followed by WaterTracker::render"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Full,
    Unchanged,
}

impl Redraw {
    pub fn is_needed(&self) -> bool {
        *self == Redraw::Full
    }
}

/// A broken index invariant: fatal in debug builds, logged and ignored in release.
fn invariant_violated(context: &str, err: &TrackerError) {
    if cfg!(debug_assertions) {
        panic!("{}: {}", context, err);
    }
    log::error!("{}: {}", context, err);
}

/// Transient summary override until the next state change.
#[derive(Debug, Clone, PartialEq)]
enum Overlay {
    /// A tapped wedge, highlighted on the pie
    Selected(usize),
    Notice(Summary),
}

/// Everything the UI shows next to the canvas after a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub view: ViewMode,
    pub editing: bool,
    pub summary: Summary,
    /// Empty outside the breakdown view
    pub legend: Vec<LegendEntry>,
    pub affordances: Affordances,
    /// Open form, if any
    pub session: Option<EditSession>,
}

pub struct WaterTracker<S> {
    config: ChartConfig,
    store: CategoryStore,
    view: ViewState,
    edit: EditWorkflow,
    overlay: Option<Overlay>,
    sink: S,
}

impl<S: FeedbackSink> WaterTracker<S> {
    /// Validate `config` and build the initial state (breakdown view, not editing).
    pub fn new(config: ChartConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: CategoryStore::from_config(&config),
            config,
            view: ViewState::default(),
            edit: EditWorkflow::default(),
            overlay: None,
            sink,
        })
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn categories(&self) -> &[UsageCategory] {
        self.store.categories()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.edit.session()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn layout(&self) -> PieLayout {
        let (x, y) = self.config.center();
        PieLayout {
            center: Point::new(x, y),
            radius: self.config.radius,
            hit_slack: self.config.hit_slack,
        }
    }

    /// Menu selection by view id ("breakdown", "weekly", "daily").
    pub fn select_view(&mut self, id: &str) -> Result<Redraw> {
        let mode: ViewMode = id.parse()?;
        self.edit.cancel();
        self.view.select(mode);
        self.overlay = None;
        self.sink.emit(FeedbackEvent::new(Cue::Navigate(mode)));
        Ok(Redraw::Full)
    }

    /// Edit/Done button.
    pub fn toggle_edit(&mut self) -> Redraw {
        self.sink.emit(FeedbackEvent::new(Cue::ModeToggle));
        match self.view.toggle_edit() {
            Ok(editing) => {
                log::debug!("Edit mode {}", if editing { "on" } else { "off" });
                if !editing && self.edit.cancel() {
                    log::debug!("Closed the open form on leaving edit mode");
                }
                self.overlay = None;
            }
            Err(e) => {
                log::warn!("{}", e);
                self.overlay = Some(Overlay::Notice(render::editing_unavailable_summary()));
            }
        }
        Redraw::Full
    }

    /// New button: opens a blank add form while editing the breakdown.
    pub fn press_new(&mut self) -> Redraw {
        if !self.view.affordances().show_new {
            log::warn!("New is only available in breakdown edit mode");
            return Redraw::Unchanged;
        }
        self.sink.emit(FeedbackEvent::new(Cue::PopupOpen));
        self.edit.open_add();
        Redraw::Full
    }

    /// Pointer click at `point`, relative to the surface origin.
    pub fn click(&mut self, point: Point) -> Redraw {
        if self.edit.is_open() {
            return Redraw::Unchanged;
        }
        match self.view.mode() {
            ViewMode::Breakdown => self.click_pie(point),
            mode => {
                self.sink.emit(FeedbackEvent::with_intensity(Cue::Tap, 0.35));
                self.overlay = Some(Overlay::Notice(render::chart_tap_summary(mode)));
                Redraw::Full
            }
        }
    }

    fn click_pie(&mut self, point: Point) -> Redraw {
        let wedges = compute_wedges(self.store.categories());
        let Some(index) = hit_test(point, &self.layout(), &wedges) else {
            return Redraw::Unchanged;
        };
        let pct = match self.store.percentage(index) {
            Ok(pct) => pct,
            Err(e) => {
                invariant_violated("Hit wedge without a category", &e);
                return Redraw::Unchanged;
            }
        };

        self.overlay = Some(Overlay::Selected(index));
        if self.view.is_editing() {
            self.sink.emit(FeedbackEvent::new(Cue::PopupOpen));
            if let Err(e) = self.edit.open_edit(&self.store, index) {
                invariant_violated("Could not open editor", &e);
            }
        } else {
            self.sink.emit(FeedbackEvent::percent_tap(pct));
        }
        Redraw::Full
    }

    /// Save/Add button. Invalid input is handed back for display and keeps
    /// the form open.
    pub fn submit(&mut self, label: &str, raw_value: &str) -> std::result::Result<Redraw, ValidationError> {
        match self.edit.submit(&mut self.store, label, raw_value) {
            Ok(applied) => {
                log::debug!("Applied {:?}", applied);
                self.sink.emit(FeedbackEvent::new(Cue::Reward));
                self.overlay = None;
                Ok(Redraw::Full)
            }
            Err(TrackerError::Validation(e)) => Err(e),
            Err(TrackerError::NoSession) => {
                log::warn!("Submit without an open form");
                Ok(Redraw::Unchanged)
            }
            Err(e) => {
                invariant_violated("Submit dropped", &e);
                self.overlay = None;
                Ok(Redraw::Full)
            }
        }
    }

    /// Delete button, gated by `confirm`.
    pub fn request_delete(&mut self, confirm: &mut dyn Confirm) -> Redraw {
        match self.edit.request_delete(&mut self.store, confirm) {
            Ok(Applied::Declined) => Redraw::Unchanged,
            Ok(applied) => {
                log::debug!("Applied {:?}", applied);
                self.sink.emit(FeedbackEvent::new(Cue::Delete));
                self.overlay = None;
                Redraw::Full
            }
            Err(e @ (TrackerError::NoSession | TrackerError::NotEditing)) => {
                log::warn!("{}", e);
                Redraw::Unchanged
            }
            Err(e) => {
                invariant_violated("Delete dropped", &e);
                self.overlay = None;
                Redraw::Full
            }
        }
    }

    /// Cancel button.
    pub fn cancel(&mut self) -> Redraw {
        self.close_form(0.25)
    }

    /// Click on the modal backdrop.
    pub fn dismiss(&mut self) -> Redraw {
        self.close_form(0.20)
    }

    fn close_form(&mut self, intensity: f64) -> Redraw {
        if !self.edit.cancel() {
            return Redraw::Unchanged;
        }
        self.sink.emit(FeedbackEvent::with_intensity(Cue::Tap, intensity));
        Redraw::Full
    }

    fn highlight(&self) -> Option<usize> {
        match self.overlay {
            Some(Overlay::Selected(index)) => Some(index),
            _ => None,
        }
    }

    /// Summary, legend and affordances for the current state, without drawing.
    pub fn frame(&self) -> Frame {
        let mode = self.view.mode();
        let editing = self.view.is_editing();
        let summary = match &self.overlay {
            Some(Overlay::Notice(summary)) => Some(summary.clone()),
            Some(Overlay::Selected(index)) => self.store.get(*index).ok().map(|category| {
                let pct = self.store.percentage(*index).unwrap_or(0);
                render::selection_summary(category, pct, editing)
            }),
            None => None,
        };
        let summary = summary.unwrap_or_else(|| match mode {
            ViewMode::Breakdown => render::breakdown_summary(editing),
            ViewMode::Weekly => render::weekly_summary(&weekly_series()),
            ViewMode::Daily => render::daily_summary(),
        });
        let legend = match mode {
            ViewMode::Breakdown => render::legend(&self.store),
            _ => Vec::new(),
        };
        Frame {
            view: mode,
            editing,
            summary,
            legend,
            affordances: self.view.affordances(),
            session: self.edit.session().cloned(),
        }
    }

    /// Full redraw of the active view onto `surface`.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Frame {
        match self.view.mode() {
            ViewMode::Breakdown => {
                render::draw_pie(surface, &self.store, &self.config, self.highlight());
                self.sink.usage_changed(self.store.total());
            }
            ViewMode::Weekly => render::draw_weekly(surface, &weekly_series(), &self.config),
            ViewMode::Daily => render::draw_daily(surface, &daily_series(), &self.config),
        }
        self.frame()
    }
}
