//! Add/edit/delete workflow behind the category form.
//!
//! A session exists only while the form is open. Submitting validates the raw
//! form input and, on success, applies exactly one mutation to the
//! [`CategoryStore`] and closes the session. Rejected input leaves both the
//! store and the session untouched so the user can correct it.

use crate::category::{CategoryStore, UsageCategory};
use crate::error::{Result, TrackerError, ValidationError};
use serde::Serialize;

/// Question asked before a category is deleted.
pub const DELETE_PROMPT: &str = "Delete this category from the chart?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Add,
    Edit,
}

/// State of the open form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub mode: EditMode,
    /// Category being edited; `None` for add sessions
    pub target: Option<usize>,
    /// Label field content
    pub label: String,
    /// Value field content, unparsed
    pub value: String,
}

impl EditSession {
    pub fn title(&self) -> &'static str {
        match self.mode {
            EditMode::Add => "Add usage category",
            EditMode::Edit => "Edit usage category",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Add => "Add",
            EditMode::Edit => "Save",
        }
    }

    pub fn can_delete(&self) -> bool {
        self.mode == EditMode::Edit
    }
}

/// Yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a finished workflow step did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Added(usize),
    Updated(usize),
    Removed(UsageCategory),
    /// Delete was declined at the confirmation gate; nothing changed
    Declined,
}

/// Parse the value field: a finite number strictly greater than zero.
pub fn parse_value(raw: &str) -> std::result::Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(value)
}

/// Validate both form fields, returning the trimmed label and parsed value.
pub fn validate(label: &str, raw_value: &str) -> std::result::Result<(String, f64), ValidationError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    let value = parse_value(raw_value)?;
    Ok((label.to_string(), value))
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EditWorkflow {
    session: Option<EditSession>,
}

impl EditWorkflow {
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Open a blank add form.
    pub fn open_add(&mut self) {
        self.session = Some(EditSession {
            mode: EditMode::Add,
            target: None,
            label: String::new(),
            value: String::new(),
        });
    }

    /// Open the form pre-filled from the category at `index`.
    pub fn open_edit(&mut self, store: &CategoryStore, index: usize) -> Result<()> {
        let category = store.get(index)?;
        self.session = Some(EditSession {
            mode: EditMode::Edit,
            target: Some(index),
            label: category.label().to_string(),
            value: category.value().to_string(),
        });
        Ok(())
    }

    /// Validate and apply the form.
    ///
    /// A validation failure keeps the session open with the submitted text.
    /// A stale edit target closes the session and reports `OutOfRange`.
    pub fn submit(&mut self, store: &mut CategoryStore, label: &str, raw_value: &str) -> Result<Applied> {
        let session = self.session.as_mut().ok_or(TrackerError::NoSession)?;
        session.label = label.to_string();
        session.value = raw_value.to_string();

        let (label, value) = validate(label, raw_value)?;
        let applied = match (session.mode, session.target) {
            (EditMode::Add, _) => store.add(&label, value).map(Applied::Added),
            (EditMode::Edit, Some(index)) => store.update(index, &label, value).map(|_| Applied::Updated(index)),
            (EditMode::Edit, None) => Err(TrackerError::NoSession),
        };
        // Only a validation error keeps the form open
        if !matches!(applied, Err(TrackerError::Validation(_))) {
            self.session = None;
        }
        applied
    }

    /// Delete the edited category after the user confirms.
    pub fn request_delete(&mut self, store: &mut CategoryStore, confirm: &mut dyn Confirm) -> Result<Applied> {
        let session = self.session.as_ref().ok_or(TrackerError::NoSession)?;
        let index = match (session.mode, session.target) {
            (EditMode::Edit, Some(index)) => index,
            _ => return Err(TrackerError::NotEditing),
        };
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(Applied::Declined);
        }
        self.session = None;
        store.remove(index).map(Applied::Removed)
    }

    /// Close the form without touching the store. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}
