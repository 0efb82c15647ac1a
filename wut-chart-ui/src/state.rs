//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The tracker itself is plain Rust state; components never touch it directly
//! but go through [`AppState::dispatch`], which bumps `revision` whenever a
//! command owes a redraw. The app's redraw effect subscribes to `revision`.

use crate::audio::WebAudioOutput;
use crate::canvas::CanvasSurface;
use crate::js_bridge;
use dioxus::prelude::*;
use wut_core::feedback::ToneSink;
use wut_core::geometry::Point;
use wut_core::{Frame, Redraw, ViewMode, WaterTracker};

/// Tracker wired to browser audio.
pub type Tracker = WaterTracker<ToneSink<WebAudioOutput>>;

/// DOM id of the chart canvas.
pub const CANVAS_ID: &str = "water-chart";

/// Shared application state for the water usage chart.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Tracker instance (None until initialized)
    pub tracker: Signal<Option<Tracker>>,
    /// Canvas bound once on mount
    pub surface: Signal<Option<CanvasSurface>>,
    /// Result of the last render pass
    pub frame: Signal<Option<Frame>>,
    /// Bumped once per owed redraw
    pub revision: Signal<u64>,
    /// Form label field
    pub label_input: Signal<String>,
    /// Form value field
    pub value_input: Signal<String>,
    /// Validation message shown inside the form
    pub form_error: Signal<Option<String>>,
    /// Whether the view dropdown is expanded
    pub menu_open: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            tracker: Signal::new(None),
            surface: Signal::new(None),
            frame: Signal::new(None),
            revision: Signal::new(0),
            label_input: Signal::new(String::new()),
            value_input: Signal::new(String::new()),
            form_error: Signal::new(None),
            menu_open: Signal::new(false),
            error_msg: Signal::new(None),
        }
    }

    /// Install a freshly built tracker and its bound canvas, then schedule
    /// the first draw.
    pub fn install(&mut self, tracker: Tracker, surface: CanvasSurface) {
        self.tracker.set(Some(tracker));
        self.surface.set(Some(surface));
        *self.revision.write() += 1;
    }

    /// Run one tracker command and honour its redraw obligation.
    pub fn dispatch(&mut self, command: impl FnOnce(&mut Tracker) -> Redraw) {
        let (redraw, opened, closed) = {
            let mut guard = self.tracker.write();
            let Some(tracker) = guard.as_mut() else {
                log::warn!("Command before the tracker was ready");
                return;
            };
            let was_open = tracker.session().is_some();
            let redraw = command(tracker);
            let session = tracker.session().cloned();
            let closed = was_open && session.is_none();
            let opened = if was_open { None } else { session };
            (redraw, opened, closed)
        };

        if let Some(session) = opened {
            self.label_input.set(session.label);
            self.value_input.set(session.value);
            self.form_error.set(None);
        }
        if closed {
            self.form_error.set(None);
        }
        if redraw.is_needed() {
            *self.revision.write() += 1;
        }
    }

    pub fn select_view(&mut self, mode: ViewMode) {
        self.menu_open.set(false);
        self.dispatch(|tracker| {
            tracker.select_view(mode.id()).unwrap_or_else(|e| {
                log::error!("{}", e);
                Redraw::Unchanged
            })
        });
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.dispatch(|tracker| tracker.click(Point::new(x, y)));
    }

    /// Submit the form fields. A rejected value stays in the form with its message.
    pub fn submit(&mut self) {
        let label = self.label_input.read().clone();
        let value = self.value_input.read().clone();
        let mut rejected = None;
        self.dispatch(|tracker| match tracker.submit(&label, &value) {
            Ok(redraw) => redraw,
            Err(e) => {
                rejected = Some(e.to_string());
                Redraw::Unchanged
            }
        });
        if rejected.is_some() {
            self.form_error.set(rejected);
        }
    }

    pub fn delete(&mut self) {
        self.dispatch(|tracker| {
            let mut ask = |prompt: &str| js_bridge::confirm(prompt);
            tracker.request_delete(&mut ask)
        });
    }

    /// Draw the active view onto the canvas and publish the resulting frame.
    pub fn redraw(&mut self) {
        let frame = {
            let mut surface = self.surface.write();
            let mut tracker = self.tracker.write();
            let (Some(surface), Some(tracker)) = (surface.as_mut(), tracker.as_mut()) else {
                return;
            };
            tracker.render(surface)
        };
        self.frame.set(Some(frame));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
