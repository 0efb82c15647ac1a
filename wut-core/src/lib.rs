//! Core of the household water usage chart.
//!
//! This crate provides:
//! - `category`: usage categories and the store that owns them
//! - `geometry`: pie wedge spans and hit-testing
//! - `view`: active view and breakdown edit-mode
//! - `render`: stateless renderers for the pie, weekly and daily views
//! - `edit`: the add/edit/delete form workflow
//! - `feedback`: pluggable interaction sounds
//! - `tracker`: owned application state tying it all together
//!
//! Nothing here touches the DOM; drawing goes through [`surface::Surface`].

pub mod category;
pub mod config;
pub mod edit;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod render;
pub mod series;
pub mod surface;
pub mod tracker;
pub mod view;

pub use category::{CategoryStore, Color, UsageCategory};
pub use config::ChartConfig;
pub use error::{Result, TrackerError, ValidationError};
pub use tracker::{Frame, Redraw, WaterTracker};
pub use view::ViewMode;
