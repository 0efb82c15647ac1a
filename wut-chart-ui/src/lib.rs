//! Dioxus components and browser backends for the water usage chart.
//!
//! This crate provides:
//! - `canvas`: Canvas 2D implementation of the core drawing surface
//! - `audio`: Web Audio output for interaction feedback
//! - `js_bridge`: Typed wrappers for DOM lookups and dialogs
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: RSX components (view menu, canvas, legend, edit form)

pub mod audio;
pub mod canvas;
pub mod components;
pub mod js_bridge;
pub mod state;
