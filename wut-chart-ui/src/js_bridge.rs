//! Typed wrappers around the few browser APIs the chart needs.
//!
//! Element lookups fail with a [`TrackerError::Surface`] naming the missing id
//! instead of panicking deep inside an event handler.

use wasm_bindgen::{JsCast, JsValue};
use wut_core::TrackerError;

/// Look up `#id` and cast it to the expected element type.
pub fn element_by_id<T: JsCast>(id: &str) -> Result<T, TrackerError> {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .ok_or_else(|| TrackerError::Surface(format!("element #{} not found", id)))?;
    element
        .dyn_into::<T>()
        .map_err(|_| TrackerError::Surface(format!("element #{} has an unexpected type", id)))
}

/// Blocking yes/no browser dialog. Anything but an explicit "OK" is a no.
pub fn confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}

/// Render a JS exception for logs.
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
