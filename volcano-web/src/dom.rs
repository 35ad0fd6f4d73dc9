use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::error::DomError;

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns [`DomError::NoWindow`] outside a browser context.
pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when no window or document is available.
pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Look up an element by id and cast it to the expected element type.
///
/// # Errors
/// Returns an error if the element is missing or has a different type.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongType {
            id: id.to_string(),
            expected,
        })
}

/// Add or remove the hiding class on an element.
pub fn set_hidden(element: &Element, hidden_class: &str, hidden: bool) {
    let classes = element.class_list();
    let result = if hidden {
        classes.add_1(hidden_class)
    } else {
        classes.remove_1(hidden_class)
    };
    if let Err(err) = result {
        log::warn!("toggling .{hidden_class} failed: {}", js_error_message(&err));
    }
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Whether the page was opened with `test=1` in its query string.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .ok()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| search.contains("test=1"))
}
