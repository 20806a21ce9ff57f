//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::Window;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Current wall-clock time in Unix milliseconds.
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL hash (without the '#' prefix), percent-decoded.
pub fn get_hash() -> String {
    let raw = window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    let trimmed = raw.trim_start_matches('#');
    js_sys::decode_uri_component(trimmed)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Replace the URL hash without adding to browser history.
pub fn replace_hash(path: &str) {
    let encoded: String = js_sys::encode_uri(path).into();
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("#{encoded}")),
        );
    }
}
