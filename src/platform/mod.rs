//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Query string and navigation
//! - Viewport size
//! - Time
//! - Opening external links
//! - Storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;

use glam::Vec2;

use crate::consts::FALLBACK_VIEWPORT;

/// Raw `location.search` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn query_string() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Full `location.href` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn location_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

/// Navigate the current tab (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            log::warn!("Navigation to {} failed: {:?}", url, e);
        }
    }
}

/// Inner window size in CSS pixels (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn viewport() -> Vec2 {
    let size = web_sys::window().and_then(|w| {
        let width = w.inner_width().ok()?.as_f64()?;
        let height = w.inner_height().ok()?.as_f64()?;
        Some(Vec2::new(width as f32, height as f32))
    });
    size.unwrap_or_else(|| Vec2::from(FALLBACK_VIEWPORT))
}

/// Milliseconds since the epoch (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Open `url` in a new browsing context (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn open_external(url: &str) {
    let opened = web_sys::window().map(|w| w.open_with_url_and_target(url, "_blank"));
    match opened {
        Some(Ok(_)) => log::info!("Opened share link"),
        Some(Err(e)) => log::warn!("window.open failed: {:?}", e),
        None => {}
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn query_string() -> String {
    String::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn location_href() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate(url: &str) {
    log::info!("Would navigate to {}", url);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport() -> Vec2 {
    Vec2::from(FALLBACK_VIEWPORT)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_external(url: &str) {
    log::info!("Would open {}", url);
}
