//! Clipboard access through the Web Clipboard API.

use wasm_bindgen_futures::spawn_local;

/// Copy text to the system clipboard, then run `on_success`.
///
/// Failures (no window, permission denied) are silent; the callback simply
/// does not run.
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_success: F)
where
    F: FnOnce() + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await {
            Ok(_) => on_success(),
            Err(e) => log::warn!("clipboard write failed: {:?}", e),
        }
    });
}
