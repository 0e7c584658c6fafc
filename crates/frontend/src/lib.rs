pub mod app;
pub mod domain;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

/// Element the editor mounts into, when present on the page.
pub const EDITOR_ROOT_ID: &str = "tab-sets-editor";

/// Wire tab containers added to the page after startup.
/// Returns how many containers were newly wired.
#[wasm_bindgen]
pub fn mount_embeds() -> usize {
    shared::tab_widget::embed::mount_all()
}

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let editor_root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(EDITOR_ROOT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(root) = editor_root {
        leptos::mount::mount_to(root, app::App).forget();
    }

    mount_embeds();
}
