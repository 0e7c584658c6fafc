//! Wires the tab widget onto server-rendered markup.
//!
//! Expected structure inside each `[data-tabs]` container: one
//! `[data-tab-list]` holding `[data-tab]` buttons, and `[data-tab-panel]`
//! elements in the same order. Only complete tab/panel pairs are wired; extra
//! tabs or panels are left as they are.

use super::state::{NavKey, TabWidgetState, WidgetIds};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent as WebMouseEvent};

const MOUNTED_ATTR: &str = "data-tabs-mounted";

fn collect(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

struct Mounted {
    tabs: Vec<HtmlElement>,
    panels: Vec<HtmlElement>,
    state: RefCell<TabWidgetState>,
}

impl Mounted {
    fn apply(&self) {
        let state = self.state.borrow();
        for i in 0..state.count() {
            let selected = state.is_selected(i);
            let _ = self.tabs[i].set_attribute("aria-selected", &selected.to_string());
            let _ = self.tabs[i].set_attribute("tabindex", &state.tab_index(i).to_string());
            if selected {
                let _ = self.panels[i].remove_attribute("hidden");
            } else {
                let _ = self.panels[i].set_attribute("hidden", "");
            }
        }
    }

    fn index_of(&self, target: &Element) -> Option<usize> {
        let tab = target.closest("[data-tab]").ok().flatten()?;
        let count = self.state.borrow().count();
        self.tabs[..count]
            .iter()
            .position(|t| AsRef::<Element>::as_ref(t) == &tab)
    }

    fn focus(&self, index: usize) {
        if let Some(tab) = self.tabs.get(index) {
            let _ = tab.focus();
        }
    }
}

/// Wire one container. Returns `false` if it was already wired.
pub fn mount(container: &Element) -> bool {
    if container.has_attribute(MOUNTED_ATTR) {
        return false;
    }
    let _ = container.set_attribute(MOUNTED_ATTR, "true");

    let Ok(Some(tab_list)) = container.query_selector("[data-tab-list]") else {
        log::warn!("tab container without [data-tab-list], skipped");
        return true;
    };
    let tabs = collect(&tab_list, "[data-tab]");
    let panels = collect(container, "[data-tab-panel]");
    let initial = tabs.iter().position(|t| t.has_attribute("data-tab-init"));
    let state = TabWidgetState::for_pairs(tabs.len(), panels.len(), initial);
    if !state.needs_wiring() {
        log::debug!("tab container without tab/panel pairs, skipped");
        return true;
    }

    let base = container.get_attribute("data-tabs").unwrap_or_default();
    let ids = WidgetIds::allocate(&base);

    let _ = tab_list.set_attribute("role", "tablist");
    for i in 0..state.count() {
        let tab = &tabs[i];
        let panel = &panels[i];
        tab.set_id(&ids.tab_id(i));
        let _ = tab.set_attribute("role", "tab");
        let _ = tab.set_attribute("aria-controls", &ids.panel_id(i));
        panel.set_id(&ids.panel_id(i));
        let _ = panel.set_attribute("role", "tabpanel");
        let _ = panel.set_attribute("aria-labelledby", &ids.tab_id(i));
        let _ = panel.set_attribute("tabindex", "0");
    }

    let mounted = Rc::new(Mounted {
        tabs,
        panels,
        state: RefCell::new(state),
    });
    mounted.apply();

    // One delegated listener per event on the tab list.
    let on_click = {
        let mounted = Rc::clone(&mounted);
        Closure::wrap(Box::new(move |e: WebMouseEvent| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(index) = mounted.index_of(&target) else {
                return;
            };
            let changed = mounted.state.borrow_mut().activate(index);
            if changed {
                mounted.apply();
                mounted.focus(index);
            }
        }) as Box<dyn FnMut(WebMouseEvent)>)
    };

    let on_keydown = {
        let mounted = Rc::clone(&mounted);
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let Some(key) = NavKey::from_key(&e.key()) else {
                return;
            };
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if mounted.index_of(&target).is_none() {
                return;
            }
            e.prevent_default();
            let target = mounted.state.borrow_mut().navigate(key);
            if let Some(index) = target {
                mounted.apply();
                mounted.focus(index);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };

    let _ = tab_list.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    let _ =
        tab_list.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    // Listeners live as long as the page.
    on_click.forget();
    on_keydown.forget();
    true
}

/// Wire every `[data-tabs]` container in the document that is not wired yet.
/// Returns how many were newly wired.
pub fn mount_all() -> usize {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return 0;
    };
    let Ok(containers) = document.query_selector_all("[data-tabs]") else {
        return 0;
    };
    let mut mounted = 0;
    for i in 0..containers.length() {
        let Some(container) = containers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if mount(&container) {
            mounted += 1;
        }
    }
    if mounted > 0 {
        log::debug!("wired {} tab container(s)", mounted);
    }
    mounted
}
