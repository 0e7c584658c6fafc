use super::state::{NavKey, TabWidgetState, WidgetIds};
use contracts::domain::a001_tab_set::Tab;
use leptos::html::Button;
use leptos::prelude::*;

pub const EMPTY_PREVIEW: &str = "Add tabs to see a preview.";

/// Tab widget rendered from a list of tabs.
///
/// Every new tab list mounts a fresh instance with its own ids and selection,
/// so the previous instance's listeners and state go away with its nodes.
#[component]
#[allow(non_snake_case)]
pub fn TabWidget(
    #[prop(into)] tabs: Signal<Vec<Tab>>,
    #[prop(into, optional)] label: Signal<String>,
) -> impl IntoView {
    move || {
        let tabs = tabs.get();
        if tabs.is_empty() {
            view! { <p class="tabs-preview__empty">{EMPTY_PREVIEW}</p> }.into_any()
        } else {
            view! { <TabWidgetInstance tabs=tabs label=label /> }.into_any()
        }
    }
}

fn focus_tab(refs: &[NodeRef<Button>], index: usize) {
    if let Some(button) = refs.get(index).and_then(|r| r.get()) {
        let _ = button.focus();
    }
}

#[component]
#[allow(non_snake_case)]
fn TabWidgetInstance(tabs: Vec<Tab>, label: Signal<String>) -> impl IntoView {
    let ids = WidgetIds::allocate("tabs-preview");
    // Initial selection does not move focus; only user activation does.
    let state = RwSignal::new(TabWidgetState::new(tabs.len(), None));
    let refs = StoredValue::new(
        (0..tabs.len())
            .map(|_| NodeRef::<Button>::new())
            .collect::<Vec<_>>(),
    );

    let activate = move |index: usize| {
        let mut changed = false;
        state.update(|s| changed = s.activate(index));
        if changed {
            refs.with_value(|r| focus_tab(r, index));
        }
    };

    let on_key = move |ev: web_sys::KeyboardEvent| {
        let Some(key) = NavKey::from_key(&ev.key()) else {
            return;
        };
        ev.prevent_default();
        let mut target = None;
        state.update(|s| target = s.navigate(key));
        if let Some(index) = target {
            refs.with_value(|r| focus_tab(r, index));
        }
    };

    let buttons = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let node_ref = refs.with_value(|r| r[i]);
            view! {
                <button
                    type="button"
                    class="tabs__tab"
                    role="tab"
                    id=ids.tab_id(i)
                    aria-controls=ids.panel_id(i)
                    aria-selected=move || state.get().is_selected(i).to_string()
                    tabindex=move || state.get().tab_index(i).to_string()
                    node_ref=node_ref
                    on:click=move |_| activate(i)
                    on:keydown=on_key
                >
                    {tab.title.clone()}
                </button>
            }
        })
        .collect_view();

    let panels = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            view! {
                <div
                    class="tabs__panel"
                    role="tabpanel"
                    id=ids.panel_id(i)
                    aria-labelledby=ids.tab_id(i)
                    tabindex="0"
                    hidden=move || !state.get().is_selected(i)
                    inner_html=tab.content.clone()
                ></div>
            }
        })
        .collect_view();

    view! {
        <div class="tabs tabs--preview">
            <div class="tabs__tablist" role="tablist" aria-label=move || label.get()>
                {buttons}
            </div>
            {panels}
        </div>
    }
}
