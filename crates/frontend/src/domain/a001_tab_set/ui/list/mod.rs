//! Sidebar with every stored tab set.

use crate::domain::a001_tab_set::ui::editor::TabSetEditorVm;
use crate::shared::icons::icon;
use contracts::domain::a001_tab_set::TabSetSummary;
use leptos::prelude::*;
use thaw::*;

pub const EMPTY_LIST: &str = "No tab sets yet. Create one!";

#[component]
#[allow(non_snake_case)]
pub fn TabSetList() -> impl IntoView {
    let vm = use_context::<TabSetEditorVm>().expect("TabSetEditorVm not found");

    view! {
        <div class="tab-sets-sidebar">
            <h2>"Tab Sets"</h2>
            <ul class="tab-sets-list">
                <Show
                    when=move || !vm.summaries.with(|s| s.is_empty())
                    fallback=move || view! {
                        <Show when=move || vm.summaries_loaded.get()>
                            <li class="tab-sets-list__empty">{EMPTY_LIST}</li>
                        </Show>
                    }
                >
                    <For
                        each=move || vm.summaries.get()
                        key=|s: &TabSetSummary| (s.id.clone(), s.name.clone(), s.tab_count)
                        children=move |summary| view! { <TabSetListItem summary=summary /> }
                    />
                </Show>
            </ul>
            <Button
                appearance=ButtonAppearance::Primary
                attr:style="margin-top: 12px; width: 100%;"
                on_click=move |_| vm.new_set()
            >
                "+ Create New Tab Set"
            </Button>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn TabSetListItem(summary: TabSetSummary) -> impl IntoView {
    let vm = use_context::<TabSetEditorVm>().expect("TabSetEditorVm not found");
    let id = summary.id.clone();
    let count_label = summary.tab_count_label();

    let item_class = {
        let id = id.clone();
        move || {
            if vm.open.get() && vm.current_id().as_ref() == Some(&id) {
                "tab-sets-list__item tab-sets-list__item--active"
            } else {
                "tab-sets-list__item"
            }
        }
    };
    let is_deleting = {
        let id = id.clone();
        Signal::derive(move || vm.is_deleting(&id))
    };
    let on_edit = {
        let id = id.clone();
        move |_| vm.open_set(id.clone())
    };
    let on_delete = move |_| vm.delete(id.clone());

    view! {
        <li class=item_class>
            <div class="tab-sets-list__info">
                <strong class="tab-sets-list__name">{summary.name.clone()}</strong>
                <code class="tab-sets-list__shortcode">{summary.shortcode.clone()}</code>
                <span class="tab-sets-list__count">{count_label}</span>
            </div>
            <div class="tab-sets-list__actions">
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=on_edit>
                    {icon("edit")}
                    " Edit"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    disabled=is_deleting
                    on_click=on_delete
                >
                    {icon("delete")}
                    " Delete"
                </Button>
            </div>
        </li>
    }
}
