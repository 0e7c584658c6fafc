use super::editor::{TabSetEditor, TabSetEditorVm};
use super::list::TabSetList;
use contracts::domain::a001_tab_set::TabSetId;
use leptos::prelude::*;
use std::collections::HashMap;

/// `?edit=<id>` opens that set right away.
pub fn edit_target(search: &str) -> Option<TabSetId> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("edit")
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(TabSetId::new)
}

#[component]
#[allow(non_snake_case)]
pub fn TabSetsPage() -> impl IntoView {
    let vm = TabSetEditorVm::new();
    provide_context(vm);

    vm.load_summaries();
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    if let Some(id) = edit_target(&search) {
        vm.open_set(id);
    }

    view! {
        <div class="tab-sets-page">
            <h1>"Custom Tabs Editor"</h1>
            <p class="description">
                "Create and manage tabbed content. Embed with the shortcode "
                <code>"[custom_tabs id=\"your-id\"]"</code>
                " on any page or post."
            </p>
            <div class="tab-sets-layout">
                <TabSetList />
                <div class="tab-sets-main">
                    <TabSetEditor />
                </div>
            </div>
        </div>
    }
}
