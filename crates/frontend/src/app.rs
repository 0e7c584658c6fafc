use crate::domain::a001_tab_set::ui::page::TabSetsPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <TabSetsPage />
    }
}
