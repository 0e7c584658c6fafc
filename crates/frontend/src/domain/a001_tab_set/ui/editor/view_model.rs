//! Tab Set Editor - View Model
//!
//! One editing session: the tab list under edit, the drag in progress, the
//! persistence gateway and the sidebar summaries. Every command goes through
//! the pure state types in `domain::a001_tab_set`; this file only sequences
//! them with requests and timers.

use super::model;
use crate::domain::a001_tab_set::drag_reorder::{reconcile, DragEnd, DragReorder, DropHalf};
use crate::domain::a001_tab_set::gateway::{
    DeleteOutcome, GatewayError, LoadOutcome, PersistenceGateway, SaveOutcome, SaveStatus,
};
use crate::domain::a001_tab_set::tab_list::{RowKey, TabList, DEFAULT_CONTENT, DEFAULT_TITLE};
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use contracts::domain::a001_tab_set::{Tab, TabSetId, TabSetSummary};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Row fade-out before the row leaves the model.
pub const REMOVE_FADE_MS: u32 = 200;
pub const SAVED_FLASH_MS: u32 = 3000;
pub const COPIED_FLASH_MS: u32 = 2000;

pub const NEW_SET_TITLE: &str = "New Tab Set";
pub const DELETE_CONFIRM: &str = "Delete this tab set permanently? This cannot be undone.";

#[derive(Clone, Copy)]
pub struct TabSetEditorVm {
    pub list: RwSignal<TabList>,
    pub name: RwSignal<String>,
    pub gateway: RwSignal<PersistenceGateway>,
    pub drag: RwSignal<DragReorder>,
    /// Rows fading out, still in the model
    pub removing: RwSignal<Vec<RowKey>>,
    pub collapsed: RwSignal<Vec<RowKey>>,
    pub summaries: RwSignal<Vec<TabSetSummary>>,
    pub summaries_loaded: RwSignal<bool>,
    /// Editor shown instead of the placeholder
    pub open: RwSignal<bool>,
    pub warning: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub copied: RwSignal<bool>,
    /// Bumped when a row is appended so the view scrolls it into view
    pub appended: RwSignal<u64>,
}

impl TabSetEditorVm {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(TabList::new()),
            name: RwSignal::new(String::new()),
            gateway: RwSignal::new(PersistenceGateway::new()),
            drag: RwSignal::new(DragReorder::new()),
            removing: RwSignal::new(Vec::new()),
            collapsed: RwSignal::new(Vec::new()),
            summaries: RwSignal::new(Vec::new()),
            summaries_loaded: RwSignal::new(false),
            open: RwSignal::new(false),
            warning: RwSignal::new(None),
            error: RwSignal::new(None),
            copied: RwSignal::new(false),
            appended: RwSignal::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    fn reset_rows(&self, list: TabList) {
        self.list.set(list);
        self.drag.set(DragReorder::new());
        self.removing.set(Vec::new());
        self.collapsed.set(Vec::new());
        self.warning.set(None);
        self.error.set(None);
        self.copied.set(false);
    }

    /// Blocking message for rejected input; inline warning without a window.
    fn block(&self, message: String) {
        let shown = web_sys::window()
            .map(|w| w.alert_with_message(&message).is_ok())
            .unwrap_or(false);
        if !shown {
            self.warning.set(Some(message));
        }
    }

    pub fn new_set(&self) {
        self.gateway.update(|g| g.reset());
        self.name.set(String::new());
        self.reset_rows(TabList::starter());
        self.open.set(true);
    }

    pub fn cancel(&self) {
        self.gateway.update(|g| g.reset());
        self.name.set(String::new());
        self.reset_rows(TabList::new());
        self.open.set(false);
    }

    pub fn load_summaries(&self) {
        let vm = *self;
        spawn_local(async move {
            match model::fetch_summaries().await {
                Ok(items) => {
                    vm.summaries.set(items);
                    vm.summaries_loaded.set(true);
                }
                Err(e) => vm.error.set(Some(e)),
            }
        });
    }

    pub fn open_set(&self, id: TabSetId) {
        let Some(ticket) = self.gateway.try_update(|g| g.prepare_load(id)) else {
            return;
        };
        self.error.set(None);
        let vm = *self;
        spawn_local(async move {
            let result = model::fetch_tab_set(&ticket.id).await;
            let outcome = vm.gateway.try_update(|g| g.complete_load(ticket, result));
            match outcome {
                Some(LoadOutcome::Loaded(set)) => {
                    vm.name.set(set.name);
                    vm.reset_rows(TabList::from_tabs(set.tabs));
                    vm.open.set(true);
                }
                Some(LoadOutcome::Failed(failure)) => {
                    vm.error.set(Some(failure.message().to_string()));
                }
                Some(LoadOutcome::Discarded) | None => {
                    log::debug!("stale load response dropped");
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    pub fn add_tab(&self) {
        self.list.update(|l| {
            l.insert(DEFAULT_TITLE, DEFAULT_CONTENT, true);
        });
        self.warning.set(None);
        self.appended.update(|n| *n += 1);
    }

    /// Fade the row out, then remove it. Rows already fading count as gone,
    /// so the last visible row can never be removed.
    pub fn remove_tab(&self, key: RowKey) {
        if self.removing.with_untracked(|r| r.contains(&key)) {
            return;
        }
        let fading = self.removing.with_untracked(|r| r.len());
        if let Err(e) = self.list.with_untracked(|l| l.check_removal(fading)) {
            self.block(e.to_string());
            return;
        }
        self.warning.set(None);
        self.removing.update(|r| r.push(key));

        let vm = *self;
        spawn_local(async move {
            TimeoutFuture::new(REMOVE_FADE_MS).await;
            vm.removing.update(|r| r.retain(|k| *k != key));
            // Position is re-resolved now; the list may have moved meanwhile.
            let result = vm.list.try_update(|l| l.remove_key(key));
            if let Some(Err(e)) = result {
                vm.warning.set(Some(e.to_string()));
            }
        });
    }

    pub fn rename(&self, key: RowKey, title: String) {
        self.list.update(|l| {
            if let Some(i) = l.index_of(key) {
                let _ = l.rename_at(i, title);
            }
        });
    }

    pub fn set_content(&self, key: RowKey, content: String) {
        self.list.update(|l| {
            if let Some(i) = l.index_of(key) {
                let _ = l.set_content_at(i, content);
            }
        });
    }

    pub fn toggle_collapsed(&self, key: RowKey) {
        self.collapsed.update(|c| {
            if let Some(pos) = c.iter().position(|k| *k == key) {
                c.remove(pos);
            } else {
                c.push(key);
            }
        });
    }

    pub fn is_collapsed(&self, key: RowKey) -> bool {
        self.collapsed.with(|c| c.contains(&key))
    }

    pub fn is_removing(&self, key: RowKey) -> bool {
        self.removing.with(|r| r.contains(&key))
    }

    /// Row keys in on-screen order: the live drag order while dragging.
    pub fn visual_keys(&self) -> Vec<RowKey> {
        let dragged = self.drag.with(|d| d.visual_order().map(|o| o.to_vec()));
        match dragged {
            Some(order) => reconcile(&order, &self.list.with(|l| l.keys())),
            None => self.list.with(|l| l.keys()),
        }
    }

    /// "Tab N" label; follows the visual order so it is always 1..N.
    pub fn row_number(&self, key: RowKey) -> usize {
        self.visual_keys()
            .iter()
            .position(|k| *k == key)
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    pub fn row_title(&self, key: RowKey) -> String {
        self.list
            .with(|l| l.index_of(key).and_then(|i| l.get(i)).map(|r| r.title.clone()))
            .unwrap_or_default()
    }

    pub fn row_title_preview(&self, key: RowKey) -> String {
        self.list
            .with(|l| l.index_of(key).and_then(|i| l.display_title(i)))
            .unwrap_or_default()
    }

    pub fn row_content(&self, key: RowKey) -> String {
        self.list
            .with(|l| {
                l.index_of(key)
                    .and_then(|i| l.get(i))
                    .map(|r| r.content.clone())
            })
            .unwrap_or_default()
    }

    pub fn preview_tabs(&self) -> Vec<Tab> {
        self.list.with(|l| l.snapshot())
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    pub fn drag_start(&self, key: RowKey) -> bool {
        let order = self.list.with_untracked(|l| l.keys());
        self.drag
            .try_update(|d| d.start(key, order))
            .unwrap_or(false)
    }

    pub fn drag_over(&self, key: RowKey, half: DropHalf) {
        if self.drag.with_untracked(|d| d.is_dragging()) {
            self.drag.update(|d| {
                d.over(key, half);
            });
        }
    }

    pub fn drag_over_end(&self) {
        if self.drag.with_untracked(|d| d.is_dragging()) {
            self.drag.update(|d| {
                d.over_list_end();
            });
        }
    }

    /// `dropped` is false when the row was released outside the list.
    pub fn drag_end(&self, dropped: bool) {
        let Some(end) = self.drag.try_update(|d| d.end(dropped)) else {
            return;
        };
        if let DragEnd::Reordered(order) = end {
            self.list.update(|l| {
                let fitted = reconcile(&order, &l.keys());
                if let Err(e) = l.reorder(&fitted) {
                    log::warn!("drag result not applied: {}", e);
                }
            });
        }
    }

    pub fn dragged_key(&self) -> Option<RowKey> {
        self.drag.with(|d| d.subject())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn is_saving(&self) -> bool {
        self.gateway.with(|g| g.is_saving())
    }

    pub fn status(&self) -> SaveStatus {
        self.gateway.with(|g| g.status().clone())
    }

    pub fn current_id(&self) -> Option<TabSetId> {
        self.gateway.with(|g| g.current_id().cloned())
    }

    pub fn shortcode(&self) -> Option<String> {
        self.gateway.with(|g| g.current_id().map(|id| id.shortcode()))
    }

    pub fn editor_title(&self) -> String {
        let current = self.current_id();
        self.summaries
            .with(|items| editor_title(items, current.as_ref()))
    }

    pub fn save(&self) {
        let name = self.name.get_untracked();
        let tabs: Vec<Tab> = self.list.with_untracked(|l| {
            l.rows()
                .iter()
                .map(|r| Tab::new(r.title.clone(), r.content.clone()))
                .collect()
        });

        let prepared = self.gateway.try_update(|g| g.prepare_save(&name, &tabs));
        let ticket = match prepared {
            Some(Ok(ticket)) => ticket,
            Some(Err(GatewayError::Validation(e))) => {
                self.block(e.to_string());
                return;
            }
            Some(Err(GatewayError::SaveInFlight)) | None => return,
        };
        self.warning.set(None);
        self.error.set(None);

        let vm = *self;
        spawn_local(async move {
            let result = model::save_tab_set(&ticket.request).await;
            let outcome = vm.gateway.try_update(|g| g.complete_save(ticket, result));
            match outcome {
                Some(SaveOutcome::Saved(set)) => {
                    vm.summaries.update(|items| upsert_summary(items, set.summary()));
                    vm.name.set(set.name);
                    TimeoutFuture::new(SAVED_FLASH_MS).await;
                    vm.gateway.update(|g| {
                        if *g.status() == SaveStatus::Saved {
                            g.clear_status();
                        }
                    });
                }
                Some(SaveOutcome::Failed(message)) => vm.error.set(Some(message)),
                Some(SaveOutcome::Discarded { saved }) => {
                    if let Some(set) = saved {
                        vm.summaries.update(|items| upsert_summary(items, set.summary()));
                    }
                    log::debug!("save response for a closed session dropped");
                }
                None => {}
            }
        });
    }

    pub fn delete(&self, id: TabSetId) {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(DELETE_CONFIRM).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(Some(ticket)) = self.gateway.try_update(|g| g.prepare_delete(id)) else {
            return;
        };

        let vm = *self;
        spawn_local(async move {
            let result = model::delete_tab_set(&ticket.id).await;
            let id = ticket.id.clone();
            let outcome = vm.gateway.try_update(|g| g.complete_delete(ticket, result));
            match outcome {
                Some(DeleteOutcome::Removed { close_editor }) => {
                    vm.summaries.update(|items| items.retain(|s| s.id != id));
                    if close_editor {
                        vm.name.set(String::new());
                        vm.reset_rows(TabList::new());
                        vm.open.set(false);
                    }
                }
                Some(DeleteOutcome::Failed(failure)) => {
                    vm.error.set(Some(failure.message().to_string()));
                }
                None => {}
            }
        });
    }

    pub fn is_deleting(&self, id: &TabSetId) -> bool {
        self.gateway.with(|g| g.is_deleting(id))
    }

    pub fn copy_shortcode(&self) {
        let Some(code) = self.shortcode() else {
            return;
        };
        let copied = self.copied;
        copy_to_clipboard_with_callback(&code, move || {
            copied.set(true);
            spawn_local(async move {
                TimeoutFuture::new(COPIED_FLASH_MS).await;
                copied.set(false);
            });
        });
    }
}

impl Default for TabSetEditorVm {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the summary with the same id in place, or insert it keeping the
/// case-insensitive name order the server lists in.
pub fn upsert_summary(items: &mut Vec<TabSetSummary>, summary: TabSetSummary) {
    if let Some(existing) = items.iter_mut().find(|s| s.id == summary.id) {
        *existing = summary;
        return;
    }
    let key = summary.name.to_lowercase();
    let pos = items
        .iter()
        .position(|s| s.name.to_lowercase() > key)
        .unwrap_or(items.len());
    items.insert(pos, summary);
}

pub fn editor_title(items: &[TabSetSummary], current: Option<&TabSetId>) -> String {
    current
        .and_then(|id| items.iter().find(|s| s.id == *id))
        .map(|s| format!("Edit: {}", s.name))
        .unwrap_or_else(|| NEW_SET_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str, tab_count: usize) -> TabSetSummary {
        let id = TabSetId::new(id);
        TabSetSummary {
            shortcode: id.shortcode(),
            id,
            name: name.into(),
            tab_count,
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut items = vec![summary("a", "Alpha", 1), summary("b", "Beta", 2)];
        upsert_summary(&mut items, summary("b", "Zeta", 5));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "Zeta");
        assert_eq!(items[1].tab_count, 5);
    }

    #[test]
    fn test_upsert_inserts_in_name_order() {
        let mut items = vec![summary("a", "alpha", 1), summary("c", "Gamma", 1)];
        upsert_summary(&mut items, summary("b", "Beta", 1));
        upsert_summary(&mut items, summary("d", "omega", 1));
        let names: Vec<&str> = items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Gamma", "omega"]);
    }

    #[test]
    fn test_editor_title() {
        let items = vec![summary("a", "Alpha", 1)];
        assert_eq!(editor_title(&items, None), NEW_SET_TITLE);
        assert_eq!(editor_title(&items, Some(&TabSetId::new("a"))), "Edit: Alpha");
        assert_eq!(editor_title(&items, Some(&TabSetId::new("x"))), NEW_SET_TITLE);
    }
}
