//! Client side of the tab set store: validation before any request,
//! single-flight saves, and discarding of responses that belong to an
//! editing session the operator has already left.
//!
//! Every operation is split into `prepare_*` (synchronous, decides whether a
//! request goes out and builds it) and `complete_*` (applies the response).
//! The transport in between lives in `ui::editor::model`.

use contracts::domain::a001_tab_set::{
    prepare_for_save, SaveTabSetRequest, Tab, TabSet, TabSetId, TabSetValidationError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] TabSetValidationError),

    #[error("A save is already in progress.")]
    SaveInFlight,
}

/// Transport failure as seen by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    NotFound(String),
    Failed(String),
}

impl RequestFailure {
    pub fn message(&self) -> &str {
        match self {
            RequestFailure::NotFound(m) | RequestFailure::Failed(m) => m,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    session: u64,
    pub request: SaveTabSetRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    load: u64,
    pub id: TabSetId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    pub id: TabSetId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(TabSet),
    Failed(String),
    /// The editor moved on; `saved` is still useful for the sidebar.
    Discarded { saved: Option<TabSet> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(TabSet),
    Failed(RequestFailure),
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { close_editor: bool },
    Failed(RequestFailure),
}

#[derive(Debug, Clone, Default)]
pub struct PersistenceGateway {
    current: Option<TabSetId>,
    session: u64,
    /// Latest load issued; older load responses are dropped.
    load: u64,
    saving: bool,
    status: SaveStatus,
    deleting: Vec<TabSetId>,
}

impl PersistenceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_id(&self) -> Option<&TabSetId> {
        self.current.as_ref()
    }

    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self, id: &TabSetId) -> bool {
        self.deleting.contains(id)
    }

    /// Start a fresh session: new set, cancel, or after the open set is deleted.
    pub fn reset(&mut self) {
        self.session += 1;
        self.load += 1;
        self.current = None;
        self.saving = false;
        self.status = SaveStatus::Idle;
    }

    pub fn clear_status(&mut self) {
        if !self.saving {
            self.status = SaveStatus::Idle;
        }
    }

    pub fn prepare_save(&mut self, name: &str, tabs: &[Tab]) -> Result<SaveTicket, GatewayError> {
        if self.saving {
            return Err(GatewayError::SaveInFlight);
        }
        let (name, tabs) = prepare_for_save(name, tabs)?;
        self.saving = true;
        self.status = SaveStatus::Saving;
        Ok(SaveTicket {
            session: self.session,
            request: SaveTabSetRequest {
                id: self.current.clone(),
                name,
                tabs,
            },
        })
    }

    pub fn complete_save(&mut self, ticket: SaveTicket, result: Result<TabSet, String>) -> SaveOutcome {
        if ticket.session != self.session {
            return SaveOutcome::Discarded { saved: result.ok() };
        }
        self.saving = false;
        match result {
            Ok(set) => {
                self.current = Some(set.id.clone());
                self.status = SaveStatus::Saved;
                SaveOutcome::Saved(set)
            }
            Err(message) => {
                self.status = SaveStatus::Failed(message.clone());
                SaveOutcome::Failed(message)
            }
        }
    }

    /// The open session is left alone until the load succeeds, so a failed
    /// load keeps the current set and any save in flight for it.
    pub fn prepare_load(&mut self, id: TabSetId) -> LoadTicket {
        self.load += 1;
        LoadTicket {
            load: self.load,
            id,
        }
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<TabSet, RequestFailure>,
    ) -> LoadOutcome {
        if ticket.load != self.load {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(set) => {
                self.session += 1;
                self.saving = false;
                self.status = SaveStatus::Idle;
                self.current = Some(set.id.clone());
                LoadOutcome::Loaded(set)
            }
            Err(failure) => LoadOutcome::Failed(failure),
        }
    }

    /// `None` while a delete of the same id is already pending.
    pub fn prepare_delete(&mut self, id: TabSetId) -> Option<DeleteTicket> {
        if self.deleting.contains(&id) {
            return None;
        }
        self.deleting.push(id.clone());
        Some(DeleteTicket { id })
    }

    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), RequestFailure>,
    ) -> DeleteOutcome {
        self.deleting.retain(|id| *id != ticket.id);
        match result {
            Ok(()) => {
                let close_editor = self.current.as_ref() == Some(&ticket.id);
                if close_editor {
                    self.reset();
                }
                DeleteOutcome::Removed { close_editor }
            }
            Err(failure) => DeleteOutcome::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<Tab> {
        vec![Tab::new("One", "a"), Tab::new("Two", "b")]
    }

    fn stored(id: &str, name: &str) -> TabSet {
        TabSet {
            id: TabSetId::new(id),
            name: name.into(),
            tabs: tabs(),
        }
    }

    #[test]
    fn test_empty_name_issues_no_request() {
        let mut gw = PersistenceGateway::new();
        let result = gw.prepare_save("", &tabs());
        assert_eq!(
            result,
            Err(GatewayError::Validation(TabSetValidationError::EmptyName))
        );
        assert!(!gw.is_saving());
        assert_eq!(gw.status(), &SaveStatus::Idle);
    }

    #[test]
    fn test_blank_tab_dropped_before_transmission() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw
            .prepare_save("Features", &[Tab::new("", ""), Tab::new("Specs", "x")])
            .unwrap();
        assert_eq!(ticket.request.tabs, vec![Tab::new("Specs", "x")]);
        assert_eq!(ticket.request.id, None);
    }

    #[test]
    fn test_single_flight_save() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw.prepare_save("A", &tabs()).unwrap();
        assert_eq!(gw.prepare_save("A", &tabs()), Err(GatewayError::SaveInFlight));

        let outcome = gw.complete_save(ticket, Err("disk full".into()));
        assert_eq!(outcome, SaveOutcome::Failed("disk full".into()));
        assert_eq!(gw.status(), &SaveStatus::Failed("disk full".into()));
        assert!(gw.prepare_save("A", &tabs()).is_ok());
    }

    #[test]
    fn test_first_save_assigns_id_then_updates_reuse_it() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw.prepare_save("A", &tabs()).unwrap();
        let outcome = gw.complete_save(ticket, Ok(stored("tab-set-a-1", "A")));
        assert!(matches!(outcome, SaveOutcome::Saved(_)));
        assert_eq!(gw.current_id(), Some(&TabSetId::new("tab-set-a-1")));

        let ticket = gw.prepare_save("A2", &tabs()).unwrap();
        assert_eq!(ticket.request.id, Some(TabSetId::new("tab-set-a-1")));
    }

    #[test]
    fn test_failed_save_keeps_identity() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw.prepare_save("A", &tabs()).unwrap();
        gw.complete_save(ticket, Err("boom".into()));
        assert_eq!(gw.current_id(), None);
    }

    #[test]
    fn test_stale_save_discarded_after_navigation() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw.prepare_save("A", &tabs()).unwrap();
        let load = gw.prepare_load(TabSetId::new("other"));
        gw.complete_load(load, Ok(stored("other", "Other")));

        let outcome = gw.complete_save(ticket, Ok(stored("tab-set-a-1", "A")));
        assert!(matches!(outcome, SaveOutcome::Discarded { saved: Some(_) }));
        assert_eq!(gw.current_id(), Some(&TabSetId::new("other")));
        assert!(!gw.is_saving());
    }

    #[test]
    fn test_stale_load_discarded() {
        let mut gw = PersistenceGateway::new();
        let first = gw.prepare_load(TabSetId::new("first"));
        let second = gw.prepare_load(TabSetId::new("second"));

        assert!(matches!(
            gw.complete_load(second, Ok(stored("second", "S"))),
            LoadOutcome::Loaded(_)
        ));
        assert_eq!(
            gw.complete_load(first, Ok(stored("first", "F"))),
            LoadOutcome::Discarded
        );
        assert_eq!(gw.current_id(), Some(&TabSetId::new("second")));
    }

    #[test]
    fn test_load_not_found_reported() {
        let mut gw = PersistenceGateway::new();
        let ticket = gw.prepare_load(TabSetId::new("missing"));
        let outcome = gw.complete_load(
            ticket,
            Err(RequestFailure::NotFound("Tab set not found.".into())),
        );
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(RequestFailure::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_load_keeps_pending_save_of_new_set() {
        let mut gw = PersistenceGateway::new();
        let save = gw.prepare_save("New", &tabs()).unwrap();
        let load = gw.prepare_load(TabSetId::new("gone"));
        let outcome = gw.complete_load(
            load,
            Err(RequestFailure::NotFound("Tab set not found.".into())),
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(gw.is_saving());
        assert_eq!(gw.prepare_save("New", &tabs()), Err(GatewayError::SaveInFlight));

        let outcome = gw.complete_save(save, Ok(stored("tab-set-new-1", "New")));
        assert!(matches!(outcome, SaveOutcome::Saved(_)));
        let next = gw.prepare_save("New", &tabs()).unwrap();
        assert_eq!(next.request.id, Some(TabSetId::new("tab-set-new-1")));
    }

    #[test]
    fn test_load_pending_keeps_session_until_it_lands() {
        let mut gw = PersistenceGateway::new();
        let first = gw.prepare_load(TabSetId::new("x"));
        gw.complete_load(first, Ok(stored("x", "X")));

        let save = gw.prepare_save("X", &tabs()).unwrap();
        let load = gw.prepare_load(TabSetId::new("y"));
        assert!(matches!(
            gw.complete_save(save, Ok(stored("x", "X"))),
            SaveOutcome::Saved(_)
        ));
        assert!(matches!(
            gw.complete_load(load, Ok(stored("y", "Y"))),
            LoadOutcome::Loaded(_)
        ));
        assert_eq!(gw.current_id(), Some(&TabSetId::new("y")));
    }

    #[test]
    fn test_load_discarded_after_reset() {
        let mut gw = PersistenceGateway::new();
        let load = gw.prepare_load(TabSetId::new("x"));
        gw.reset();
        assert_eq!(
            gw.complete_load(load, Ok(stored("x", "X"))),
            LoadOutcome::Discarded
        );
        assert_eq!(gw.current_id(), None);
    }

    #[test]
    fn test_deleting_open_set_closes_editor() {
        let mut gw = PersistenceGateway::new();
        let load = gw.prepare_load(TabSetId::new("x"));
        gw.complete_load(load, Ok(stored("x", "X")));

        let ticket = gw.prepare_delete(TabSetId::new("x")).unwrap();
        assert!(gw.prepare_delete(TabSetId::new("x")).is_none());
        assert_eq!(
            gw.complete_delete(ticket, Ok(())),
            DeleteOutcome::Removed { close_editor: true }
        );
        assert_eq!(gw.current_id(), None);
    }

    #[test]
    fn test_deleting_other_set_keeps_editor() {
        let mut gw = PersistenceGateway::new();
        let load = gw.prepare_load(TabSetId::new("x"));
        gw.complete_load(load, Ok(stored("x", "X")));

        let ticket = gw.prepare_delete(TabSetId::new("y")).unwrap();
        assert_eq!(
            gw.complete_delete(ticket, Ok(())),
            DeleteOutcome::Removed { close_editor: false }
        );
        assert_eq!(gw.current_id(), Some(&TabSetId::new("x")));
    }

    #[test]
    fn test_delete_not_found_leaves_state() {
        let mut gw = PersistenceGateway::new();
        let load = gw.prepare_load(TabSetId::new("x"));
        gw.complete_load(load, Ok(stored("x", "X")));

        let ticket = gw.prepare_delete(TabSetId::new("x")).unwrap();
        let outcome = gw.complete_delete(ticket, Err(RequestFailure::NotFound("gone".into())));
        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert_eq!(gw.current_id(), Some(&TabSetId::new("x")));
        assert!(!gw.is_deleting(&TabSetId::new("x")));
    }
}
