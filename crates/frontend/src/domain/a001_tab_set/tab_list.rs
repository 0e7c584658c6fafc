//! In-memory ordered list of tabs under edit.
//!
//! Rows are addressed by position for every mutation. Each row also carries a
//! [`RowKey`] that is stable across reorders, so the view can keep DOM nodes
//! attached to the right row and callers can re-resolve a position right
//! before mutating.

use contracts::domain::a001_tab_set::Tab;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "New Tab";
pub const DEFAULT_CONTENT: &str = "<p>Enter content here.</p>";
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRow {
    pub key: RowKey,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabListError {
    #[error("You must keep at least one tab.")]
    LastTab,

    #[error("Tab position {index} is out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("New order does not contain exactly the current tabs")]
    NotAPermutation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabList {
    rows: Vec<TabRow>,
    next_key: u64,
}

impl TabList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tabs(tabs: impl IntoIterator<Item = Tab>) -> Self {
        let mut list = Self::new();
        for tab in tabs {
            list.insert(tab.title, tab.content, true);
        }
        list
    }

    /// Two starter tabs for a brand-new set.
    pub fn starter() -> Self {
        Self::from_tabs([
            Tab::new("Tab One", "<p>Enter content for tab one here.</p>"),
            Tab::new("Tab Two", "<p>Enter content for tab two here.</p>"),
        ])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TabRow] {
        &self.rows
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(|r| r.key).collect()
    }

    pub fn get(&self, index: usize) -> Option<&TabRow> {
        self.rows.get(index)
    }

    pub fn index_of(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|r| r.key == key)
    }

    fn check(&self, index: usize) -> Result<(), TabListError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(TabListError::OutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    /// Add a row at the end (or the front) and return its key.
    pub fn insert(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        at_end: bool,
    ) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        let row = TabRow {
            key,
            title: title.into(),
            content: content.into(),
        };
        if at_end {
            self.rows.push(row);
        } else {
            self.rows.insert(0, row);
        }
        key
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Tab, TabListError> {
        self.check(index)?;
        if self.rows.len() <= 1 {
            return Err(TabListError::LastTab);
        }
        let row = self.rows.remove(index);
        Ok(Tab::new(row.title, row.content))
    }

    /// Whether one more row may start leaving while `pending` rows are
    /// already on their way out.
    pub fn check_removal(&self, pending: usize) -> Result<(), TabListError> {
        if self.rows.len().saturating_sub(pending) <= 1 {
            Err(TabListError::LastTab)
        } else {
            Ok(())
        }
    }

    /// Remove the row wherever it sits now. `Ok(None)` if it is already gone.
    pub fn remove_key(&mut self, key: RowKey) -> Result<Option<Tab>, TabListError> {
        match self.index_of(key) {
            Some(index) => self.remove_at(index).map(Some),
            None => Ok(None),
        }
    }

    /// Move the row at `from` so that it ends up at position `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), TabListError> {
        self.check(from)?;
        self.check(to)?;
        if from != to {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
        }
        Ok(())
    }

    pub fn rename_at(&mut self, index: usize, title: impl Into<String>) -> Result<(), TabListError> {
        self.check(index)?;
        self.rows[index].title = title.into();
        Ok(())
    }

    pub fn set_content_at(
        &mut self,
        index: usize,
        content: impl Into<String>,
    ) -> Result<(), TabListError> {
        self.check(index)?;
        self.rows[index].content = content.into();
        Ok(())
    }

    /// Rearrange rows into `order`. Returns whether anything moved.
    pub fn reorder(&mut self, order: &[RowKey]) -> Result<bool, TabListError> {
        if order.len() != self.rows.len() {
            return Err(TabListError::NotAPermutation);
        }
        let mut reordered = Vec::with_capacity(self.rows.len());
        let mut remaining = self.rows.clone();
        for key in order {
            let pos = remaining
                .iter()
                .position(|r| r.key == *key)
                .ok_or(TabListError::NotAPermutation)?;
            reordered.push(remaining.swap_remove(pos));
        }
        let changed = reordered.iter().map(|r| r.key).ne(self.rows.iter().map(|r| r.key));
        self.rows = reordered;
        Ok(changed)
    }

    /// Valid tabs in display order: titles trimmed, blank titles excluded.
    pub fn snapshot(&self) -> Vec<Tab> {
        self.rows
            .iter()
            .filter_map(|r| Tab::new(r.title.clone(), r.content.clone()).normalized())
            .collect()
    }

    /// Heading text for a row, falling back to "Untitled".
    pub fn display_title(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(|r| {
            if r.title.trim().is_empty() {
                UNTITLED.to_string()
            } else {
                r.title.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> TabList {
        TabList::from_tabs([Tab::new("Tab One", "a"), Tab::new("Tab Two", "b")])
    }

    #[test]
    fn test_move_first_to_second() {
        let mut list = two();
        list.move_to(0, 1).unwrap();
        assert_eq!(
            list.snapshot(),
            vec![Tab::new("Tab Two", "b"), Tab::new("Tab One", "a")]
        );
    }

    #[test]
    fn test_remove_last_tab_rejected() {
        let mut list = TabList::from_tabs([Tab::new("Only", "x")]);
        let before = list.clone();
        assert_eq!(list.remove_at(0), Err(TabListError::LastTab));
        assert_eq!(list, before);
        assert_eq!(
            TabListError::LastTab.to_string(),
            "You must keep at least one tab."
        );
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut list = two();
        assert_eq!(
            list.remove_at(2),
            Err(TabListError::OutOfRange { index: 2, len: 2 })
        );
        assert!(list.move_to(0, 2).is_err());
        assert!(list.move_to(5, 0).is_err());
        assert!(list.rename_at(2, "x").is_err());
        assert!(list.set_content_at(9, "x").is_err());
        assert_eq!(list, two());
    }

    #[test]
    fn test_insert_front_and_back() {
        let mut list = two();
        list.insert("Last", "", true);
        list.insert("First", "", false);
        let titles: Vec<String> = list.snapshot().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["First", "Tab One", "Tab Two", "Last"]);
    }

    #[test]
    fn test_snapshot_trims_and_skips_blank_titles() {
        let mut list = two();
        list.rename_at(0, "   ").unwrap();
        list.rename_at(1, "  Specs ").unwrap();
        assert_eq!(list.snapshot(), vec![Tab::new("Specs", "b")]);
        assert_eq!(list.display_title(0).as_deref(), Some(UNTITLED));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_duplicate_titles_addressed_by_position() {
        let mut list = TabList::from_tabs([Tab::new("Same", "1"), Tab::new("Same", "2")]);
        list.set_content_at(1, "changed").unwrap();
        assert_eq!(list.snapshot()[0].content, "1");
        assert_eq!(list.snapshot()[1].content, "changed");
    }

    #[test]
    fn test_keys_stable_across_moves() {
        let mut list = two();
        let key = list.get(0).unwrap().key;
        list.move_to(0, 1).unwrap();
        assert_eq!(list.index_of(key), Some(1));
    }

    #[test]
    fn test_quick_removals_keep_one_row() {
        let mut list = two();
        let keys = list.keys();
        assert_eq!(list.check_removal(0), Ok(()));
        // First row is still fading out when the second removal arrives.
        assert_eq!(list.check_removal(1), Err(TabListError::LastTab));

        assert!(list.remove_key(keys[0]).unwrap().is_some());
        assert_eq!(list.len(), 1);
        assert_eq!(list.check_removal(0), Err(TabListError::LastTab));
    }

    #[test]
    fn test_remove_key_after_reorder() {
        let mut list = TabList::from_tabs([
            Tab::new("A", ""),
            Tab::new("B", ""),
            Tab::new("C", ""),
        ]);
        let a = list.get(0).unwrap().key;
        list.move_to(0, 2).unwrap();

        assert_eq!(list.remove_key(a), Ok(Some(Tab::new("A", ""))));
        let titles: Vec<String> = list.snapshot().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert_eq!(list.remove_key(a), Ok(None));
    }

    #[test]
    fn test_reorder_by_keys() {
        let mut list = TabList::from_tabs([
            Tab::new("A", ""),
            Tab::new("B", ""),
            Tab::new("C", ""),
        ]);
        let mut keys = list.keys();
        keys.rotate_left(1);
        assert_eq!(list.reorder(&keys), Ok(true));
        let titles: Vec<String> = list.snapshot().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
        assert_eq!(list.reorder(&keys), Ok(false));

        let bad = vec![keys[0], keys[0], keys[1]];
        assert_eq!(list.reorder(&bad), Err(TabListError::NotAPermutation));
        assert_eq!(list.reorder(&keys[..2]), Err(TabListError::NotAPermutation));
    }

    /// Deterministic pseudo-random operation sequences.
    #[test]
    fn test_random_sequences_keep_invariants() {
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move |bound: usize| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % bound as u64) as usize
        };

        for _ in 0..50 {
            let mut list = TabList::from_tabs([Tab::new("Seed", "s")]);
            for step in 0..200 {
                let len = list.len();
                match next(3) {
                    0 => {
                        list.insert(format!("T{}", step), "", next(2) == 0);
                    }
                    1 => {
                        let _ = list.remove_at(next(len + 1));
                    }
                    _ => {
                        let mut before: Vec<Tab> = list.snapshot();
                        let from = next(len + 1);
                        let to = next(len + 1);
                        let moved = list.move_to(from, to);
                        let mut after = list.snapshot();
                        if moved.is_err() {
                            assert_eq!(before, after);
                        }
                        before.sort_by(|a, b| a.title.cmp(&b.title));
                        after.sort_by(|a, b| a.title.cmp(&b.title));
                        assert_eq!(before, after);
                    }
                }
                assert!(list.len() >= 1);
            }
        }
    }
}
