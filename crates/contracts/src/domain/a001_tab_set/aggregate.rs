use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ID Type
// ============================================================================

/// Opaque identifier of a stored tab set.
///
/// Assigned by the store on the first successful save and reused by every
/// later save of the same set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabSetId(pub String);

impl TabSetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reference string an author pastes into a page to embed the set.
    pub fn shortcode(&self) -> String {
        format!("[custom_tabs id=\"{}\"]", self.0)
    }
}

impl std::fmt::Display for TabSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tab / TabSet
// ============================================================================

/// One labeled content panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub title: String,
    /// Rich text markup, may be empty
    #[serde(default)]
    pub content: String,
}

impl Tab {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Copy with a trimmed title, or `None` when nothing is left of it.
    pub fn normalized(&self) -> Option<Tab> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Tab {
            title: title.to_string(),
            content: self.content.clone(),
        })
    }
}

/// A named, ordered collection of tabs. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSet {
    pub id: TabSetId,
    pub name: String,
    pub tabs: Vec<Tab>,
}

impl TabSet {
    pub fn summary(&self) -> super::dto::TabSetSummary {
        super::dto::TabSetSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            shortcode: self.id.shortcode(),
            tab_count: self.tabs.len(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabSetValidationError {
    #[error("Please enter a tab set name.")]
    EmptyName,

    #[error("Please add at least one tab with a title.")]
    NoValidTabs,
}

/// Normalize a tab set before it leaves the editor or enters the store.
///
/// Returns the trimmed name and the tabs whose trimmed title is non-empty,
/// in their original order.
pub fn prepare_for_save(
    name: &str,
    tabs: &[Tab],
) -> Result<(String, Vec<Tab>), TabSetValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TabSetValidationError::EmptyName);
    }

    let tabs: Vec<Tab> = tabs.iter().filter_map(Tab::normalized).collect();
    if tabs.is_empty() {
        return Err(TabSetValidationError::NoValidTabs);
    }

    Ok((name.to_string(), tabs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_rejected() {
        let tabs = vec![Tab::new("One", "a"), Tab::new("Two", "b")];
        assert_eq!(
            prepare_for_save("   ", &tabs),
            Err(TabSetValidationError::EmptyName)
        );
    }

    #[test]
    fn test_blank_titles_are_dropped() {
        let tabs = vec![Tab::new("", ""), Tab::new("  Specs ", "x")];
        let (name, tabs) = prepare_for_save(" Features ", &tabs).unwrap();
        assert_eq!(name, "Features");
        assert_eq!(tabs, vec![Tab::new("Specs", "x")]);
    }

    #[test]
    fn test_no_surviving_tabs_is_rejected() {
        let tabs = vec![Tab::new(" ", "content"), Tab::new("", "")];
        assert_eq!(
            prepare_for_save("Features", &tabs),
            Err(TabSetValidationError::NoValidTabs)
        );
    }

    #[test]
    fn test_duplicate_titles_survive_in_order() {
        let tabs = vec![Tab::new("Same", "1"), Tab::new("Same", "2")];
        let (_, tabs) = prepare_for_save("Dupes", &tabs).unwrap();
        assert_eq!(tabs[0].content, "1");
        assert_eq!(tabs[1].content, "2");
    }

    #[test]
    fn test_shortcode_and_summary() {
        let set = TabSet {
            id: TabSetId::new("tab-set-sample"),
            name: "Sample".into(),
            tabs: vec![Tab::new("A", "")],
        };
        let summary = set.summary();
        assert_eq!(summary.shortcode, "[custom_tabs id=\"tab-set-sample\"]");
        assert_eq!(summary.tab_count, 1);
        assert_eq!(summary.tab_count_label(), "1 tab");
    }

    #[test]
    fn test_id_is_transparent_on_the_wire() {
        let json = serde_json::to_string(&TabSetId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
