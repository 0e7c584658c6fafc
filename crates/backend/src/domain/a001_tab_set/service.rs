use contracts::domain::a001_tab_set::{
    prepare_for_save, SaveTabSetRequest, Tab, TabSet, TabSetId, TabSetSummary,
};
use uuid::Uuid;

use super::error::TabSetError;
use super::storage::TabSetStorage;

pub const SAMPLE_ID: &str = "tab-set-sample";

// ============================================================================
// Sanitization
// ============================================================================

/// Tab titles are plain text: control characters dropped, whitespace collapsed.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tab content keeps post-style markup; scripts, event handlers and
/// `javascript:` URLs are removed.
pub fn sanitize_content(html: &str) -> String {
    ammonia::Builder::default()
        .generic_attributes(maplit::hashset!["class", "id", "lang", "style", "title"])
        .clean(html)
        .to_string()
}

// ============================================================================
// Ids
// ============================================================================

/// URL-safe slug of a set name, `tabset` when nothing usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "tabset".to_string()
    } else {
        slug.to_string()
    }
}

pub fn generate_id(name: &str) -> TabSetId {
    let suffix = Uuid::new_v4().simple().to_string();
    TabSetId(format!("tab-set-{}-{}", slugify(name), &suffix[..8]))
}

async fn unused_id(storage: &dyn TabSetStorage, name: &str) -> Result<TabSetId, TabSetError> {
    loop {
        let id = generate_id(name);
        if storage.load(&id).await?.is_none() {
            return Ok(id);
        }
        tracing::warn!("Generated id {} already taken, retrying", id);
    }
}

// ============================================================================
// Service functions
// ============================================================================

/// Create (no id) or fully replace (existing id) a tab set.
pub async fn save(
    storage: &dyn TabSetStorage,
    request: SaveTabSetRequest,
) -> Result<TabSet, TabSetError> {
    let sanitized: Vec<Tab> = request
        .tabs
        .iter()
        .map(|tab| Tab::new(sanitize_title(&tab.title), sanitize_content(&tab.content)))
        .collect();
    let (name, tabs) = prepare_for_save(&request.name, &sanitized)?;

    let id = match request.id {
        Some(id) if !id.as_str().trim().is_empty() => {
            if storage.load(&id).await?.is_none() {
                return Err(TabSetError::NotFound(id));
            }
            id
        }
        _ => unused_id(storage, &name).await?,
    };

    let set = TabSet { id, name, tabs };
    storage.save(&set).await?;
    tracing::info!("Saved tab set {} ({} tabs)", set.id, set.tabs.len());
    Ok(set)
}

pub async fn load(storage: &dyn TabSetStorage, id: &TabSetId) -> Result<TabSet, TabSetError> {
    storage
        .load(id)
        .await?
        .ok_or_else(|| TabSetError::NotFound(id.clone()))
}

pub async fn delete(storage: &dyn TabSetStorage, id: &TabSetId) -> Result<(), TabSetError> {
    if storage.delete(id).await? {
        tracing::info!("Deleted tab set {}", id);
        Ok(())
    } else {
        Err(TabSetError::NotFound(id.clone()))
    }
}

/// Sidebar rows, sorted by name without regard to case.
pub async fn list(storage: &dyn TabSetStorage) -> Result<Vec<TabSetSummary>, TabSetError> {
    let mut items: Vec<TabSetSummary> = storage
        .list()
        .await?
        .iter()
        .map(TabSet::summary)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

/// Seed a sample set into an empty store.
pub async fn ensure_sample(storage: &dyn TabSetStorage) -> Result<bool, TabSetError> {
    if !storage.list().await?.is_empty() {
        return Ok(false);
    }
    let sample = TabSet {
        id: TabSetId::new(SAMPLE_ID),
        name: "Sample Tab Set".into(),
        tabs: vec![
            Tab::new(
                "Tab One",
                "<p>Sed ut perspiciatis, unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam eaque ipsa.</p>",
            ),
            Tab::new(
                "Tab Two",
                "<p>At vero eos et accusamus et iusto odio dignissimos ducimus, qui blanditiis praesentium voluptatum deleniti atque corrupti.</p>",
            ),
            Tab::new(
                "Tab Three",
                "<p>Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.</p>",
            ),
        ],
    };
    storage.save(&sample).await?;
    tracing::info!("Seeded sample tab set {}", SAMPLE_ID);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_tab_set::storage::MemoryTabSetStorage;
    use contracts::domain::a001_tab_set::TabSetValidationError;

    fn request(id: Option<&str>, name: &str, tabs: Vec<Tab>) -> SaveTabSetRequest {
        SaveTabSetRequest {
            id: id.map(TabSetId::new),
            name: name.to_string(),
            tabs,
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Product Features"), "product-features");
        assert_eq!(slugify("  FAQ -- 2024!  "), "faq-2024");
        assert_eq!(slugify("???"), "tabset");
        assert_eq!(slugify(""), "tabset");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("Features");
        assert!(id.as_str().starts_with("tab-set-features-"));
        assert_eq!(id.as_str().len(), "tab-set-features-".len() + 8);
    }

    #[test]
    fn test_sanitize_title_collapses_whitespace() {
        assert_eq!(sanitize_title("  Tab \t  One\u{0007} "), "Tab One");
    }

    #[test]
    fn test_sanitize_content_strips_scripts() {
        let clean = sanitize_content("<p onclick=\"x()\">Hi</p><script>alert(1)</script>");
        assert_eq!(clean, "<p>Hi</p>");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_drops_blank_tabs() {
        let storage = MemoryTabSetStorage::new();
        let saved = save(
            &storage,
            request(
                None,
                "Features",
                vec![Tab::new("", ""), Tab::new("Specs", "<p>x</p>")],
            ),
        )
        .await
        .unwrap();

        assert!(saved.id.as_str().starts_with("tab-set-features-"));
        assert_eq!(saved.tabs, vec![Tab::new("Specs", "<p>x</p>")]);
        assert_eq!(load(&storage, &saved.id).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_update_reuses_id() {
        let storage = MemoryTabSetStorage::new();
        let first = save(&storage, request(None, "A", vec![Tab::new("One", "")]))
            .await
            .unwrap();
        let second = save(
            &storage,
            request(
                Some(first.id.as_str()),
                "A renamed",
                vec![Tab::new("One", ""), Tab::new("Two", "")],
            ),
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        let all = list(&storage).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "A renamed");
        assert_eq!(all[0].tab_count, 2);
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_creates_nothing() {
        let storage = MemoryTabSetStorage::new();
        let result = save(
            &storage,
            request(Some("tab-set-missing"), "A", vec![Tab::new("One", "")]),
        )
        .await;

        assert!(matches!(result, Err(TabSetError::NotFound(_))));
        assert!(list(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_writes_nothing() {
        let storage = MemoryTabSetStorage::new();
        let result = save(&storage, request(None, "", vec![Tab::new("One", "")])).await;

        assert!(matches!(
            result,
            Err(TabSetError::Validation(TabSetValidationError::EmptyName))
        ));
        assert!(list(&storage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_record() {
        let storage = MemoryTabSetStorage::new();
        let first = save(&storage, request(None, "Keep", vec![Tab::new("One", "a")]))
            .await
            .unwrap();
        let result = save(
            &storage,
            request(Some(first.id.as_str()), "Keep", vec![Tab::new("  ", "b")]),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(load(&storage, &first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_delete_signals_not_found_for_absent_id() {
        let storage = MemoryTabSetStorage::new();
        let saved = save(&storage, request(None, "Gone", vec![Tab::new("One", "")]))
            .await
            .unwrap();

        assert!(delete(&storage, &saved.id).await.is_ok());
        assert!(matches!(
            delete(&storage, &saved.id).await,
            Err(TabSetError::NotFound(_))
        ));
        assert!(matches!(
            load(&storage, &saved.id).await,
            Err(TabSetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let storage = MemoryTabSetStorage::new();
        for name in ["beta", "Alpha", "gamma"] {
            save(&storage, request(None, name, vec![Tab::new("T", "")]))
                .await
                .unwrap();
        }
        let names: Vec<String> = list(&storage)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_sample_seeded_once() {
        let storage = MemoryTabSetStorage::new();
        assert!(ensure_sample(&storage).await.unwrap());
        assert!(!ensure_sample(&storage).await.unwrap());
        let sample = load(&storage, &TabSetId::new(SAMPLE_ID)).await.unwrap();
        assert_eq!(sample.tabs.len(), 3);
    }
}
