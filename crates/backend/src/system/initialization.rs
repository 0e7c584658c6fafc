use anyhow::Context;

use crate::domain::a001_tab_set::{service, TabSetStorage};

/// First-start seeding: an empty store receives the sample tab set.
pub async fn ensure_sample_tab_set(storage: &dyn TabSetStorage) -> anyhow::Result<()> {
    let seeded = service::ensure_sample(storage)
        .await
        .context("seeding sample tab set")?;
    if !seeded {
        tracing::debug!("Store already populated, sample not seeded");
    }
    Ok(())
}
