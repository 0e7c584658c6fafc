use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_tab_set::{Tab, TabSet, TabSetId};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

use super::error::TabSetError;
use super::storage::TabSetStorage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_tab_set")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Ordered tabs as a JSON array of `{title, content}`
    pub tabs_json: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for TabSet {
    type Error = TabSetError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let tabs: Vec<Tab> = serde_json::from_str(&m.tabs_json)?;
        Ok(TabSet {
            id: TabSetId(m.id),
            name: m.name,
            tabs,
        })
    }
}

/// SQLite-backed storage, one row per tab set.
pub struct SqliteTabSetStorage {
    conn: &'static DatabaseConnection,
}

impl SqliteTabSetStorage {
    pub fn new(conn: &'static DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TabSetStorage for SqliteTabSetStorage {
    async fn load(&self, id: &TabSetId) -> Result<Option<TabSet>, TabSetError> {
        Entity::find_by_id(id.as_str().to_string())
            .one(self.conn)
            .await?
            .map(TabSet::try_from)
            .transpose()
    }

    async fn save(&self, set: &TabSet) -> Result<(), TabSetError> {
        let now = Utc::now();
        let active = ActiveModel {
            id: Set(set.id.as_str().to_string()),
            name: Set(set.name.clone()),
            tabs_json: Set(serde_json::to_string(&set.tabs)?),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        // Single statement: the row is either fully replaced or untouched
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::Name, Column::TabsJson, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(self.conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &TabSetId) -> Result<bool, TabSetError> {
        let result = Entity::delete_by_id(id.as_str().to_string())
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> Result<Vec<TabSet>, TabSetError> {
        Entity::find()
            .all(self.conn)
            .await?
            .into_iter()
            .map(TabSet::try_from)
            .collect()
    }
}
