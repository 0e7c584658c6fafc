use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_TAB_SET_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS a001_tab_set (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        tabs_json TEXT NOT NULL DEFAULT '[]',
        created_at TEXT,
        updated_at TEXT
    );
"#;

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<&'static DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize separators so Windows paths form a valid sqlite URL
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let prefix = if !normalized.starts_with('/') && normalized.contains(':') {
        "/"
    } else {
        ""
    };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Opening database: {}", db_url);

    let conn = Database::connect(&db_url).await?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_TAB_SET_TABLE.to_string(),
    ))
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database already initialized"))?;
    get_connection()
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}
