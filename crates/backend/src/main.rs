pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::sync::Arc;

use domain::a001_tab_set::repository::SqliteTabSetStorage;
use domain::a001_tab_set::TabSetStorage;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn TabSetStorage>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config().context("loading config.toml")?;
    let db_path = shared::config::get_database_path(&config);
    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .with_context(|| format!("opening database {}", db_path.display()))?;

    let state = AppState {
        storage: Arc::new(SqliteTabSetStorage::new(conn)),
    };
    system::initialization::ensure_sample_tab_set(state.storage.as_ref()).await?;

    let app = routes::configure_routes(state, &config.server.static_dir);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use", config.server.port);
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
