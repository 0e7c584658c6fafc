use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::system::middleware::request_logger;
use crate::{handlers, AppState};

/// All application routes
pub fn configure_routes(state: AppState, static_dir: &str) -> Router {
    use axum::http::{header, Method};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/tab_set",
            get(handlers::a001_tab_set::list_all).post(handlers::a001_tab_set::upsert),
        )
        .route(
            "/api/tab_set/:id",
            get(handlers::a001_tab_set::get_by_id).delete(handlers::a001_tab_set::delete),
        )
        .route(
            "/api/tab_set/:id/embed",
            get(handlers::a001_tab_set::embed_markup),
        )
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
