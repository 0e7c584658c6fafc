use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a001_tab_set::{
    ErrorResponse, MessageResponse, SaveTabSetRequest, TabSet, TabSetId, TabSetSummary,
};

use crate::domain::a001_tab_set::{embed, service, TabSetError};
use crate::AppState;

impl IntoResponse for TabSetError {
    fn into_response(self) -> Response {
        let status = match &self {
            TabSetError::Validation(_) => StatusCode::BAD_REQUEST,
            TabSetError::NotFound(_) => StatusCode::NOT_FOUND,
            TabSetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Tab set request failed: {}", self);
        }
        let message = match &self {
            TabSetError::NotFound(_) => "Tab set not found.".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// GET /api/tab_set
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<TabSetSummary>>, TabSetError> {
    service::list(state.storage.as_ref()).await.map(Json)
}

/// GET /api/tab_set/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TabSet>, TabSetError> {
    service::load(state.storage.as_ref(), &TabSetId(id))
        .await
        .map(Json)
}

/// POST /api/tab_set
pub async fn upsert(
    State(state): State<AppState>,
    Json(request): Json<SaveTabSetRequest>,
) -> Result<Json<TabSet>, TabSetError> {
    service::save(state.storage.as_ref(), request).await.map(Json)
}

/// DELETE /api/tab_set/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, TabSetError> {
    service::delete(state.storage.as_ref(), &TabSetId(id)).await?;
    Ok(Json(MessageResponse {
        message: "Tab set deleted.".into(),
    }))
}

/// GET /api/tab_set/:id/embed
pub async fn embed_markup(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let html = match service::load(state.storage.as_ref(), &TabSetId(id)).await {
        Ok(set) => embed::render(&set),
        Err(TabSetError::NotFound(_)) => embed::render_missing(),
        Err(e) => return e.into_response(),
    };
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_tab_set::MemoryTabSetStorage;
    use contracts::domain::a001_tab_set::Tab;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            storage: Arc::new(MemoryTabSetStorage::new()),
        }
    }

    #[tokio::test]
    async fn test_missing_set_maps_to_404() {
        let response = get_by_id(State(state()), Path("nope".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let request = SaveTabSetRequest {
            id: None,
            name: String::new(),
            tabs: vec![Tab::new("One", "")],
        };
        let response = upsert(State(state()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_save_then_delete() {
        let state = state();
        let request = SaveTabSetRequest {
            id: None,
            name: "Features".into(),
            tabs: vec![Tab::new("Specs", "x")],
        };
        let Json(saved) = upsert(State(state.clone()), Json(request)).await.unwrap();

        let response = delete(State(state.clone()), Path(saved.id.0.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = delete(State(state), Path(saved.id.0)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
