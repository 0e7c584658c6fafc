use crate::domain::a001_tab_set::gateway::RequestFailure;
use crate::shared::api_utils::api_url;
use contracts::domain::a001_tab_set::{
    ErrorResponse, SaveTabSetRequest, TabSet, TabSetId, TabSetSummary,
};
use gloo_net::http::{Request, Response};

fn collection_url() -> String {
    api_url("/api/tab_set")
}

fn item_url(id: &TabSetId) -> String {
    api_url(&format!("/api/tab_set/{}", urlencoding::encode(id.as_str())))
}

/// Server error bodies are `{ "error": "..." }`; their text is shown as is.
async fn error_message(response: &Response) -> String {
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP error: {}", response.status()),
    }
}

async fn failure(response: &Response) -> RequestFailure {
    let message = error_message(response).await;
    if response.status() == 404 {
        RequestFailure::NotFound(message)
    } else {
        RequestFailure::Failed(message)
    }
}

pub async fn fetch_summaries() -> Result<Vec<TabSetSummary>, String> {
    let response = Request::get(&collection_url())
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn fetch_tab_set(id: &TabSetId) -> Result<TabSet, RequestFailure> {
    let response = Request::get(&item_url(id))
        .send()
        .await
        .map_err(|e| RequestFailure::Failed(format!("Request failed: {}", e)))?;
    if !response.ok() {
        return Err(failure(&response).await);
    }
    response
        .json()
        .await
        .map_err(|e| RequestFailure::Failed(format!("Failed to parse response: {}", e)))
}

pub async fn save_tab_set(request: &SaveTabSetRequest) -> Result<TabSet, String> {
    let response = Request::post(&collection_url())
        .json(request)
        .map_err(|e| format!("Failed to encode request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn delete_tab_set(id: &TabSetId) -> Result<(), RequestFailure> {
    let response = Request::delete(&item_url(id))
        .send()
        .await
        .map_err(|e| RequestFailure::Failed(format!("Request failed: {}", e)))?;
    if !response.ok() {
        return Err(failure(&response).await);
    }
    Ok(())
}
