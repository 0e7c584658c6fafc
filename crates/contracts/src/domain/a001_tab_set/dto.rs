use serde::{Deserialize, Serialize};

use super::aggregate::{Tab, TabSetId};

/// POST /api/tab_set body. `id == None` creates a new set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTabSetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TabSetId>,
    pub name: String,
    pub tabs: Vec<Tab>,
}

/// Sidebar row for one stored set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSetSummary {
    pub id: TabSetId,
    pub name: String,
    pub shortcode: String,
    pub tab_count: usize,
}

impl TabSetSummary {
    pub fn tab_count_label(&self) -> String {
        match self.tab_count {
            1 => "1 tab".to_string(),
            n => format!("{} tabs", n),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
