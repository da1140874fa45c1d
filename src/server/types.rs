use crate::ask::QaPair;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub results: Vec<QaPair>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct DocsQuery {
    #[serde(default)]
    pub file: Option<String>,
}
