use crate::models::domain::OpportunityMatch;
use serde::{Deserialize, Serialize};

/// Response for the match feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<OpportunityMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record event response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
}
