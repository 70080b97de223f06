use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the match feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "team_id", rename = "teamId")]
    pub team_id: String,
    #[serde(default)]
    #[serde(alias = "min_score", rename = "minScore")]
    pub min_score: u32,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Query parameters for scoring a single team/opportunity pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePairRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "team_id", rename = "teamId")]
    pub team_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "opportunity_id", rename = "opportunityId")]
    pub opportunity_id: String,
}

/// Request to record an interest event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "team_id", rename = "teamId")]
    pub team_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "opportunity_id", rename = "opportunityId")]
    pub opportunity_id: String,
    #[serde(alias = "event_type", rename = "eventType")]
    pub event_type: String,
}
