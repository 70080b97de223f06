// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    aggregate_member_skills, skill_list_from_value, CompanyInfo, InterestEventType, Match,
    MatchBreakdown, Opportunity, OpportunityMatch, Recommendation, ScoringWeights, TeamProfile,
    Urgency, VerificationStatus, WorkArrangement,
};
pub use requests::{FindMatchesRequest, RecordEventRequest, ScorePairRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, RecordEventResponse};
