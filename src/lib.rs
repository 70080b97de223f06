//! Liftout Algo - team-opportunity matching service for the Liftout marketplace
//!
//! This library provides the scoring engine behind the marketplace's match
//! feed: a weighted multi-factor compatibility score between a team (a group
//! of professionals hired as a unit) and a posted opportunity, plus the
//! ranking pipeline that builds the feed.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match, industry_affinity, MatchResult, Matcher};
pub use crate::models::{
    FindMatchesRequest, FindMatchesResponse, Match, MatchBreakdown, Opportunity, OpportunityMatch,
    Recommendation, ScoringWeights, TeamProfile,
};
