use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, InterestEventType,
    Opportunity, RecordEventRequest, RecordEventResponse, ScorePairRequest,
};
use crate::services::{CacheKey, CacheManager, EventType, PostgresClient, PostgresError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
    pub opportunity_pool_size: usize,
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::get().to(find_matches))
        .route("/matches/score", web::get().to(score_pair))
        .route("/matches/event", web::post().to(record_event))
        .route("/matches/engaged", web::get().to(get_engaged));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn not_found_or_internal(err: PostgresError, what: &str) -> HttpResponse {
    match err {
        PostgresError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("{} not found", what),
            message,
            status_code: 404,
        }),
        other => HttpResponse::InternalServerError().json(ErrorResponse {
            error: format!("Failed to fetch {}", what),
            message: other.to_string(),
            status_code: 500,
        }),
    }
}

/// Match feed endpoint
///
/// GET /api/v1/matches/find?teamId={teamId}&minScore={minScore}&limit={limit}
///
/// Scores the team against the open opportunity pool, drops anything the
/// team has already applied to or that scores below `minScore`, and returns
/// the ranked, truncated feed.
async fn find_matches(
    state: web::Data<AppState>,
    query: web::Query<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let team_id = &query.team_id;
    let limit = (query.limit as usize).min(state.max_limit);

    tracing::info!(
        "Finding matches for team: {}, min score: {}, limit: {}",
        team_id,
        query.min_score,
        limit
    );

    let team = match state.postgres.get_team(team_id).await {
        Ok(team) => team,
        Err(e) => {
            tracing::error!("Failed to fetch team {}: {}", team_id, e);
            return not_found_or_internal(e, "team");
        }
    };

    // Opportunities the team already applied to never reappear in the feed
    let applied_ids = match state
        .postgres
        .get_engaged_opportunities(team_id, Some(EventType::Applied))
        .await
    {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch applied opportunities for {}, proceeding without exclusion: {}",
                team_id,
                e
            );
            vec![]
        }
    };

    // The opportunity pool is shared across teams; serve it from cache when
    // fresh. Match feeds themselves are not cached so interest events take
    // effect immediately.
    let pool_key = CacheKey::open_opportunities(state.opportunity_pool_size);
    let opportunities: Vec<Opportunity> = match state.cache.get(&pool_key).await {
        Ok(cached) => cached,
        Err(_) => {
            let fetched = match state
                .postgres
                .list_open_opportunities(state.opportunity_pool_size)
                .await
            {
                Ok(list) => list,
                Err(e) => {
                    tracing::error!("Failed to load opportunities: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to load opportunities".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };
            if let Err(e) = state.cache.set(&pool_key, &fetched).await {
                tracing::warn!("Failed to cache opportunity pool: {}", e);
            }
            fetched
        }
    };

    tracing::debug!(
        "Scoring {} opportunities for team {} (excluding {} applied)",
        opportunities.len(),
        team_id,
        applied_ids.len()
    );

    let result = state.matcher.find_matches(
        &team,
        &team.skills,
        opportunities,
        &applied_ids,
        query.min_score,
        limit,
    );

    let response = FindMatchesResponse {
        total_candidates: result.total_candidates,
        matches: result.matches,
    };

    tracing::info!(
        "Returning {} matches for team {} (from {} candidates)",
        response.matches.len(),
        team_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Score a single team/opportunity pair
///
/// GET /api/v1/matches/score?teamId={teamId}&opportunityId={opportunityId}
///
/// Returns the bare Match object: total, per-factor breakdown,
/// recommendation and the generated strengths/concerns/insights.
async fn score_pair(
    state: web::Data<AppState>,
    query: web::Query<ScorePairRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let team = match state.postgres.get_team(&query.team_id).await {
        Ok(team) => team,
        Err(e) => {
            tracing::error!("Failed to fetch team {}: {}", query.team_id, e);
            return not_found_or_internal(e, "team");
        }
    };

    let opportunity = match state.postgres.get_opportunity(&query.opportunity_id).await {
        Ok(opportunity) => opportunity,
        Err(e) => {
            tracing::error!(
                "Failed to fetch opportunity {}: {}",
                query.opportunity_id,
                e
            );
            return not_found_or_internal(e, "opportunity");
        }
    };

    let score = state.matcher.score_pair(&team, &team.skills, &opportunity);

    HttpResponse::Ok().json(score)
}

/// Record interest event endpoint
///
/// POST /api/v1/matches/event
///
/// Request body:
/// ```json
/// {
///   "teamId": "string",
///   "opportunityId": "string",
///   "eventType": "viewed|saved|eoi|applied"
/// }
/// ```
async fn record_event(
    state: web::Data<AppState>,
    req: web::Json<RecordEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let event_type = match req.event_type.to_lowercase().as_str() {
        "viewed" => InterestEventType::Viewed,
        "saved" => InterestEventType::Saved,
        "eoi" => InterestEventType::Eoi,
        "applied" => InterestEventType::Applied,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid event type".to_string(),
                message: "Event type must be one of: viewed, saved, eoi, applied".to_string(),
                status_code: 400,
            });
        }
    };

    match state
        .postgres
        .record_interest(&req.team_id, &req.opportunity_id, event_type.into())
        .await
    {
        Ok(_) => {
            tracing::debug!(
                "Recorded interest event: {} -> {} ({:?})",
                req.team_id,
                req.opportunity_id,
                event_type
            );

            // The feed for this team changed shape; drop its cached copy
            let cache_key = CacheKey::matches(&req.team_id);
            if let Err(e) = state.cache.delete(&cache_key).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }

            HttpResponse::Ok().json(RecordEventResponse {
                success: true,
                event_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record interest event: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record event".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get the opportunities a team has engaged with
///
/// GET /api/v1/matches/engaged?teamId={teamId}[&eventType={eventType}]
///
/// Returns engaged opportunity ids plus per-event-type counts, for
/// client-side synchronization and debugging.
async fn get_engaged(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let team_id = match query.get("teamId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing teamId parameter".to_string(),
                message: "teamId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let event_type = match query.get("eventType").map(|s| s.to_lowercase()) {
        None => None,
        Some(value) => match value.as_str() {
            "viewed" => Some(EventType::Viewed),
            "saved" => Some(EventType::Saved),
            "eoi" => Some(EventType::Eoi),
            "applied" => Some(EventType::Applied),
            _ => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid event type".to_string(),
                    message: "Event type must be one of: viewed, saved, eoi, applied".to_string(),
                    status_code: 400,
                });
            }
        },
    };

    let engaged = match state
        .postgres
        .get_engaged_opportunities(team_id, event_type)
        .await
    {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!("Failed to fetch engaged opportunities for {}: {}", team_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch engaged opportunities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state.postgres.get_interest_stats(team_id).await {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "teamId": team_id,
            "engagedOpportunities": engaged,
            "count": engaged.len(),
            "stats": stats,
        })),
        Err(e) => {
            tracing::error!("Failed to fetch interest stats for {}: {}", team_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch interest stats".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
