use crate::models::{
    aggregate_member_skills, skill_list_from_value, CompanyInfo, InterestEventType, Opportunity,
    TeamProfile, Urgency, VerificationStatus, WorkArrangement,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Interest event types as stored in PostgreSQL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interest_event_type", rename_all = "lowercase")]
pub enum EventType {
    Viewed,
    Saved,
    Eoi,
    Applied,
}

impl From<InterestEventType> for EventType {
    fn from(value: InterestEventType) -> Self {
        match value {
            InterestEventType::Viewed => EventType::Viewed,
            InterestEventType::Saved => EventType::Saved,
            InterestEventType::Eoi => EventType::Eoi,
            InterestEventType::Applied => EventType::Applied,
        }
    }
}

/// PostgreSQL client for marketplace data
///
/// Supplies team profiles (with aggregated member skills), opportunity
/// records (with company signals) and the interest-event log that keeps
/// already-applied opportunities out of a team's match feed.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a team with its aggregated member skill set
    ///
    /// The skill set is the case-insensitively de-duplicated union of member
    /// skills; `member_count` is derived from the member rows so the size
    /// factor has a fallback when the team never declared a size.
    pub async fn get_team(&self, team_id: &str) -> Result<TeamProfile, PostgresError> {
        let query = r#"
            SELECT team_id, name, industry, location, remote_status, size,
                   years_working_together, salary_expectation_min, salary_expectation_max
            FROM teams
            WHERE team_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Team {} not found", team_id)))?;

        let member_rows = sqlx::query("SELECT skills FROM team_members WHERE team_id = $1")
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;

        let member_count = member_rows.len() as u32;
        let skills = aggregate_member_skills(
            member_rows
                .iter()
                .map(|row| row.get::<Vec<String>, _>("skills")),
        );

        Ok(TeamProfile {
            team_id: row.get("team_id"),
            name: row.get("name"),
            industry: row.get("industry"),
            location: row.get("location"),
            remote_status: row
                .get::<Option<String>, _>("remote_status")
                .and_then(|value| WorkArrangement::parse(&value)),
            size: row
                .get::<Option<i32>, _>("size")
                .and_then(|value| u32::try_from(value).ok()),
            member_count,
            years_working_together: row.get("years_working_together"),
            salary_expectation_min: row.get("salary_expectation_min"),
            salary_expectation_max: row.get("salary_expectation_max"),
            skills,
        })
    }

    /// Fetch a single opportunity with its company signals
    pub async fn get_opportunity(
        &self,
        opportunity_id: &str,
    ) -> Result<Opportunity, PostgresError> {
        let query = format!("{} WHERE o.opportunity_id = $1", OPPORTUNITY_SELECT);

        let row = sqlx::query(&query)
            .bind(opportunity_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                PostgresError::NotFound(format!("Opportunity {} not found", opportunity_id))
            })?;

        Ok(map_opportunity(&row))
    }

    /// Fetch open opportunities for the match feed, featured first
    pub async fn list_open_opportunities(
        &self,
        limit: usize,
    ) -> Result<Vec<Opportunity>, PostgresError> {
        let query = format!(
            "{} WHERE o.status = 'open' ORDER BY o.featured DESC, o.created_at DESC LIMIT $1",
            OPPORTUNITY_SELECT
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} open opportunities", rows.len());

        Ok(rows.iter().map(map_opportunity).collect())
    }

    /// Record an interest event between a team and an opportunity
    ///
    /// One row per pair; a later event overwrites the earlier one, so an EOI
    /// that becomes an application is tracked as applied.
    pub async fn record_interest(
        &self,
        team_id: &str,
        opportunity_id: &str,
        event_type: EventType,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO interest_events (team_id, opportunity_id, event_type, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (team_id, opportunity_id)
            DO UPDATE SET
                event_type = EXCLUDED.event_type,
                created_at = EXCLUDED.created_at
        "#;

        sqlx::query(query)
            .bind(team_id)
            .bind(opportunity_id)
            .bind(event_type)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded interest event: {} -> {} ({:?})",
            team_id,
            opportunity_id,
            event_type
        );

        Ok(())
    }

    /// Opportunity ids a team has engaged with, optionally filtered by
    /// event type (e.g. only applied, for feed exclusion)
    pub async fn get_engaged_opportunities(
        &self,
        team_id: &str,
        event_type: Option<EventType>,
    ) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT opportunity_id
            FROM interest_events
            WHERE team_id = $1
              AND ($2::interest_event_type IS NULL OR event_type = $2)
        "#;

        let rows = sqlx::query(query)
            .bind(team_id)
            .bind(event_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("opportunity_id")).collect())
    }

    /// Remove an interest event (e.g. a withdrawn application)
    pub async fn remove_interest(
        &self,
        team_id: &str,
        opportunity_id: &str,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM interest_events
            WHERE team_id = $1 AND opportunity_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(team_id)
            .bind(opportunity_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-event-type statistics for a team's engagement
    pub async fn get_interest_stats(&self, team_id: &str) -> Result<InterestStats, PostgresError> {
        let query = r#"
            SELECT
                COUNT(*) as total_events,
                COUNT(*) FILTER (WHERE event_type = 'viewed') as viewed,
                COUNT(*) FILTER (WHERE event_type = 'saved') as saved,
                COUNT(*) FILTER (WHERE event_type = 'eoi') as eoi,
                COUNT(*) FILTER (WHERE event_type = 'applied') as applied,
                MAX(created_at) as last_event_at
            FROM interest_events
            WHERE team_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(InterestStats {
            team_id: team_id.to_string(),
            total_events: row.get("total_events"),
            viewed: row.get("viewed"),
            saved: row.get("saved"),
            eoi: row.get("eoi"),
            applied: row.get("applied"),
            last_event_at: row.get("last_event_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

const OPPORTUNITY_SELECT: &str = r#"
    SELECT o.opportunity_id, o.title, o.industry, o.location, o.remote_policy,
           o.team_size_min, o.team_size_max, o.compensation_min, o.compensation_max,
           o.required_skills, o.preferred_skills, o.urgency, o.featured,
           c.name AS company_name, c.verification_status, c.logo_url,
           c.industry AS company_industry,
           (SELECT COUNT(*)
              FROM interest_events e
             WHERE e.opportunity_id = o.opportunity_id
               AND e.event_type = 'applied') AS application_count
    FROM opportunities o
    LEFT JOIN companies c ON c.company_id = o.company_id
"#;

fn map_opportunity(row: &PgRow) -> Opportunity {
    Opportunity {
        opportunity_id: row.get("opportunity_id"),
        title: row.get("title"),
        industry: row.get("industry"),
        location: row.get("location"),
        remote_policy: row
            .get::<Option<String>, _>("remote_policy")
            .and_then(|value| WorkArrangement::parse(&value)),
        team_size_min: row
            .get::<Option<i32>, _>("team_size_min")
            .and_then(|value| u32::try_from(value).ok()),
        team_size_max: row
            .get::<Option<i32>, _>("team_size_max")
            .and_then(|value| u32::try_from(value).ok()),
        compensation_min: row.get("compensation_min"),
        compensation_max: row.get("compensation_max"),
        required_skills: skill_list_from_value(row.get("required_skills")),
        preferred_skills: skill_list_from_value(row.get("preferred_skills")),
        urgency: row
            .get::<Option<String>, _>("urgency")
            .and_then(|value| Urgency::parse(&value)),
        featured: row.get("featured"),
        company: CompanyInfo {
            name: row.get("company_name"),
            verification_status: row
                .get::<Option<String>, _>("verification_status")
                .map(|value| VerificationStatus::parse(&value)),
            logo_url: row.get("logo_url"),
            industry: row.get("company_industry"),
        },
        application_count: u32::try_from(row.get::<i64, _>("application_count")).unwrap_or(0),
    }
}

/// Statistics about a team's interest events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestStats {
    pub team_id: String,
    pub total_events: i64,
    pub viewed: i64,
    pub saved: i64,
    pub eoi: i64,
    pub applied: i64,
    pub last_event_at: Option<chrono::DateTime<chrono::Utc>>,
}
