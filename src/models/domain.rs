use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Work arrangement, used both for a team's current status and an
/// opportunity's policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkArrangement {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkArrangement {
    /// Parse a database/user string, returning None for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "remote" => Some(Self::Remote),
            "hybrid" => Some(Self::Hybrid),
            "onsite" => Some(Self::Onsite),
            _ => None,
        }
    }
}

/// Hiring urgency declared on an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Standard,
    Low,
}

impl Urgency {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "standard" => Some(Self::Standard),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Company verification state. Anything that is neither verified nor pending
/// carries no scoring bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Other,
}

impl VerificationStatus {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "verified" => Self::Verified,
            "pending" => Self::Pending,
            _ => Self::Other,
        }
    }
}

/// Team profile with the fields the matching engine reads
///
/// Every scorable field is optional; each factor substitutes its documented
/// neutral default when data is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    #[serde(rename = "teamId")]
    pub team_id: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "remoteStatus", default, deserialize_with = "lenient_option")]
    pub remote_status: Option<WorkArrangement>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(rename = "memberCount", default)]
    pub member_count: u32,
    #[serde(rename = "yearsWorkingTogether", default)]
    pub years_working_together: Option<f64>,
    #[serde(rename = "salaryExpectationMin", default)]
    pub salary_expectation_min: Option<i64>,
    #[serde(rename = "salaryExpectationMax", default)]
    pub salary_expectation_max: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub skills: Vec<String>,
}

impl TeamProfile {
    /// Declared size, falling back to the member count
    pub fn effective_size(&self) -> u32 {
        self.size.unwrap_or(self.member_count)
    }
}

/// Company signals attached to an opportunity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "verificationStatus", default, deserialize_with = "lenient_verification")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// A posted team-hiring opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    pub title: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "remotePolicy", default, deserialize_with = "lenient_option")]
    pub remote_policy: Option<WorkArrangement>,
    #[serde(rename = "teamSizeMin", default)]
    pub team_size_min: Option<u32>,
    #[serde(rename = "teamSizeMax", default)]
    pub team_size_max: Option<u32>,
    #[serde(rename = "compensationMin", default)]
    pub compensation_min: Option<i64>,
    #[serde(rename = "compensationMax", default)]
    pub compensation_max: Option<i64>,
    #[serde(rename = "requiredSkills", default, deserialize_with = "lenient_string_list")]
    pub required_skills: Vec<String>,
    #[serde(rename = "preferredSkills", default, deserialize_with = "lenient_string_list")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub company: CompanyInfo,
    #[serde(rename = "applicationCount", default)]
    pub application_count: u32,
}

/// Interest event types on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestEventType {
    Viewed,
    Saved,
    /// Expression of interest: non-binding, lighter than a full application
    Eoi,
    Applied,
}

/// Seven-factor breakdown behind a match total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    #[serde(rename = "skillsMatch")]
    pub skills_match: u32,
    #[serde(rename = "industryMatch")]
    pub industry_match: u32,
    #[serde(rename = "locationMatch")]
    pub location_match: u32,
    #[serde(rename = "sizeMatch")]
    pub size_match: u32,
    #[serde(rename = "compensationMatch")]
    pub compensation_match: u32,
    #[serde(rename = "urgencyBonus")]
    pub urgency_bonus: u32,
    #[serde(rename = "companyQuality")]
    pub company_quality: u32,
}

/// Categorical reading of a match total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Recommendation {
    /// Thresholds are contract values shared with the front end, not tunable
    /// configuration.
    pub fn from_total(total: u32) -> Self {
        match total {
            85.. => Self::Excellent,
            70..=84 => Self::Good,
            55..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Computed compatibility between one team and one opportunity
///
/// Ephemeral value, recomputed per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub total: u32,
    pub breakdown: MatchBreakdown,
    pub recommendation: Recommendation,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub insights: Vec<String>,
}

/// A scored opportunity in a team's match feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityMatch {
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    pub title: String,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    pub featured: bool,
    #[serde(rename = "match")]
    pub score: Match,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skills: f64,
    pub industry: f64,
    pub location: f64,
    pub size: f64,
    pub compensation: f64,
    pub urgency: f64,
    pub company_quality: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.30,
            industry: 0.20,
            location: 0.10,
            size: 0.10,
            compensation: 0.15,
            urgency: 0.05,
            company_quality: 0.10,
        }
    }
}

/// Union of member skill lists: case preserved, de-duplicated
/// case-insensitively, first spelling wins.
pub fn aggregate_member_skills<I>(member_skills: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut seen = std::collections::HashSet::new();
    let mut skills = Vec::new();
    for member in member_skills {
        for skill in member {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                skills.push(trimmed.to_string());
            }
        }
    }
    skills
}

/// Extract a string list from arbitrary JSON, degrading anything malformed
/// (non-array values, non-string elements) to the empty list.
pub fn skill_list_from_value(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(skill_list_from_value(value))
}

/// Deserialize an optional enum, mapping null and unknown strings to None
/// instead of failing the whole record.
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Verification status keeps third-party states as `Other` rather than
/// dropping them, so "neither verified nor pending" is distinguishable from
/// "unknown".
fn lenient_verification<'de, D>(deserializer: D) -> Result<Option<VerificationStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(VerificationStatus::parse(&s)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_thresholds() {
        assert_eq!(Recommendation::from_total(100), Recommendation::Excellent);
        assert_eq!(Recommendation::from_total(85), Recommendation::Excellent);
        assert_eq!(Recommendation::from_total(84), Recommendation::Good);
        assert_eq!(Recommendation::from_total(70), Recommendation::Good);
        assert_eq!(Recommendation::from_total(69), Recommendation::Fair);
        assert_eq!(Recommendation::from_total(55), Recommendation::Fair);
        assert_eq!(Recommendation::from_total(54), Recommendation::Poor);
        assert_eq!(Recommendation::from_total(0), Recommendation::Poor);
    }

    #[test]
    fn test_skill_aggregation_dedupes_case_insensitively() {
        let skills = aggregate_member_skills(vec![
            vec!["Python".to_string(), "SQL".to_string()],
            vec!["python".to_string(), "Machine Learning".to_string()],
            vec!["  ".to_string()],
        ]);

        assert_eq!(skills, vec!["Python", "SQL", "Machine Learning"]);
    }

    #[test]
    fn test_malformed_skill_lists_degrade_to_empty() {
        let opportunity: Opportunity = serde_json::from_value(json!({
            "opportunityId": "opp_1",
            "title": "Quant Team",
            "requiredSkills": "not-an-array",
            "preferredSkills": [1, 2, {"nested": true}, "Rust"],
        }))
        .unwrap();

        assert!(opportunity.required_skills.is_empty());
        assert_eq!(opportunity.preferred_skills, vec!["Rust"]);
    }

    #[test]
    fn test_unknown_enum_strings_degrade_to_none() {
        let opportunity: Opportunity = serde_json::from_value(json!({
            "opportunityId": "opp_1",
            "title": "Quant Team",
            "remotePolicy": "four-day-office",
            "urgency": "yesterday",
        }))
        .unwrap();

        assert_eq!(opportunity.remote_policy, None);
        assert_eq!(opportunity.urgency, None);
    }

    #[test]
    fn test_verification_status_other_variant() {
        let company: CompanyInfo = serde_json::from_value(json!({
            "verificationStatus": "rejected",
        }))
        .unwrap();

        assert_eq!(company.verification_status, Some(VerificationStatus::Other));
        assert_eq!(VerificationStatus::parse("verified"), VerificationStatus::Verified);
        assert_eq!(VerificationStatus::parse("REJECTED"), VerificationStatus::Other);
    }

    #[test]
    fn test_effective_size_falls_back_to_member_count() {
        let team = TeamProfile {
            team_id: "team_1".to_string(),
            name: "Team".to_string(),
            industry: None,
            location: None,
            remote_status: None,
            size: None,
            member_count: 4,
            years_working_together: None,
            salary_expectation_min: None,
            salary_expectation_max: None,
            skills: vec![],
        };

        assert_eq!(team.effective_size(), 4);
    }
}
