// Unit tests for the Liftout match scorer

use liftout_algo::core::scoring::{
    calculate_match, compensation_score, location_score, size_score, skills_score, urgency_score,
};
use liftout_algo::core::industry_affinity;
use liftout_algo::models::{
    CompanyInfo, Opportunity, Recommendation, ScoringWeights, TeamProfile, Urgency,
    VerificationStatus, WorkArrangement,
};

fn make_team() -> TeamProfile {
    TeamProfile {
        team_id: "team_1".to_string(),
        name: "Quant Research Pod".to_string(),
        industry: Some("Financial Services".to_string()),
        location: Some("New York, NY".to_string()),
        remote_status: None,
        size: Some(5),
        member_count: 5,
        years_working_together: Some(4.0),
        salary_expectation_min: Some(150_000),
        salary_expectation_max: Some(200_000),
        skills: vec!["Python".to_string(), "Machine Learning".to_string()],
    }
}

fn make_opportunity() -> Opportunity {
    Opportunity {
        opportunity_id: "opp_1".to_string(),
        title: "Quant Trading Team".to_string(),
        industry: Some("Fintech".to_string()),
        location: Some("New York, NY".to_string()),
        remote_policy: None,
        team_size_min: Some(3),
        team_size_max: Some(8),
        compensation_min: Some(180_000),
        compensation_max: Some(250_000),
        required_skills: vec!["python".to_string(), "sql".to_string()],
        preferred_skills: vec![],
        urgency: Some(Urgency::High),
        featured: true,
        company: CompanyInfo {
            name: Some("Acme Capital".to_string()),
            verification_status: Some(VerificationStatus::Verified),
            logo_url: Some("https://cdn.example.com/acme.png".to_string()),
            industry: Some("Fintech".to_string()),
        },
        application_count: 12,
    }
}

#[test]
fn test_all_subscores_and_total_bounded() {
    // Sweep a grid of degenerate inputs; every score must stay in 0..=100
    let teams = vec![
        make_team(),
        TeamProfile {
            team_id: "empty".to_string(),
            name: "Empty".to_string(),
            industry: None,
            location: None,
            remote_status: None,
            size: None,
            member_count: 0,
            years_working_together: None,
            salary_expectation_min: None,
            salary_expectation_max: None,
            skills: vec![],
        },
        TeamProfile {
            team_id: "extreme".to_string(),
            name: "Extreme".to_string(),
            industry: Some("Agriculture".to_string()),
            location: Some("Remote Island".to_string()),
            remote_status: Some(WorkArrangement::Remote),
            size: Some(500),
            member_count: 2,
            years_working_together: Some(30.0),
            salary_expectation_min: Some(5_000_000),
            salary_expectation_max: Some(9_000_000),
            skills: vec!["COBOL".to_string()],
        },
    ];

    let mut opportunities = vec![make_opportunity()];
    let mut sparse = make_opportunity();
    sparse.industry = None;
    sparse.location = None;
    sparse.remote_policy = None;
    sparse.team_size_min = None;
    sparse.team_size_max = None;
    sparse.compensation_min = None;
    sparse.compensation_max = None;
    sparse.required_skills = vec![];
    sparse.preferred_skills = vec![];
    sparse.urgency = None;
    sparse.company = CompanyInfo::default();
    opportunities.push(sparse);

    let weights = ScoringWeights::default();
    for team in &teams {
        for opportunity in &opportunities {
            let result = calculate_match(team, &team.skills, opportunity, &weights);
            assert!(result.total <= 100);
            for sub in [
                result.breakdown.skills_match,
                result.breakdown.industry_match,
                result.breakdown.location_match,
                result.breakdown.size_match,
                result.breakdown.compensation_match,
                result.breakdown.urgency_bonus,
                result.breakdown.company_quality,
            ] {
                assert!(sub <= 100, "sub-score out of range: {}", sub);
            }
        }
    }
}

#[test]
fn test_determinism() {
    let team = make_team();
    let opportunity = make_opportunity();
    let weights = ScoringWeights::default();

    let first = calculate_match(&team, &team.skills, &opportunity, &weights);
    let second = calculate_match(&team, &team.skills, &opportunity, &weights);

    assert_eq!(first, second);
}

#[test]
fn test_recommendation_consistent_with_total() {
    let team = make_team();
    let opportunity = make_opportunity();
    let result = calculate_match(&team, &team.skills, &opportunity, &ScoringWeights::default());

    let expected = match result.total {
        t if t >= 85 => Recommendation::Excellent,
        t if t >= 70 => Recommendation::Good,
        t if t >= 55 => Recommendation::Fair,
        _ => Recommendation::Poor,
    };
    assert_eq!(result.recommendation, expected);
}

#[test]
fn test_remote_opportunity_always_scores_location_100() {
    let mut opportunity = make_opportunity();
    opportunity.remote_policy = Some(WorkArrangement::Remote);
    opportunity.location = Some("Tokyo, Japan".to_string());

    let mut team = make_team();
    team.remote_status = Some(WorkArrangement::Onsite);
    team.location = Some("Lisbon, Portugal".to_string());

    assert_eq!(location_score(&team, &opportunity), 100);
}

#[test]
fn test_size_within_bounds_scores_100() {
    let team = make_team(); // size 5
    let opportunity = make_opportunity(); // 3..=8
    assert_eq!(size_score(&team, &opportunity), 100);
}

#[test]
fn test_unconstrained_skills_default_to_70() {
    assert_eq!(skills_score(&["Python".to_string()], &[], &[]), 70);
    assert_eq!(skills_score(&[], &[], &[]), 70);
}

#[test]
fn test_skills_worked_example() {
    // required ["python", "sql"], matched 1 of 2, no preferred:
    // round(0.5 * 70 + 15) = 50
    let team_skills = vec!["Python".to_string(), "Machine Learning".to_string()];
    let required = vec!["python".to_string(), "sql".to_string()];

    assert_eq!(skills_score(&team_skills, &required, &[]), 50);
}

#[test]
fn test_industry_worked_example() {
    assert_eq!(
        industry_affinity(Some("Financial Services"), Some("Fintech")),
        90
    );
}

#[test]
fn test_compensation_worked_example() {
    let team = make_team(); // expects 150k..200k
    let opportunity = make_opportunity(); // offers up to 250k
    assert_eq!(compensation_score(&team, &opportunity), 100);
}

#[test]
fn test_urgency_worked_example() {
    assert_eq!(urgency_score(Some(Urgency::High)), 85);
    assert_eq!(urgency_score(None), 70);
}

#[test]
fn test_weighted_total_reproduces_exact_arithmetic() {
    let team = make_team();
    let opportunity = make_opportunity();
    let weights = ScoringWeights::default();
    let result = calculate_match(&team, &team.skills, &opportunity, &weights);

    let b = result.breakdown;
    let expected = (b.skills_match as f64 * weights.skills
        + b.industry_match as f64 * weights.industry
        + b.location_match as f64 * weights.location
        + b.size_match as f64 * weights.size
        + b.compensation_match as f64 * weights.compensation
        + b.urgency_bonus as f64 * weights.urgency
        + b.company_quality as f64 * weights.company_quality)
        .round() as u32;

    assert_eq!(result.total, expected);
}

#[test]
fn test_scorer_never_panics_on_hostile_records() {
    // Malformed JSON shapes degrade through the lenient deserializers and
    // the scorer still produces a bounded match.
    let opportunity: Opportunity = serde_json::from_value(serde_json::json!({
        "opportunityId": "hostile",
        "title": "Hostile",
        "requiredSkills": {"oops": true},
        "preferredSkills": 42,
        "urgency": "panic",
        "remotePolicy": [],
        "teamSizeMin": null,
        "company": {"verificationStatus": "banned"},
    }))
    .unwrap();

    let team = make_team();
    let result = calculate_match(&team, &team.skills, &opportunity, &ScoringWeights::default());

    assert!(result.total <= 100);
    // both skill lists degraded to empty: neutral 70
    assert_eq!(result.breakdown.skills_match, 70);
    assert_eq!(result.breakdown.urgency_bonus, 70);
}
