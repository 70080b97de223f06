use crate::core::industry::industry_affinity;
use crate::core::insights::{build_concerns, build_insights, build_strengths};
use crate::models::{
    CompanyInfo, Match, MatchBreakdown, Opportunity, Recommendation, ScoringWeights, TeamProfile,
    Urgency, VerificationStatus, WorkArrangement,
};

/// Compute the full match between a team and an opportunity
///
/// Seven independent factors, each 0-100, combined as a weighted sum:
///
/// ```text
/// total = round(
///     skills * 0.30 + industry * 0.20 + location * 0.10 + size * 0.10
///     + compensation * 0.15 + urgency * 0.05 + company_quality * 0.10
/// )
/// ```
///
/// Total function: any combination of missing or malformed input degrades to
/// the per-factor neutral default, never an error. `team_skills` is the
/// pre-aggregated union of member skills (see
/// [`crate::models::aggregate_member_skills`]).
pub fn calculate_match(
    team: &TeamProfile,
    team_skills: &[String],
    opportunity: &Opportunity,
    weights: &ScoringWeights,
) -> Match {
    let breakdown = MatchBreakdown {
        skills_match: skills_score(
            team_skills,
            &opportunity.required_skills,
            &opportunity.preferred_skills,
        ),
        industry_match: industry_affinity(
            team.industry.as_deref(),
            opportunity.industry.as_deref(),
        ),
        location_match: location_score(team, opportunity),
        size_match: size_score(team, opportunity),
        compensation_match: compensation_score(team, opportunity),
        urgency_bonus: urgency_score(opportunity.urgency),
        company_quality: company_quality_score(&opportunity.company),
    };

    let weighted = breakdown.skills_match as f64 * weights.skills
        + breakdown.industry_match as f64 * weights.industry
        + breakdown.location_match as f64 * weights.location
        + breakdown.size_match as f64 * weights.size
        + breakdown.compensation_match as f64 * weights.compensation
        + breakdown.urgency_bonus as f64 * weights.urgency
        + breakdown.company_quality as f64 * weights.company_quality;

    let total = weighted.round().clamp(0.0, 100.0) as u32;

    Match {
        total,
        recommendation: Recommendation::from_total(total),
        strengths: build_strengths(opportunity, &breakdown),
        concerns: build_concerns(&breakdown),
        insights: build_insights(team, opportunity, &breakdown),
        breakdown,
    }
}

/// Skills factor: required skills carry 70 points, preferred skills 30.
///
/// A wanted skill counts as matched when it and any team skill contain each
/// other case-insensitively, so "Python" satisfies "python scripting". With
/// no skill requirements at all the opportunity is not skill-constrained and
/// the factor is a neutral-positive 70.
pub fn skills_score(team_skills: &[String], required: &[String], preferred: &[String]) -> u32 {
    if required.is_empty() && preferred.is_empty() {
        return 70;
    }

    let have: Vec<String> = team_skills.iter().map(|s| s.to_lowercase()).collect();

    let required_part = if required.is_empty() {
        35.0
    } else {
        let matched = required.iter().filter(|s| skill_matched(&have, s)).count();
        matched as f64 / required.len() as f64 * 70.0
    };

    let preferred_part = if preferred.is_empty() {
        15.0
    } else {
        let matched = preferred.iter().filter(|s| skill_matched(&have, s)).count();
        matched as f64 / preferred.len() as f64 * 30.0
    };

    ((required_part + preferred_part).round() as u32).min(100)
}

fn skill_matched(team_skills_lower: &[String], wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    team_skills_lower
        .iter()
        .any(|have| have.contains(&wanted) || wanted.contains(have.as_str()))
}

/// Location factor. A remote opportunity fits every team. A remote-only team
/// is penalized by stricter policies (hybrid 70, onsite 30). Hybrid on either
/// side is workable (75). Otherwise the location strings decide: exact match
/// 100, same trailing region segment 70, unknown or different 50.
pub fn location_score(team: &TeamProfile, opportunity: &Opportunity) -> u32 {
    use WorkArrangement::{Hybrid, Onsite, Remote};

    match (opportunity.remote_policy, team.remote_status) {
        (Some(Remote), _) => 100,
        (Some(Hybrid), Some(Remote)) => 70,
        (Some(Onsite), Some(Remote)) => 30,
        (Some(Hybrid), _) | (_, Some(Hybrid)) => 75,
        _ => location_proximity(team.location.as_deref(), opportunity.location.as_deref()),
    }
}

fn location_proximity(team: Option<&str>, opportunity: Option<&str>) -> u32 {
    let (Some(team), Some(opportunity)) = (team, opportunity) else {
        return 50;
    };

    let team = team.to_lowercase();
    let opportunity = opportunity.to_lowercase();

    if team == opportunity {
        return 100;
    }

    // "boston, ma" and "new york, ny" differ; "cambridge, ma" shares the
    // trailing region segment with "boston, ma".
    match (region_suffix(&team), region_suffix(&opportunity)) {
        (Some(a), Some(b)) if a == b => 70,
        _ => 50,
    }
}

fn region_suffix(location: &str) -> Option<&str> {
    location
        .rsplit(',')
        .next()
        .map(str::trim)
        .filter(|suffix| !suffix.is_empty())
}

/// Size factor: inside the requested range scores 100; being too small is
/// penalized 15 points per missing member, too large 10 points per extra.
/// Unstated bounds default to 1..=20.
pub fn size_score(team: &TeamProfile, opportunity: &Opportunity) -> u32 {
    let size = i64::from(team.effective_size());
    let min = i64::from(opportunity.team_size_min.unwrap_or(1));
    let max = i64::from(opportunity.team_size_max.unwrap_or(20));

    if (min..=max).contains(&size) {
        100
    } else if size < min {
        (100 - 15 * (min - size)).max(0) as u32
    } else {
        (100 - 10 * (size - max)).max(0) as u32
    }
}

/// Compensation factor. With bounds known on both sides: the opportunity
/// covering the team's upper expectation scores 100, covering only the lower
/// bound 85, and a shortfall decays with the gap relative to the team's
/// minimum, floored at 20. One-sided bounds borrow the present value.
pub fn compensation_score(team: &TeamProfile, opportunity: &Opportunity) -> u32 {
    let team_min = team.salary_expectation_min.or(team.salary_expectation_max);
    let team_max = team.salary_expectation_max.or(team.salary_expectation_min);
    let opportunity_max = opportunity.compensation_max.or(opportunity.compensation_min);

    let (Some(team_min), Some(team_max), Some(opportunity_max)) =
        (team_min, team_max, opportunity_max)
    else {
        return 70;
    };

    if opportunity_max >= team_max {
        return 100;
    }
    if opportunity_max >= team_min {
        return 85;
    }
    if team_min <= 0 {
        return 70;
    }

    let gap = (team_min - opportunity_max) as f64 / team_min as f64;
    ((70.0 - gap * 100.0).round() as i64).max(20) as u32
}

/// Urgency factor: fixed mapping, neutral 70 when unknown
pub fn urgency_score(urgency: Option<Urgency>) -> u32 {
    match urgency {
        Some(Urgency::Critical) => 100,
        Some(Urgency::High) => 85,
        Some(Urgency::Standard) => 70,
        Some(Urgency::Low) => 50,
        None => 70,
    }
}

/// Company quality factor: base 50, +30 verified / +10 pending, +10 for a
/// logo, +10 for a stated industry, capped at 100.
pub fn company_quality_score(company: &CompanyInfo) -> u32 {
    let mut score = 50;

    score += match company.verification_status {
        Some(VerificationStatus::Verified) => 30,
        Some(VerificationStatus::Pending) => 10,
        _ => 0,
    };

    if company.logo_url.is_some() {
        score += 10;
    }
    if company.industry.is_some() {
        score += 10;
    }

    score.min(100)
}
