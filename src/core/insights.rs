use crate::models::{MatchBreakdown, Opportunity, TeamProfile, VerificationStatus};

/// Positive signals surfaced alongside a match score
pub fn build_strengths(opportunity: &Opportunity, breakdown: &MatchBreakdown) -> Vec<String> {
    let mut strengths = Vec::new();

    if breakdown.skills_match >= 80 {
        strengths.push("Strong skills alignment".to_string());
    }
    if breakdown.industry_match >= 90 {
        strengths.push("Direct industry experience".to_string());
    }
    if breakdown.compensation_match >= 85 {
        strengths.push("Compensation meets expectations".to_string());
    }
    if opportunity.featured {
        strengths.push("Featured opportunity".to_string());
    }
    if opportunity.company.verification_status == Some(VerificationStatus::Verified) {
        strengths.push("Verified company".to_string());
    }

    strengths
}

/// Risk flags a team should weigh before engaging
pub fn build_concerns(breakdown: &MatchBreakdown) -> Vec<String> {
    let mut concerns = Vec::new();

    if breakdown.skills_match < 50 {
        concerns.push("Skills gap may require training".to_string());
    }
    if breakdown.industry_match < 50 {
        concerns.push("Significant industry transition".to_string());
    }
    if breakdown.compensation_match < 60 {
        concerns.push("Below compensation expectations".to_string());
    }
    if breakdown.location_match < 50 {
        concerns.push("Location/remote work mismatch".to_string());
    }
    if breakdown.size_match < 70 {
        concerns.push("Team size doesn't match requirements".to_string());
    }

    concerns
}

/// Contextual notes about the transaction itself
pub fn build_insights(
    team: &TeamProfile,
    opportunity: &Opportunity,
    breakdown: &MatchBreakdown,
) -> Vec<String> {
    let mut insights = Vec::new();

    if breakdown.urgency_bonus >= 85 {
        insights.push("High urgency - faster decision process expected".to_string());
    }
    if opportunity.application_count > 10 {
        insights.push(format!(
            "Competitive opportunity with {}+ applications",
            opportunity.application_count
        ));
    }
    if let Some(years) = team.years_working_together {
        if years >= 3.0 {
            insights.push(format!(
                "{} years of team cohesion provides competitive advantage",
                years
            ));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyInfo;

    fn breakdown_all(value: u32) -> MatchBreakdown {
        MatchBreakdown {
            skills_match: value,
            industry_match: value,
            location_match: value,
            size_match: value,
            compensation_match: value,
            urgency_bonus: value,
            company_quality: value,
        }
    }

    fn opportunity() -> Opportunity {
        Opportunity {
            opportunity_id: "opp_1".to_string(),
            title: "Trading Desk".to_string(),
            industry: None,
            location: None,
            remote_policy: None,
            team_size_min: None,
            team_size_max: None,
            compensation_min: None,
            compensation_max: None,
            required_skills: vec![],
            preferred_skills: vec![],
            urgency: None,
            featured: false,
            company: CompanyInfo::default(),
            application_count: 0,
        }
    }

    fn team() -> TeamProfile {
        TeamProfile {
            team_id: "team_1".to_string(),
            name: "Quant Pod".to_string(),
            industry: None,
            location: None,
            remote_status: None,
            size: None,
            member_count: 4,
            years_working_together: None,
            salary_expectation_min: None,
            salary_expectation_max: None,
            skills: vec![],
        }
    }

    #[test]
    fn test_strengths_thresholds() {
        let mut opp = opportunity();
        opp.featured = true;
        opp.company.verification_status = Some(VerificationStatus::Verified);

        let strengths = build_strengths(&opp, &breakdown_all(90));
        assert_eq!(
            strengths,
            vec![
                "Strong skills alignment",
                "Direct industry experience",
                "Compensation meets expectations",
                "Featured opportunity",
                "Verified company",
            ]
        );

        assert!(build_strengths(&opportunity(), &breakdown_all(79)).is_empty());
    }

    #[test]
    fn test_concerns_thresholds() {
        let concerns = build_concerns(&breakdown_all(40));
        assert_eq!(
            concerns,
            vec![
                "Skills gap may require training",
                "Significant industry transition",
                "Below compensation expectations",
                "Location/remote work mismatch",
                "Team size doesn't match requirements",
            ]
        );

        assert!(build_concerns(&breakdown_all(70)).is_empty());
    }

    #[test]
    fn test_insights_composition() {
        let mut opp = opportunity();
        opp.application_count = 14;
        let mut t = team();
        t.years_working_together = Some(4.5);

        let mut breakdown = breakdown_all(70);
        breakdown.urgency_bonus = 85;

        let insights = build_insights(&t, &opp, &breakdown);
        assert_eq!(
            insights,
            vec![
                "High urgency - faster decision process expected",
                "Competitive opportunity with 14+ applications",
                "4.5 years of team cohesion provides competitive advantage",
            ]
        );
    }

    #[test]
    fn test_insights_whole_years_print_without_fraction() {
        let mut t = team();
        t.years_working_together = Some(3.0);

        let insights = build_insights(&t, &opportunity(), &breakdown_all(70));
        assert_eq!(
            insights,
            vec!["3 years of team cohesion provides competitive advantage"]
        );
    }

    #[test]
    fn test_insights_quiet_below_thresholds() {
        let mut t = team();
        t.years_working_together = Some(2.9);
        let mut opp = opportunity();
        opp.application_count = 10;

        assert!(build_insights(&t, &opp, &breakdown_all(70)).is_empty());
    }
}
