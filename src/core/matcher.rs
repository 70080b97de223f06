use crate::core::scoring::calculate_match;
use crate::models::{Match, Opportunity, OpportunityMatch, ScoringWeights, TeamProfile};

/// Result of ranking one team against a set of opportunities
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<OpportunityMatch>,
    pub total_candidates: usize,
}

/// Match feed orchestrator
///
/// # Pipeline
/// 1. Exclude opportunities the team has already engaged with
/// 2. Score each remaining opportunity
/// 3. Drop matches below the requested minimum score
/// 4. Rank by total (descending, stable) and truncate
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score a single team/opportunity pair
    pub fn score_pair(
        &self,
        team: &TeamProfile,
        team_skills: &[String],
        opportunity: &Opportunity,
    ) -> Match {
        calculate_match(team, team_skills, opportunity, &self.weights)
    }

    /// Build the ranked match feed for a team
    ///
    /// # Arguments
    /// * `team` - the team profile
    /// * `team_skills` - pre-aggregated union of member skills
    /// * `opportunities` - candidate opportunities from the database
    /// * `exclude_ids` - opportunity ids to drop before scoring
    /// * `min_score` - minimum total to keep a match
    /// * `limit` - maximum number of matches to return
    pub fn find_matches(
        &self,
        team: &TeamProfile,
        team_skills: &[String],
        opportunities: Vec<Opportunity>,
        exclude_ids: &[String],
        min_score: u32,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = opportunities.len();

        let mut matches: Vec<OpportunityMatch> = opportunities
            .into_iter()
            .filter(|opportunity| !exclude_ids.contains(&opportunity.opportunity_id))
            .filter_map(|opportunity| {
                let score = calculate_match(team, team_skills, &opportunity, &self.weights);

                if score.total >= min_score {
                    Some(OpportunityMatch {
                        opportunity_id: opportunity.opportunity_id,
                        title: opportunity.title,
                        company_name: opportunity.company.name,
                        featured: opportunity.featured,
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps input order on equal totals, so the feed is
        // deterministic for a fixed opportunity list.
        matches.sort_by_key(|m| std::cmp::Reverse(m.score.total));
        matches.truncate(limit);

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
