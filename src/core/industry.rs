/// Industry affinity rules, team industry -> opportunity industry -> score.
///
/// Hand-maintained business parameters. Entries are directional; the lookup
/// falls back to the reverse direction before the token-overlap heuristic.
const INDUSTRY_AFFINITY: &[(&str, &str, u32)] = &[
    ("financial services", "fintech", 90),
    ("financial services", "banking", 85),
    ("financial services", "insurance", 75),
    ("financial services", "technology", 60),
    ("fintech", "financial services", 85),
    ("fintech", "technology", 80),
    ("fintech", "banking", 80),
    ("technology", "fintech", 85),
    ("technology", "software", 95),
    ("technology", "financial services", 60),
    ("technology", "healthcare", 55),
    ("technology", "media", 60),
    ("software", "technology", 95),
    ("healthcare", "biotech", 85),
    ("healthcare", "pharmaceuticals", 80),
    ("healthcare", "technology", 55),
    ("biotech", "healthcare", 85),
    ("biotech", "pharmaceuticals", 85),
    ("banking", "financial services", 85),
    ("banking", "fintech", 75),
    ("insurance", "financial services", 75),
    ("consulting", "financial services", 75),
    ("consulting", "technology", 70),
    ("legal", "financial services", 65),
    ("legal", "consulting", 70),
];

/// Score when both industries are known strings but unrelated by table or
/// token overlap. Known-vs-known never scores below this floor.
const UNRELATED_FLOOR: u32 = 40;

/// Score industry compatibility between a team and an opportunity.
///
/// Missing data on either side is neutral (50). Identical industries score
/// 100, otherwise the affinity table decides, then shared word tokens (65),
/// then the unrelated floor.
pub fn industry_affinity(team: Option<&str>, opportunity: Option<&str>) -> u32 {
    let (Some(team), Some(opportunity)) = (team, opportunity) else {
        return 50;
    };

    let team = team.to_lowercase();
    let opportunity = opportunity.to_lowercase();

    if team == opportunity {
        return 100;
    }

    if let Some(score) = lookup(&team, &opportunity).or_else(|| lookup(&opportunity, &team)) {
        return score;
    }

    if shares_word_token(&team, &opportunity) {
        65
    } else {
        UNRELATED_FLOOR
    }
}

fn lookup(from: &str, to: &str) -> Option<u32> {
    INDUSTRY_AFFINITY
        .iter()
        .find(|(a, b, _)| *a == from && *b == to)
        .map(|(_, _, score)| *score)
}

fn shares_word_token(a: &str, b: &str) -> bool {
    word_tokens(a).any(|token| word_tokens(b).any(|other| other == token))
}

fn word_tokens(value: &str) -> impl Iterator<Item = &str> + '_ {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}
