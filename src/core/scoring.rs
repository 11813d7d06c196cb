use crate::models::{GoalScore, SustainabilityAssessment};

/// Points awarded for each goal mentioned in the plan
pub const GOAL_MATCH_POINTS: u32 = 25;

/// Score a generated plan against the requested sustainability goals
///
/// Each goal earns [`GOAL_MATCH_POINTS`] when its label occurs anywhere in the
/// plan text, ignoring case, and nothing otherwise. There is no partial credit
/// and no synonym matching.
///
/// The breakdown keeps one entry per input goal in input order, so duplicate
/// goals are counted once per occurrence in `goals`.
pub fn analyze_sustainability(plan: &str, goals: &[String]) -> SustainabilityAssessment {
    let haystack = plan.to_lowercase();

    let breakdown: Vec<GoalScore> = goals
        .iter()
        .map(|goal| GoalScore {
            goal: goal.clone(),
            score: goal_score(&haystack, goal),
        })
        .collect();

    let score = breakdown.iter().map(|g| g.score).sum();

    SustainabilityAssessment { score, breakdown }
}

#[inline]
fn goal_score(lowered_plan: &str, goal: &str) -> u32 {
    if lowered_plan.contains(&goal.to_lowercase()) {
        GOAL_MATCH_POINTS
    } else {
        0
    }
}
