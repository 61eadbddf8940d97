use super::Score;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    // Top-line
    pub total: Score,

    // Weighted contributions
    pub left_right_bonus: Score,
    pub top_bottom_bonus: Score,
    pub isolation_malus: Score,
    pub constraint_malus: Score,

    // Raw counters (one per member-side, so a pair counts twice)
    pub stat_left_right: usize,
    pub stat_top_bottom: usize,
    pub stat_isolated: usize,
    pub stat_constraint_violations: usize,

    pub seated_members: usize,
    pub unseated_members: usize,
}

/// Output of the fitness function: the plan total and each group's share of it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fitness {
    pub total: Score,
    pub per_group: Vec<Score>,
}
