use crate::scorer::Score;

/// Probability that a group whose score beats its ideal score is inherited verbatim.
pub const FITNESS_GATE_PROBABILITY: f32 = 0.15;

/// Per-group inheritance probability of the plain uniform crossover.
pub const UNIFORM_INHERIT_PROBABILITY: f32 = 0.5;

/// A snapshot of the best plan is reported every N generations.
pub const SNAPSHOT_INTERVAL: usize = 10;

pub const DEFAULT_LEFT_RIGHT: Score = 10;
pub const DEFAULT_TOP_BOTTOM: Score = 7;
pub const DEFAULT_MALUS: Score = -100;

pub const DEFAULT_NB_PLANS: usize = 20;
pub const DEFAULT_SURVIVOR_PROPORTION: f64 = 50.0;
pub const DEFAULT_NB_REPRODUCTIONS: usize = 10;
pub const DEFAULT_PROBA_MUTATION: f64 = 10.0;
pub const DEFAULT_NB_GENERATIONS: usize = 50;
