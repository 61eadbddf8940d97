pub mod engine;
pub mod types;

pub use self::types::{Fitness, ScoreDetails};

/// Fitness values are whole numbers: every weight is an integer bonus or malus.
pub type Score = i64;
