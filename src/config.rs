use crate::consts::*;
use crate::error::SfResult;
use crate::scorer::Score;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub ga: GaParams,
    #[command(flatten)]
    pub scores: ScoreWeights,
}

/// How a child plan inherits seat sets from its parent(s).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CrossoverPolicy {
    /// Inherit a group only if it beats its ideal score and a 15% gate passes.
    #[default]
    FitnessGated,
    /// Inherit each group with a flat 50% chance.
    Uniform,
    /// Take each group from the better of two parents when its seats are free.
    TwoParent,
}

/// What happens to a child when the mutation roll succeeds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReproductionPolicy {
    /// The mutated child replaces the original one (one child per attempt).
    #[default]
    ReplaceChild,
    /// Both the mutated and the original child join the next generation.
    KeepBoth,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GaParams {
    #[arg(long, default_value_t = DEFAULT_NB_PLANS)]
    pub nb_plans: usize,
    /// Percentage of the population kept as survivors.
    #[arg(long, default_value_t = DEFAULT_SURVIVOR_PROPORTION)]
    pub survivor_proportion: f64,
    #[arg(long, default_value_t = DEFAULT_NB_REPRODUCTIONS)]
    pub nb_reproductions: usize,
    /// Percentage chance that a child is mutated.
    #[arg(long, default_value_t = DEFAULT_PROBA_MUTATION)]
    pub proba_mutation: f64,
    #[arg(long, default_value_t = DEFAULT_NB_GENERATIONS)]
    pub nb_generations: usize,
    #[arg(long, default_value_t = CrossoverPolicy::FitnessGated)]
    pub crossover: CrossoverPolicy,
    #[arg(long, default_value_t = ReproductionPolicy::ReplaceChild)]
    pub reproduction: ReproductionPolicy,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            nb_plans: DEFAULT_NB_PLANS,
            survivor_proportion: DEFAULT_SURVIVOR_PROPORTION,
            nb_reproductions: DEFAULT_NB_REPRODUCTIONS,
            proba_mutation: DEFAULT_PROBA_MUTATION,
            nb_generations: DEFAULT_NB_GENERATIONS,
            crossover: CrossoverPolicy::default(),
            reproduction: ReproductionPolicy::default(),
        }
    }
}

impl GaParams {
    /// Number of plans kept unchanged from a population of `population` plans.
    /// Never below one.
    pub fn survivor_count(&self, population: usize) -> usize {
        let keep = (population as f64 * (self.survivor_proportion / 100.0)).floor();
        if keep < 1.0 {
            1
        } else {
            keep as usize
        }
    }

    #[inline(always)]
    pub fn mutation_probability(&self) -> f64 {
        self.proba_mutation / 100.0
    }
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreWeights {
    /// Bonus per same-group neighbour on the left or right.
    #[arg(long, default_value_t = DEFAULT_LEFT_RIGHT, allow_negative_numbers = true)]
    pub left_right: Score,
    /// Bonus per same-group neighbour above or below.
    #[arg(long, default_value_t = DEFAULT_TOP_BOTTOM, allow_negative_numbers = true)]
    pub top_bottom: Score,
    /// Penalty for an isolated member or a violated constraint.
    #[arg(long, default_value_t = DEFAULT_MALUS, allow_negative_numbers = true)]
    pub malus: Score,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            left_right: DEFAULT_LEFT_RIGHT,
            top_bottom: DEFAULT_TOP_BOTTOM,
            malus: DEFAULT_MALUS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with the values the user actually typed on the
    /// command line. Defaults filled in by clap are ignored.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(ga.nb_plans);
        update_if_present!(ga.survivor_proportion);
        update_if_present!(ga.nb_reproductions);
        update_if_present!(ga.proba_mutation);
        update_if_present!(ga.nb_generations);
        update_if_present!(ga.crossover);
        update_if_present!(ga.reproduction);

        update_if_present!(scores.left_right);
        update_if_present!(scores.top_bottom);
        update_if_present!(scores.malus);
    }
}
