use super::crossover::breed;
use super::initialization::initial_population;
use super::mutation::{mutate, Mutation};
use super::selection::roulette;
use crate::config::{Config, CrossoverPolicy, GaParams, ReproductionPolicy};
use crate::consts::SNAPSHOT_INTERVAL;
use crate::error::SeatError;
use crate::plan::Plan;
use crate::problem::Problem;
use crate::scorer::Score;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use strum_macros::Display;
use tracing::{debug, error, info};

pub struct OptimizationOptions {
    pub nb_plans: usize,
    pub nb_generations: usize,
    pub ga: GaParams,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            nb_plans: cfg.ga.nb_plans.max(1),
            nb_generations: cfg.ga.nb_generations,
            ga: cfg.ga.clone(),
        }
    }
}

/// Best score seen so far and the generation that (re)reached it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenScore {
    pub generation: usize,
    pub score: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunState {
    Initializing,
    Evolving,
    Done,
    Failed,
}

pub struct OptimizationResult {
    /// Top plan of the last population that was produced.
    pub best: Plan,
    pub gen_of_best: GenScore,
    pub average_score: f64,
    pub time_secs: f64,
    pub generations_run: usize,
    pub state: RunState,
    pub error: Option<String>,
}

/// Receives run updates. Calls are fire and forget: there is no way to stop
/// a run from here.
pub trait ProgressCallback {
    fn on_progress(&self, generation: usize, total: usize);
    fn on_snapshot(&self, gen_of_best: GenScore, best: &Plan);
}

/// Callback for callers that only want the final result.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_progress(&self, _generation: usize, _total: usize) {}
    fn on_snapshot(&self, _gen_of_best: GenScore, _best: &Plan) {}
}

pub fn sort_population(population: &mut [Plan]) {
    population.sort_by(|a, b| b.score().cmp(&a.score()));
}

pub fn average_score(population: &[Plan]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(|p| p.score() as f64).sum::<f64>() / population.len() as f64
}

/// One generation: keep the top survivors, breed children from them and
/// return the merged population sorted best first. Survivors are not rescored.
/// The input population is left untouched, so it is still there when a step fails.
pub fn reproduce(population: &[Plan], ga: &GaParams, rng: &mut fastrand::Rng) -> Result<Vec<Plan>, SeatError> {
    let mut ranked: Vec<&Plan> = population.iter().collect();
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    let keep = ga.survivor_count(population.len()).min(population.len());
    let survivors: Vec<Plan> = ranked.into_iter().take(keep).cloned().collect();

    let mut children = Vec::with_capacity(ga.nb_reproductions * 2);
    for _ in 0..ga.nb_reproductions {
        let Some(father) = roulette(&survivors, rng) else {
            break;
        };
        let mother = match ga.crossover {
            CrossoverPolicy::TwoParent => roulette(&survivors, rng),
            _ => None,
        };
        let child = breed(ga.crossover, father, mother, rng)?;

        if rng.f64() < ga.mutation_probability() {
            match (mutate(child.clone(), rng)?, ga.reproduction) {
                (Mutation::Mutated(m), ReproductionPolicy::KeepBoth) => {
                    children.push(m);
                    children.push(child);
                }
                (Mutation::Mutated(m), ReproductionPolicy::ReplaceChild) => children.push(m),
                (Mutation::Unchanged(_), _) => children.push(child),
            }
        } else {
            children.push(child);
        }
    }

    let mut next = survivors;
    next.extend(children);
    sort_population(&mut next);
    Ok(next)
}

pub struct Optimizer {
    problem: Arc<Problem>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(problem: Arc<Problem>, options: OptimizationOptions) -> Self {
        Self { problem, options }
    }

    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, callback: &CB) -> OptimizationResult {
        let opts = &self.options;
        let start_time = Instant::now();
        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let mut state = RunState::Initializing;
        info!(
            "{}: {} plans, {} generations, crossover {}, reproduction {}",
            state, opts.nb_plans, opts.nb_generations, opts.ga.crossover, opts.ga.reproduction
        );

        let mut population = initial_population(&self.problem, opts.nb_plans, &mut rng);
        sort_population(&mut population);
        let mut best = population[0].clone();
        let mut gen_of_best = GenScore {
            generation: 0,
            score: best.score(),
        };
        let mut error_msg = None;
        let mut generations_run = 0;

        state = RunState::Evolving;
        debug!("{}: initial best {}", state, gen_of_best.score);

        for k in 0..opts.nb_generations {
            let generation = k + 1;
            match reproduce(&population, &opts.ga, &mut rng) {
                Ok(next) => population = next,
                Err(e) => {
                    error!("Generation {} failed: {}", generation, e);
                    error_msg = Some(e.to_string());
                    state = RunState::Failed;
                    break;
                }
            }
            generations_run = generation;

            if let Some(top) = population.first() {
                best = top.clone();
                if top.score() > gen_of_best.score {
                    gen_of_best = GenScore {
                        generation,
                        score: top.score(),
                    };
                }
            }
            debug!(
                "Gen {}/{}: population {}, best {}",
                generation,
                opts.nb_generations,
                population.len(),
                best.score()
            );

            callback.on_progress(generation, opts.nb_generations);
            if generation % SNAPSHOT_INTERVAL == 0 {
                callback.on_snapshot(gen_of_best, &best);
            }
            std::thread::yield_now();
        }

        if state != RunState::Failed {
            state = RunState::Done;
        }

        let average_score = average_score(&population);
        let time_secs = start_time.elapsed().as_secs_f64();
        info!(
            "{} after {} generations in {:.3}s: best {} (gen {}), average {:.2}",
            state, generations_run, time_secs, best.score(), gen_of_best.generation, average_score
        );

        OptimizationResult {
            best,
            gen_of_best,
            average_score,
            time_secs,
            generations_run,
            state,
            error: error_msg,
        }
    }
}
