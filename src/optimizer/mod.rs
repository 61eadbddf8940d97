pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::mutation::{mutate, Mutation};
pub use self::runner::{
    GenScore, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback, RunState,
    SilentProgress,
};
