use crate::config::{Config, GaParams, ScoreWeights};
use crate::error::{SeatForgeError, SfResult};
use crate::geometry::{Constraint, GridSize, Seat};
use crate::group::{palette_color, Group, GroupConstraint, Member};
use crate::optimizer::{GenScore, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback};
use crate::plan::Plan;
use crate::problem::{Problem, ProblemParams};
use crate::scorer::Score;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub name: String,
    pub nb: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<GroupConstraint>,
}

/// Everything a run needs, as sent by a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub grid_size: GridSize,
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub forbidden_seats: Vec<Seat>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub scores: ScoreWeights,
    #[serde(flatten)]
    pub ga: GaParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerateRequest {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn config(&self) -> Config {
        Config {
            ga: self.ga.clone(),
            scores: self.scores,
        }
    }

    pub fn set_config(&mut self, cfg: Config) {
        self.ga = cfg.ga;
        self.scores = cfg.scores;
    }

    /// Expands the groups and checks what the optimizer relies on.
    pub fn build_problem(&self) -> SfResult<Arc<Problem>> {
        validate_ga(&self.ga)?;
        self.seating_problem()
    }

    /// Grid, groups and weights only. The GA parameters are not looked at.
    pub fn seating_problem(&self) -> SfResult<Arc<Problem>> {
        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let color = g.color.clone().unwrap_or_else(|| palette_color(i).to_string());
                Group::new(g.name.clone(), g.nb, color, g.constraint.clone())
            })
            .collect();

        let problem = ProblemParams::builder()
            .grid(self.grid_size)
            .groups(groups)
            .forbidden_seats(self.forbidden_seats.clone())
            .constraints(self.constraints.clone())
            .weights(self.scores)
            .build()
            .build_problem()?;

        Ok(Arc::new(problem))
    }
}

fn validate_ga(ga: &GaParams) -> SfResult<()> {
    if ga.nb_plans == 0 {
        return Err(SeatForgeError::Config("nbPlans must be at least 1".into()));
    }
    for (name, pct) in [
        ("survivorProportion", ga.survivor_proportion),
        ("probaMutation", ga.proba_mutation),
    ] {
        if !(0.0..=100.0).contains(&pct) {
            return Err(SeatForgeError::Config(format!(
                "{} must be a percentage between 0 and 100, got {}",
                name, pct
            )));
        }
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementEntry {
    #[serde(flatten)]
    pub member: Member,
    pub seat: Seat,
}

/// Wire view of a plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub grid_size: GridSize,
    pub placement: Vec<PlacementEntry>,
    pub forbidden_seats: Vec<Seat>,
    pub score: Score,
}

impl From<&Plan> for PlanView {
    fn from(plan: &Plan) -> Self {
        Self {
            grid_size: plan.problem().grid,
            placement: plan
                .placement()
                .map(|(member, seat)| PlacementEntry {
                    member: member.clone(),
                    seat,
                })
                .collect(),
            forbidden_seats: plan.problem().forbidden_seats().to_vec(),
            score: plan.score(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub gen_of_best_plan: GenScore,
    pub average_score: f64,
    /// Wall-clock seconds.
    pub time: f64,
    pub best_plan: PlanView,
    pub error: Option<String>,
}

impl GenerateResult {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl From<&OptimizationResult> for GenerateResult {
    fn from(res: &OptimizationResult) -> Self {
        Self {
            gen_of_best_plan: res.gen_of_best,
            average_score: res.average_score,
            time: res.time_secs,
            best_plan: PlanView::from(&res.best),
            error: res.error.clone(),
        }
    }
}

/// Streamed to listeners while a run is going.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RunEvent {
    Loading {
        current: usize,
        total: usize,
    },
    CurrentGen {
        gen_of_best_plan: GenScore,
        best_plan: PlanView,
    },
    Done(GenerateResult),
}

impl ProgressCallback for Sender<RunEvent> {
    fn on_progress(&self, generation: usize, total: usize) {
        // A listener that hung up just stops receiving.
        let _ = self.send(RunEvent::Loading {
            current: generation,
            total,
        });
    }

    fn on_snapshot(&self, gen_of_best: GenScore, best: &Plan) {
        let _ = self.send(RunEvent::CurrentGen {
            gen_of_best_plan: gen_of_best,
            best_plan: PlanView::from(best),
        });
    }
}

/// Service: run the optimizer for a request.
pub fn generate<CB: ProgressCallback>(request: &GenerateRequest, callback: &CB) -> SfResult<GenerateResult> {
    let problem = request.build_problem()?;
    let options = OptimizationOptions::from(&request.config());
    let result = Optimizer::new(problem, options).run(request.seed, callback);
    Ok(GenerateResult::from(&result))
}

/// Service: like `generate`, but every update and the final result go out as events.
pub fn generate_streaming(request: &GenerateRequest, events: &Sender<RunEvent>) -> SfResult<GenerateResult> {
    let result = generate(request, events)?;
    let _ = events.send(RunEvent::Done(result.clone()));
    Ok(result)
}
