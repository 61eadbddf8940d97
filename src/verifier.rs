use crate::api::{GenerateRequest, GenerateResult, PlanView};
use crate::error::SfResult;
use crate::group::MemberRef;
use crate::plan::Plan;
use crate::problem::Problem;
use crate::scorer::{Score, ScoreDetails};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub claimed_score: Score,
    pub calculated_score: Score,
    pub details: ScoreDetails,
    pub issues: Vec<String>,
}

impl VerificationReport {
    pub fn score_matches(&self) -> bool {
        self.claimed_score == self.calculated_score
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty() && self.score_matches()
    }
}

/// Replays a reported plan against the request it came from.
pub struct Verifier {
    problem: Arc<Problem>,
}

impl Verifier {
    pub fn new(problem: Arc<Problem>) -> Self {
        Self { problem }
    }

    /// Verification only replays seats, so out-of-range GA parameters are fine.
    pub fn from_request(request: &GenerateRequest) -> SfResult<Self> {
        Ok(Self::new(request.seating_problem()?))
    }

    /// Seats every placement entry on a fresh plan. Entries that cannot be
    /// seated are reported and skipped.
    pub fn rebuild(&self, view: &PlanView) -> (Plan, Vec<String>) {
        let mut plan = Plan::new(self.problem.clone());
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        if view.grid_size != self.problem.grid {
            issues.push(format!(
                "Grid is {}x{}, request says {}x{}",
                view.grid_size.width, view.grid_size.height, self.problem.grid.width, self.problem.grid.height
            ));
        }

        let mut claimed_forbidden = view.forbidden_seats.clone();
        let mut forbidden = self.problem.forbidden_seats().to_vec();
        claimed_forbidden.sort();
        forbidden.sort();
        if claimed_forbidden != forbidden {
            issues.push("Forbidden seats differ from the request".to_string());
        }

        for entry in &view.placement {
            let m = &entry.member;
            let Some(group) = self.problem.group_index(&m.group_name) else {
                issues.push(format!("Unknown group '{}' at {}", m.group_name, entry.seat));
                continue;
            };
            if m.index >= self.problem.groups[group].size() {
                issues.push(format!(
                    "Group '{}' has no member {} (seated at {})",
                    m.group_name, m.index, entry.seat
                ));
                continue;
            }

            let member = MemberRef {
                group,
                index: m.index,
            };
            if !seen.insert(member) {
                issues.push(format!("Member {} of '{}' is seated twice", m.index, m.group_name));
                continue;
            }
            if self.problem.member(member).constraint != m.constraint {
                issues.push(format!(
                    "Member {} of '{}' carries the wrong constraint",
                    m.index, m.group_name
                ));
            }
            if let Err(e) = plan.place(entry.seat, member) {
                issues.push(e.to_string());
            }
        }

        plan.calculate_score();
        (plan, issues)
    }

    pub fn verify(&self, result: &GenerateResult) -> VerificationReport {
        let (plan, issues) = self.rebuild(&result.best_plan);
        let report = VerificationReport {
            claimed_score: result.best_plan.score,
            calculated_score: plan.score(),
            details: plan.score_details(),
            issues,
        };

        if !report.score_matches() {
            warn!(
                "Score verification mismatch. Claimed: {}, Calculated: {}, Diff: {}",
                report.claimed_score,
                report.calculated_score,
                report.claimed_score - report.calculated_score
            );
        }
        for issue in &report.issues {
            warn!("Placement issue: {}", issue);
        }
        if report.is_valid() {
            info!("Verification Passed. Score {}", report.calculated_score);
        }

        report
    }
}
