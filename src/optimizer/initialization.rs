use crate::geometry::{GridSize, Seat};
use crate::group::MemberRef;
use crate::plan::Plan;
use crate::problem::Problem;
use std::sync::Arc;
use tracing::warn;

/// Boustrophedon scan cursor. Moves along a line, turns around at the edges
/// and wraps back to the first line after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeCursor {
    pub line: usize,
    pub col: usize,
    pub forward: bool,
}

impl SnakeCursor {
    pub fn random(grid: GridSize, rng: &mut fastrand::Rng) -> Self {
        Self {
            line: rng.usize(0..grid.height),
            col: rng.usize(0..grid.width),
            forward: rng.bool(),
        }
    }

    #[inline(always)]
    pub fn seat(&self) -> Seat {
        Seat::new(self.line, self.col)
    }

    pub fn advance(&mut self, grid: GridSize) {
        let at_edge = if self.forward {
            self.col + 1 >= grid.width
        } else {
            self.col == 0
        };

        if at_edge {
            // Turn around on the next line, staying on the edge column.
            self.forward = !self.forward;
            self.col = if self.forward { 0 } else { grid.width - 1 };
            self.line += 1;
            if self.line >= grid.height {
                self.line = 0;
            }
        } else if self.forward {
            self.col += 1;
        } else {
            self.col -= 1;
        }
    }
}

/// Seats every listed group, highest member index first, along a snake scan
/// from a random seat. Forbidden or taken seats are skipped. A group that
/// cannot find a free seat within `width * height` consecutive misses is left
/// partially seated.
pub fn snake_fill(plan: &mut Plan, groups: &[usize], rng: &mut fastrand::Rng) {
    let grid = plan.problem().grid;
    let budget = grid.cell_count();
    let mut cursor = SnakeCursor::random(grid, rng);

    for &group in groups {
        let size = plan.problem().groups[group].size();
        let mut tries = 0;

        for index in (0..size).rev() {
            let member = MemberRef { group, index };
            let seated = loop {
                let attempt = plan.place(cursor.seat(), member);
                cursor.advance(grid);
                match attempt {
                    Ok(()) => break true,
                    Err(_) => {
                        tries += 1;
                        if tries > budget {
                            break false;
                        }
                    }
                }
            };

            if !seated {
                warn!(
                    "Snake fill gave up on group '{}': {} of {} members left unseated",
                    plan.problem().groups[group].name,
                    index + 1,
                    size
                );
                break;
            }
            tries = 0;
        }
    }
}

/// Builds one fully scored plan with every group snake-filled.
pub fn random_plan(problem: &Arc<Problem>, rng: &mut fastrand::Rng) -> Plan {
    let mut plan = Plan::new(problem.clone());
    let all: Vec<usize> = (0..problem.groups.len()).collect();
    snake_fill(&mut plan, &all, rng);
    plan.calculate_score();
    plan
}

pub fn initial_population(problem: &Arc<Problem>, size: usize, rng: &mut fastrand::Rng) -> Vec<Plan> {
    (0..size).map(|_| random_plan(problem, rng)).collect()
}
