#![allow(dead_code)]

use seatforge::config::ScoreWeights;
use seatforge::geometry::{Constraint, GridSize, Seat};
use seatforge::group::{Group, GroupConstraint};
use seatforge::plan::Plan;
use seatforge::problem::{Problem, ProblemParams};
use std::collections::HashSet;
use std::sync::Arc;

/// Builds a problem with groups named A, B, C, ... of the given sizes.
pub fn problem(width: usize, height: usize, sizes: &[usize], forbidden: Vec<Seat>) -> Arc<Problem> {
    let groups = sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| Group::new(((b'A' + i as u8) as char).to_string(), n, "red", None))
        .collect();
    Arc::new(
        ProblemParams::builder()
            .grid(GridSize::new(width, height))
            .groups(groups)
            .forbidden_seats(forbidden)
            .build()
            .build_problem()
            .unwrap(),
    )
}

/// Groups A(3) and B(2) on an open 3x3 grid with default weights.
pub fn scenario_problem() -> Arc<Problem> {
    problem(3, 3, &[3, 2], vec![])
}

/// A size-2 group whose first member belongs in the front row.
pub fn front_row_problem() -> Arc<Problem> {
    let bound = Some(GroupConstraint {
        name: "front-row".into(),
        nb: 1,
    });
    Arc::new(
        ProblemParams::builder()
            .grid(GridSize::new(3, 3))
            .groups(vec![Group::new("A", 2, "red", bound)])
            .constraints(vec![Constraint::new(
                "front-row",
                vec![Seat::new(0, 0), Seat::new(0, 1)],
            )])
            .weights(ScoreWeights::default())
            .build()
            .build_problem()
            .unwrap(),
    )
}

/// No forbidden seat used, every member seated at most once, cached score fresh.
pub fn assert_valid(plan: &Plan) {
    let p = plan.problem();
    let mut seen = HashSet::new();
    for (idx, cell) in plan.cells().iter().enumerate() {
        if let Some(m) = cell {
            let seat = p.grid.seat_at(idx);
            assert!(!p.is_forbidden(seat), "member on forbidden seat {}", seat);
            assert!(m.index < p.groups[m.group].size());
            assert!(seen.insert(*m), "member {:?} seated twice", m);
        }
    }

    let mut rescored = plan.clone();
    rescored.calculate_score();
    assert_eq!(rescored.score(), plan.score(), "stale score");
}
