use super::{Fitness, Score, ScoreDetails};
use crate::geometry::Seat;
use crate::group::MemberRef;
use crate::problem::Problem;

// Orthogonal neighbours. The first two are the horizontal ones that decide isolation.
const LEFT_RIGHT: [(isize, isize); 2] = [(0, 1), (0, -1)];
const TOP_BOTTOM: [(isize, isize); 2] = [(1, 0), (-1, 0)];

/// Per-member scoring outcome, shared by the fast path and the detailed path.
#[derive(Default)]
struct MemberTally {
    left_right: usize,
    top_bottom: usize,
    isolated: bool,
    constraint_violated: bool,
}

#[inline(always)]
fn same_group(
    problem: &Problem,
    cells: &[Option<MemberRef>],
    seat: Seat,
    offset: (isize, isize),
    group: usize,
) -> bool {
    problem
        .grid
        .neighbor(seat, offset.0, offset.1)
        .and_then(|n| cells[problem.grid.idx(n)])
        .is_some_and(|other| other.group == group)
}

#[inline(always)]
fn tally_member(
    problem: &Problem,
    cells: &[Option<MemberRef>],
    seat: Seat,
    m: MemberRef,
) -> MemberTally {
    let mut t = MemberTally::default();

    for off in LEFT_RIGHT {
        if same_group(problem, cells, seat, off, m.group) {
            t.left_right += 1;
        }
    }
    for off in TOP_BOTTOM {
        if same_group(problem, cells, seat, off, m.group) {
            t.top_bottom += 1;
        }
    }

    let member = problem.member(m);

    // Isolation only looks at the horizontal neighbours.
    t.isolated = t.left_right == 0 && member.group_size > 1;

    if let Some(name) = &member.constraint {
        t.constraint_violated = !problem.constraint(name).is_some_and(|c| c.contains(seat));
    }

    t
}

/// Fast path used by the optimizer. Rebuilds the per-group map from scratch.
pub fn score_grid(problem: &Problem, cells: &[Option<MemberRef>]) -> Fitness {
    let w = &problem.weights;
    let mut total: Score = 0;
    let mut per_group = vec![0; problem.groups.len()];

    for (idx, cell) in cells.iter().enumerate() {
        let Some(m) = *cell else { continue };
        let seat = problem.grid.seat_at(idx);
        let t = tally_member(problem, cells, seat, m);

        let mut s = t.left_right as Score * w.left_right + t.top_bottom as Score * w.top_bottom;
        if t.isolated {
            s += w.malus;
        }
        if t.constraint_violated {
            s += w.malus;
        }

        total += s;
        per_group[m.group] += s;
    }

    Fitness { total, per_group }
}

/// Detailed scoring for reports and verification.
pub fn score_details(problem: &Problem, cells: &[Option<MemberRef>]) -> ScoreDetails {
    let w = &problem.weights;
    let mut d = ScoreDetails::default();

    for (idx, cell) in cells.iter().enumerate() {
        let Some(m) = *cell else { continue };
        let seat = problem.grid.seat_at(idx);
        let t = tally_member(problem, cells, seat, m);

        d.seated_members += 1;
        d.stat_left_right += t.left_right;
        d.stat_top_bottom += t.top_bottom;
        if t.isolated {
            d.stat_isolated += 1;
        }
        if t.constraint_violated {
            d.stat_constraint_violations += 1;
        }
    }

    d.left_right_bonus = d.stat_left_right as Score * w.left_right;
    d.top_bottom_bonus = d.stat_top_bottom as Score * w.top_bottom;
    d.isolation_malus = d.stat_isolated as Score * w.malus;
    d.constraint_malus = d.stat_constraint_violations as Score * w.malus;
    d.total = d.left_right_bonus + d.top_bottom_bonus + d.isolation_malus + d.constraint_malus;
    d.unseated_members = problem.member_count().saturating_sub(d.seated_members);

    d
}
