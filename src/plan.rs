use crate::error::SeatError;
use crate::geometry::Seat;
use crate::group::{Member, MemberRef};
use crate::problem::Problem;
use crate::scorer::{engine, Score, ScoreDetails};
use std::fmt;
use std::sync::Arc;

/// One candidate seating. The grid is the placement: each cell holds at most
/// one member, so double booking cannot be represented.
#[derive(Debug, Clone)]
pub struct Plan {
    problem: Arc<Problem>,
    grid: Vec<Option<MemberRef>>,
    score: Score,
    group_scores: Vec<Score>,
}

impl Plan {
    pub fn new(problem: Arc<Problem>) -> Self {
        let cells = problem.grid.cell_count();
        let groups = problem.groups.len();
        Self {
            problem,
            grid: vec![None; cells],
            score: 0,
            group_scores: vec![0; groups],
        }
    }

    #[inline(always)]
    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    #[inline(always)]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Cached contribution of one group to the total, as of the last `calculate_score`.
    #[inline(always)]
    pub fn group_score(&self, group: usize) -> Score {
        self.group_scores[group]
    }

    pub fn group_scores(&self) -> &[Score] {
        &self.group_scores
    }

    pub fn cells(&self) -> &[Option<MemberRef>] {
        &self.grid
    }

    pub fn occupant(&self, seat: Seat) -> Option<MemberRef> {
        if !self.problem.grid.contains(seat) {
            return None;
        }
        self.grid[self.problem.grid.idx(seat)]
    }

    /// Free means on the grid, not forbidden and not taken.
    pub fn is_free(&self, seat: Seat) -> bool {
        self.check_free(seat).is_ok()
    }

    fn check_free(&self, seat: Seat) -> Result<(), SeatError> {
        if !self.problem.grid.contains(seat) {
            return Err(SeatError::SeatOutOfGrid { seat });
        }
        if self.problem.is_forbidden(seat) {
            return Err(SeatError::SeatForbidden { seat });
        }
        if let Some(other) = self.grid[self.problem.grid.idx(seat)] {
            return Err(SeatError::SeatOccupied {
                seat,
                group: self.problem.groups[other.group].name.clone(),
            });
        }
        Ok(())
    }

    /// Seats a single member. The score cache is left stale.
    pub fn place(&mut self, seat: Seat, member: MemberRef) -> Result<(), SeatError> {
        self.check_free(seat)?;
        let idx = self.problem.grid.idx(seat);
        self.grid[idx] = Some(member);
        Ok(())
    }

    pub fn vacate(&mut self, seat: Seat) -> Option<MemberRef> {
        if !self.problem.grid.contains(seat) {
            return None;
        }
        let idx = self.problem.grid.idx(seat);
        self.grid[idx].take()
    }

    /// Seats taken by a group, ordered by member index.
    pub fn group_seats(&self, group: usize) -> Vec<Seat> {
        let mut seated: Vec<(usize, Seat)> = self
            .grid
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.filter(|m| m.group == group)
                    .map(|m| (m.index, self.problem.grid.seat_at(idx)))
            })
            .collect();
        seated.sort_unstable_by_key(|(index, _)| *index);
        seated.into_iter().map(|(_, seat)| seat).collect()
    }

    pub fn is_group_seated(&self, group: usize) -> bool {
        self.group_seats(group).len() == self.problem.groups[group].size()
    }

    /// Seats member `i` of `group` on `seats[i]`. Either the whole group is
    /// seated or nothing changes.
    pub fn set_group_seats(&mut self, group: usize, seats: &[Seat]) -> Result<(), SeatError> {
        let g = &self.problem.groups[group];
        if seats.len() != g.size() {
            return Err(SeatError::GroupSeatCountMismatch {
                group: g.name.clone(),
                members: g.size(),
                seats: seats.len(),
            });
        }

        for (i, &seat) in seats.iter().enumerate() {
            self.check_free(seat)?;
            if seats[..i].contains(&seat) {
                return Err(SeatError::SeatOccupied {
                    seat,
                    group: g.name.clone(),
                });
            }
        }

        for (index, &seat) in seats.iter().enumerate() {
            let idx = self.problem.grid.idx(seat);
            self.grid[idx] = Some(MemberRef { group, index });
        }
        Ok(())
    }

    /// Rebuilds the total and the per-group map from the current placement.
    pub fn calculate_score(&mut self) {
        let fitness = engine::score_grid(&self.problem, &self.grid);
        self.score = fitness.total;
        self.group_scores = fitness.per_group;
    }

    pub fn score_details(&self) -> ScoreDetails {
        engine::score_details(&self.problem, &self.grid)
    }

    /// Placed members in row-major seat order.
    pub fn placement(&self) -> impl Iterator<Item = (&Member, Seat)> + '_ {
        self.grid.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|m| (self.problem.member(m), self.problem.grid.seat_at(idx)))
        })
    }

    pub fn seated_count(&self) -> usize {
        self.grid.iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self
            .grid
            .iter()
            .enumerate()
            .map(|(idx, cell)| match cell {
                Some(m) => format!("{}{}", self.problem.groups[m.group].name, m.index),
                None if self.problem.is_forbidden(self.problem.grid.seat_at(idx)) => "#".into(),
                None => ".".into(),
            })
            .collect();
        let w = labels.iter().map(String::len).max().unwrap_or(1);

        writeln!(f, "score {}", self.score)?;
        for row in labels.chunks(self.problem.grid.width) {
            let line: Vec<String> = row.iter().map(|l| format!("{:>w$}", l, w = w)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
