use crate::config::ScoreWeights;
use crate::error::{SeatForgeError, SfResult};
use crate::geometry::{Constraint, GridSize, Seat};
use crate::group::{Group, Member, MemberRef};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use typed_builder::TypedBuilder;

/// Everything that stays fixed for a run. Plans share it through an `Arc`.
#[derive(Debug, Clone)]
pub struct Problem {
    pub grid: GridSize,
    pub groups: Vec<Group>,
    pub weights: ScoreWeights,
    forbidden_seats: Vec<Seat>,
    forbidden_mask: Vec<bool>,
    constraints: Vec<Constraint>,
    constraint_index: HashMap<String, usize>,
}

#[derive(TypedBuilder)]
pub struct ProblemParams {
    pub grid: GridSize,
    pub groups: Vec<Group>,
    #[builder(default)]
    pub forbidden_seats: Vec<Seat>,
    #[builder(default)]
    pub constraints: Vec<Constraint>,
    #[builder(default)]
    pub weights: ScoreWeights,
}

impl ProblemParams {
    pub fn build_problem(self) -> SfResult<Problem> {
        let grid = self.grid;
        if grid.width == 0 || grid.height == 0 {
            return Err(SeatForgeError::Validation(format!(
                "Grid must be at least 1x1, got {}x{}",
                grid.width, grid.height
            )));
        }

        let mut forbidden_mask = vec![false; grid.cell_count()];
        for &seat in &self.forbidden_seats {
            if !grid.contains(seat) {
                return Err(SeatForgeError::Validation(format!(
                    "Forbidden seat {} is outside the {}x{} grid",
                    seat, grid.width, grid.height
                )));
            }
            forbidden_mask[grid.idx(seat)] = true;
        }

        let mut constraint_index = HashMap::new();
        for (i, c) in self.constraints.iter().enumerate() {
            if constraint_index.insert(c.name.clone(), i).is_some() {
                return Err(SeatForgeError::Validation(format!(
                    "Constraint '{}' is defined twice",
                    c.name
                )));
            }
            if let Some(seat) = c.seats.iter().find(|s| !grid.contains(**s)) {
                return Err(SeatForgeError::Validation(format!(
                    "Constraint '{}' references seat {} outside the grid",
                    c.name, seat
                )));
            }
        }

        let mut names = HashSet::new();
        for g in &self.groups {
            if g.size() == 0 {
                return Err(SeatForgeError::Validation(format!(
                    "Group '{}' must have at least one member",
                    g.name
                )));
            }
            if !names.insert(g.name.as_str()) {
                return Err(SeatForgeError::Validation(format!(
                    "Group name '{}' is not unique",
                    g.name
                )));
            }
            if let Some(gc) = &g.constraint {
                if !constraint_index.contains_key(&gc.name) {
                    return Err(SeatForgeError::Validation(format!(
                        "Group '{}' references unknown constraint '{}'",
                        g.name, gc.name
                    )));
                }
                if gc.nb > g.size() {
                    return Err(SeatForgeError::Validation(format!(
                        "Group '{}' binds {} members to '{}' but only has {}",
                        g.name,
                        gc.nb,
                        gc.name,
                        g.size()
                    )));
                }
            }
        }

        let seated: usize = self.groups.iter().map(Group::size).sum();
        let free = forbidden_mask.iter().filter(|f| !**f).count();
        debug!(
            "Problem: {}x{} grid, {} groups, {} members, {} free seats",
            grid.width,
            grid.height,
            self.groups.len(),
            seated,
            free
        );

        Ok(Problem {
            grid,
            groups: self.groups,
            weights: self.weights,
            forbidden_seats: self.forbidden_seats,
            forbidden_mask,
            constraints: self.constraints,
            constraint_index,
        })
    }
}

impl Problem {
    #[inline(always)]
    pub fn is_forbidden(&self, seat: Seat) -> bool {
        self.forbidden_mask[self.grid.idx(seat)]
    }

    pub fn forbidden_seats(&self) -> &[Seat] {
        &self.forbidden_seats
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraint_index.get(name).map(|&i| &self.constraints[i])
    }

    #[inline(always)]
    pub fn member(&self, r: MemberRef) -> &Member {
        &self.groups[r.group].members[r.index]
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Group::size).sum()
    }
}
