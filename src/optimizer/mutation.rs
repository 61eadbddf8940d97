use crate::error::SeatError;
use crate::plan::Plan;

/// Outcome of a swap attempt. Both variants hand the plan back.
#[derive(Debug, Clone)]
pub enum Mutation {
    Mutated(Plan),
    /// The two picked seats were the same one (or a picked group had nobody
    /// seated). The plan is returned untouched.
    Unchanged(Plan),
}

impl Mutation {
    pub fn into_plan(self) -> Plan {
        match self {
            Mutation::Mutated(p) | Mutation::Unchanged(p) => p,
        }
    }

    pub fn is_mutated(&self) -> bool {
        matches!(self, Mutation::Mutated(_))
    }
}

/// Swaps the seats of two random members, each drawn from an independently
/// picked group (possibly the same one), then rescores.
pub fn mutate(mut plan: Plan, rng: &mut fastrand::Rng) -> Result<Mutation, SeatError> {
    let groups = plan.problem().groups.len();
    if groups == 0 {
        return Ok(Mutation::Unchanged(plan));
    }

    let seats_a = plan.group_seats(rng.usize(0..groups));
    let seats_b = plan.group_seats(rng.usize(0..groups));
    if seats_a.is_empty() || seats_b.is_empty() {
        return Ok(Mutation::Unchanged(plan));
    }

    let a = seats_a[rng.usize(0..seats_a.len())];
    let b = seats_b[rng.usize(0..seats_b.len())];
    if a == b {
        return Ok(Mutation::Unchanged(plan));
    }

    let (Some(ma), Some(mb)) = (plan.occupant(a), plan.occupant(b)) else {
        return Ok(Mutation::Unchanged(plan));
    };
    plan.vacate(a);
    plan.vacate(b);
    plan.place(b, ma)?;
    plan.place(a, mb)?;
    plan.calculate_score();

    Ok(Mutation::Mutated(plan))
}
