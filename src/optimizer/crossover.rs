use super::initialization::snake_fill;
use crate::config::CrossoverPolicy;
use crate::consts::{FITNESS_GATE_PROBABILITY, UNIFORM_INHERIT_PROBABILITY};
use crate::error::SeatError;
use crate::plan::Plan;
use crate::scorer::Score;

/// Score a group would reach stacked in one column: every member but the
/// ends touches two vertical neighbours.
#[inline(always)]
pub fn ideal_group_score(size: usize, top_bottom: Score) -> Score {
    2 * (size as Score - 1) * top_bottom
}

/// Produces one scored child. `mother` is only read by `TwoParent`; the
/// single-parent policies ignore it.
pub fn breed(
    policy: CrossoverPolicy,
    father: &Plan,
    mother: Option<&Plan>,
    rng: &mut fastrand::Rng,
) -> Result<Plan, SeatError> {
    match (policy, mother) {
        (CrossoverPolicy::FitnessGated, _) => fitness_gated(father, rng),
        (CrossoverPolicy::Uniform, _) => uniform(father, rng),
        (CrossoverPolicy::TwoParent, Some(mother)) => two_parent(father, mother, rng),
        (CrossoverPolicy::TwoParent, None) => two_parent(father, father, rng),
    }
}

/// Inherits a group from the father when it beats its ideal score and a 15%
/// gate passes. Everything else is snake-filled.
pub fn fitness_gated(father: &Plan, rng: &mut fastrand::Rng) -> Result<Plan, SeatError> {
    let top_bottom = father.problem().weights.top_bottom;
    inherit_from_one(father, rng, |plan, group, rng| {
        let size = plan.problem().groups[group].size();
        plan.group_score(group) > ideal_group_score(size, top_bottom)
            && rng.f32() < FITNESS_GATE_PROBABILITY
    })
}

/// Inherits each group from the father with a flat 50% chance.
pub fn uniform(father: &Plan, rng: &mut fastrand::Rng) -> Result<Plan, SeatError> {
    inherit_from_one(father, rng, |_, _, rng| rng.f32() < UNIFORM_INHERIT_PROBABILITY)
}

fn inherit_from_one<F>(father: &Plan, rng: &mut fastrand::Rng, mut keep: F) -> Result<Plan, SeatError>
where
    F: FnMut(&Plan, usize, &mut fastrand::Rng) -> bool,
{
    let mut child = Plan::new(father.problem().clone());
    let mut deferred = Vec::new();

    for group in 0..father.problem().groups.len() {
        if keep(father, group, &mut *rng) {
            child.set_group_seats(group, &father.group_seats(group))?;
        } else {
            deferred.push(group);
        }
    }

    snake_fill(&mut child, &deferred, rng);
    child.calculate_score();
    Ok(child)
}

/// Takes each group from the parent that scores it higher, falling back to
/// the other parent when those seats are already used in the child. Groups
/// both parents score negatively, or that fit from neither, are snake-filled.
pub fn two_parent(father: &Plan, mother: &Plan, rng: &mut fastrand::Rng) -> Result<Plan, SeatError> {
    let mut child = Plan::new(father.problem().clone());
    let mut deferred = Vec::new();

    for group in 0..father.problem().groups.len() {
        let f = father.group_score(group);
        let m = mother.group_score(group);
        if f < 0 && m < 0 {
            deferred.push(group);
            continue;
        }

        let (preferred, fallback) = if m > f { (mother, father) } else { (father, mother) };
        let first = preferred.group_seats(group);
        let seats = if first.iter().all(|s| child.is_free(*s)) {
            Some(first)
        } else {
            let second = fallback.group_seats(group);
            second.iter().all(|s| child.is_free(*s)).then_some(second)
        };

        match seats {
            Some(seats) => child.set_group_seats(group, &seats)?,
            None => deferred.push(group),
        }
    }

    snake_fill(&mut child, &deferred, rng);
    child.calculate_score();
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GridSize, Seat};
    use crate::group::Group;
    use crate::problem::{Problem, ProblemParams};
    use rstest::rstest;
    use std::sync::Arc;

    fn problem() -> Arc<Problem> {
        Arc::new(
            ProblemParams::builder()
                .grid(GridSize::new(3, 3))
                .groups(vec![Group::new("A", 3, "red", None), Group::new("B", 2, "blue", None)])
                .build()
                .build_problem()
                .unwrap(),
        )
    }

    fn plan_with(p: &Arc<Problem>, a: &[Seat], b: &[Seat]) -> Plan {
        let mut plan = Plan::new(p.clone());
        plan.set_group_seats(0, a).unwrap();
        plan.set_group_seats(1, b).unwrap();
        plan.calculate_score();
        plan
    }

    fn row(line: usize, cols: &[usize]) -> Vec<Seat> {
        cols.iter().map(|&c| Seat::new(line, c)).collect()
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 14)]
    #[case(3, 28)]
    fn test_ideal_score(#[case] size: usize, #[case] expected: Score) {
        assert_eq!(ideal_group_score(size, 7), expected);
    }

    #[rstest]
    #[case(CrossoverPolicy::FitnessGated)]
    #[case(CrossoverPolicy::Uniform)]
    #[case(CrossoverPolicy::TwoParent)]
    fn test_child_is_complete_and_scored(#[case] policy: CrossoverPolicy) {
        let p = problem();
        let father = plan_with(&p, &row(0, &[0, 1, 2]), &row(2, &[0, 1]));
        let mother = plan_with(&p, &row(1, &[0, 1, 2]), &row(0, &[1, 2]));
        let mut rng = fastrand::Rng::with_seed(9);

        for _ in 0..100 {
            let child = breed(policy, &father, Some(&mother), &mut rng).unwrap();
            assert_eq!(child.seated_count(), 5);
            let mut rescored = child.clone();
            rescored.calculate_score();
            assert_eq!(rescored.score(), child.score());
        }
    }

    #[test]
    fn test_fitness_gate_inherits_only_strong_groups() {
        let p = problem();
        // A scores 40 > 28, B scores 20 > 14: both are eligible.
        let father = plan_with(&p, &row(0, &[0, 1, 2]), &row(2, &[0, 1]));
        let mut rng = fastrand::Rng::with_seed(21);

        let kept_a = (0..1000)
            .filter(|_| {
                let child = fitness_gated(&father, &mut rng).unwrap();
                child.group_seats(0) == father.group_seats(0)
            })
            .count();
        // 15% gate plus the odd snake fill landing on the same seats.
        assert!((100..=400).contains(&kept_a), "kept {} times", kept_a);
    }

    #[test]
    fn test_two_parent_prefers_the_better_group() {
        let p = problem();
        // Father seats B apart (isolated), mother seats B side by side.
        let father = plan_with(&p, &row(0, &[0, 1, 2]), &[Seat::new(1, 0), Seat::new(2, 2)]);
        let mother = plan_with(&p, &row(2, &[0, 1, 2]), &row(1, &[1, 2]));
        let mut rng = fastrand::Rng::with_seed(4);

        let child = two_parent(&father, &mother, &mut rng).unwrap();
        // A scores the same in both parents, so the father's seats win the tie.
        assert_eq!(child.group_seats(0), row(0, &[0, 1, 2]));
        assert_eq!(child.group_seats(1), row(1, &[1, 2]));
    }

    #[test]
    fn test_two_parent_falls_back_on_collision() {
        let p = problem();
        // Father's B is split up, mother's B sits together but on father's A.
        let father = plan_with(&p, &row(0, &[0, 1, 2]), &row(1, &[0, 2]));
        let mother = plan_with(&p, &row(2, &[0, 1, 2]), &row(0, &[1, 2]));
        let mut rng = fastrand::Rng::with_seed(4);

        assert!(mother.group_score(1) > father.group_score(1));
        let child = two_parent(&father, &mother, &mut rng).unwrap();
        assert_eq!(child.group_seats(0), row(0, &[0, 1, 2]));
        assert_eq!(child.group_seats(1), row(1, &[0, 2]));
    }

    #[test]
    fn test_two_parent_skips_group_both_parents_isolate() {
        let p = problem();
        // Neither parent's B seats can come out of a snake scan over rows 1-2.
        let father_b = [Seat::new(1, 0), Seat::new(2, 1)];
        let mother_b = [Seat::new(1, 2), Seat::new(2, 1)];
        let father = plan_with(&p, &row(0, &[0, 1, 2]), &father_b);
        let mother = plan_with(&p, &row(0, &[0, 1, 2]), &mother_b);
        assert!(father.group_score(1) < 0 && mother.group_score(1) < 0);

        let mut rng = fastrand::Rng::with_seed(6);
        for _ in 0..100 {
            let child = two_parent(&father, &mother, &mut rng).unwrap();
            assert_eq!(child.group_seats(0), row(0, &[0, 1, 2]));
            assert!(child.is_group_seated(1));
            assert_ne!(child.group_seats(1), father_b.to_vec());
            assert_ne!(child.group_seats(1), mother_b.to_vec());
        }
    }

    #[test]
    fn test_two_parent_defers_group_that_fits_from_neither_parent() {
        let p = Arc::new(
            ProblemParams::builder()
                .grid(GridSize::new(3, 3))
                .groups(vec![
                    Group::new("A", 3, "red", None),
                    Group::new("B", 2, "blue", None),
                    Group::new("C", 2, "green", None),
                ])
                .build()
                .build_problem()
                .unwrap(),
        );
        let build = |a: &[Seat], b: &[Seat], c: &[Seat]| {
            let mut plan = Plan::new(p.clone());
            plan.set_group_seats(0, a).unwrap();
            plan.set_group_seats(1, b).unwrap();
            plan.set_group_seats(2, c).unwrap();
            plan.calculate_score();
            plan
        };
        // A comes from the father, B from the mother. Father's C then sits on
        // the mother's B and mother's C sits on the father's A.
        let father = build(&row(0, &[0, 1, 2]), &row(1, &[0, 2]), &row(2, &[0, 1]));
        let mother = build(&row(1, &[0, 1, 2]), &row(2, &[0, 1]), &row(0, &[1, 2]));
        assert!(father.group_score(2) > 0);

        let mut rng = fastrand::Rng::with_seed(13);
        for _ in 0..50 {
            let child = two_parent(&father, &mother, &mut rng).unwrap();
            assert_eq!(child.group_seats(0), row(0, &[0, 1, 2]));
            assert_eq!(child.group_seats(1), row(2, &[0, 1]));
            assert!(child.is_group_seated(2));
            let c = child.group_seats(2);
            assert!(c.iter().all(|s| s.line == 1 || *s == Seat::new(2, 2)), "{:?}", c);
        }
    }

    #[test]
    fn test_partially_seated_parent_group_fails_inheritance() {
        let p = problem();
        let mut father = Plan::new(p.clone());
        father.set_group_seats(0, &row(0, &[0, 1, 2])).unwrap();
        father
            .place(Seat::new(2, 0), crate::group::MemberRef { group: 1, index: 0 })
            .unwrap();
        father.calculate_score();

        let mut rng = fastrand::Rng::with_seed(0);
        let err = (0..200)
            .find_map(|_| uniform(&father, &mut rng).err())
            .expect("a 50% gate hits B eventually");
        assert!(matches!(err, SeatError::GroupSeatCountMismatch { .. }));
    }
}
