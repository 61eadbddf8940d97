use crate::plan::Plan;
use crate::scorer::Score;

/// Fitness-proportionate pick over a pool sorted best first.
///
/// The wheel is walked in pool order, so high scorers are reached earlier.
/// When the scores do not sum to something positive the top plan is returned.
/// Returns `None` only for an empty pool.
pub fn roulette<'a>(pool: &'a [Plan], rng: &mut fastrand::Rng) -> Option<&'a Plan> {
    let top = pool.first()?;
    let sum: Score = pool.iter().map(Plan::score).sum();
    if sum <= 0 {
        return Some(top);
    }

    let target = rng.i64(0..sum);
    let mut running: Score = 0;
    for plan in pool {
        running += plan.score();
        if running >= target {
            return Some(plan);
        }
    }
    Some(top)
}
