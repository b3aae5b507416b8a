//! Epsilon-greedy action selection.
//!
//! With probability ε a uniformly random feasible operation is returned.
//! Otherwise the operation with the strictly greatest table value wins;
//! ties go to the earliest candidate in scan order, so exploitation is
//! deterministic for a fixed table.
//!
//! Randomness comes only from the caller's `Rng`, never a global source.

use rand::Rng;

use super::{ActionKey, QTable, StateKey};
use crate::models::Operation;

/// Exploration settings for one episode.
#[derive(Debug)]
pub struct Exploration<'r, R> {
    /// Probability of a random action.
    pub epsilon: f64,
    /// Source of exploration draws.
    pub rng: &'r mut R,
}

/// Picks the highest-valued feasible operation in `state`.
///
/// Returns `None` if `feasible` is empty.
pub fn greedy_action(table: &QTable, state: &StateKey, feasible: &[Operation]) -> Option<Operation> {
    let (first, rest) = feasible.split_first()?;
    let mut best = *first;
    let mut best_value = table.get(state, &ActionKey::encode(first));

    for op in rest {
        let value = table.get(state, &ActionKey::encode(op));
        if value > best_value {
            best_value = value;
            best = *op;
        }
    }

    Some(best)
}

/// Epsilon-greedy choice among `feasible`.
///
/// No draw is taken when ε ≤ 0, so a zero-ε run never touches `rng`.
pub fn select_action<R: Rng>(
    table: &QTable,
    state: &StateKey,
    feasible: &[Operation],
    epsilon: f64,
    rng: &mut R,
) -> Option<Operation> {
    if feasible.is_empty() {
        return None;
    }

    if epsilon > 0.0 && rng.random::<f64>() < epsilon {
        return Some(feasible[rng.random_range(0..feasible.len())]);
    }

    greedy_action(table, state, feasible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Problem, Product, ScheduleSnapshot};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn setup() -> (StateKey, Vec<Operation>) {
        let problem = Problem::new(3)
            .with_product(Product::new(1).with_operation(0, 1))
            .with_product(Product::new(2).with_operation(1, 1))
            .with_product(Product::new(3).with_operation(2, 1));
        let state = StateKey::encode(&ScheduleSnapshot::empty(&problem));
        let ops = problem.products.iter().map(|p| p.operations[0]).collect();
        (state, ops)
    }

    #[test]
    fn test_empty_feasible_set() {
        let (state, _) = setup();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(select_action(&QTable::new(), &state, &[], 1.0, &mut rng).is_none());
        assert!(greedy_action(&QTable::new(), &state, &[]).is_none());
    }

    #[test]
    fn test_greedy_picks_max() {
        let (state, ops) = setup();
        let mut table = QTable::new();
        table.set(&state, &ActionKey::encode(&ops[1]), 3.0);
        table.set(&state, &ActionKey::encode(&ops[2]), 1.0);

        let mut rng = SmallRng::seed_from_u64(7);
        let chosen = select_action(&table, &state, &ops, 0.0, &mut rng).unwrap();
        assert_eq!(chosen, ops[1]);
    }

    #[test]
    fn test_greedy_tie_break_first_wins() {
        let (state, ops) = setup();
        let mut table = QTable::new();
        table.set(&state, &ActionKey::encode(&ops[1]), 2.0);
        table.set(&state, &ActionKey::encode(&ops[2]), 2.0);
        assert_eq!(greedy_action(&table, &state, &ops), Some(ops[1]));

        // Unseen everywhere: all 0, first candidate wins.
        assert_eq!(greedy_action(&QTable::new(), &state, &ops), Some(ops[0]));
    }

    #[test]
    fn test_greedy_with_negative_values() {
        let (state, ops) = setup();
        let mut table = QTable::new();
        table.set(&state, &ActionKey::encode(&ops[0]), -5.0);
        table.set(&state, &ActionKey::encode(&ops[1]), -1.0);
        // ops[2] unseen reads as 0 and beats both.
        assert_eq!(greedy_action(&table, &state, &ops), Some(ops[2]));
    }

    #[test]
    fn test_full_exploration_covers_all_candidates() {
        let (state, ops) = setup();
        let mut table = QTable::new();
        table.set(&state, &ActionKey::encode(&ops[0]), 100.0);

        let mut rng = SmallRng::seed_from_u64(42);
        let seen: HashSet<u32> = (0..200)
            .filter_map(|_| select_action(&table, &state, &ops, 1.0, &mut rng))
            .map(|op| op.product_id)
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_seeded_exploration_is_reproducible() {
        let (state, ops) = setup();
        let table = QTable::new();
        let draw = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..20)
                .map(|_| select_action(&table, &state, &ops, 0.5, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }
}
