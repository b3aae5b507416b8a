//! Episode runner.
//!
//! # Algorithm
//!
//! Starting from the empty snapshot, with a budget of twice the total
//! operation count:
//! 1. Stop if every product is complete.
//! 2. Compute the feasible set. If empty, jump the clock to the earliest
//!    end time still in the future; if nothing is in flight, stop
//!    (deadlock).
//! 3. Otherwise select an operation, apply it, score the transition and,
//!    when learning, update the table from the pre- and post-transition
//!    state keys.
//!
//! Clock jumps do not consume the step budget. Every step places one
//! operation, so a valid problem always finishes within budget.
//!
//! A greedy rollout runs the same loop with ε = 0 and no table writes.

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::Rng;

use super::{
    apply_operation, compute_reward, feasible_operations, greedy_action, select_action,
    ActionKey, Exploration, QTable, StateKey,
};
use crate::config::Hyperparameters;
use crate::models::{Problem, ScheduleSnapshot, Time};

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every product placed all its operations.
    Completed,
    /// Nothing feasible and nothing in flight.
    Deadlock,
    /// The step budget ran out.
    BudgetExhausted,
}

/// Outcome of one episode.
#[derive(Debug, Clone)]
pub struct EpisodeResult {
    /// Snapshot at episode end.
    pub final_snapshot: ScheduleSnapshot,
    /// Sum of step rewards (0 for rollouts, which are not scored).
    pub total_reward: f64,
    /// Operations placed.
    pub steps: usize,
    /// Exit condition.
    pub termination: Termination,
}

impl EpisodeResult {
    /// Makespan of the final snapshot (0 if nothing was placed).
    pub fn makespan(&self) -> Time {
        self.final_snapshot.makespan()
    }

    /// Whether every product completed.
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }
}

enum Values<'t> {
    Learning {
        table: &'t mut QTable,
        params: Hyperparameters,
    },
    Frozen(&'t QTable),
}

impl Values<'_> {
    fn table(&self) -> &QTable {
        match self {
            Values::Learning { table, .. } => table,
            Values::Frozen(table) => table,
        }
    }
}

/// Drives episodes over one problem.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeRunner<'a> {
    problem: &'a Problem,
}

impl<'a> EpisodeRunner<'a> {
    /// Creates a runner for `problem`.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Runs one learning episode: epsilon-greedy with table updates.
    pub fn train<R: Rng>(
        &self,
        table: &mut QTable,
        params: &Hyperparameters,
        rng: &mut R,
    ) -> EpisodeResult {
        self.simulate(
            Values::Learning {
                table,
                params: *params,
            },
            Some(Exploration {
                epsilon: params.epsilon,
                rng,
            }),
        )
    }

    /// Runs one pure-exploitation episode without learning.
    ///
    /// Deterministic for a fixed table and problem.
    pub fn rollout(&self, table: &QTable) -> EpisodeResult {
        self.simulate::<SmallRng>(Values::Frozen(table), None)
    }

    fn simulate<R: Rng>(
        &self,
        mut values: Values<'_>,
        mut exploration: Option<Exploration<'_, R>>,
    ) -> EpisodeResult {
        let problem = self.problem;
        let budget = problem.step_budget();
        let learning = matches!(values, Values::Learning { .. });

        let mut snapshot = ScheduleSnapshot::empty(problem);
        let mut total_reward = 0.0;
        let mut steps = 0;

        let termination = loop {
            if snapshot.is_complete(problem) {
                break Termination::Completed;
            }
            if steps >= budget {
                break Termination::BudgetExhausted;
            }

            let feasible = feasible_operations(problem, &snapshot);
            if feasible.is_empty() {
                match snapshot.next_event_time() {
                    Some(time) => {
                        debug!("idle: clock {} -> {}", snapshot.current_time(), time);
                        snapshot.advance_to(time);
                        continue;
                    }
                    None => {
                        debug!(
                            "deadlock at t={} after {} steps",
                            snapshot.current_time(),
                            steps
                        );
                        break Termination::Deadlock;
                    }
                }
            }

            let state = StateKey::encode(&snapshot);
            let chosen = match exploration.as_mut() {
                Some(e) => select_action(values.table(), &state, &feasible, e.epsilon, &mut *e.rng),
                None => greedy_action(values.table(), &state, &feasible),
            };
            let Some(operation) = chosen else {
                break Termination::Deadlock;
            };
            let action = ActionKey::encode(&operation);

            let next = apply_operation(&snapshot, &operation);
            if learning {
                let reward = compute_reward(problem, &snapshot, &next, &operation).total();
                if let Values::Learning { table, params } = &mut values {
                    let next_state = StateKey::encode(&next);
                    let next_actions: Vec<ActionKey> = feasible_operations(problem, &next)
                        .iter()
                        .map(ActionKey::encode)
                        .collect();
                    table.update(&state, &action, reward, &next_state, &next_actions, params);
                }
                trace!("step {steps}: {state} --{action}--> reward {reward:.3}");
                total_reward += reward;
            }

            snapshot = next;
            steps += 1;
        };

        EpisodeResult {
            final_snapshot: snapshot,
            total_reward,
            steps,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::validation::audit_schedule;
    use rand::SeedableRng;

    fn random_problem(rng: &mut SmallRng) -> Problem {
        let num_machines = rng.random_range(1..=4);
        let mut problem = Problem::new(num_machines);
        for id in 1..=rng.random_range(1..=5u32) {
            // Product 1 starts the shop; later releases may land while it runs.
            let release = if id == 1 { 0 } else { rng.random_range(0..=6) };
            let mut product = Product::new(id)
                .with_priority(rng.random_range(1..=3))
                .with_release_time(release);
            for _ in 0..rng.random_range(1..=4) {
                product =
                    product.with_operation(rng.random_range(0..num_machines), rng.random_range(1..=9));
            }
            problem = problem.with_product(product);
        }
        problem
    }

    #[test]
    fn test_single_operation_episode() {
        let problem = Problem::new(1).with_product(Product::new(1).with_operation(0, 5));
        let mut table = QTable::new();
        let mut rng = SmallRng::seed_from_u64(0);

        let result =
            EpisodeRunner::new(&problem).train(&mut table, &Hyperparameters::default(), &mut rng);
        assert_eq!(result.steps, 1);
        assert_eq!(result.termination, Termination::Completed);
        assert_eq!(result.makespan(), 5);

        let placed = result.final_snapshot.placements(0);
        assert_eq!(placed.len(), 1);
        assert_eq!((placed[0].start_time, placed[0].end_time), (0, 5));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_two_machine_chain() {
        let problem = Problem::new(2)
            .with_product(Product::new(1).with_operation(0, 3).with_operation(1, 2));
        let mut rng = SmallRng::seed_from_u64(3);
        let mut table = QTable::new();
        let runner = EpisodeRunner::new(&problem);

        for _ in 0..10 {
            let result = runner.train(&mut table, &Hyperparameters::default(), &mut rng);
            let s = &result.final_snapshot;
            let first = s.placements(0)[0];
            let second = s.placements(1)[0];
            assert_eq!((first.start_time, first.end_time), (0, 3));
            assert!(second.start_time >= 3);
            assert_eq!(second.end_time, second.start_time + 2);
            assert!(result.makespan() >= 5);
            assert_eq!(result.steps, 2);
        }
    }

    #[test]
    fn test_idle_advance_jumps_to_predecessor_end() {
        // Op1 becomes feasible exactly at t=3.
        let problem = Problem::new(2)
            .with_product(Product::new(1).with_operation(0, 3).with_operation(1, 2));
        let result = EpisodeRunner::new(&problem).rollout(&QTable::new());
        let second = result.final_snapshot.placements(1)[0];
        assert_eq!(second.start_time, 3);
        assert_eq!(result.final_snapshot.current_time(), 3);
        assert_eq!(result.makespan(), 5);
    }

    #[test]
    fn test_release_with_idle_shop_deadlocks() {
        let problem = Problem::new(1)
            .with_product(Product::new(1).with_release_time(4).with_operation(0, 2));
        let result = EpisodeRunner::new(&problem).rollout(&QTable::new());
        assert_eq!(result.termination, Termination::Deadlock);
        assert_eq!(result.steps, 0);
        assert_eq!(result.makespan(), 0);
    }

    #[test]
    fn test_release_reached_through_machine_event() {
        let problem = Problem::new(1)
            .with_product(Product::new(1).with_operation(0, 6))
            .with_product(Product::new(2).with_release_time(4).with_operation(0, 2));
        let result = EpisodeRunner::new(&problem).rollout(&QTable::new());
        assert!(result.is_complete());
        let late = result
            .final_snapshot
            .iter_placements()
            .find(|p| p.operation.product_id == 2)
            .unwrap();
        assert_eq!(late.start_time, 6);
    }

    #[test]
    fn test_empty_problem_completes_immediately() {
        let problem = Problem::new(2);
        let result = EpisodeRunner::new(&problem).rollout(&QTable::new());
        assert_eq!(result.termination, Termination::Completed);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_schedules_respect_hard_constraints() {
        let mut source = SmallRng::seed_from_u64(2024);
        for _ in 0..40 {
            let problem = random_problem(&mut source);
            let runner = EpisodeRunner::new(&problem);
            let mut table = QTable::new();
            let mut rng = SmallRng::seed_from_u64(source.random());

            for _ in 0..15 {
                let result = runner.train(&mut table, &Hyperparameters::default(), &mut rng);
                let s = &result.final_snapshot;
                match result.termination {
                    Termination::Completed => {
                        assert_eq!(result.steps, problem.total_operations());
                    }
                    Termination::Deadlock => {
                        // Idle shop, remaining work still unreleased.
                        assert!(s.next_event_time().is_none());
                        assert!(feasible_operations(&problem, s).is_empty());
                        assert!(problem
                            .products
                            .iter()
                            .filter(|p| s.progress(p.id) < p.operation_count())
                            .all(|p| p.release_time > s.current_time()));
                    }
                    Termination::BudgetExhausted => panic!("budget exhausted"),
                }
                let violations = audit_schedule(s, &problem);
                assert!(violations.is_empty(), "{violations:?}");
            }
        }
    }

    #[test]
    fn test_rollout_is_deterministic_and_read_only() {
        let mut source = SmallRng::seed_from_u64(11);
        let problem = random_problem(&mut source);
        let runner = EpisodeRunner::new(&problem);
        let mut table = QTable::new();
        for _ in 0..25 {
            runner.train(&mut table, &Hyperparameters::default(), &mut source);
        }

        let learned = table.len();
        let a = runner.rollout(&table);
        let b = runner.rollout(&table);
        assert_eq!(a.final_snapshot, b.final_snapshot);
        assert_eq!(a.total_reward, 0.0);
        assert_eq!(table.len(), learned);
    }

    #[test]
    fn test_total_reward_matches_single_step_formula() {
        let problem =
            Problem::new(1).with_product(Product::new(1).with_priority(3).with_operation(0, 4));
        let mut table = QTable::new();
        let mut rng = SmallRng::seed_from_u64(5);
        let params = Hyperparameters::default();

        let result = EpisodeRunner::new(&problem).train(&mut table, &params, &mut rng);
        let expected = -0.4 + 500.0 + 750.0 + 250.0 + 40.0;
        assert!((result.total_reward - expected).abs() < 1e-9);

        // Terminal successor: Q = α * r.
        let entry = &table.entries()[0];
        assert!((entry.value - params.learning_rate * expected).abs() < 1e-9);
    }
}
