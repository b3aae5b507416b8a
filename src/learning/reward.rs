//! Reward shaping.
//!
//! All components are additive:
//!
//! | Component | Value |
//! |-----------|-------|
//! | Duration penalty | `-0.1 * duration` |
//! | Product completion | `priority * 150 + 50 + (1000 / completion_time) * priority` |
//! | Global completion | `1000 / makespan` |
//! | Utilization | `10 * Σ machine_end / (machines * current_time)` |
//!
//! Rewards are neither clipped nor normalized; completion bonuses dominate
//! the per-step penalty.
//!
//! The utilization denominator falls back to 1 only when it is exactly 0,
//! so the term jumps in magnitude as the clock leaves t=0. The formula is
//! kept as-is.

use crate::models::{Operation, Problem, ScheduleSnapshot};

const DURATION_PENALTY: f64 = 0.1;
const PRIORITY_BONUS: f64 = 150.0;
const COMPLETION_BASE: f64 = 50.0;
const SPEED_SCALE: f64 = 1000.0;
const MAKESPAN_SCALE: f64 = 1000.0;
const UTILIZATION_WEIGHT: f64 = 10.0;

/// Reward of a single transition, split by component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardBreakdown {
    /// Penalty for the operation's duration (≤ 0).
    pub duration_penalty: f64,
    /// Priority and speed bonus when the operation completes its product.
    pub product_bonus: f64,
    /// Bonus when every product is complete.
    pub completion_bonus: f64,
    /// Machine utilization term.
    pub utilization: f64,
}

impl RewardBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> f64 {
        self.duration_penalty + self.product_bonus + self.completion_bonus + self.utilization
    }
}

/// Scores the transition `old → new` caused by `operation`.
///
/// Every component reads only `new`; `old` is accepted so the reward can
/// later depend on the full transition without changing callers.
pub fn compute_reward(
    problem: &Problem,
    _old: &ScheduleSnapshot,
    new: &ScheduleSnapshot,
    operation: &Operation,
) -> RewardBreakdown {
    let mut reward = RewardBreakdown {
        duration_penalty: -(operation.duration as f64) * DURATION_PENALTY,
        ..Default::default()
    };

    if let Some(product) = problem.product(operation.product_id) {
        if new.progress(product.id) == product.operation_count() {
            let priority = f64::from(product.priority);
            let completion = new.product_completion_time(product.id).unwrap_or(0) as f64;
            reward.product_bonus =
                priority * PRIORITY_BONUS + COMPLETION_BASE + (SPEED_SCALE / completion) * priority;
        }
    }

    if new.is_complete(problem) {
        let makespan = match new.makespan() {
            0 => 1,
            m => m,
        };
        reward.completion_bonus = MAKESPAN_SCALE / makespan as f64;
    }

    let total_machine_time: i64 = (0..new.num_machines())
        .map(|m| new.machine_available_at(m))
        .sum();
    let denominator = match problem.num_machines as i64 * new.current_time() {
        0 => 1,
        d => d,
    };
    reward.utilization = UTILIZATION_WEIGHT * total_machine_time as f64 / denominator as f64;

    reward
}
