//! Tabular value store.
//!
//! Sparse nested map `state → action → value`. Unvisited entries read as
//! 0, writes are unconditional, and entries are never deleted short of a
//! full [`QTable::clear`].
//!
//! # Update Rule
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
//!
//! # Reference
//! Watkins & Dayan (1992), "Q-learning", Machine Learning 8

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ActionKey, StateKey};
use crate::config::Hyperparameters;

/// One learned value, for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTableEntry {
    /// State key.
    pub state: StateKey,
    /// Action key.
    pub action: ActionKey,
    /// Learned value.
    pub value: f64,
}

/// Learned state-action values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QTable {
    values: HashMap<StateKey, HashMap<ActionKey, f64>>,
}

impl QTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a state-action pair (0.0 if unvisited).
    pub fn get(&self, state: &StateKey, action: &ActionKey) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sets the value of a state-action pair.
    pub fn set(&mut self, state: &StateKey, action: &ActionKey, value: f64) {
        self.values
            .entry(state.clone())
            .or_default()
            .insert(action.clone(), value);
    }

    /// Highest value among `actions` in `state` (0.0 if `actions` is empty).
    pub fn max_value(&self, state: &StateKey, actions: &[ActionKey]) -> f64 {
        actions
            .iter()
            .map(|a| self.get(state, a))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Applies one Q-learning update and returns the new value.
    ///
    /// `next_actions` are the actions feasible in `next_state`. Only the
    /// learning rate and discount factor of `params` are used.
    pub fn update(
        &mut self,
        state: &StateKey,
        action: &ActionKey,
        reward: f64,
        next_state: &StateKey,
        next_actions: &[ActionKey],
        params: &Hyperparameters,
    ) -> f64 {
        let current = self.get(state, action);
        let max_next = self.max_value(next_state, next_actions);
        let updated = current
            + params.learning_rate * (reward + params.discount_factor * max_next - current);
        self.set(state, action, updated);
        updated
    }

    /// Number of stored state-action pairs.
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct states seen.
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Discards everything learned.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// All entries ranked by value, highest first.
    ///
    /// Equal values are ordered by state key, then action key.
    pub fn entries(&self) -> Vec<QTableEntry> {
        let mut entries: Vec<QTableEntry> = self
            .values
            .iter()
            .flat_map(|(state, actions)| {
                actions.iter().map(move |(action, &value)| QTableEntry {
                    state: state.clone(),
                    action: action.clone(),
                    value,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.state.cmp(&b.state))
                .then_with(|| a.action.cmp(&b.action))
        });
        entries
    }
}
