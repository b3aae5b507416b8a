//! State and action keys for the value table.
//!
//! # State Key
//!
//! `"{pid}:{next},{pid}:{next},...|{bits}"`: every product's progress in
//! ascending product id order, then one busy/idle bit per machine in
//! machine order. A machine is busy iff it holds a placement ending after
//! the current time.
//!
//! The projection is deliberately lossy: snapshots with the same progress
//! and the same busy-machine set share a state regardless of timestamps.
//!
//! # Action Key
//!
//! `"P{pid}:M{machine}:Op{index}"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Operation, ScheduleSnapshot};

/// Learning-state identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

/// Action identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(String);

impl StateKey {
    /// Encodes a snapshot.
    pub fn encode(snapshot: &ScheduleSnapshot) -> Self {
        let progress = snapshot
            .product_progress()
            .iter()
            .map(|(pid, next)| format!("{pid}:{next}"))
            .collect::<Vec<_>>()
            .join(",");
        let machines: String = (0..snapshot.num_machines())
            .map(|m| if snapshot.is_machine_busy(m) { '1' } else { '0' })
            .collect();
        Self(format!("{progress}|{machines}"))
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ActionKey {
    /// Encodes an operation.
    pub fn encode(operation: &Operation) -> Self {
        Self(format!(
            "P{}:M{}:Op{}",
            operation.product_id, operation.machine_id, operation.index
        ))
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
