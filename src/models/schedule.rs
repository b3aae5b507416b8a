//! Schedule snapshot model.
//!
//! A snapshot is the evolving scheduling state during an episode: the
//! per-machine timelines built so far, the simulated clock, and how far
//! each product has progressed through its operation chain.
//!
//! Snapshots have value semantics. Cloning deep-copies every machine
//! timeline, so a retained snapshot (e.g. the best schedule so far) is
//! never affected by later training.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{MachineId, Operation, Problem, ProductId, Time};
use crate::learning::ActionKey;

/// An operation placed on a machine timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Placed operation.
    pub operation: Operation,
    /// Start time.
    pub start_time: Time,
    /// End time (`start_time + operation.duration`).
    pub end_time: Time,
}

impl Placement {
    /// Places `operation` starting at `start_time`.
    pub fn new(operation: Operation, start_time: Time) -> Self {
        Self {
            operation,
            start_time,
            end_time: start_time + operation.duration,
        }
    }

    /// Whether this placement overlaps `other` in time (half-open intervals).
    #[inline]
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// Scheduling state at one instant of an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    /// Placements per machine, in placement order.
    pub(crate) machine_schedules: Vec<Vec<Placement>>,
    /// Simulated clock.
    pub(crate) current_time: Time,
    /// Action keys of every placed operation.
    pub(crate) completed_operations: BTreeSet<ActionKey>,
    /// Next operation index per product.
    pub(crate) product_progress: BTreeMap<ProductId, usize>,
}

impl ScheduleSnapshot {
    /// Creates the empty episode-start snapshot for a problem.
    ///
    /// Every machine timeline is empty, the clock is 0 and every product
    /// is at operation 0.
    pub fn empty(problem: &Problem) -> Self {
        Self {
            machine_schedules: vec![Vec::new(); problem.num_machines],
            current_time: 0,
            completed_operations: BTreeSet::new(),
            product_progress: problem.products.iter().map(|p| (p.id, 0)).collect(),
        }
    }

    /// Simulated clock.
    pub fn current_time(&self) -> Time {
        self.current_time
    }

    /// Number of machines.
    pub fn num_machines(&self) -> usize {
        self.machine_schedules.len()
    }

    /// Placements on a machine (empty for unknown machines).
    pub fn placements(&self, machine_id: MachineId) -> &[Placement] {
        self.machine_schedules
            .get(machine_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Per-machine timelines, indexed by machine id.
    pub fn machine_schedules(&self) -> &[Vec<Placement>] {
        &self.machine_schedules
    }

    /// All placements across machines, machine by machine.
    pub fn iter_placements(&self) -> impl Iterator<Item = &Placement> {
        self.machine_schedules.iter().flatten()
    }

    /// Number of placed operations.
    pub fn placement_count(&self) -> usize {
        self.machine_schedules.iter().map(Vec::len).sum()
    }

    /// Action keys of all placed operations.
    pub fn completed_operations(&self) -> &BTreeSet<ActionKey> {
        &self.completed_operations
    }

    /// Next operation index for a product (0 if unknown).
    pub fn progress(&self, product_id: ProductId) -> usize {
        self.product_progress.get(&product_id).copied().unwrap_or(0)
    }

    /// Progress of every product, in ascending product id order.
    pub fn product_progress(&self) -> &BTreeMap<ProductId, usize> {
        &self.product_progress
    }

    /// Latest end time on a machine (0 if it holds no placements).
    pub fn machine_available_at(&self, machine_id: MachineId) -> Time {
        self.placements(machine_id)
            .iter()
            .map(|p| p.end_time)
            .max()
            .unwrap_or(0)
    }

    /// Whether a machine holds a placement still running at the current time.
    pub fn is_machine_busy(&self, machine_id: MachineId) -> bool {
        self.placements(machine_id)
            .iter()
            .any(|p| p.end_time > self.current_time)
    }

    /// Finds the placement of a product's operation on a given machine.
    pub fn placement_on(
        &self,
        machine_id: MachineId,
        product_id: ProductId,
        index: usize,
    ) -> Option<&Placement> {
        self.placements(machine_id)
            .iter()
            .find(|p| p.operation.product_id == product_id && p.operation.index == index)
    }

    /// Earliest end time strictly after the current time, across all machines.
    ///
    /// `None` when nothing is in flight.
    pub fn next_event_time(&self) -> Option<Time> {
        self.iter_placements()
            .map(|p| p.end_time)
            .filter(|&end| end > self.current_time)
            .min()
    }

    /// Makespan: latest end time across all placements (0 if none).
    pub fn makespan(&self) -> Time {
        self.iter_placements().map(|p| p.end_time).max().unwrap_or(0)
    }

    /// Completion time of a product (latest end among its placements).
    pub fn product_completion_time(&self, product_id: ProductId) -> Option<Time> {
        self.iter_placements()
            .filter(|p| p.operation.product_id == product_id)
            .map(|p| p.end_time)
            .max()
    }

    /// Whether every product of `problem` has placed all its operations.
    pub fn is_complete(&self, problem: &Problem) -> bool {
        problem
            .products
            .iter()
            .all(|p| self.progress(p.id) == p.operation_count())
    }

    /// Moves the clock forward. Time never moves backwards.
    pub(crate) fn advance_to(&mut self, time: Time) {
        debug_assert!(time >= self.current_time, "clock moved backwards");
        self.current_time = time;
    }
}

/// A schedule anomaly detected by [`crate::validation::audit_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related product ID.
    pub product_id: ProductId,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule anomalies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Operation started before its predecessor finished (or without it).
    PrecedenceViolation,
    /// Two placements overlap on one machine.
    MachineOverlap,
    /// Operation started before its product's release time.
    ReleaseTimeViolation,
}

impl Violation {
    /// Creates a precedence violation.
    pub fn precedence_violation(product_id: ProductId, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::PrecedenceViolation,
            product_id,
            message: message.into(),
            severity: 95,
        }
    }

    /// Creates a machine overlap violation.
    pub fn machine_overlap(product_id: ProductId, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::MachineOverlap,
            product_id,
            message: message.into(),
            severity: 90,
        }
    }

    /// Creates a release time violation.
    pub fn release_time_violation(product_id: ProductId, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::ReleaseTimeViolation,
            product_id,
            message: message.into(),
            severity: 80,
        }
    }
}
