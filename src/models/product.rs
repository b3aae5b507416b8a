//! Product (job) model.
//!
//! A product is a unit of work consisting of an ordered chain of
//! operations, each bound to one machine. Products carry a release time
//! and a priority that weights their completion reward.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

use super::{MachineId, Operation, ProductId, Time};

/// A product (job) to be scheduled.
///
/// # Time Representation
/// All times are integer units relative to the scheduling epoch (t=0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Operations in processing order (indices 0..n-1).
    pub operations: Vec<Operation>,
    /// Earliest time any operation of this product may start.
    #[serde(default)]
    pub release_time: Time,
    /// Priority level 1..=3 (3 = most important).
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    1
}

impl Product {
    /// Creates a new product with the given ID (priority 1, released at t=0).
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            operations: Vec::new(),
            release_time: 0,
            priority: default_priority(),
        }
    }

    /// Sets the product name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: Time) -> Self {
        self.release_time = release_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Appends the next operation of the chain.
    ///
    /// The operation's product ID and index are derived from this product.
    pub fn with_operation(mut self, machine_id: MachineId, duration: Time) -> Self {
        let index = self.operations.len();
        self.operations
            .push(Operation::new(self.id, machine_id, duration, index));
        self
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Total processing time across all operations.
    pub fn total_duration(&self) -> Time {
        self.operations.iter().map(|op| op.duration).sum()
    }

    /// Operation at the given index, if any.
    pub fn operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }
}
