//! Operation model.
//!
//! An operation is the smallest schedulable unit of work: one processing
//! step of a product on a fixed machine for a fixed duration.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

use serde::{Deserialize, Serialize};

/// Product identifier.
pub type ProductId = u32;

/// Machine identifier (0-based index into the machine set).
pub type MachineId = usize;

/// Simulated time, in abstract integer time units relative to t=0.
pub type Time = i64;

/// A single processing step of a product.
///
/// Operations of one product form a strict sequence ordered by `index`;
/// index 0 has no predecessor. Immutable once defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Owning product.
    pub product_id: ProductId,
    /// Machine that must process this operation.
    pub machine_id: MachineId,
    /// Processing time (> 0).
    pub duration: Time,
    /// Position within the product (0-indexed).
    #[serde(rename = "operationIndex")]
    pub index: usize,
}

impl Operation {
    /// Creates a new operation.
    pub fn new(product_id: ProductId, machine_id: MachineId, duration: Time, index: usize) -> Self {
        Self {
            product_id,
            machine_id,
            duration,
            index,
        }
    }

    /// Whether this is the first operation of its product.
    #[inline]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}
