//! Input validation and schedule auditing.
//!
//! [`validate_problem`] checks the structural integrity of a problem
//! definition before a scheduler is built. The learning core assumes a
//! valid problem and never re-checks; hosts call this at the boundary.
//! Detects:
//! - Missing machines
//! - Duplicate product IDs
//! - Empty products
//! - Out-of-range machine references
//! - Non-positive durations
//! - Priorities outside 1..=3 and negative release times
//! - Operation chains whose product IDs or indices are inconsistent
//!
//! [`audit_schedule`] inspects a produced schedule for precedence,
//! machine-overlap and release-time anomalies.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::models::{Problem, ScheduleSnapshot, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The problem has no machines.
    NoMachines,
    /// Two products share the same ID.
    DuplicateId,
    /// A product has no operations.
    EmptyProduct,
    /// An operation references a machine that doesn't exist.
    InvalidMachineReference,
    /// An operation has a zero or negative duration.
    NonPositiveDuration,
    /// A priority outside 1..=3.
    InvalidPriority,
    /// A release time before t=0.
    NegativeReleaseTime,
    /// An operation's product ID or index does not match its position.
    InconsistentOperation,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoMachines => "no machines",
            Self::DuplicateId => "duplicate id",
            Self::EmptyProduct => "empty product",
            Self::InvalidMachineReference => "invalid machine reference",
            Self::NonPositiveDuration => "non-positive duration",
            Self::InvalidPriority => "invalid priority",
            Self::NegativeReleaseTime => "negative release time",
            Self::InconsistentOperation => "inconsistent operation",
        };
        f.write_str(name)
    }
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem definition.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.num_machines < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoMachines,
            "At least one machine is required",
        ));
    }

    let mut product_ids = HashSet::new();
    for product in &problem.products {
        if !product_ids.insert(product.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate product ID: {}", product.id),
            ));
        }

        if product.operations.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProduct,
                format!("Product {} has no operations", product.id),
            ));
        }

        if !(1..=3).contains(&product.priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!(
                    "Product {} has priority {} (expected 1..=3)",
                    product.id, product.priority
                ),
            ));
        }

        if product.release_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeReleaseTime,
                format!(
                    "Product {} has release time {}",
                    product.id, product.release_time
                ),
            ));
        }

        for (position, op) in product.operations.iter().enumerate() {
            if op.machine_id >= problem.num_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachineReference,
                    format!(
                        "Product {} operation {} references unknown machine {}",
                        product.id, op.index, op.machine_id
                    ),
                ));
            }
            if op.duration <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveDuration,
                    format!(
                        "Product {} operation {} has duration {}",
                        product.id, op.index, op.duration
                    ),
                ));
            }
            if op.product_id != product.id || op.index != position {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InconsistentOperation,
                    format!(
                        "Product {} position {} holds operation P{}:Op{}",
                        product.id, position, op.product_id, op.index
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Per-category anomaly counts for one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnomalyCounts {
    /// Precedence (operation order) violations.
    pub order: usize,
    /// Machine overlap violations.
    pub overlap: usize,
    /// Release time violations.
    pub release: usize,
}

impl AnomalyCounts {
    /// Tallies a list of violations.
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut counts = Self::default();
        for v in violations {
            match v.violation_type {
                ViolationType::PrecedenceViolation => counts.order += 1,
                ViolationType::MachineOverlap => counts.overlap += 1,
                ViolationType::ReleaseTimeViolation => counts.release += 1,
            }
        }
        counts
    }

    /// Total anomalies.
    pub fn total(&self) -> usize {
        self.order + self.overlap + self.release
    }
}

/// Audits a schedule against the problem's hard constraints.
///
/// Checks, for every placement:
/// 1. Its predecessor (index k-1) is placed and ends no later than it starts.
/// 2. It does not overlap another placement on the same machine.
/// 3. It does not start before its product's release time.
///
/// Placements of products unknown to `problem` are ignored.
pub fn audit_schedule(snapshot: &ScheduleSnapshot, problem: &Problem) -> Vec<Violation> {
    let mut violations = Vec::new();

    for product in &problem.products {
        for pair in product.operations.windows(2) {
            let (prev_op, op) = (&pair[0], &pair[1]);
            let Some(current) = snapshot.placement_on(op.machine_id, product.id, op.index) else {
                continue;
            };
            match snapshot.placement_on(prev_op.machine_id, product.id, prev_op.index) {
                Some(prev) if prev.end_time <= current.start_time => {}
                Some(prev) => violations.push(Violation::precedence_violation(
                    product.id,
                    format!(
                        "P{}:Op{} starts at {} before Op{} ends at {}",
                        product.id, op.index, current.start_time, prev_op.index, prev.end_time
                    ),
                )),
                None => violations.push(Violation::precedence_violation(
                    product.id,
                    format!(
                        "P{}:Op{} placed without Op{}",
                        product.id, op.index, prev_op.index
                    ),
                )),
            }
        }
    }

    for (machine_id, placements) in snapshot.machine_schedules().iter().enumerate() {
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                if a.overlaps(b) {
                    violations.push(Violation::machine_overlap(
                        b.operation.product_id,
                        format!(
                            "M{}: P{}:Op{} [{}, {}) overlaps P{}:Op{} [{}, {})",
                            machine_id,
                            a.operation.product_id,
                            a.operation.index,
                            a.start_time,
                            a.end_time,
                            b.operation.product_id,
                            b.operation.index,
                            b.start_time,
                            b.end_time
                        ),
                    ));
                }
            }
        }
    }

    for placement in snapshot.iter_placements() {
        let Some(product) = problem.product(placement.operation.product_id) else {
            continue;
        };
        if placement.start_time < product.release_time {
            violations.push(Violation::release_time_violation(
                product.id,
                format!(
                    "P{}:Op{} starts at {} before release at {}",
                    product.id, placement.operation.index, placement.start_time, product.release_time
                ),
            ));
        }
    }

    violations
}
