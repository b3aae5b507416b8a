//! Feasibility evaluation.
//!
//! # Algorithm
//!
//! For each product, in problem order, consider only its next pending
//! operation:
//! 1. Skip if the product is not yet released.
//! 2. Skip unless the previous operation is placed and has ended.
//! 3. Skip unless the target machine's latest end time has passed.
//!
//! At most one candidate per product per call.
//!
//! # Complexity
//! O(p * m) where p=products, m=placements per machine.

use crate::models::{Operation, Problem, ScheduleSnapshot};

/// Operations that can legally start at the snapshot's current time.
pub fn feasible_operations(problem: &Problem, snapshot: &ScheduleSnapshot) -> Vec<Operation> {
    let now = snapshot.current_time();
    let mut feasible = Vec::new();

    for product in &problem.products {
        let next = snapshot.progress(product.id);
        let Some(operation) = product.operation(next) else {
            continue;
        };

        if now < product.release_time {
            continue;
        }

        if next > 0 {
            let prev = &product.operations[next - 1];
            match snapshot.placement_on(prev.machine_id, product.id, prev.index) {
                Some(p) if p.end_time <= now => {}
                _ => continue,
            }
        }

        if snapshot.machine_available_at(operation.machine_id) <= now {
            feasible.push(*operation);
        }
    }

    feasible
}
