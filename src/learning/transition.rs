//! Transition function.

use crate::learning::ActionKey;
use crate::models::{Operation, Placement, ScheduleSnapshot};

/// Applies a feasible operation, producing a new snapshot.
///
/// The operation starts at the current time on its machine. The input
/// snapshot is untouched and shares no timeline with the result. The
/// clock does not move; only the idle-time advance moves it.
pub fn apply_operation(snapshot: &ScheduleSnapshot, operation: &Operation) -> ScheduleSnapshot {
    let mut next = snapshot.clone();

    debug_assert!(
        operation.machine_id < next.machine_schedules.len(),
        "operation targets unknown machine {}",
        operation.machine_id
    );
    next.machine_schedules[operation.machine_id]
        .push(Placement::new(*operation, snapshot.current_time));

    let newly_completed = next
        .completed_operations
        .insert(ActionKey::encode(operation));
    debug_assert!(newly_completed, "operation placed twice: {operation:?}");

    *next.product_progress.entry(operation.product_id).or_insert(0) += 1;

    next
}
