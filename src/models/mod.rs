//! Scheduling domain models.
//!
//! Provides the data types for a job-shop instance and the schedules
//! built for it during learning.
//!
//! # Domain Mappings
//!
//! | q-schedule | Manufacturing | Healthcare | Logistics |
//! |------------|--------------|------------|-----------|
//! | Product | Job/Order | Patient Case | Shipment |
//! | Operation | Operation | Procedure | Transport Leg |
//! | Machine | Machine | Room | Truck |
//! | ScheduleSnapshot | Production Plan | OR Schedule | Route Plan |

mod operation;
mod problem;
mod product;
mod schedule;

pub use operation::{MachineId, Operation, ProductId, Time};
pub use problem::Problem;
pub use product::Product;
pub use schedule::{Placement, ScheduleSnapshot, Violation, ViolationType};
