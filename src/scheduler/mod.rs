//! Q-learning scheduler, training driver and KPI evaluation.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | `QLearningScheduler` | Owns the problem, value table and RNG; runs episodes |
//! | `Trainer` | Repeated training with history and best-schedule tracking |
//! | `StopHandle` | Stops a running `Trainer` from another thread |
//! | `ScheduleKpi` | Makespan, utilization and flow-time metrics |
//!
//! # References
//!
//! - Zhang & Dietterich (1995), "A Reinforcement Learning Approach to Job-shop Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

mod kpi;
mod qlearning;
mod trainer;

pub use kpi::ScheduleKpi;
pub use qlearning::QLearningScheduler;
pub use trainer::{EpisodeSummary, StopHandle, Trainer};
