//! Job-shop scheduling by tabular Q-learning.
//!
//! Products are chains of operations, each bound to one machine. An agent
//! learns which feasible operation to dispatch at each decision instant by
//! simulating episodes over a time-indexed schedule and updating a
//! state-action value table.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Operation`, `Product`, `Problem`,
//!   `ScheduleSnapshot`, `Placement`
//! - **`learning`**: State/action encoding, feasibility, reward shaping,
//!   the Q-table and the episode loop
//! - **`scheduler`**: `QLearningScheduler` facade, `Trainer`, KPIs
//! - **`validation`**: Problem checks and schedule audits
//! - **`config`**: Learning hyperparameters
//! - **`error`**: Error types for loading problem definitions
//!
//! # Example
//!
//! ```
//! use q_schedule::{Hyperparameters, Problem, Product, QLearningScheduler};
//!
//! let problem = Problem::new(2)
//!     .with_product(Product::new(1).with_operation(0, 3).with_operation(1, 2));
//! let mut scheduler = QLearningScheduler::seeded(problem, Hyperparameters::default(), 7);
//! let result = scheduler.train_episode();
//! assert!(result.is_complete());
//! assert_eq!(result.makespan(), 5);
//! ```
//!
//! # References
//!
//! - Watkins & Dayan (1992), "Q-learning"
//! - Sutton & Barto (2018), "Reinforcement Learning: An Introduction"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod learning;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::Hyperparameters;
pub use error::ProblemError;
pub use models::{Problem, Product, ScheduleSnapshot};
pub use scheduler::{QLearningScheduler, ScheduleKpi, StopHandle, Trainer};
