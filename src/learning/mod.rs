//! Tabular Q-learning core.
//!
//! Learns a dispatching policy for the job shop by simulating episodes:
//! at each decision instant one feasible operation is placed, the
//! transition is scored, and the value of the chosen state-action pair is
//! updated.
//!
//! # Pipeline
//!
//! ```text
//! snapshot ─► feasible_operations ─► select_action ─► apply_operation
//!     ▲                                                     │
//!     └──────── QTable::update ◄──── compute_reward ◄───────┘
//! ```
//!
//! # Submodules
//!
//! - [`encoding`]: `StateKey` / `ActionKey` projections
//! - [`feasibility`]: operations startable at the current instant
//! - [`policy`]: epsilon-greedy selection
//! - [`transition`]: value-semantics snapshot transitions
//! - [`reward`]: reward shaping
//! - [`q_table`]: value store and update rule
//! - [`episode`]: learning episodes and greedy rollouts
//!
//! # Reference
//! Sutton & Barto (2018), "Reinforcement Learning: An Introduction", Ch. 6.5

pub mod encoding;
pub mod episode;
pub mod feasibility;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod transition;

pub use encoding::{ActionKey, StateKey};
pub use episode::{EpisodeResult, EpisodeRunner, Termination};
pub use feasibility::feasible_operations;
pub use policy::{greedy_action, select_action, Exploration};
pub use q_table::{QTable, QTableEntry};
pub use reward::{compute_reward, RewardBreakdown};
pub use transition::apply_operation;
