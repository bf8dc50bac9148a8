//! Tabular Q-learning
//!
//! Off-policy temporal difference control: the agent learns Q* estimates for
//! (state, action) pairs from complete self-play or play-vs-opponent
//! episodes, exploring with an epsilon-greedy rule whose epsilon decays
//! across episodes.

pub mod agent;
pub mod q_table;
pub mod serialization;

pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::SavedAgent;
