//! Decision policies for deterministic, perfect-information board games.
//!
//! Two families of policy are implemented over a shared [`Game`] trait and
//! compared head to head:
//!
//! - **Search**: minimax with optional alpha-beta pruning, depth limiting,
//!   and pluggable static evaluation ([`search`]).
//! - **Learning**: tabular Q-learning with epsilon-greedy exploration and
//!   persistent Q-tables ([`q_learning`]).
//!
//! Two games supply the environments: Tic-Tac-Toe ([`tictactoe`]) and
//! Connect 4 ([`connect4`]). Scripted baselines ([`opponents`]) and a match
//! runner ([`pipeline`]) round out the toolkit for running experiments.
//!
//! # Example
//!
//! ```
//! use gambit::{
//!     opponents::RandomPolicy,
//!     pipeline::{MatchRunner, RunConfig},
//!     search::{MinimaxPolicy, NeutralEvaluator},
//!     tictactoe::BoardState,
//! };
//!
//! let mut runner = MatchRunner::<BoardState>::new(RunConfig {
//!     num_games: 10,
//!     seed: Some(42),
//!     ..RunConfig::default()
//! });
//! let mut agent = MinimaxPolicy::new(NeutralEvaluator, None, true);
//! let mut opponent = RandomPolicy::new();
//!
//! let result = runner.run(&mut agent, &mut opponent).unwrap();
//! assert_eq!(result.losses, 0);
//! ```

pub mod config;
pub mod connect4;
pub mod error;
pub mod game;
pub mod opponents;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod search;
pub mod tictactoe;
pub mod types;

mod rng;

pub use config::{ExperimentConfig, GameChoice, OpponentChoice, QLearningConfig, SearchConfig};
pub use error::{Error, Result};
pub use game::{Game, Outcome, Player};
pub use ports::{Observer, Policy};
pub use types::StateKey;
