//! Experiment configuration
//!
//! Typed, validated settings for a run: which game, which opponent, search
//! and learning hyperparameters. Everything serializes so a whole experiment
//! can be recorded alongside its results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::Game,
    q_learning::QLearningAgent,
};

/// Which game an experiment runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameChoice {
    TicTacToe,
    Connect4,
}

impl FromStr for GameChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tictactoe" | "ttt" => Ok(GameChoice::TicTacToe),
            "connect4" | "c4" => Ok(GameChoice::Connect4),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown game '{other}' (expected 'tictactoe' or 'connect4')"),
            }),
        }
    }
}

/// Which baseline the agent plays against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentChoice {
    Random,
    Heuristic,
    Minimax,
}

impl FromStr for OpponentChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(OpponentChoice::Random),
            "heuristic" => Ok(OpponentChoice::Heuristic),
            "minimax" => Ok(OpponentChoice::Minimax),
            other => Err(Error::InvalidConfiguration {
                message: format!(
                    "unknown opponent '{other}' (expected 'random', 'heuristic', or 'minimax')"
                ),
            }),
        }
    }
}

/// Minimax search settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Ply limit; `None` searches the full tree
    pub depth_limit: Option<u32>,
    /// Whether alpha-beta pruning is enabled
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_limit: Some(4),
            alpha_beta: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth_limit(mut self, depth_limit: Option<u32>) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth_limit == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "depth_limit must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Q-learning hyperparameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QLearningConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    /// Construct an agent from these hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a value is out of range.
    pub fn build_agent<G: Game>(&self) -> Result<QLearningAgent<G>> {
        QLearningAgent::new(
            self.learning_rate,
            self.discount_factor,
            self.epsilon,
            self.epsilon_decay,
            self.min_epsilon,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.build_agent::<crate::tictactoe::BoardState>().map(|_| ())
    }
}

/// Full experiment description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub game: GameChoice,
    pub opponent: OpponentChoice,
    pub num_games: usize,
    pub seed: Option<u64>,
    pub search: SearchConfig,
    pub q_learning: QLearningConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            game: GameChoice::TicTacToe,
            opponent: OpponentChoice::Random,
            num_games: 1000,
            seed: None,
            search: SearchConfig::default(),
            q_learning: QLearningConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn with_game(mut self, game: GameChoice) -> Self {
        self.game = game;
        self
    }

    pub fn with_opponent(mut self, opponent: OpponentChoice) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn with_num_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_games == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_games must be at least 1".to_string(),
            });
        }
        self.search.validate()?;
        self.q_learning.validate()?;
        Ok(())
    }
}
