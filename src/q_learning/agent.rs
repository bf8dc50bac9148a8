//! Q-learning agent

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    game::{Game, Outcome, Player},
    ports::Policy,
    q_learning::q_table::QTable,
    rng::build_rng,
};

/// Serializable snapshot of an agent's learned state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: DeserializeOwned + Eq + std::hash::Hash"
))]
pub(crate) struct AgentState<M> {
    pub q_table: QTable<M>,
    pub epsilon: f64,
    pub initial_epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    pub rng_seed: Option<u64>,
}

/// Tabular Q-learning agent (off-policy TD control).
///
/// Holds the Q-table, the epsilon-greedy exploration schedule, and a seedable
/// random source. While `training` is set, the agent explores with
/// probability epsilon and decays epsilon after each episode; otherwise it
/// always exploits (epsilon treated as 0) and episodes leave it unchanged.
#[derive(Debug, Clone)]
pub struct QLearningAgent<G: Game> {
    q_table: QTable<G::Move>,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    training: bool,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<G: Game> QLearningAgent<G> {
    /// Create a new Q-learning agent in training mode.
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α, in (0, 1]
    /// * `discount_factor` - γ, in [0, 1]
    /// * `epsilon` - initial exploration rate, in [0, 1]
    /// * `epsilon_decay` - multiplicative decay per episode, in (0, 1]
    /// * `min_epsilon` - exploration floor
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a hyperparameter is out
    /// of range.
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        epsilon_decay: f64,
        min_epsilon: f64,
    ) -> Result<Self> {
        validate_range("learning_rate", learning_rate, 0.0, 1.0, false)?;
        validate_range("discount_factor", discount_factor, 0.0, 1.0, true)?;
        validate_range("epsilon", epsilon, 0.0, 1.0, true)?;
        validate_range("epsilon_decay", epsilon_decay, 0.0, 1.0, false)?;
        validate_range("min_epsilon", min_epsilon, 0.0, 1.0, true)?;

        Ok(Self {
            q_table: QTable::new(learning_rate, discount_factor, 0.0),
            epsilon,
            initial_epsilon: epsilon,
            epsilon_decay,
            min_epsilon,
            training: true,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    /// Seed the agent's random source for reproducible exploration
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Toggle training mode. Outside training the agent never explores and
    /// never updates its table.
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    /// Whether the agent is in training mode
    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Read access to the learned table
    pub fn q_table(&self) -> &QTable<G::Move> {
        &self.q_table
    }

    /// ε-greedy action selection in canonical move order
    fn select_epsilon_greedy(&mut self, state: &G, legal_moves: &[G::Move]) -> Result<G::Move> {
        if self.training && self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform among legal moves
            return legal_moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoValidMoves);
        }
        // Exploit: greedy on current estimates
        self.q_table
            .greedy_action(&state.state_key(), legal_moves)
            .ok_or(Error::NoValidMoves)
    }

    /// Decay epsilon after an episode, saturating at the floor
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    fn reset_rng(&mut self) {
        self.rng = build_rng(self.rng_seed);
    }

    pub(crate) fn export_state(&self) -> AgentState<G::Move> {
        AgentState {
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            initial_epsilon: self.initial_epsilon,
            epsilon_decay: self.epsilon_decay,
            min_epsilon: self.min_epsilon,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState<G::Move>) -> Self {
        Self {
            q_table: state.q_table,
            epsilon: state.epsilon,
            initial_epsilon: state.initial_epsilon,
            epsilon_decay: state.epsilon_decay,
            min_epsilon: state.min_epsilon,
            training: false,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}

fn validate_range(
    name: &str,
    value: f64,
    low: f64,
    high: f64,
    low_inclusive: bool,
) -> Result<()> {
    let in_range = value.is_finite()
        && value <= high
        && if low_inclusive { value >= low } else { value > low };
    if in_range {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} must be in {}{low}, {high}], got {value}",
                if low_inclusive { '[' } else { '(' }),
        })
    }
}

impl<G: Game> Policy<G> for QLearningAgent<G> {
    fn select_move(&mut self, state: &G) -> Result<G::Move> {
        let legal_moves = state.legal_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        self.select_epsilon_greedy(state, &legal_moves)
    }

    fn learn(&mut self, moves: &[G::Move], outcome: Outcome, role: Player) -> Result<()> {
        if !self.training {
            return Ok(());
        }

        let reward = match outcome {
            Outcome::Win(winner) if winner == role => 1.0,
            Outcome::Win(_) => -1.0,
            Outcome::Draw => 0.5,
            Outcome::InProgress => {
                return Err(Error::InvalidConfiguration {
                    message: "cannot learn from an unfinished episode".to_string(),
                });
            }
        };

        // Replay the episode from the initial position and apply one TD
        // update per own move. The successor for each update is the agent's
        // next turn, with the opponent's reply folded in; the reward lands
        // only on the terminal transition.
        let mut current = G::initial();

        for (i, &mv) in moves.iter().enumerate() {
            let mover = if i % 2 == 0 { Player::X } else { Player::O };

            if mover == role {
                let state_key = current.state_key();
                let after_own = current.apply(mv)?;

                let mut next_our_turn = after_own.clone();
                let mut terminal = after_own.is_terminal();
                if !terminal && i + 1 < moves.len() {
                    next_our_turn = after_own.apply(moves[i + 1])?;
                    terminal = next_our_turn.is_terminal();
                }

                let next_key = next_our_turn.state_key();
                let next_legal = next_our_turn.legal_moves();
                let step_reward = if terminal { reward } else { 0.0 };

                self.q_table
                    .update(state_key, mv, step_reward, &next_key, &next_legal, terminal);
            }

            current = current.apply(mv)?;
        }

        self.decay_epsilon();
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn reset(&mut self) -> Result<()> {
        self.q_table.clear();
        self.epsilon = self.initial_epsilon;
        self.reset_rng();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}
