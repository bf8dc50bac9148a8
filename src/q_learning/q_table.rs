//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, hash::Hash};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::types::StateKey;

/// Q-table mapping (state, action) pairs to Q-values.
///
/// Generic over the move type so the same table serves cell-indexed
/// (Tic-Tac-Toe) and column-indexed (Connect 4) games. Grows lazily; unseen
/// entries read as `q_init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: DeserializeOwned + Eq + Hash"
))]
pub struct QTable<M> {
    /// Q-values: (state key, action) -> Q-value
    q_values: HashMap<(StateKey, M), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Initial Q-value for unseen state-action pairs
    q_init: f64,
}

impl<M: Copy + Eq + Ord + Hash> QTable<M> {
    /// Create a new Q-table
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &StateKey, action: M) -> f64 {
        *self
            .q_values
            .get(&(state.clone(), action))
            .unwrap_or(&self.q_init)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: M, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Get maximum Q-value over legal actions in a state
    pub fn max_q(&self, state: &StateKey, legal_actions: &[M]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select the greedy action (highest Q-value) from legal actions.
    ///
    /// Ties break toward the earliest action in the slice, which callers pass
    /// in the game's canonical enumeration order, so exploitation is
    /// deterministic.
    pub fn greedy_action(&self, state: &StateKey, legal_actions: &[M]) -> Option<M> {
        let mut best: Option<(M, f64)> = None;
        for &action in legal_actions {
            let q = self.get(state, action);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// `max_future` is zero at terminal transitions.
    pub fn update(
        &mut self,
        state: StateKey,
        action: M,
        reward: f64,
        next_state: &StateKey,
        next_legal_actions: &[M],
        terminal: bool,
    ) {
        let current_q = self.get(&state, action);
        let max_future = if terminal || next_legal_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_legal_actions)
        };
        let td_target = reward + self.discount_factor * max_future;
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
    }

    /// Remove all learned values
    pub fn clear(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    /// Check whether any values have been learned
    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Iterate over stored entries (for persistence checks and analysis)
    pub fn entries(&self) -> impl Iterator<Item = (&(StateKey, M), &f64)> {
        self.q_values.iter()
    }

    /// The learning rate α
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// The discount factor γ
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}
