//! Newtype wrappers shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hashable state encoding used to index Q-tables.
///
/// Each game produces its own key format (see [`Game::state_key`]): Tic-Tac-Toe
/// uses the raw board encoding, Connect 4 a reduced column-profile encoding.
/// The newtype keeps the two from being mixed up with arbitrary strings in
/// table lookups.
///
/// [`Game::state_key`]: crate::game::Game::state_key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Wrap an encoding produced by a game model.
    pub fn new(encoding: String) -> Self {
        StateKey(encoding)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StateKey {
    fn from(encoding: String) -> Self {
        StateKey(encoding)
    }
}
