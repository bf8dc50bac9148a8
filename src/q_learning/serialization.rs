//! Versioned on-disk format for trained agents
//!
//! Agents are persisted with MessagePack. The envelope carries a format
//! version and the name of the game the agent was trained on, and loading
//! rejects files whose version or game does not match.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    game::Game,
    q_learning::agent::{AgentState, QLearningAgent},
};

/// Current on-disk format version
pub const SAVE_VERSION: u32 = 1;

/// Envelope wrapping an agent's learned state for persistence
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: DeserializeOwned + Eq + std::hash::Hash"
))]
pub struct SavedAgent<M> {
    version: u32,
    game: String,
    state: AgentState<M>,
}

impl<M> SavedAgent<M> {
    /// Format version recorded in the envelope
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Name of the game the agent was trained on
    pub fn game(&self) -> &str {
        &self.game
    }
}

impl<G: Game> QLearningAgent<G> {
    /// Save the agent's learned state to a MessagePack file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let saved = SavedAgent {
            version: SAVE_VERSION,
            game: G::NAME.to_string(),
            state: self.export_state(),
        };

        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create agent file '{}'", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &saved).map_err(|e| Error::Persistence {
            operation: format!("write agent file '{}'", path.display()),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load an agent from a MessagePack file.
    ///
    /// The loaded agent starts in evaluation mode; call
    /// [`QLearningAgent::set_training`] to resume training.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSaveVersion`] for an unknown format
    /// version and [`Error::SavedGameMismatch`] when the file was written
    /// for a different game.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open agent file '{}'", path.display()),
            source,
        })?;
        let reader = BufReader::new(file);
        let saved: SavedAgent<G::Move> =
            rmp_serde::decode::from_read(reader).map_err(|e| Error::Persistence {
                operation: format!("read agent file '{}'", path.display()),
                message: e.to_string(),
            })?;

        if saved.version != SAVE_VERSION {
            return Err(Error::UnsupportedSaveVersion {
                found: saved.version,
                expected: SAVE_VERSION,
            });
        }
        if saved.game != G::NAME {
            return Err(Error::SavedGameMismatch {
                found: saved.game,
                expected: G::NAME.to_string(),
            });
        }

        Ok(Self::from_state(saved.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connect4::Connect4,
        game::{Outcome, Player},
        ports::Policy,
        tictactoe::BoardState,
    };

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.mpk");

        let mut agent = QLearningAgent::<BoardState>::new(0.5, 0.9, 0.3, 0.995, 0.01)
            .unwrap()
            .with_seed(7);
        agent
            .learn(&[0, 3, 1, 4, 2], Outcome::Win(Player::X), Player::X)
            .unwrap();
        agent.save_to_file(&path).unwrap();

        let loaded = QLearningAgent::<BoardState>::load_from_file(&path).unwrap();
        assert!(!loaded.is_training());
        assert_eq!(loaded.q_table().len(), agent.q_table().len());

        let state = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(loaded.q_table().get(&state.state_key(), 2), 0.5);
    }

    #[test]
    fn test_connect4_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.mpk");

        let mut agent = QLearningAgent::<Connect4>::new(0.5, 0.9, 0.3, 0.995, 0.01)
            .unwrap()
            .with_seed(3);
        // X wins vertically in column 0
        agent
            .learn(&[0, 1, 0, 1, 0, 1, 0], Outcome::Win(Player::X), Player::X)
            .unwrap();
        agent.save_to_file(&path).unwrap();

        let loaded = QLearningAgent::<Connect4>::load_from_file(&path).unwrap();
        assert_eq!(loaded.q_table().len(), agent.q_table().len());

        // Final own move carries the terminal reward: Q = 0 + 0.5 * (1 - 0)
        let state = Connect4::new()
            .make_move(0)
            .unwrap()
            .make_move(1)
            .unwrap()
            .make_move(0)
            .unwrap()
            .make_move(1)
            .unwrap()
            .make_move(0)
            .unwrap()
            .make_move(1)
            .unwrap();
        assert_eq!(loaded.q_table().get(&state.state_key(), 0), 0.5);
    }

    #[test]
    fn test_load_rejects_wrong_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.mpk");

        let agent = QLearningAgent::<BoardState>::new(0.5, 0.9, 0.3, 0.995, 0.01).unwrap();
        agent.save_to_file(&path).unwrap();

        let result = QLearningAgent::<Connect4>::load_from_file(&path);
        assert!(matches!(
            result,
            Err(Error::SavedGameMismatch { ref found, ref expected })
                if found == "tictactoe" && expected == "connect4"
        ));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.mpk");

        let agent = QLearningAgent::<BoardState>::new(0.5, 0.9, 0.3, 0.995, 0.01).unwrap();
        let saved = SavedAgent {
            version: SAVE_VERSION + 1,
            game: BoardState::NAME.to_string(),
            state: agent.export_state(),
        };
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &saved).unwrap();
        drop(writer);

        let result = QLearningAgent::<BoardState>::load_from_file(&path);
        assert!(matches!(
            result,
            Err(Error::UnsupportedSaveVersion { found, expected })
                if found == SAVE_VERSION + 1 && expected == SAVE_VERSION
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = QLearningAgent::<BoardState>::load_from_file("/nonexistent/agent.mpk");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
