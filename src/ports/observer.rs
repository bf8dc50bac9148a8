//! Observer abstraction for training runs

use std::sync::{Arc, Mutex};

use crate::game::Outcome;

/// Receives notifications as a training or evaluation run progresses.
///
/// All methods default to no-ops so observers only implement the events
/// they care about.
pub trait Observer: Send {
    /// Called once before the first game
    fn on_run_start(&mut self, _total_games: usize) {}

    /// Called after each game with its index (0-based) and final outcome
    fn on_game_end(&mut self, _game_index: usize, _outcome: Outcome) {}

    /// Called once after the last game
    fn on_run_end(&mut self) {}
}

/// Lets a caller keep a handle to an observer while the run owns a clone
impl<T: Observer> Observer for Arc<Mutex<T>> {
    fn on_run_start(&mut self, total_games: usize) {
        if let Ok(mut inner) = self.lock() {
            inner.on_run_start(total_games);
        }
    }

    fn on_game_end(&mut self, game_index: usize, outcome: Outcome) {
        if let Ok(mut inner) = self.lock() {
            inner.on_game_end(game_index, outcome);
        }
    }

    fn on_run_end(&mut self) {
        if let Ok(mut inner) = self.lock() {
            inner.on_run_end();
        }
    }
}
