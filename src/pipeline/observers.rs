//! Run observers: progress reporting and rolling win-rate tracking

use std::collections::VecDeque;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::{Error, Result},
    game::{Outcome, Player},
    ports::Observer,
};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({eta}) {msg}";

/// Renders a progress bar over the games of a run
pub struct ProgressObserver {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Result<Self> {
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("#>-");
        Ok(ProgressObserver { style, bar: None })
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) {
        let bar = ProgressBar::new(total_games as u64);
        bar.set_style(self.style.clone());
        self.bar = Some(bar);
    }

    fn on_game_end(&mut self, _game_index: usize, _outcome: Outcome) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_run_end(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// Tracks the win rate of one side over a sliding window of recent games.
///
/// To read the rates after a run, keep the observer in an
/// `Arc<Mutex<WinRateObserver>>` and attach a clone of the handle.
pub struct WinRateObserver {
    perspective: Player,
    window: usize,
    recent: VecDeque<Outcome>,
    total_games: usize,
    total_wins: usize,
}

impl WinRateObserver {
    /// Track results for `perspective` over the last `window` games
    pub fn new(perspective: Player, window: usize) -> Self {
        WinRateObserver {
            perspective,
            window: window.max(1),
            recent: VecDeque::new(),
            total_games: 0,
            total_wins: 0,
        }
    }

    /// Win rate over the current window
    pub fn rolling_win_rate(&self) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let wins = self
            .recent
            .iter()
            .filter(|outcome| outcome.winner() == Some(self.perspective))
            .count();
        wins as f64 / self.recent.len() as f64
    }

    /// Win rate over the whole run so far
    pub fn overall_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_wins as f64 / self.total_games as f64
        }
    }

    pub fn games_seen(&self) -> usize {
        self.total_games
    }
}

impl Observer for WinRateObserver {
    fn on_game_end(&mut self, _game_index: usize, outcome: Outcome) {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(outcome);
        self.total_games += 1;
        if outcome.winner() == Some(self.perspective) {
            self.total_wins += 1;
        }
    }
}
