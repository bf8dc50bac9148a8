//! Match runner
//!
//! Plays a configured number of games between two policies, offers each
//! finished episode back to both policies for learning, and tallies results
//! from the first policy's perspective. With a run seed, every policy is
//! reseeded deterministically before each game so a run is reproducible
//! move for move.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{Game, Outcome, Player},
    ports::{Observer, Policy},
};

/// Configuration for a run of games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of games to play
    pub num_games: usize,
    /// Base seed for the run. When set, both policies are reseeded with
    /// per-game offsets derived from it.
    pub seed: Option<u64>,
    /// Which side the first policy plays. X always moves first.
    pub agent_player: Player,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            num_games: 1000,
            seed: None,
            agent_player: Player::X,
        }
    }
}

/// One finished game: the full move sequence and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord<M> {
    pub moves: Vec<M>,
    pub outcome: Outcome,
}

/// Aggregate results of a run, tallied for the first policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub game: String,
    pub agent: String,
    pub opponent: String,
    pub num_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl RunResult {
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.num_games == 0 {
            0.0
        } else {
            count as f64 / self.num_games as f64
        }
    }

    /// Write the result as pretty-printed JSON
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create result file '{}'", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Read a result back from JSON
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open result file '{}'", path.display()),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Runs games between two policies and reports aggregate results
pub struct MatchRunner<G: Game> {
    config: RunConfig,
    observers: Vec<Box<dyn Observer>>,
    _game: std::marker::PhantomData<G>,
}

impl<G: Game> MatchRunner<G> {
    pub fn new(config: RunConfig) -> Self {
        MatchRunner {
            config,
            observers: Vec::new(),
            _game: std::marker::PhantomData,
        }
    }

    /// Attach an observer notified as the run progresses
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Play one game to completion, routing each turn to the policy playing
    /// that side
    pub fn play_game(
        &self,
        agent: &mut dyn Policy<G>,
        opponent: &mut dyn Policy<G>,
    ) -> Result<MatchRecord<G::Move>> {
        let agent_player = self.config.agent_player;
        let mut state = G::initial();
        let mut moves = Vec::new();

        while !state.is_terminal() {
            let mv = if state.to_move() == agent_player {
                agent.select_move(&state)?
            } else {
                opponent.select_move(&state)?
            };
            state = state.apply(mv)?;
            moves.push(mv);
        }

        Ok(MatchRecord {
            moves,
            outcome: state.outcome(),
        })
    }

    /// Play the configured number of games, letting both policies learn from
    /// each finished episode.
    ///
    /// With a run seed, game `i` reseeds the agent with `seed + 2i` and the
    /// opponent with `seed + 2i + 1`, so runs repeat exactly while the two
    /// policies never share a random stream.
    pub fn run(
        &mut self,
        agent: &mut dyn Policy<G>,
        opponent: &mut dyn Policy<G>,
    ) -> Result<RunResult> {
        let agent_player = self.config.agent_player;
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_games);
        }

        for game_index in 0..self.config.num_games {
            if let Some(seed) = self.config.seed {
                agent.set_rng_seed(seed + 2 * game_index as u64)?;
                opponent.set_rng_seed(seed + 2 * game_index as u64 + 1)?;
            }

            let record = self.play_game(agent, opponent)?;

            match record.outcome {
                Outcome::Win(winner) if winner == agent_player => wins += 1,
                Outcome::Win(_) => losses += 1,
                Outcome::Draw => draws += 1,
                Outcome::InProgress => unreachable!("play_game returns terminal outcomes"),
            }

            agent.learn(&record.moves, record.outcome, agent_player)?;
            opponent.learn(&record.moves, record.outcome, agent_player.opponent())?;

            for observer in &mut self.observers {
                observer.on_game_end(game_index, record.outcome);
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end();
        }

        Ok(RunResult {
            game: G::NAME.to_string(),
            agent: agent.name().to_string(),
            opponent: opponent.name().to_string(),
            num_games: self.config.num_games,
            wins,
            draws,
            losses,
        })
    }
}
