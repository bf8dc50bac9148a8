//! Match running: pitting two policies against each other over many games

pub mod observers;
pub mod training;

pub use observers::{ProgressObserver, WinRateObserver};
pub use training::{MatchRecord, MatchRunner, RunConfig, RunResult};
