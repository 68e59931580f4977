//! Monty Hall simulation: plays the three-door game many times and compares
//! the stay and switch strategies on identical game instances.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod game;
pub mod logging;
pub mod rules;
pub mod sim;
pub mod stats;

pub use crate::error::{Result, SimError};
pub use crate::game::{create_game, select_door, Arrangement, Content, Door};
pub use crate::rules::{change_door, determine_winner, open_goat_door, Outcome, Strategy, TrialResult};
pub use crate::sim::{
    play_game, play_n_games, play_n_games_par, run, tally_n_games, Games, PlayedGame, Results,
    SimConfig,
};
pub use crate::stats::Stats;

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(signature = (games, seed = None))]
fn run_sim(games: usize, seed: Option<u64>) -> PyResult<Stats> {
    let config = SimConfig {
        games,
        seed,
        parallel: true,
    };
    let results =
        run(&config).map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;

    Ok(results.stats())
}

#[cfg(feature = "python")]
#[pymodule]
fn monty_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run_sim, m)?)?;
    m.add_class::<Stats>()?;
    Ok(())
}
