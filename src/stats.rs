use std::fmt;

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::Serialize;

use crate::rules::{Outcome, Strategy, TrialResult};

/// Contingency table of win/lose counts per strategy.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub stay_wins: u64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub stay_losses: u64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub switch_wins: u64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub switch_losses: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trials<I>(trials: I) -> Self
    where
        I: IntoIterator<Item = TrialResult>,
    {
        let mut stats = Self::new();
        for trial in trials {
            stats.record(trial);
        }
        stats
    }

    pub fn record(&mut self, trial: TrialResult) {
        let slot = match (trial.strategy, trial.outcome) {
            (Strategy::Stay, Outcome::Win) => &mut self.stay_wins,
            (Strategy::Stay, Outcome::Lose) => &mut self.stay_losses,
            (Strategy::Switch, Outcome::Win) => &mut self.switch_wins,
            (Strategy::Switch, Outcome::Lose) => &mut self.switch_losses,
        };
        *slot += 1;
    }

    pub fn count(&self, strategy: Strategy, outcome: Outcome) -> u64 {
        match (strategy, outcome) {
            (Strategy::Stay, Outcome::Win) => self.stay_wins,
            (Strategy::Stay, Outcome::Lose) => self.stay_losses,
            (Strategy::Switch, Outcome::Win) => self.switch_wins,
            (Strategy::Switch, Outcome::Lose) => self.switch_losses,
        }
    }

    /// Number of recorded trials for `strategy`.
    pub fn trials(&self, strategy: Strategy) -> u64 {
        self.count(strategy, Outcome::Win) + self.count(strategy, Outcome::Lose)
    }

    /// Row-normalised share of `outcome` for `strategy`; 0.0 for an empty row.
    pub fn proportion(&self, strategy: Strategy, outcome: Outcome) -> f64 {
        let n = self.trials(strategy);
        if n == 0 {
            return 0.0;
        }
        self.count(strategy, outcome) as f64 / n as f64
    }

    pub fn win_rate(&self, strategy: Strategy) -> f64 {
        self.proportion(strategy, Outcome::Win)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Stats {
    #[pyo3(name = "stay_win_rate")]
    fn py_stay_win_rate(&self) -> f64 {
        self.win_rate(Strategy::Stay)
    }

    #[pyo3(name = "switch_win_rate")]
    fn py_switch_win_rate(&self) -> f64 {
        self.win_rate(Strategy::Switch)
    }

    fn __repr__(&self) -> String {
        self.to_string()
    }
}

/// Rounds to two decimals for reporting.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8}  {:>4}  {:>4}", "strategy", "win", "lose")?;
        for strategy in Strategy::ALL {
            writeln!(
                f,
                "{:<8}  {:>4.2}  {:>4.2}",
                strategy.name(),
                round2(self.proportion(strategy, Outcome::Win)),
                round2(self.proportion(strategy, Outcome::Lose)),
            )?;
        }
        Ok(())
    }
}
