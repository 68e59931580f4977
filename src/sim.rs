use std::path::Path;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::game::{create_game, select_door, Door};
use crate::rules::{change_door, determine_winner, open_goat_door, Outcome, Strategy, TrialResult};
use crate::stats::Stats;

/// One game as played: the setup plus both strategies' results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedGame {
    pub prize: Door,
    pub pick: Door,
    pub opened: Door,
    pub stay: TrialResult,
    pub switch: TrialResult,
}

impl PlayedGame {
    pub fn trials(&self) -> [TrialResult; 2] {
        [self.stay, self.switch]
    }

    pub fn outcome(&self, strategy: Strategy) -> Outcome {
        match strategy {
            Strategy::Stay => self.stay.outcome,
            Strategy::Switch => self.switch.outcome,
        }
    }
}

/// All games of one run, in play order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Results {
    pub games: Vec<PlayedGame>,
}

impl Results {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// The 2n (strategy, outcome) pairs, stay before switch for each game.
    pub fn trial_results(&self) -> impl Iterator<Item = TrialResult> + '_ {
        self.games.iter().flat_map(PlayedGame::trials)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_trials(self.trial_results())
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::json!({
            "stats": self.stats(),
            "games": self.games,
        });
        std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub games: usize,
    /// Fixed seed for a reproducible run; drawn from entropy when `None`.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 10_000,
            seed: None,
            parallel: false,
        }
    }
}

/// Plays a single game and evaluates both strategies against the same
/// arrangement, pick and opened door.
pub fn play_game(rng: &mut impl Rng) -> Result<PlayedGame> {
    let arrangement = create_game(rng);
    let pick = select_door(rng);
    let opened = open_goat_door(&arrangement, pick, rng);

    let trial = |strategy| -> Result<TrialResult> {
        let final_pick = change_door(strategy, opened, pick)?;
        Ok(TrialResult {
            strategy,
            outcome: determine_winner(final_pick, &arrangement),
        })
    };
    let stay = trial(Strategy::Stay)?;
    let switch = trial(Strategy::Switch)?;

    trace!(
        "prize={} pick={} opened={} stay={:?} switch={:?}",
        arrangement.prize(),
        pick,
        opened,
        stay.outcome,
        switch.outcome
    );

    Ok(PlayedGame {
        prize: arrangement.prize(),
        pick,
        opened,
        stay,
        switch,
    })
}

/// Lazy, finite sequence of independent games drawn from one generator.
pub struct Games<R> {
    rng: R,
    remaining: usize,
}

impl<R: Rng> Games<R> {
    pub fn new(rng: R, n: usize) -> Self {
        Games { rng, remaining: n }
    }
}

impl<R: Rng> Iterator for Games<R> {
    type Item = Result<PlayedGame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(play_game(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Games<R> {}

/// Plays `n` games and keeps every record. `n == 0` yields empty results.
pub fn play_n_games(rng: &mut impl Rng, n: usize) -> Result<Results> {
    let games = Games::new(rng, n).collect::<Result<Vec<_>>>()?;
    let results = Results { games };
    info!("played {} games\n{}", results.len(), results.stats());
    Ok(results)
}

/// Folds `n` games straight into counts without keeping the records.
pub fn tally_n_games(rng: &mut impl Rng, n: usize) -> Result<Stats> {
    Games::new(rng, n).try_fold(Stats::new(), |mut stats, game| {
        for trial in game?.trials() {
            stats.record(trial);
        }
        Ok(stats)
    })
}

/// Plays `n` games on the rayon pool. Game `i` draws from its own generator
/// seeded with `seed + i`, so results do not depend on the thread count.
pub fn play_n_games_par(n: usize, seed: u64) -> Result<Results> {
    let games = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            play_game(&mut rng)
        })
        .collect::<Result<Vec<_>>>()?;
    let results = Results { games };
    info!("played {} games in parallel\n{}", results.len(), results.stats());
    Ok(results)
}

pub fn run(config: &SimConfig) -> Result<Results> {
    let seed = config.seed.unwrap_or_else(rand::random);
    debug!(
        "running {} games with seed {} (parallel: {})",
        config.games, seed, config.parallel
    );

    if config.parallel {
        play_n_games_par(config.games, seed)
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        play_n_games(&mut rng, config.games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_outcomes_differ() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let game = play_game(&mut rng).unwrap();
            assert_ne!(game.stay.outcome, game.switch.outcome);
            assert_eq!(game.stay.strategy, Strategy::Stay);
            assert_eq!(game.switch.strategy, Strategy::Switch);
            assert_ne!(game.opened, game.pick);
            assert_ne!(game.opened, game.prize);
        }
    }

    #[test]
    fn test_stay_wins_exactly_when_first_pick_hits() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..1_000 {
            let game = play_game(&mut rng).unwrap();
            let hit = game.pick == game.prize;
            assert_eq!(game.outcome(Strategy::Stay) == Outcome::Win, hit);
            assert_eq!(game.outcome(Strategy::Switch) == Outcome::Win, !hit);
        }
    }

    #[test]
    fn test_play_n_games_collects_all_trials() {
        let mut rng = StdRng::seed_from_u64(1);
        let results = play_n_games(&mut rng, 250).unwrap();
        assert_eq!(results.len(), 250);
        assert_eq!(results.trial_results().count(), 500);

        let stats = results.stats();
        assert_eq!(stats.trials(Strategy::Stay), 250);
        assert_eq!(stats.trials(Strategy::Switch), 250);
        assert_eq!(stats.stay_wins, stats.switch_losses);
        assert_eq!(stats.switch_wins, stats.stay_losses);
    }

    #[test]
    fn test_zero_games_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let results = play_n_games(&mut rng, 0).unwrap();
        assert!(results.is_empty());
        let stats = results.stats();
        assert_eq!(stats.win_rate(Strategy::Stay), 0.0);
        assert_eq!(stats.win_rate(Strategy::Switch), 0.0);
        assert!(play_n_games_par(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_switch_wins_two_thirds() {
        let mut rng = StdRng::seed_from_u64(2024);
        let stats = play_n_games(&mut rng, 10_000).unwrap().stats();
        let stay = stats.win_rate(Strategy::Stay);
        let switch = stats.win_rate(Strategy::Switch);
        assert!((stay - 1.0 / 3.0).abs() < 0.02, "stay win rate {}", stay);
        assert!((switch - 2.0 / 3.0).abs() < 0.02, "switch win rate {}", switch);
    }

    #[test]
    fn test_same_seed_same_results() {
        let a = play_n_games(&mut StdRng::seed_from_u64(99), 100).unwrap();
        let b = play_n_games(&mut StdRng::seed_from_u64(99), 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_games_iterator_is_finite() {
        let games = Games::new(StdRng::seed_from_u64(3), 5);
        assert_eq!(games.len(), 5);
        assert_eq!(games.count(), 5);
    }

    #[test]
    fn test_tally_matches_collected_stats() {
        let tallied = tally_n_games(&mut StdRng::seed_from_u64(8), 500).unwrap();
        let collected = play_n_games(&mut StdRng::seed_from_u64(8), 500)
            .unwrap()
            .stats();
        assert_eq!(tallied, collected);
    }

    #[test]
    fn test_parallel_is_deterministic_and_converges() {
        let a = play_n_games_par(10_000, 77).unwrap();
        let b = play_n_games_par(10_000, 77).unwrap();
        assert_eq!(a, b);

        let switch = a.stats().win_rate(Strategy::Switch);
        assert!((switch - 2.0 / 3.0).abs() < 0.02, "switch win rate {}", switch);
    }

    #[test]
    fn test_run_with_seed_is_reproducible() {
        let config = SimConfig {
            games: 200,
            seed: Some(5),
            parallel: false,
        };
        assert_eq!(run(&config).unwrap(), run(&config).unwrap());

        let parallel = SimConfig {
            parallel: true,
            ..config
        };
        assert_eq!(run(&parallel).unwrap().len(), 200);
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let results = play_n_games(&mut StdRng::seed_from_u64(4), 10).unwrap();
        results.save_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["games"].as_array().unwrap().len(), 10);
        assert_eq!(
            value["stats"]["stay_wins"].as_u64().unwrap()
                + value["stats"]["switch_wins"].as_u64().unwrap(),
            10
        );
        assert_eq!(value["games"][0]["stay"]["strategy"], "stay");
        assert!(value["games"][0]["pick"].as_u64().unwrap() <= 3);
    }
}
