use rand::Rng;
use serde::Serialize;

use crate::error::{Result, SimError};
use crate::game::{Arrangement, Content, Door};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Stay,
    Switch,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Stay, Strategy::Switch];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Stay => "stay",
            Strategy::Switch => "switch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
}

/// One strategy's result within one played game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialResult {
    pub strategy: Strategy,
    pub outcome: Outcome,
}

/// Host opens a non-prize door other than the contestant's pick.
///
/// When the pick holds the prize both other doors qualify and the host picks
/// one uniformly. Otherwise exactly one door qualifies and no randomness is
/// consumed.
pub fn open_goat_door(arrangement: &Arrangement, pick: Door, rng: &mut impl Rng) -> Door {
    let [a, b] = pick.others();
    match arrangement.content(pick) {
        Content::Prize => {
            if rng.gen_bool(0.5) {
                a
            } else {
                b
            }
        }
        Content::NonPrize => {
            if a == arrangement.prize() {
                b
            } else {
                a
            }
        }
    }
}

/// Final door after the contestant applies `strategy`.
pub fn change_door(strategy: Strategy, opened: Door, pick: Door) -> Result<Door> {
    if opened == pick {
        return Err(SimError::RevealedPick { door: pick });
    }
    match strategy {
        Strategy::Stay => Ok(pick),
        Strategy::Switch => {
            let [a, b] = pick.others();
            Ok(if opened == a { b } else { a })
        }
    }
}

pub fn determine_winner(final_pick: Door, arrangement: &Arrangement) -> Outcome {
    match arrangement.content(final_pick) {
        Content::Prize => Outcome::Win,
        Content::NonPrize => Outcome::Lose,
    }
}
