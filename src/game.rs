use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Prize,
    NonPrize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Door {
    One,
    Two,
    Three,
}

impl Door {
    pub const ALL: [Door; 3] = [Door::One, Door::Two, Door::Three];

    /// 0-based index into an arrangement.
    pub fn index(self) -> usize {
        match self {
            Door::One => 0,
            Door::Two => 1,
            Door::Three => 2,
        }
    }

    /// 1-based door number as shown to the contestant.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The two doors that are not `self`, in ascending order.
    pub fn others(self) -> [Door; 2] {
        match self {
            Door::One => [Door::Two, Door::Three],
            Door::Two => [Door::One, Door::Three],
            Door::Three => [Door::One, Door::Two],
        }
    }
}

impl From<Door> for u8 {
    fn from(door: Door) -> u8 {
        door.number()
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Hidden contents of the three doors for one game. Always holds exactly one
/// prize, so every accessor is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrangement {
    prize: Door,
}

impl Arrangement {
    pub fn with_prize(prize: Door) -> Self {
        Arrangement { prize }
    }

    pub fn from_labels(labels: [Content; 3]) -> Result<Self> {
        let prizes: Vec<Door> = Door::ALL
            .into_iter()
            .filter(|d| labels[d.index()] == Content::Prize)
            .collect();

        match prizes.as_slice() {
            [prize] => Ok(Arrangement { prize: *prize }),
            _ => Err(SimError::InvalidArrangement {
                prizes: prizes.len(),
            }),
        }
    }

    pub fn prize(&self) -> Door {
        self.prize
    }

    pub fn content(&self, door: Door) -> Content {
        if door == self.prize {
            Content::Prize
        } else {
            Content::NonPrize
        }
    }

    pub fn labels(&self) -> [Content; 3] {
        Door::ALL.map(|d| self.content(d))
    }
}

/// Shuffles one prize and two non-prizes behind the three doors.
pub fn create_game(rng: &mut impl Rng) -> Arrangement {
    // Deal [Prize, NonPrize, NonPrize] onto the doors in shuffled order.
    let mut doors = Door::ALL;
    doors.shuffle(rng);
    Arrangement::with_prize(doors[0])
}

/// The contestant's first pick, uniform over the three doors.
pub fn select_door(rng: &mut impl Rng) -> Door {
    Door::ALL[rng.gen_range(0..Door::ALL.len())]
}
