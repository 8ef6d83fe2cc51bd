/// Move quality tiers and game phases: pure functions only
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;

/// Tier upper bounds (centipawn loss, inclusive)
const THRESHOLD_GREAT: u32 = 0;
const THRESHOLD_GOOD: u32 = 10;
const THRESHOLD_INACCURACY: u32 = 50;
const THRESHOLD_MISTAKE: u32 = 100;

/// Last full move number counted as opening / middlegame
const OPENING_LAST_MOVE: u32 = 15;
const MIDDLEGAME_LAST_MOVE: u32 = 32;

/// Label used when a move has no known centipawn loss
pub const UNCLASSIFIED: &str = "unclassified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Great,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Great,
        Tier::Good,
        Tier::Inaccuracy,
        Tier::Mistake,
        Tier::Blunder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Great => "great",
            Tier::Good => "good",
            Tier::Inaccuracy => "inaccuracy",
            Tier::Mistake => "mistake",
            Tier::Blunder => "blunder",
        }
    }

    /// Label for an optional tier; `None` reads as "unclassified".
    pub fn label(tier: Option<Tier>) -> &'static str {
        tier.map_or(UNCLASSIFIED, |t| t.name())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "great" => Ok(Tier::Great),
            "good" => Ok(Tier::Good),
            "inaccuracy" => Ok(Tier::Inaccuracy),
            "mistake" => Ok(Tier::Mistake),
            "blunder" => Ok(Tier::Blunder),
            other => Err(TrainerError::Validation(format!(
                "unknown move classification '{other}'"
            ))),
        }
    }
}

/// Map a centipawn loss to its quality tier.
pub fn tier_for(centipawn_loss: u32) -> Tier {
    if centipawn_loss <= THRESHOLD_GREAT {
        Tier::Great
    } else if centipawn_loss <= THRESHOLD_GOOD {
        Tier::Good
    } else if centipawn_loss <= THRESHOLD_INACCURACY {
        Tier::Inaccuracy
    } else if centipawn_loss <= THRESHOLD_MISTAKE {
        Tier::Mistake
    } else {
        Tier::Blunder
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub const ALL: [GamePhase; 3] = [GamePhase::Opening, GamePhase::Middlegame, GamePhase::Endgame];

    pub fn for_move_number(fullmove_number: u32) -> GamePhase {
        if fullmove_number <= OPENING_LAST_MOVE {
            GamePhase::Opening
        } else if fullmove_number <= MIDDLEGAME_LAST_MOVE {
            GamePhase::Middlegame
        } else {
            GamePhase::Endgame
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        }
    }
}
