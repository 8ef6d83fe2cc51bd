//! Position and ranked-move data model.
//!
//! Positions and their ranked moves are created once at import time and are
//! read-only afterwards. Construct them from ingestion records through
//! [`crate::record::PositionRecord`] so that every invariant below holds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classification::{GamePhase, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    pub fn name(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl From<shakmaty::Color> for Side {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Side::White,
            shakmaty::Color::Black => Side::Black,
        }
    }
}

/// Engine-estimated effect of a move on the position, one signed delta per aspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionImpact {
    pub material_change: f64,
    pub king_safety_impact: f64,
    pub center_control_change: f64,
    pub development_impact: f64,
}

/// One engine candidate for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMove {
    /// Algebraic notation, e.g. "Nf3"
    #[serde(rename = "move")]
    pub san: String,
    /// Coordinate notation, e.g. "g1f3"
    pub uci: String,
    /// Centipawns from the side to move's perspective
    pub score: i32,
    pub depth: u32,
    /// Loss relative to the best move; 0 for the best move
    pub centipawn_loss: u32,
    pub tier: Tier,
    #[serde(default)]
    pub pv: Vec<String>,
    #[serde(default)]
    pub tactics: BTreeSet<String>,
    #[serde(default)]
    pub impact: PositionImpact,
}

impl RankedMove {
    /// Exact match against either notation.
    pub fn matches(&self, notation: &str) -> bool {
        self.san == notation || self.uci == notation
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnStructure {
    pub white_isolated_pawns: u32,
    pub black_isolated_pawns: u32,
    pub white_doubled_pawns: u32,
    pub black_doubled_pawns: u32,
    pub white_pawn_islands: u32,
    pub black_pawn_islands: u32,
    pub white_passed_pawns: u32,
    pub black_passed_pawns: u32,
}

/// Number of central squares controlled by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterControl {
    pub white: i32,
    pub black: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KingShelter {
    pub defender_count: u32,
    pub pawn_shield: u32,
    pub open_files: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KingSafety {
    pub white: Option<KingShelter>,
    pub black: Option<KingShelter>,
}

impl KingSafety {
    pub fn for_side(&self, side: Side) -> Option<&KingShelter> {
        match side {
            Side::White => self.white.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }
}

/// Structural facts about a position, precomputed at import time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionMetadata {
    pub pawn_structure: Option<PawnStructure>,
    pub center_control: Option<CenterControl>,
    pub king_safety: Option<KingSafety>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Option<i64>,
    pub fen: String,
    pub turn: Side,
    pub fullmove_number: u32,
    /// Engine candidates in supplied order (not necessarily sorted)
    pub top_moves: Vec<RankedMove>,
    /// Structural/strategic labels, e.g. "open_file", "isolated_queen_pawn"
    pub classification: BTreeSet<String>,
    #[serde(default)]
    pub metadata: PositionMetadata,
}

impl Position {
    /// Candidates ordered best first: descending score, ties kept in supplied order.
    pub fn ranked_moves(&self) -> Vec<&RankedMove> {
        let mut moves: Vec<&RankedMove> = self.top_moves.iter().collect();
        moves.sort_by(|a, b| b.score.cmp(&a.score));
        moves
    }

    pub fn best_move(&self) -> Option<&RankedMove> {
        self.ranked_moves().into_iter().next()
    }

    /// 1-based rank and move for the first candidate matching `notation`.
    pub fn find_ranked(&self, notation: &str) -> Option<(u32, &RankedMove)> {
        self.ranked_moves()
            .into_iter()
            .enumerate()
            .find(|(_, m)| m.matches(notation))
            .map(|(i, m)| (i as u32 + 1, m))
    }

    pub fn phase(&self) -> GamePhase {
        GamePhase::for_move_number(self.fullmove_number)
    }

    pub fn summary(&self) -> PositionSummary {
        PositionSummary {
            id: self.id,
            fen: self.fen.clone(),
            turn: self.turn,
            fullmove_number: self.fullmove_number,
            classification: self.classification.clone(),
            metadata: self.metadata,
        }
    }
}

/// The parts of a position an outcome keeps for later aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub id: Option<i64>,
    pub fen: String,
    pub turn: Side,
    pub fullmove_number: u32,
    pub classification: BTreeSet<String>,
    #[serde(default)]
    pub metadata: PositionMetadata,
}

impl PositionSummary {
    pub fn phase(&self) -> GamePhase {
        GamePhase::for_move_number(self.fullmove_number)
    }
}
