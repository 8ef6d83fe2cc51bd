//! Ingestion records: the loosely-typed shape positions arrive in, and the
//! strict validation that turns them into [`Position`]s.
//!
//! Required numeric fields are `Option` here so a missing value is reported
//! by name instead of surfacing as a generic decode error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;

use crate::classification::{tier_for, Tier};
use crate::error::{Result, TrainerError};
use crate::position::{
    CenterControl, KingSafety, PawnStructure, Position, PositionImpact, PositionMetadata,
    RankedMove, Side,
};

/// Principal variation as stored: either "e4 e5 Nf3" or ["e4", "e5", "Nf3"].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PvField {
    Line(String),
    Moves(Vec<String>),
}

impl PvField {
    fn into_moves(self) -> Vec<String> {
        match self {
            PvField::Line(line) => line.split_whitespace().map(String::from).collect(),
            PvField::Moves(moves) => moves,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "move")]
    pub san: Option<String>,
    pub uci: Option<String>,
    pub score: Option<i64>,
    pub depth: Option<i64>,
    pub centipawn_loss: Option<i64>,
    pub classification: Option<String>,
    pub pv: Option<PvField>,
    #[serde(default)]
    pub tactics: Vec<String>,
    #[serde(default)]
    pub position_impact: Option<PositionImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: Option<i64>,
    pub fen: Option<String>,
    pub turn: Option<String>,
    pub fullmove_number: Option<i64>,
    #[serde(default)]
    pub top_moves: Vec<MoveRecord>,
    #[serde(default)]
    pub position_classification: Vec<String>,
    pub pawn_structure: Option<PawnStructure>,
    pub center_control: Option<CenterControl>,
    pub king_safety: Option<KingSafety>,
}

fn invalid(msg: String) -> TrainerError {
    TrainerError::Validation(msg)
}

fn required<T>(value: Option<T>, field: &str, ctx: &str) -> Result<T> {
    value.ok_or_else(|| invalid(format!("{ctx}: missing required field '{field}'")))
}

fn non_blank(value: Option<String>, field: &str, ctx: &str) -> Result<String> {
    let value = required(value, field, ctx)?;
    if value.trim().is_empty() {
        return Err(invalid(format!("{ctx}: field '{field}' is blank")));
    }
    Ok(value)
}

fn to_u32(value: i64, field: &str, ctx: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| invalid(format!("{ctx}: field '{field}' out of range: {value}")))
}

fn parse_side(turn: &str) -> Result<Side> {
    match turn.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(Side::White),
        "black" | "b" => Ok(Side::Black),
        other => Err(invalid(format!("unknown side to move '{other}'"))),
    }
}

impl MoveRecord {
    fn validate(self, index: usize) -> Result<RankedMove> {
        let ctx = format!("top_moves[{index}]");
        let san = non_blank(self.san, "move", &ctx)?;
        let uci = non_blank(self.uci, "uci", &ctx)?;

        let score = required(self.score, "score", &ctx)?;
        let score = i32::try_from(score)
            .map_err(|_| invalid(format!("{ctx}: field 'score' out of range: {score}")))?;
        let depth = to_u32(required(self.depth, "depth", &ctx)?, "depth", &ctx)?;
        let centipawn_loss = to_u32(
            required(self.centipawn_loss, "centipawn_loss", &ctx)?,
            "centipawn_loss",
            &ctx,
        )?;

        let classification = required(self.classification, "classification", &ctx)?;
        let tier: Tier = classification
            .parse()
            .map_err(|e: TrainerError| invalid(format!("{ctx}: {e}")))?;
        let expected = tier_for(centipawn_loss);
        if tier != expected {
            return Err(invalid(format!(
                "{ctx}: classification '{tier}' disagrees with centipawn loss {centipawn_loss} ({expected})"
            )));
        }

        Ok(RankedMove {
            san,
            uci,
            score,
            depth,
            centipawn_loss,
            tier,
            pv: self.pv.map(PvField::into_moves).unwrap_or_default(),
            tactics: self.tactics.into_iter().collect(),
            impact: self.position_impact.unwrap_or_default(),
        })
    }
}

impl TryFrom<PositionRecord> for Position {
    type Error = TrainerError;

    fn try_from(record: PositionRecord) -> Result<Self> {
        let ctx = match record.id {
            Some(id) => format!("position {id}"),
            None => "position".to_string(),
        };

        let fen = non_blank(record.fen, "fen", &ctx)?;
        let turn = parse_side(&non_blank(record.turn, "turn", &ctx)?)?;
        let fullmove_number = to_u32(
            required(record.fullmove_number, "fullmove_number", &ctx)?,
            "fullmove_number",
            &ctx,
        )?;
        if fullmove_number == 0 {
            return Err(invalid(format!("{ctx}: fullmove_number must be at least 1")));
        }

        // Syntax only; legality is not our concern.
        let parsed: Fen = fen
            .parse()
            .map_err(|e| invalid(format!("{ctx}: invalid FEN '{fen}': {e}")))?;
        let fen_turn = Side::from(parsed.into_setup().turn);
        if fen_turn != turn {
            return Err(invalid(format!(
                "{ctx}: turn '{}' disagrees with FEN side to move '{}'",
                turn.name(),
                fen_turn.name()
            )));
        }

        let top_moves = record
            .top_moves
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.validate(i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Position {
            id: record.id,
            fen,
            turn,
            fullmove_number,
            top_moves,
            classification: record.position_classification.into_iter().collect::<BTreeSet<_>>(),
            metadata: PositionMetadata {
                pawn_structure: record.pawn_structure,
                center_control: record.center_control,
                king_safety: record.king_safety,
            },
        })
    }
}

impl Position {
    /// Decode and validate a single JSON position record.
    pub fn from_json(json: &str) -> Result<Position> {
        let record: PositionRecord = serde_json::from_str(json)?;
        Position::try_from(record)
    }
}
