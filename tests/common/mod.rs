#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeSet;
use trainer_core::{
    tier_for, Decision, Position, PositionImpact, PositionMetadata, RankedMove, Side,
};

/// Italian game after 2...Nc6, white to move.
pub const ITALIAN_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

/// Build a candidate whose tier agrees with its loss.
pub fn ranked(san: &str, uci: &str, score: i32, loss: u32) -> RankedMove {
    RankedMove {
        san: san.to_string(),
        uci: uci.to_string(),
        score,
        depth: 22,
        centipawn_loss: loss,
        tier: tier_for(loss),
        pv: vec![san.to_string()],
        tactics: BTreeSet::new(),
        impact: PositionImpact::default(),
    }
}

pub fn with_tactics(mut mv: RankedMove, tactics: &[&str]) -> RankedMove {
    mv.tactics = tactics.iter().map(|t| t.to_string()).collect();
    mv
}

pub fn position(id: i64, fullmove_number: u32, top_moves: Vec<RankedMove>, tags: &[&str]) -> Position {
    Position {
        id: Some(id),
        fen: ITALIAN_FEN.to_string(),
        turn: Side::White,
        fullmove_number,
        top_moves,
        classification: tags.iter().map(|t| t.to_string()).collect(),
        metadata: PositionMetadata::default(),
    }
}

/// Four candidates at losses 0, 5, 12 and 40.
pub fn italian() -> Position {
    position(
        1,
        3,
        vec![
            with_tactics(ranked("Bb5", "f1b5", 40, 0), &["pin"]),
            ranked("Bc4", "f1c4", 35, 5),
            ranked("d4", "d2d4", 28, 12),
            ranked("Nc3", "b1c3", 0, 40),
        ],
        &["open_game"],
    )
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

pub fn decision(chosen: &str, elapsed_secs: f64, decided_at: DateTime<Utc>) -> Decision {
    Decision {
        chosen_move: chosen.to_string(),
        elapsed_secs,
        decided_at,
    }
}
