//! Turning raw position records into validated positions, then scoring them.

use chrono::{TimeZone, Utc};
use serde_json::json;
use trainer_core::{evaluate, Decision, MoveResult, Position, Side, ThresholdConfig, TrainerError};

fn record() -> serde_json::Value {
    json!({
        "id": 314,
        "fen": "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R w KQkq - 1 5",
        "turn": "w",
        "fullmove_number": 5,
        "position_classification": ["italian", "closed_center"],
        "pawn_structure": {"white_pawn_islands": 1, "black_pawn_islands": 1},
        "top_moves": [
            {"move": "O-O", "uci": "e1g1", "score": 30, "depth": 24, "centipawn_loss": 0,
             "classification": "great", "pv": "O-O d6 c3", "tactics": []},
            {"move": "c3", "uci": "c2c3", "score": 22, "depth": 24, "centipawn_loss": 8,
             "classification": "good", "pv": ["c3", "d6"],
             "position_impact": {"center_control_change": 1.0}}
        ]
    })
}

#[test]
fn test_record_to_outcome() {
    let position = Position::from_json(&record().to_string()).unwrap();
    assert_eq!(position.turn, Side::White);
    assert_eq!(position.top_moves[0].pv, ["O-O", "d6", "c3"]);
    assert!(position.classification.contains("closed_center"));
    assert!(position.metadata.pawn_structure.is_some());

    let decision = Decision {
        chosen_move: "c2c3".to_string(),
        elapsed_secs: 11.0,
        decided_at: Utc.with_ymd_and_hms(2026, 2, 14, 18, 30, 0).unwrap(),
    };
    let outcome = evaluate(&position, &decision, ThresholdConfig::default()).unwrap();
    assert_eq!(outcome.result, MoveResult::Pass);
    assert_eq!(outcome.position.id, Some(314));
}

#[test]
fn test_rejects_bad_records() {
    let cases = [
        ("fen", json!("rnbqkbnr/ppppzppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")),
        ("turn", json!("b")),
        ("turn", json!("purple")),
        ("fullmove_number", json!(0)),
        ("fullmove_number", json!(-3)),
    ];
    for (field, value) in cases {
        let mut rec = record();
        rec[field] = value.clone();
        let err = Position::from_json(&rec.to_string()).unwrap_err();
        assert!(matches!(err, TrainerError::Validation(_)), "{field} = {value}");
    }
}

#[test]
fn test_rejects_inconsistent_move_classification() {
    let mut rec = record();
    rec["top_moves"][1]["classification"] = json!("blunder");
    assert!(Position::from_json(&rec.to_string()).is_err());

    let mut rec = record();
    rec["top_moves"][0]["centipawn_loss"] = json!(-1);
    assert!(Position::from_json(&rec.to_string()).is_err());

    let mut rec = record();
    rec["top_moves"][0].as_object_mut().unwrap().remove("score");
    let err = Position::from_json(&rec.to_string()).unwrap_err();
    assert!(err.to_string().contains("score"));
}
