/// Pass statistics over structural position features: pawn structure,
/// center control, and king safety of the side to move.
///
/// Outcomes whose position lacks the relevant metadata are skipped for that
/// feature group only.
use serde::{Deserialize, Serialize};

use crate::evaluator::EvaluationOutcome;

use super::{pass_rate, Tally};

/// Center control lead needed to call one side dominant
const CENTER_MARGIN: i32 = 2;

/// King is exposed with fewer defenders than this
const MIN_KING_DEFENDERS: u32 = 2;

const PAWN_FEATURES: [&str; 4] = ["isolated_pawns", "doubled_pawns", "pawn_islands", "passed_pawns"];
const CENTER_FEATURES: [&str; 3] = ["white_strong", "black_strong", "equal"];
const KING_FEATURES: [&str; 2] = ["exposed", "sheltered"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStat {
    pub feature: String,
    pub total: u32,
    pub passed: u32,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralInsights {
    pub pawn_structure: Vec<FeatureStat>,
    pub center_control: Vec<FeatureStat>,
    pub king_safety: Vec<FeatureStat>,
}

fn stats(features: &[&str], tallies: &[Tally]) -> Vec<FeatureStat> {
    features
        .iter()
        .zip(tallies)
        .map(|(feature, t)| FeatureStat {
            feature: feature.to_string(),
            total: t.total,
            passed: t.passed,
            pass_rate: pass_rate(t.passed, t.total),
        })
        .collect()
}

pub fn structural_insights(outcomes: &[&EvaluationOutcome]) -> StructuralInsights {
    let mut pawns = [Tally::default(); 4];
    let mut center = [Tally::default(); 3];
    let mut king = [Tally::default(); 2];

    for outcome in outcomes {
        let pos = &outcome.position;
        let meta = &pos.metadata;

        if let Some(ps) = &meta.pawn_structure {
            let present = [
                ps.white_isolated_pawns > 0 || ps.black_isolated_pawns > 0,
                ps.white_doubled_pawns > 0 || ps.black_doubled_pawns > 0,
                ps.white_pawn_islands > 1 || ps.black_pawn_islands > 1,
                ps.white_passed_pawns > 0 || ps.black_passed_pawns > 0,
            ];
            for (tally, _) in pawns.iter_mut().zip(present).filter(|(_, p)| *p) {
                tally.add(outcome);
            }
        }

        if let Some(cc) = &meta.center_control {
            let idx = if cc.white > cc.black + CENTER_MARGIN {
                0
            } else if cc.black > cc.white + CENTER_MARGIN {
                1
            } else {
                2
            };
            center[idx].add(outcome);
        }

        if let Some(shelter) = meta.king_safety.as_ref().and_then(|ks| ks.for_side(pos.turn)) {
            let exposed = shelter.defender_count < MIN_KING_DEFENDERS
                || shelter.pawn_shield < 1
                || shelter.open_files > 0;
            king[if exposed { 0 } else { 1 }].add(outcome);
        }
    }

    StructuralInsights {
        pawn_structure: stats(&PAWN_FEATURES, &pawns),
        center_control: stats(&CENTER_FEATURES, &center),
        king_safety: stats(&KING_FEATURES, &king),
    }
}
