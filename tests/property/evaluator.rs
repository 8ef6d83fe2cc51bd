#[path = "../common/mod.rs"]
mod common;

use common::{at, decision, position, ranked, with_tactics};
use proptest::prelude::*;
use trainer_core::{compare, evaluate, MoveResult, PositionImpact, RankedMove, ThresholdConfig};

fn candidates() -> impl Strategy<Value = Vec<RankedMove>> {
    prop::collection::vec((-500i32..500, 0u32..300), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (score, loss))| ranked(&format!("m{i}"), &format!("u{i}"), score, loss))
            .collect()
    })
}

const TACTICS: [&str; 5] = ["fork", "pin", "skewer", "discovered_attack", "hanging_piece"];

fn impact() -> impl Strategy<Value = PositionImpact> {
    (-5.0f64..5.0, -5.0f64..5.0, -5.0f64..5.0, -5.0f64..5.0).prop_map(|(m, k, c, d)| PositionImpact {
        material_change: m,
        king_safety_impact: k,
        center_control_change: c,
        development_impact: d,
    })
}

fn rich_move() -> impl Strategy<Value = RankedMove> {
    (
        -500i32..500,
        0u32..300,
        prop::sample::subsequence(TACTICS.to_vec(), 0..=TACTICS.len()),
        prop::collection::vec(prop::sample::select(vec!["e4", "e5", "Nf3", "Nc6"]), 0..5),
        impact(),
    )
        .prop_map(|(score, loss, tactics, pv, impact)| {
            let mut mv = with_tactics(ranked("m", "u", score, loss), &tactics);
            mv.pv = pv.into_iter().map(String::from).collect();
            mv.impact = impact;
            mv
        })
}

proptest! {
    #[test]
    fn best_move_always_passes(
        moves in candidates(),
        top_n in 1u32..10,
        threshold in 0u32..200,
    ) {
        let pos = position(1, 20, moves, &[]);
        let best = pos.best_move().unwrap().san.clone();
        let thresholds = ThresholdConfig::new(top_n, threshold).unwrap();
        let outcome = evaluate(&pos, &decision(&best, 5.0, at(1, 9)), thresholds).unwrap();
        prop_assert_eq!(outcome.rank(), Some(1));
        prop_assert_eq!(outcome.result, MoveResult::Pass);
    }

    #[test]
    fn evaluation_is_deterministic(
        moves in candidates(),
        pick in 0usize..8,
        secs in 0.0f64..120.0,
    ) {
        let pos = position(1, 20, moves, &[]);
        let chosen = format!("m{}", pick);
        let d = decision(&chosen, secs, at(3, 12));
        let first = evaluate(&pos, &d, ThresholdConfig::default()).unwrap();
        let second = evaluate(&pos, &d, ThresholdConfig::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pass_implies_rank_and_loss_within_thresholds(
        moves in candidates(),
        pick in 0usize..8,
        top_n in 1u32..6,
        threshold in 0u32..100,
    ) {
        let pos = position(1, 20, moves, &[]);
        let thresholds = ThresholdConfig::new(top_n, threshold).unwrap();
        let chosen = format!("m{}", pick);
        let outcome = evaluate(&pos, &decision(&chosen, 1.0, at(1, 9)), thresholds).unwrap();
        if outcome.result == MoveResult::Pass {
            let rank = outcome.rank().unwrap();
            prop_assert!(rank == 1 || (rank <= top_n && outcome.centipawn_loss.unwrap() <= threshold));
        }
    }

    #[test]
    fn compare_is_antisymmetric(a in rich_move(), b in rich_move()) {
        let ab = compare(&a, &b);
        let ba = compare(&b, &a);
        prop_assert_eq!(ab.score_delta, -ba.score_delta);
        prop_assert_eq!(ab.centipawn_loss_delta, -ba.centipawn_loss_delta);
        prop_assert_eq!(&ab.tactics_added, &ba.tactics_removed);
        prop_assert_eq!(&ab.tactics_removed, &ba.tactics_added);
        prop_assert_eq!(ab.impact.material_change, -ba.impact.material_change);
        prop_assert_eq!(ab.impact.king_safety_impact, -ba.impact.king_safety_impact);
        prop_assert_eq!(ab.impact.center_control_change, -ba.impact.center_control_change);
        prop_assert_eq!(ab.impact.development_impact, -ba.impact.development_impact);
        prop_assert_eq!(ab.shared_pv_plies, ba.shared_pv_plies);
    }
}
