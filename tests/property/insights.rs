#[path = "../common/mod.rs"]
mod common;

use common::{at, decision, italian};
use proptest::prelude::*;
use trainer_core::{aggregate, evaluate, EvaluationOutcome, InsightsFilter, MoveResult, ThresholdConfig};

const MOVES: [&str; 6] = ["Bb5", "Bc4", "d4", "Nc3", "h4", "a3"];

fn outcomes() -> impl Strategy<Value = Vec<EvaluationOutcome>> {
    prop::collection::vec((0usize..MOVES.len(), 0.0f64..100.0, 1u32..28), 0..30).prop_map(|specs| {
        let pos = italian();
        specs
            .into_iter()
            .map(|(m, secs, day)| {
                evaluate(&pos, &decision(MOVES[m], secs, at(day, 12)), ThresholdConfig::default())
                    .unwrap()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn filtering_never_increases_totals(history in outcomes(), min in 1u32..10, day in 1u32..28) {
        let all = aggregate(&history, &InsightsFilter::default());
        let filters = [
            InsightsFilter::default().with_result(MoveResult::Pass),
            InsightsFilter::default().with_move_numbers(Some(min), None),
            InsightsFilter::default().with_dates(Some(at(day, 0).date_naive()), None),
        ];
        for f in &filters {
            let narrowed = aggregate(&history, f);
            prop_assert!(narrowed.summary.total <= all.summary.total);
            prop_assert!(narrowed.summary.passed <= all.summary.passed);
        }
    }

    #[test]
    fn counts_are_consistent(history in outcomes()) {
        let report = aggregate(&history, &InsightsFilter::default());
        prop_assert_eq!(report.summary.total as usize, history.len());
        let bucketed: u32 = report.time.buckets.iter().map(|b| b.total).sum();
        prop_assert_eq!(bucketed, report.summary.total);
        let by_day: u32 = report.calendar.iter().map(|d| d.total).sum();
        prop_assert_eq!(by_day, report.summary.total);
        prop_assert!((0.0..=1.0).contains(&report.summary.pass_rate));
    }

    #[test]
    fn aggregation_is_deterministic(history in outcomes()) {
        let filter = InsightsFilter::default();
        prop_assert_eq!(aggregate(&history, &filter), aggregate(&history, &filter));
    }
}
