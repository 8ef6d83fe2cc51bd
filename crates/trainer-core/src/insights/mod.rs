//! Insights aggregation over a snapshot of evaluation outcomes.
//!
//! Everything here is a pure function of `(outcomes, filter)`: the same input
//! always yields the same report, and aggregating nothing is not an error.
//! The caller owns the outcome history; we only read the slice we are given.

pub mod filter;
pub mod structure;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::{GamePhase, Tier};
use crate::evaluator::{EvaluationOutcome, MoveResult};
use crate::position::Side;

pub use filter::InsightsFilter;
pub use structure::{FeatureStat, StructuralInsights};

/// Decision-time bucket bounds in seconds: lower inclusive, upper exclusive
const TIME_BUCKETS: [(f64, f64, &str); 5] = [
    (0.0, 5.0, "<5s"),
    (5.0, 15.0, "5-15s"),
    (15.0, 30.0, "15-30s"),
    (30.0, 60.0, "30-60s"),
    (60.0, f64::INFINITY, ">60s"),
];

pub(crate) fn pass_rate(passed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64
    }
}

fn mean(sum: f64, count: u32) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

/// Running counters for one group of outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Tally {
    pub(crate) total: u32,
    pub(crate) passed: u32,
    loss_sum: u64,
    loss_count: u32,
    time_sum: f64,
    pass_time_sum: f64,
    min_time: Option<f64>,
    max_time: Option<f64>,
}

impl Tally {
    pub(crate) fn add(&mut self, outcome: &EvaluationOutcome) {
        let t = outcome.elapsed_secs;
        self.total += 1;
        self.time_sum += t;
        if outcome.is_pass() {
            self.passed += 1;
            self.pass_time_sum += t;
        }
        if let Some(loss) = outcome.centipawn_loss {
            self.loss_sum += u64::from(loss);
            self.loss_count += 1;
        }
        self.min_time = Some(self.min_time.map_or(t, |m| m.min(t)));
        self.max_time = Some(self.max_time.map_or(t, |m| m.max(t)));
    }

    fn summary(&self) -> Summary {
        Summary {
            total: self.total,
            passed: self.passed,
            pass_rate: pass_rate(self.passed, self.total),
            avg_centipawn_loss: mean(self.loss_sum as f64, self.loss_count),
            avg_elapsed_secs: mean(self.time_sum, self.total),
            min_elapsed_secs: self.min_time,
            max_elapsed_secs: self.max_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    pub passed: u32,
    /// passed / total, 0 when there are no outcomes
    pub pass_rate: f64,
    /// Over outcomes with a known loss only
    pub avg_centipawn_loss: Option<f64>,
    pub avg_elapsed_secs: Option<f64>,
    pub min_elapsed_secs: Option<f64>,
    pub max_elapsed_secs: Option<f64>,
}

pub fn summarize(outcomes: &[&EvaluationOutcome]) -> Summary {
    let mut tally = Tally::default();
    for o in outcomes {
        tally.add(o);
    }
    tally.summary()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Game phase derived from the full move number
    MoveNumberBucket,
    Side,
    Tier,
    PositionTag,
    Result,
    RankGroup,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::MoveNumberBucket,
        Dimension::Side,
        Dimension::Tier,
        Dimension::PositionTag,
        Dimension::Result,
        Dimension::RankGroup,
    ];
}

fn rank_group(rank: Option<u32>) -> (u8, &'static str) {
    match rank {
        Some(1) => (0, "top 1"),
        Some(2..=3) => (1, "top 2-3"),
        Some(4..=5) => (2, "top 4-5"),
        Some(_) => (3, "beyond top 5"),
        None => (4, "unranked"),
    }
}

fn index_of<T: PartialEq>(all: &[T], value: &T) -> u8 {
    all.iter().position(|v| v == value).unwrap_or(0) as u8
}

/// Group keys for one outcome, with a sort index so groups come out in a
/// stable order. Position tags may yield several keys (or none).
fn group_keys(outcome: &EvaluationOutcome, dimension: Dimension) -> Vec<(u8, String)> {
    let pos = &outcome.position;
    match dimension {
        Dimension::MoveNumberBucket => {
            let phase = pos.phase();
            vec![(index_of(&GamePhase::ALL, &phase), phase.name().to_string())]
        }
        Dimension::Side => vec![(index_of(&Side::ALL, &pos.turn), pos.turn.name().to_string())],
        Dimension::Tier => {
            let idx = outcome
                .tier
                .map_or(Tier::ALL.len() as u8, |t| index_of(&Tier::ALL, &t));
            vec![(idx, Tier::label(outcome.tier).to_string())]
        }
        Dimension::PositionTag => pos.classification.iter().map(|t| (0, t.clone())).collect(),
        Dimension::Result => vec![(
            index_of(&MoveResult::ALL, &outcome.result),
            outcome.result.name().to_string(),
        )],
        Dimension::RankGroup => {
            let (idx, label) = rank_group(outcome.rank());
            vec![(idx, label.to_string())]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub groups: Vec<GroupSummary>,
}

fn breakdown_of(outcomes: &[&EvaluationOutcome], dimension: Dimension) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<(u8, String), Tally> = BTreeMap::new();
    for o in outcomes {
        for key in group_keys(o, dimension) {
            groups.entry(key).or_default().add(o);
        }
    }
    groups
        .into_iter()
        .map(|((_, key), tally)| GroupSummary {
            key,
            summary: tally.summary(),
        })
        .collect()
}

/// Summary metrics per group along one dimension, over the filtered outcomes.
pub fn breakdown(
    outcomes: &[EvaluationOutcome],
    filter: &InsightsFilter,
    dimension: Dimension,
) -> Vec<GroupSummary> {
    breakdown_of(&filter.apply(outcomes), dimension)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFrequency {
    pub tag: String,
    pub count: u32,
    pub passed: u32,
    pub pass_rate: f64,
}

/// Count tags across outcomes; most frequent first, ties alphabetical.
fn pattern_frequency<'a, F, I>(outcomes: &[&'a EvaluationOutcome], tags_of: F) -> Vec<PatternFrequency>
where
    F: Fn(&'a EvaluationOutcome) -> I,
    I: Iterator<Item = &'a String>,
{
    let mut counts: BTreeMap<&String, (u32, u32)> = BTreeMap::new();
    for &o in outcomes {
        for tag in tags_of(o) {
            let entry = counts.entry(tag).or_insert((0, 0));
            entry.0 += 1;
            if o.is_pass() {
                entry.1 += 1;
            }
        }
    }

    let mut patterns: Vec<PatternFrequency> = counts
        .into_iter()
        .map(|(tag, (count, passed))| PatternFrequency {
            tag: tag.clone(),
            count,
            passed,
            pass_rate: pass_rate(passed, count),
        })
        .collect();
    // counts is already alphabetical; the stable sort keeps that for ties
    patterns.sort_by(|a, b| b.count.cmp(&a.count));
    patterns
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub label: String,
    pub lower_secs: f64,
    /// `None` for the open-ended last bucket
    pub upper_secs: Option<f64>,
    pub total: u32,
    pub passed: u32,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAnalysis {
    /// Always one entry per fixed bucket, including empty ones
    pub buckets: Vec<TimeBucket>,
    pub avg_pass_secs: Option<f64>,
    pub avg_fail_secs: Option<f64>,
}

fn time_analysis(outcomes: &[&EvaluationOutcome]) -> TimeAnalysis {
    let mut tallies = [Tally::default(); TIME_BUCKETS.len()];
    let mut all = Tally::default();

    for o in outcomes {
        let t = o.elapsed_secs;
        if let Some(i) = TIME_BUCKETS.iter().position(|(lo, hi, _)| t >= *lo && t < *hi) {
            tallies[i].add(o);
        }
        all.add(o);
    }

    let buckets = TIME_BUCKETS
        .iter()
        .zip(tallies.iter())
        .map(|((lo, hi, label), t)| TimeBucket {
            label: label.to_string(),
            lower_secs: *lo,
            upper_secs: hi.is_finite().then_some(*hi),
            total: t.total,
            passed: t.passed,
            pass_rate: pass_rate(t.passed, t.total),
        })
        .collect();

    TimeAnalysis {
        buckets,
        avg_pass_secs: mean(all.pass_time_sum, all.passed),
        avg_fail_secs: mean(all.time_sum - all.pass_time_sum, all.total - all.passed),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub total: u32,
    pub passed: u32,
    pub pass_rate: f64,
    pub avg_elapsed_secs: f64,
}

/// One entry per UTC day that has outcomes, oldest first. Empty days are
/// left for the presentation layer to fill.
fn calendar(outcomes: &[&EvaluationOutcome]) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    for o in outcomes {
        days.entry(o.decided_at.date_naive()).or_default().add(o);
    }
    days.into_iter()
        .map(|(date, t)| CalendarDay {
            date,
            total: t.total,
            passed: t.passed,
            pass_rate: pass_rate(t.passed, t.total),
            avg_elapsed_secs: t.time_sum / t.total as f64,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub summary: Summary,
    pub breakdowns: Vec<DimensionBreakdown>,
    pub tactical_patterns: Vec<PatternFrequency>,
    pub structural_patterns: Vec<PatternFrequency>,
    pub time: TimeAnalysis,
    pub calendar: Vec<CalendarDay>,
    pub structure: StructuralInsights,
}

/// Build the full report for the outcomes matching `filter`.
pub fn aggregate(outcomes: &[EvaluationOutcome], filter: &InsightsFilter) -> InsightsReport {
    let included = filter.apply(outcomes);

    debug!(
        supplied = outcomes.len(),
        included = included.len(),
        "Aggregating insights"
    );

    let breakdowns = Dimension::ALL
        .iter()
        .map(|&dimension| DimensionBreakdown {
            dimension,
            groups: breakdown_of(&included, dimension),
        })
        .collect();

    InsightsReport {
        summary: summarize(&included),
        breakdowns,
        tactical_patterns: pattern_frequency(&included, |o| o.tactics().into_iter().flatten()),
        structural_patterns: pattern_frequency(&included, |o| o.position.classification.iter()),
        time: time_analysis(&included),
        calendar: calendar(&included),
        structure: structure::structural_insights(&included),
    }
}
