//! Move scoring and insights engine.
//!
//! Scores a learner's move against pre-computed engine candidates
//! ([`evaluator::evaluate`]), aggregates scored outcomes into statistics
//! ([`insights::aggregate`]), and diffs candidate moves
//! ([`variation::compare`]). Every entry point is a pure, synchronous
//! function over borrowed input; no engine runs here and no storage is touched.

pub mod classification;
pub mod error;
pub mod evaluator;
pub mod insights;
pub mod position;
pub mod record;
pub mod variation;

pub use classification::{tier_for, GamePhase, Tier};
pub use error::{Result, TrainerError};
pub use evaluator::{evaluate, evaluate_batch, Decision, EvaluationOutcome, MoveResult, PlayedMove, ThresholdConfig};
pub use insights::{aggregate, breakdown, Dimension, InsightsFilter, InsightsReport};
pub use position::{Position, PositionImpact, PositionMetadata, PositionSummary, RankedMove, Side};
pub use record::{MoveRecord, PositionRecord};
pub use variation::{compare, compare_with_best, VariationDiff};
