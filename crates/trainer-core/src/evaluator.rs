/// Move evaluation: score one user decision against a position's ranked
/// engine candidates. Pure computation, no I/O.
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::{tier_for, Tier};
use crate::error::{Result, TrainerError};
use crate::position::{Position, PositionSummary, RankedMove};

const DEFAULT_TOP_N: u32 = 3;
const DEFAULT_SCORE_DIFFERENCE_THRESHOLD: u32 = 10;

/// Per-user pass/fail thresholds. Copied into every outcome at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Moves ranked within the top N may pass
    pub top_n: u32,
    /// Maximum centipawn loss for a non-best move to pass
    pub score_difference_threshold: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            score_difference_threshold: DEFAULT_SCORE_DIFFERENCE_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    pub fn new(top_n: u32, score_difference_threshold: u32) -> Result<Self> {
        let config = Self {
            top_n,
            score_difference_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(TrainerError::Validation("top_n must be at least 1".into()));
        }
        Ok(())
    }

    /// Rank gates before the loss threshold: a move outside the top N fails
    /// no matter how small its loss.
    pub fn passes(&self, rank: u32, centipawn_loss: u32) -> bool {
        rank == 1 || (rank <= self.top_n && centipawn_loss <= self.score_difference_threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveResult {
    Pass,
    Fail,
}

impl MoveResult {
    pub const ALL: [MoveResult; 2] = [MoveResult::Pass, MoveResult::Fail];

    pub fn name(&self) -> &'static str {
        match self {
            MoveResult::Pass => "pass",
            MoveResult::Fail => "fail",
        }
    }
}

/// What the user did at the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// SAN or UCI notation of the move played
    pub chosen_move: String,
    pub elapsed_secs: f64,
    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayedMove {
    Ranked {
        rank: u32,
        #[serde(rename = "move")]
        ranked: RankedMove,
    },
    /// Played a move outside the supplied candidate list
    Unranked { notation: String },
}

/// The immutable record of one scored decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub position: PositionSummary,
    pub played: PlayedMove,
    pub elapsed_secs: f64,
    pub decided_at: DateTime<Utc>,
    pub result: MoveResult,
    pub centipawn_loss: Option<u32>,
    pub tier: Option<Tier>,
    pub thresholds: ThresholdConfig,
}

impl EvaluationOutcome {
    pub fn rank(&self) -> Option<u32> {
        match &self.played {
            PlayedMove::Ranked { rank, .. } => Some(*rank),
            PlayedMove::Unranked { .. } => None,
        }
    }

    pub fn notation(&self) -> &str {
        match &self.played {
            PlayedMove::Ranked { ranked, .. } => &ranked.san,
            PlayedMove::Unranked { notation } => notation,
        }
    }

    /// Tactical tags of the played move; empty when unranked.
    pub fn tactics(&self) -> Option<&BTreeSet<String>> {
        match &self.played {
            PlayedMove::Ranked { ranked, .. } => Some(&ranked.tactics),
            PlayedMove::Unranked { .. } => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.result == MoveResult::Pass
    }

    /// Check a stored outcome before it is aggregated: a usable elapsed
    /// time, and loss and tier present exactly when the move was ranked
    /// and agreeing with each other.
    pub fn validate(&self) -> Result<()> {
        if !self.elapsed_secs.is_finite() || self.elapsed_secs < 0.0 {
            return Err(TrainerError::Validation(format!(
                "outcome for '{}': elapsed time must be a non-negative number of seconds, got {}",
                self.notation(),
                self.elapsed_secs
            )));
        }
        let ranked = self.rank().is_some();
        if self.centipawn_loss.is_some() != ranked || self.tier.is_some() != ranked {
            return Err(TrainerError::Validation(format!(
                "outcome for '{}': centipawn loss and tier must be set exactly when the move is ranked",
                self.notation()
            )));
        }
        if self.tier != self.centipawn_loss.map(tier_for) {
            return Err(TrainerError::Validation(format!(
                "outcome for '{}': tier '{}' disagrees with centipawn loss {:?}",
                self.notation(),
                Tier::label(self.tier),
                self.centipawn_loss
            )));
        }
        Ok(())
    }
}

/// Score a single decision.
pub fn evaluate(
    position: &Position,
    decision: &Decision,
    thresholds: ThresholdConfig,
) -> Result<EvaluationOutcome> {
    if position.fen.trim().is_empty() {
        return Err(TrainerError::EmptyInput("position"));
    }
    let chosen = decision.chosen_move.trim();
    if chosen.is_empty() {
        return Err(TrainerError::EmptyInput("chosen move"));
    }
    if position.fullmove_number == 0 {
        return Err(TrainerError::Validation(
            "fullmove_number must be at least 1".into(),
        ));
    }
    if !decision.elapsed_secs.is_finite() || decision.elapsed_secs < 0.0 {
        return Err(TrainerError::Validation(format!(
            "elapsed time must be a non-negative number of seconds, got {}",
            decision.elapsed_secs
        )));
    }
    thresholds.validate()?;

    let (played, result, centipawn_loss, tier) = match position.find_ranked(chosen) {
        Some((rank, ranked)) => {
            let loss = ranked.centipawn_loss;
            let result = if thresholds.passes(rank, loss) {
                MoveResult::Pass
            } else {
                MoveResult::Fail
            };
            let played = PlayedMove::Ranked {
                rank,
                ranked: ranked.clone(),
            };
            (played, result, Some(loss), Some(ranked.tier))
        }
        None => {
            let played = PlayedMove::Unranked {
                notation: chosen.to_string(),
            };
            (played, MoveResult::Fail, None, None)
        }
    };

    let outcome = EvaluationOutcome {
        position: position.summary(),
        played,
        elapsed_secs: decision.elapsed_secs,
        decided_at: decision.decided_at,
        result,
        centipawn_loss,
        tier,
        thresholds,
    };

    debug!(
        position_id = ?position.id,
        chosen = %chosen,
        rank = ?outcome.rank(),
        result = result.name(),
        "Evaluated move"
    );

    Ok(outcome)
}

/// Score several decisions on the same position. Fails on the first invalid one.
pub fn evaluate_batch(
    position: &Position,
    decisions: &[Decision],
    thresholds: ThresholdConfig,
) -> Result<Vec<EvaluationOutcome>> {
    decisions
        .iter()
        .map(|d| evaluate(position, d, thresholds))
        .collect()
}
