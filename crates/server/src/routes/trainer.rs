use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use trainer_core::{evaluate, Decision, EvaluationOutcome, Position, PositionRecord, ThresholdConfig};
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;

/// Per-request threshold override.
#[derive(Debug, Deserialize, Validate)]
pub struct ThresholdBody {
    #[validate(range(min = 1))]
    pub top_n: u32,
    pub score_difference_threshold: u32,
}

impl ThresholdBody {
    pub fn into_config(self) -> Result<ThresholdConfig, AppError> {
        self.validate()?;
        Ok(ThresholdConfig::new(self.top_n, self.score_difference_threshold)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluateBody {
    pub position: PositionRecord,
    pub chosen_move: String,
    pub elapsed_secs: f64,
    pub decided_at: Option<DateTime<Utc>>,
    pub thresholds: Option<ThresholdBody>,
}

/// POST /api/trainer/evaluate
/// Score one move against the position's ranked candidates.
pub async fn evaluate_move(
    Extension(config): Extension<Config>,
    Json(body): Json<EvaluateBody>,
) -> Result<Json<EvaluationOutcome>, AppError> {
    let thresholds = match body.thresholds {
        Some(t) => t.into_config()?,
        None => config.default_thresholds,
    };
    let position = Position::try_from(body.position)?;
    let decision = Decision {
        chosen_move: body.chosen_move,
        elapsed_secs: body.elapsed_secs,
        decided_at: body.decided_at.unwrap_or_else(Utc::now),
    };

    let outcome = evaluate(&position, &decision, thresholds)?;
    Ok(Json(outcome))
}
