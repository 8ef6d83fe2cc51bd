use axum::Json;
use serde::Deserialize;
use trainer_core::{variation, Position, PositionRecord, RankedMove, VariationDiff};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CompareBody {
    pub a: RankedMove,
    pub b: RankedMove,
}

/// POST /api/variations/compare
pub async fn compare_variations(Json(body): Json<CompareBody>) -> Json<VariationDiff> {
    Json(variation::compare(&body.a, &body.b))
}

#[derive(Debug, Deserialize)]
pub struct BestBody {
    pub position: PositionRecord,
    pub chosen_move: String,
}

/// POST /api/variations/best
/// Diff from the chosen move to the best candidate; null when the move is
/// not ranked.
pub async fn compare_with_best(
    Json(body): Json<BestBody>,
) -> Result<Json<Option<VariationDiff>>, AppError> {
    if body.chosen_move.trim().is_empty() {
        return Err(AppError::BadRequest("chosen_move is empty".into()));
    }
    let position = Position::try_from(body.position)?;
    Ok(Json(variation::compare_with_best(&position, &body.chosen_move)))
}
