use axum::Json;
use serde::Deserialize;
use trainer_core::insights::GroupSummary;
use trainer_core::{aggregate, breakdown, Dimension, EvaluationOutcome, InsightsFilter, InsightsReport};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct InsightsBody {
    pub outcomes: Vec<EvaluationOutcome>,
    #[serde(default)]
    pub filter: InsightsFilter,
}

/// POST /api/insights
/// Full report over the supplied outcomes.
pub async fn get_insights(Json(body): Json<InsightsBody>) -> Result<Json<InsightsReport>, AppError> {
    check_request(&body.outcomes, &body.filter)?;
    Ok(Json(aggregate(&body.outcomes, &body.filter)))
}

#[derive(Debug, Deserialize)]
pub struct BreakdownBody {
    pub outcomes: Vec<EvaluationOutcome>,
    #[serde(default)]
    pub filter: InsightsFilter,
    pub dimension: Dimension,
}

/// POST /api/insights/breakdown
/// Group summaries along a single dimension.
pub async fn get_breakdown(
    Json(body): Json<BreakdownBody>,
) -> Result<Json<Vec<GroupSummary>>, AppError> {
    check_request(&body.outcomes, &body.filter)?;
    Ok(Json(breakdown(&body.outcomes, &body.filter, body.dimension)))
}

/// Reject malformed outcomes and inverted date ranges before aggregating.
fn check_request(outcomes: &[EvaluationOutcome], filter: &InsightsFilter) -> Result<(), AppError> {
    for outcome in outcomes {
        outcome.validate()?;
    }
    match (filter.from_date, filter.to_date) {
        (Some(from), Some(to)) if from > to => Err(AppError::BadRequest(format!(
            "from_date {from} is after to_date {to}"
        ))),
        _ => Ok(()),
    }
}
