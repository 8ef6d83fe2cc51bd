//! Predicates restricting which outcomes feed an aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classification::{GamePhase, Tier};
use crate::evaluator::{EvaluationOutcome, MoveResult};
use crate::position::Side;

/// All set fields must hold for an outcome to be included; unset fields
/// impose no restriction. Move-number and date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsFilter {
    pub min_move_number: Option<u32>,
    pub max_move_number: Option<u32>,
    pub side: Option<Side>,
    pub result: Option<MoveResult>,
    /// UTC calendar day of the decision
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub position_tag: Option<String>,
    pub tier: Option<Tier>,
    pub phase: Option<GamePhase>,
}

impl InsightsFilter {
    pub fn matches(&self, outcome: &EvaluationOutcome) -> bool {
        let pos = &outcome.position;
        let day = outcome.decided_at.date_naive();

        self.min_move_number.map_or(true, |min| pos.fullmove_number >= min)
            && self.max_move_number.map_or(true, |max| pos.fullmove_number <= max)
            && self.side.map_or(true, |side| pos.turn == side)
            && self.result.map_or(true, |result| outcome.result == result)
            && self.from_date.map_or(true, |from| day >= from)
            && self.to_date.map_or(true, |to| day <= to)
            && self
                .position_tag
                .as_ref()
                .map_or(true, |tag| pos.classification.contains(tag))
            && self.tier.map_or(true, |tier| outcome.tier == Some(tier))
            && self.phase.map_or(true, |phase| pos.phase() == phase)
    }

    pub fn apply<'a>(&self, outcomes: &'a [EvaluationOutcome]) -> Vec<&'a EvaluationOutcome> {
        outcomes.iter().filter(|o| self.matches(o)).collect()
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_result(mut self, result: MoveResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_position_tag(mut self, tag: impl Into<String>) -> Self {
        self.position_tag = Some(tag.into());
        self
    }

    pub fn with_move_numbers(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_move_number = min;
        self.max_move_number = max;
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }

    pub fn with_phase(mut self, phase: GamePhase) -> Self {
        self.phase = Some(phase);
        self
    }
}
