/// Side-by-side comparison of two ranked moves from the same position.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::position::{Position, PositionImpact, RankedMove};

/// Field-by-field positional impact change (b - a).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactDelta {
    pub material_change: f64,
    pub king_safety_impact: f64,
    pub center_control_change: f64,
    pub development_impact: f64,
}

impl ImpactDelta {
    fn between(a: &PositionImpact, b: &PositionImpact) -> Self {
        Self {
            material_change: b.material_change - a.material_change,
            king_safety_impact: b.king_safety_impact - a.king_safety_impact,
            center_control_change: b.center_control_change - a.center_control_change,
            development_impact: b.development_impact - a.development_impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationDiff {
    pub from_move: String,
    pub to_move: String,
    /// b.score - a.score
    pub score_delta: i64,
    /// b.centipawn_loss - a.centipawn_loss
    pub centipawn_loss_delta: i64,
    /// Tactics present in b but not in a
    pub tactics_added: BTreeSet<String>,
    /// Tactics present in a but not in b
    pub tactics_removed: BTreeSet<String>,
    pub impact: ImpactDelta,
    /// Number of leading principal-variation moves the two lines share
    pub shared_pv_plies: usize,
}

pub fn compare(a: &RankedMove, b: &RankedMove) -> VariationDiff {
    VariationDiff {
        from_move: a.san.clone(),
        to_move: b.san.clone(),
        score_delta: i64::from(b.score) - i64::from(a.score),
        centipawn_loss_delta: i64::from(b.centipawn_loss) - i64::from(a.centipawn_loss),
        tactics_added: b.tactics.difference(&a.tactics).cloned().collect(),
        tactics_removed: a.tactics.difference(&b.tactics).cloned().collect(),
        impact: ImpactDelta::between(&a.impact, &b.impact),
        shared_pv_plies: a.pv.iter().zip(&b.pv).take_while(|(x, y)| x == y).count(),
    }
}

/// Diff from the played move to the position's best move. `None` when the
/// move is not among the candidates.
pub fn compare_with_best(position: &Position, notation: &str) -> Option<VariationDiff> {
    let (_, played) = position.find_ranked(notation.trim())?;
    let best = position.best_move()?;
    Some(compare(played, best))
}
