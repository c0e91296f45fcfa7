//! Assignment selection over a scored candidate pool.
//!
//! Selection is pure: it reads a staff snapshot and returns a decision.
//! The stateful half (workload commit + opening the assignment link) lives
//! in the dispatcher.

use crate::{
    config::DispatchConfig,
    error::{DispatchError, DispatchResult},
    item::{AssignableItem, Priority},
    scoring::{self, ScoredCandidate},
    staff::StaffMember,
    types::StaffId,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    NoEligibleStaff,
}

/// Outcome of the pure selection phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Selection {
    Selected { staff_id: StaffId, score: f64 },
    Declined { reason: DeclineReason },
}

/// Score every pool member and pick the best eligible candidate.
///
/// Tie-break order, for reproducible routing: higher score, then lower
/// current workload, then lower distance (unknown distance loses), then
/// staff id.
pub fn select(item: &AssignableItem, pool: &[StaffMember], config: &DispatchConfig) -> Selection {
    let mut eligible: Vec<(ScoredCandidate, &StaffMember)> = pool
        .iter()
        .map(|staff| (scoring::score_candidate(item, staff, config), staff))
        .filter(|(candidate, _)| candidate.eligible)
        .collect();

    if eligible.is_empty() {
        log::debug!(
            "item={} no eligible staff in pool of {}",
            item.item_id,
            pool.len()
        );
        return Selection::Declined {
            reason: DeclineReason::NoEligibleStaff,
        };
    }

    eligible.sort_by(|(a, sa), (b, sb)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| sa.current_workload.cmp(&sb.current_workload))
            .then_with(|| {
                let da = a.distance_km.unwrap_or(f64::INFINITY);
                let db = b.distance_km.unwrap_or(f64::INFINITY);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .then_with(|| sa.staff_id.cmp(&sb.staff_id))
    });

    let (best, _) = &eligible[0];
    Selection::Selected {
        staff_id: best.staff_id.clone(),
        score: best.score,
    }
}

/// Manual assignment skips scoring but not the hard safety constraint:
/// critical items never go to trainee or junior staff.
pub fn validate_manual(item: &AssignableItem, staff: &StaffMember) -> DispatchResult<()> {
    if item.priority == Priority::Critical && staff.seniority.is_junior() {
        return Err(DispatchError::validation(format!(
            "critical item {} cannot be manually assigned to junior staff {}",
            item.item_id, staff.staff_id
        )));
    }
    Ok(())
}
