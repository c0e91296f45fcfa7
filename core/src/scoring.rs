//! Candidate scoring: hard eligibility constraints plus a weighted
//! suitability score.
//!
//! RULE: hard constraints are evaluated before any scoring. An ineligible
//! candidate carries a reason and a zero score; scores are only comparable
//! between eligible candidates.

use crate::{
    capacity::{self, LoadLevel},
    config::DispatchConfig,
    item::{AssignableItem, Priority},
    staff::StaffMember,
    types::{GeoPoint, StaffId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    Unavailable,
    Overloaded,
    JuniorOnCritical,
    TooFar,
    LowPerformance,
}

/// Transient scoring result for one staff member. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub staff_id: StaffId,
    pub score: f64,
    pub distance_km: Option<f64>,
    pub capacity_percentage: u32,
    pub eligible: bool,
    pub ineligible_reason: Option<IneligibleReason>,
}

impl ScoredCandidate {
    fn ineligible(staff: &StaffMember, distance_km: Option<f64>, reason: IneligibleReason) -> Self {
        Self {
            staff_id: staff.staff_id.clone(),
            score: 0.0,
            distance_km,
            capacity_percentage: capacity::workload_percentage(staff),
            eligible: false,
            ineligible_reason: Some(reason),
        }
    }
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line (great-circle) distance between two positions, in km.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Score one staff member for one item.
pub fn score_candidate(
    item: &AssignableItem,
    staff: &StaffMember,
    config: &DispatchConfig,
) -> ScoredCandidate {
    let scoring = &config.scoring;
    // Distance is computed up front so even ineligible candidates report it.
    let distance_km = match (item.location, staff.position) {
        (Some(from), Some(to)) => Some(haversine_km(from, to)),
        _ => None,
    };

    if !capacity::is_auto_assignable(staff) {
        return ScoredCandidate::ineligible(staff, distance_km, IneligibleReason::Unavailable);
    }
    let pct = capacity::workload_percentage(staff);
    if capacity::classify(staff, &config.capacity) == LoadLevel::Overloaded {
        return ScoredCandidate::ineligible(staff, distance_km, IneligibleReason::Overloaded);
    }
    if item.priority == Priority::Critical && staff.seniority.is_junior() {
        return ScoredCandidate::ineligible(staff, distance_km, IneligibleReason::JuniorOnCritical);
    }
    if let Some(d) = distance_km {
        if d > scoring.max_distance_km {
            return ScoredCandidate::ineligible(staff, distance_km, IneligibleReason::TooFar);
        }
    }
    if staff.performance_score < scoring.min_performance_score {
        return ScoredCandidate::ineligible(staff, distance_km, IneligibleReason::LowPerformance);
    }

    let workload_component = 1.0 - pct as f64 / 100.0;
    let performance_component = staff.performance_score / 100.0;
    let specialization_component = if staff.specializes_in(&item.category_id) {
        1.0
    } else if item.department.is_some() && item.department == staff.department {
        scoring.department_partial_credit
    } else {
        0.0
    };
    let distance_component = match distance_km {
        Some(d) => 1.0 - d.min(scoring.max_distance_km) / scoring.max_distance_km,
        None => scoring.unknown_distance_credit,
    };

    let w = &scoring.weights;
    let score = 100.0
        * (w.distance * distance_component
            + w.workload * workload_component
            + w.performance * performance_component
            + w.specialization * specialization_component);

    ScoredCandidate {
        staff_id: staff.staff_id.clone(),
        score,
        distance_km,
        capacity_percentage: pct,
        eligible: true,
        ineligible_reason: None,
    }
}
