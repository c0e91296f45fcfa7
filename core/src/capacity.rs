//! Capacity model: workload ratios and load classification.

use crate::{
    config::CapacityThresholds,
    staff::{AvailabilityStatus, StaffMember},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadLevel {
    Available,
    Busy,
    Overloaded,
}

/// Current load as a percentage of configured capacity, capped at 100.
pub fn workload_percentage(staff: &StaffMember) -> u32 {
    let pct =
        (staff.current_workload as f64 / staff.max_concurrent_capacity as f64 * 100.0).round();
    (pct as u32).min(100)
}

/// Classify a staff member's load against the configured thresholds.
pub fn classify(staff: &StaffMember, thresholds: &CapacityThresholds) -> LoadLevel {
    let pct = workload_percentage(staff);
    if pct >= thresholds.overloaded_pct {
        LoadLevel::Overloaded
    } else if pct >= thresholds.busy_pct {
        LoadLevel::Busy
    } else {
        LoadLevel::Available
    }
}

/// Availability gate for auto-routing. Off-duty, on-leave and on-break
/// staff never receive new auto-assignments, whatever their workload.
pub fn is_auto_assignable(staff: &StaffMember) -> bool {
    matches!(
        staff.availability,
        AvailabilityStatus::Available | AvailabilityStatus::Busy
    )
}

/// Rebalance target test: comfortably below capacity and actively available.
pub fn is_underloaded(staff: &StaffMember, thresholds: &CapacityThresholds) -> bool {
    workload_percentage(staff) < thresholds.underloaded_pct
        && staff.availability == AvailabilityStatus::Available
}
