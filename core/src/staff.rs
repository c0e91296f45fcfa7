//! Staff roster records.
//!
//! The core never owns the roster. It receives a snapshot of these records
//! from the surrounding system on every call; the only field the core itself
//! advances is `current_workload`, and only through the workload ledger.

use crate::types::{CategoryId, GeoPoint, StaffId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Busy,
    OnBreak,
    OffDuty,
    OnLeave,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Trainee,
    Junior,
    Standard,
    Senior,
}

impl Seniority {
    /// Trainees and juniors never receive critical items.
    pub fn is_junior(self) -> bool {
        matches!(self, Self::Trainee | Self::Junior)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub staff_id: StaffId,
    pub name: String,
    /// Category identifiers this staff member is trained on.
    pub specializations: Vec<CategoryId>,
    pub department: Option<String>,
    pub position: Option<GeoPoint>,
    pub seniority: Seniority,
    pub max_concurrent_capacity: u32,
    /// Count of open assignments. Changes only through assignment
    /// create/move/close; never negative.
    pub current_workload: u32,
    pub availability: AvailabilityStatus,
    /// Derived blend of compliance, satisfaction and overdue rate,
    /// recomputed periodically by the performance aggregator. In [0, 100].
    pub performance_score: f64,
}

impl StaffMember {
    pub fn new(staff_id: impl Into<StaffId>, name: impl Into<String>, capacity: u32) -> Self {
        assert!(capacity > 0, "max_concurrent_capacity must be > 0");
        Self {
            staff_id: staff_id.into(),
            name: name.into(),
            specializations: Vec::new(),
            department: None,
            position: None,
            seniority: Seniority::Standard,
            max_concurrent_capacity: capacity,
            current_workload: 0,
            availability: AvailabilityStatus::Available,
            performance_score: 100.0,
        }
    }

    pub fn specializes_in(&self, category: &str) -> bool {
        self.specializations.iter().any(|c| c == category)
    }
}
