//! Assignment links between items and staff.
//!
//! RULE: one active link per item. A move closes the old link and opens a
//! fresh one; links are never edited in place to point at different staff.

use crate::{
    item::ItemStatus,
    types::{AssignmentId, ItemId, StaffId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    Auto,
    Manual,
    Rebalance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: AssignmentId,
    pub item_id: ItemId,
    pub staff_id: StaffId,
    pub assigned_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub source: AssignmentSource,
}

impl Assignment {
    pub fn open(
        item_id: impl Into<ItemId>,
        staff_id: impl Into<StaffId>,
        assigned_at: DateTime<Utc>,
        source: AssignmentSource,
    ) -> Self {
        Self {
            assignment_id: uuid::Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            staff_id: staff_id.into(),
            assigned_at,
            resolved_at: None,
            source,
        }
    }
}

/// Read-view of an active assignment plus the item fields the rebalancer
/// needs. This is what the surrounding system feeds into a rebalance pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAssignment {
    pub assignment: Assignment,
    pub item_status: ItemStatus,
    pub response_due_at: DateTime<Utc>,
}

impl OpenAssignment {
    /// A candidate for a rebalance move: still open and not yet picked up.
    pub fn is_movable(&self) -> bool {
        self.assignment.resolved_at.is_none() && self.item_status == ItemStatus::Assigned
    }
}
