//! Assignable items: citizen complaints and internal tasks.
//!
//! RULE: SLA deadlines are stamped exactly once, at construction, from the
//! priority tables. Afterwards only `status` and the assignment linkage
//! change; the deadline fields are never rewritten.

use crate::{
    config::SlaConfig,
    sla,
    types::{CategoryId, GeoPoint, ItemId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    #[serde(alias = "emergency")]
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Unassigned,
    Assigned,
    InProgress,
    Resolved,
    Escalated,
    Closed,
}

impl ItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignableItem {
    pub item_id: ItemId,
    pub category_id: CategoryId,
    pub department: Option<String>,
    pub location: Option<GeoPoint>,
    pub priority: Priority,
    pub submitted_at: DateTime<Utc>,
    pub response_due_at: DateTime<Utc>,
    pub escalation_due_at: DateTime<Utc>,
    pub review_due_at: DateTime<Utc>,
    pub status: ItemStatus,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl AssignableItem {
    /// Create a new unassigned item with deadlines stamped from `sla`.
    pub fn new(
        item_id: impl Into<ItemId>,
        category_id: impl Into<CategoryId>,
        priority: Priority,
        submitted_at: DateTime<Utc>,
        sla: &SlaConfig,
    ) -> Self {
        let deadlines = sla::compute_deadlines(priority, submitted_at, sla);
        Self {
            item_id: item_id.into(),
            category_id: category_id.into(),
            department: None,
            location: None,
            priority,
            submitted_at,
            response_due_at: deadlines.response_due_at,
            escalation_due_at: deadlines.escalation_due_at,
            review_due_at: deadlines.review_due_at,
            status: ItemStatus::Unassigned,
            resolved_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
