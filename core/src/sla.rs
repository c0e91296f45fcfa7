//! SLA clock: deadline stamping and status computation.
//!
//! Pure functions of their inputs. The clock never reads wall time; `now`
//! is always supplied by the caller.

use crate::{
    config::SlaConfig,
    item::{AssignableItem, Priority},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The three deadlines stamped on every new item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlaDeadlines {
    pub response_due_at: DateTime<Utc>,
    pub escalation_due_at: DateTime<Utc>,
    pub review_due_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTime,
    AtRisk,
    Overdue,
    /// Terminal items only: resolved within the response deadline.
    Compliant,
}

/// Map a priority to its three deadlines. Each deadline is
/// `submitted_at + hours[priority]` from an independent table.
pub fn compute_deadlines(
    priority: Priority,
    submitted_at: DateTime<Utc>,
    sla: &SlaConfig,
) -> SlaDeadlines {
    SlaDeadlines {
        response_due_at: submitted_at + Duration::hours(sla.response_hours.for_priority(priority)),
        escalation_due_at: submitted_at
            + Duration::hours(sla.escalation_hours.for_priority(priority)),
        review_due_at: submitted_at + Duration::hours(sla.review_hours.for_priority(priority)),
    }
}

/// SLA status of an item at `now`, against its primary (response) deadline.
///
/// Open items: overdue once `now` passes the deadline, at-risk inside the
/// configured window before it, on-time otherwise. Terminal items report
/// compliance instead: compliant iff resolved within the deadline, overdue
/// if resolved late.
pub fn compute_status(item: &AssignableItem, now: DateTime<Utc>, sla: &SlaConfig) -> SlaStatus {
    if item.is_terminal() {
        // Items can reach terminal status without a resolution timestamp
        // (e.g. closed as invalid); treat the close as late only when a
        // timestamp proves it.
        return match item.resolved_at {
            Some(resolved_at) if resolved_at <= item.response_due_at => SlaStatus::Compliant,
            Some(_) => SlaStatus::Overdue,
            None => SlaStatus::Compliant,
        };
    }

    if now > item.response_due_at {
        return SlaStatus::Overdue;
    }
    let remaining = item.response_due_at - now;
    if remaining <= Duration::hours(sla.at_risk_window_hours) {
        SlaStatus::AtRisk
    } else {
        SlaStatus::OnTime
    }
}
