//! Staff performance aggregation over historical resolved items.
//!
//! Feeds two consumers: the candidate scorer (via the blended
//! `performance_score`) and staff-facing reporting (via
//! `PerformanceMetrics`).

use crate::item::AssignableItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    pub resolution_time_hours: f64,
    pub sla_compliance: u32,
    pub satisfaction_score: f64,
}

/// Mean resolution time in hours over resolved items. Items without both
/// timestamps are skipped; an empty set yields 0.0, not an error.
pub fn resolution_time_hours(items: &[AssignableItem]) -> f64 {
    let durations: Vec<f64> = items
        .iter()
        .filter_map(|item| {
            item.resolved_at
                .map(|resolved| (resolved - item.submitted_at).num_seconds() as f64 / 3600.0)
        })
        .collect();
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

/// Percentage of resolved items closed within their response deadline.
/// Staff with no closed work score 100, not 0.
pub fn sla_compliance(total_resolved: u32, on_time: u32) -> u32 {
    if total_resolved == 0 {
        return 100;
    }
    (on_time as f64 / total_resolved as f64 * 100.0).round() as u32
}

/// Mean of positive ratings, rounded to one decimal. 0.0 when there are
/// no positive ratings.
pub fn satisfaction_score(ratings: &[f64]) -> f64 {
    let positive: Vec<f64> = ratings.iter().copied().filter(|r| *r > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    let mean = positive.iter().sum::<f64>() / positive.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Aggregate one staff member's history into reporting metrics.
pub fn performance_metrics(resolved_items: &[AssignableItem], ratings: &[f64]) -> PerformanceMetrics {
    let resolved: Vec<&AssignableItem> = resolved_items
        .iter()
        .filter(|i| i.resolved_at.is_some())
        .collect();
    let on_time = resolved
        .iter()
        .filter(|i| i.resolved_at.is_some_and(|r| r <= i.response_due_at))
        .count() as u32;

    PerformanceMetrics {
        resolution_time_hours: resolution_time_hours(resolved_items),
        sla_compliance: sla_compliance(resolved.len() as u32, on_time),
        satisfaction_score: satisfaction_score(ratings),
    }
}

/// Blend compliance, satisfaction (0-5 scale) and the share of currently
/// overdue open items into the score the candidate scorer consumes.
///
/// The exact weights are policy, not contract; the blend is monotonic in
/// each input (better compliance, better satisfaction, fewer overdue items
/// never lower the score). Result clamped to [0, 100].
pub fn performance_score(compliance: u32, satisfaction: f64, overdue_rate: f64) -> f64 {
    let score = 0.5 * compliance as f64
        + 0.3 * (satisfaction * 20.0)
        + 0.2 * (100.0 - overdue_rate);
    score.clamp(0.0, 100.0)
}
