//! Performance aggregator tests: resolution time, SLA compliance,
//! satisfaction, and the blended score.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dispatch_core::{
    config::SlaConfig,
    item::{AssignableItem, ItemStatus, Priority},
    performance,
};

fn submitted() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn resolved_item(id: &str, hours_to_resolve: i64) -> AssignableItem {
    let mut item = AssignableItem::new(id, "roads", Priority::Medium, submitted(), &SlaConfig::default());
    item.status = ItemStatus::Resolved;
    item.resolved_at = Some(submitted() + Duration::hours(hours_to_resolve));
    item
}

/// Compliance boundary values from the policy: no closed work scores 100,
/// all on time scores 100, half on time scores 50.
#[test]
fn compliance_boundaries() {
    assert_eq!(performance::sla_compliance(0, 0), 100);
    assert_eq!(performance::sla_compliance(10, 10), 100);
    assert_eq!(performance::sla_compliance(10, 5), 50);
}

/// Twenty resolved items with eighteen on time is 90% compliance.
#[test]
fn compliance_rounds_to_whole_percent() {
    assert_eq!(performance::sla_compliance(20, 18), 90);
    assert_eq!(performance::sla_compliance(3, 2), 67);
}

/// Mean resolution time over items that carry both timestamps; an empty
/// set is 0, not an error.
#[test]
fn resolution_time_mean() {
    assert_eq!(performance::resolution_time_hours(&[]), 0.0);

    let items = vec![resolved_item("itm-1", 2), resolved_item("itm-2", 4)];
    let mean = performance::resolution_time_hours(&items);
    assert!((mean - 3.0).abs() < 1e-9, "got {mean}");

    // An unresolved item is skipped, not counted as zero.
    let mut open = resolved_item("itm-3", 0);
    open.status = ItemStatus::Assigned;
    open.resolved_at = None;
    let items = vec![resolved_item("itm-1", 2), resolved_item("itm-2", 4), open];
    let mean = performance::resolution_time_hours(&items);
    assert!((mean - 3.0).abs() < 1e-9, "unresolved items must not dilute the mean");
}

/// Satisfaction is the mean of positive ratings rounded to one decimal;
/// zeros are treated as unrated and an empty set scores 0.
#[test]
fn satisfaction_rounding_and_filtering() {
    assert_eq!(performance::satisfaction_score(&[]), 0.0);
    assert_eq!(performance::satisfaction_score(&[0.0, 0.0]), 0.0);
    let s = performance::satisfaction_score(&[4.0, 5.0, 0.0, 3.5]);
    assert!((s - 4.2).abs() < 1e-9, "mean of 4, 5, 3.5 rounds to 4.2, got {s}");
}

/// The reporting surface combines all three aggregates over one staff
/// member's history. Medium priority has a 24h response deadline, so a
/// 20h resolution is on time and a 30h one is not.
#[test]
fn metrics_over_history() {
    let items = vec![
        resolved_item("itm-1", 20),
        resolved_item("itm-2", 30),
        resolved_item("itm-3", 10),
        resolved_item("itm-4", 12),
    ];
    let metrics = performance::performance_metrics(&items, &[4.0, 5.0]);
    assert_eq!(metrics.sla_compliance, 75, "three of four resolved on time");
    assert!((metrics.resolution_time_hours - 18.0).abs() < 1e-9);
    assert!((metrics.satisfaction_score - 4.5).abs() < 1e-9);
}

/// The blended score is monotonic in each input and clamped to [0, 100].
#[test]
fn blend_is_monotonic_and_clamped() {
    let base = performance::performance_score(80, 4.0, 20.0);

    assert!(performance::performance_score(90, 4.0, 20.0) >= base);
    assert!(performance::performance_score(80, 4.5, 20.0) >= base);
    assert!(performance::performance_score(80, 4.0, 10.0) >= base);

    assert_eq!(performance::performance_score(100, 5.0, 0.0), 100.0);
    assert_eq!(performance::performance_score(0, 0.0, 100.0), 0.0);
}
