//! SLA clock tests: deadline stamping and status computation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dispatch_core::{
    config::SlaConfig,
    item::{AssignableItem, ItemStatus, Priority},
    sla::{self, SlaStatus},
};

fn submitted() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn item(priority: Priority) -> AssignableItem {
    AssignableItem::new("itm-1", "roads", priority, submitted(), &SlaConfig::default())
}

/// Default tables: critical 1/2/1, high 4/8/4, medium 24/48/12, low 72/120/24.
#[test]
fn deadline_tables_match_policy() {
    let cases = [
        (Priority::Critical, 1, 2, 1),
        (Priority::High, 4, 8, 4),
        (Priority::Medium, 24, 48, 12),
        (Priority::Low, 72, 120, 24),
    ];
    for (priority, response, escalation, review) in cases {
        let d = sla::compute_deadlines(priority, submitted(), &SlaConfig::default());
        assert_eq!(
            d.response_due_at,
            submitted() + Duration::hours(response),
            "response hours for {priority:?}"
        );
        assert_eq!(
            d.escalation_due_at,
            submitted() + Duration::hours(escalation),
            "escalation hours for {priority:?}"
        );
        assert_eq!(
            d.review_due_at,
            submitted() + Duration::hours(review),
            "review hours for {priority:?}"
        );
    }
}

/// Every deadline lands strictly after the submission timestamp, for every
/// priority.
#[test]
fn deadlines_strictly_after_submission() {
    for priority in Priority::ALL {
        let d = sla::compute_deadlines(priority, submitted(), &SlaConfig::default());
        assert!(d.response_due_at > submitted(), "{priority:?} response");
        assert!(d.escalation_due_at > submitted(), "{priority:?} escalation");
        assert!(d.review_due_at > submitted(), "{priority:?} review");
    }
}

/// A low-priority item (72h response) is on-time well before the deadline,
/// at-risk inside the 24h window, and overdue once the deadline passes.
#[test]
fn status_progresses_on_time_at_risk_overdue() {
    let sla = SlaConfig::default();
    let item = item(Priority::Low);

    let early = submitted() + Duration::hours(10);
    assert_eq!(sla::compute_status(&item, early, &sla), SlaStatus::OnTime);

    let near = submitted() + Duration::hours(60);
    assert_eq!(sla::compute_status(&item, near, &sla), SlaStatus::AtRisk);

    let late = submitted() + Duration::hours(73);
    assert_eq!(sla::compute_status(&item, late, &sla), SlaStatus::Overdue);
}

/// Status is monotonic in `now`: once overdue, later instants stay overdue.
#[test]
fn overdue_never_reverts() {
    let sla = SlaConfig::default();
    let item = item(Priority::Medium);
    let mut now = submitted() + Duration::hours(25);
    assert_eq!(sla::compute_status(&item, now, &sla), SlaStatus::Overdue);
    for _ in 0..48 {
        now += Duration::hours(1);
        assert_eq!(
            sla::compute_status(&item, now, &sla),
            SlaStatus::Overdue,
            "status reverted at {now}"
        );
    }
}

/// Terminal items report compliance: resolved inside the response deadline
/// is compliant, resolved after it is overdue.
#[test]
fn terminal_items_report_compliance() {
    let sla = SlaConfig::default();
    let now = submitted() + Duration::hours(100);

    let mut resolved_early = item(Priority::Medium);
    resolved_early.status = ItemStatus::Resolved;
    resolved_early.resolved_at = Some(submitted() + Duration::hours(20));
    assert_eq!(
        sla::compute_status(&resolved_early, now, &sla),
        SlaStatus::Compliant
    );

    let mut resolved_late = item(Priority::Medium);
    resolved_late.status = ItemStatus::Resolved;
    resolved_late.resolved_at = Some(submitted() + Duration::hours(30));
    assert_eq!(
        sla::compute_status(&resolved_late, now, &sla),
        SlaStatus::Overdue
    );
}

/// Item construction stamps all three deadlines from the tables; they are
/// plain fields afterwards, not recomputed.
#[test]
fn item_construction_stamps_deadlines() {
    let it = item(Priority::High);
    assert_eq!(it.response_due_at, submitted() + Duration::hours(4));
    assert_eq!(it.escalation_due_at, submitted() + Duration::hours(8));
    assert_eq!(it.review_due_at, submitted() + Duration::hours(4));
    assert_eq!(it.status, ItemStatus::Unassigned);
}

/// The `emergency` spelling used by older intake forms parses as critical.
#[test]
fn emergency_alias_parses_as_critical() {
    let p: Priority = serde_json::from_str("\"emergency\"").unwrap();
    assert_eq!(p, Priority::Critical);
}
