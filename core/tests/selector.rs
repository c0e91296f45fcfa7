//! Assignment selector tests: best-candidate pick, tie-breaks, declines,
//! and manual-assignment validation.

use chrono::{DateTime, TimeZone, Utc};
use dispatch_core::{
    config::{DispatchConfig, ScoreWeights, SlaConfig},
    dispatcher::{AssignmentDecision, Dispatcher},
    item::{AssignableItem, Priority},
    selector::{self, DeclineReason, Selection},
    staff::{AvailabilityStatus, Seniority, StaffMember},
    types::GeoPoint,
    DispatchError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn item(priority: Priority) -> AssignableItem {
    AssignableItem::new("itm-1", "roads", priority, now(), &SlaConfig::default())
}

fn specialist(id: &str) -> StaffMember {
    let mut s = StaffMember::new(id, "Dana Ruiz", 10);
    s.specializations = vec!["roads".into()];
    s.performance_score = 80.0;
    s
}

/// An empty pool declines with no_eligible_staff.
#[test]
fn empty_pool_declines() {
    let selection = selector::select(&item(Priority::Medium), &[], &DispatchConfig::default());
    assert_eq!(
        selection,
        Selection::Declined {
            reason: DeclineReason::NoEligibleStaff
        }
    );
}

/// A pool where every member fails a hard constraint declines rather than
/// picking the least-bad candidate.
#[test]
fn fully_ineligible_pool_declines() {
    let mut off_duty = specialist("s-1");
    off_duty.availability = AvailabilityStatus::OffDuty;
    let mut overloaded = specialist("s-2");
    overloaded.current_workload = 10;

    let selection = selector::select(
        &item(Priority::Medium),
        &[off_duty, overloaded],
        &DispatchConfig::default(),
    );
    assert!(matches!(selection, Selection::Declined { .. }));
}

/// For all critical items and all junior-only pools the result is a
/// decline, never a junior assignment.
#[test]
fn junior_only_pool_declines_critical() {
    let pool: Vec<StaffMember> = (0..4)
        .map(|i| {
            let mut s = specialist(&format!("s-{i}"));
            s.seniority = if i % 2 == 0 {
                Seniority::Junior
            } else {
                Seniority::Trainee
            };
            s
        })
        .collect();

    let selection = selector::select(&item(Priority::Critical), &pool, &DispatchConfig::default());
    assert_eq!(
        selection,
        Selection::Declined {
            reason: DeclineReason::NoEligibleStaff
        }
    );
}

/// The selector never returns off-duty or on-leave staff, even when they
/// would have scored far higher than the alternatives.
#[test]
fn never_selects_off_roster_staff() {
    let mut star = specialist("s-star");
    star.performance_score = 100.0;
    star.availability = AvailabilityStatus::OnLeave;

    let mut modest = specialist("s-modest");
    modest.performance_score = 55.0;

    let selection = selector::select(
        &item(Priority::Medium),
        &[star, modest],
        &DispatchConfig::default(),
    );
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-modest");
}

/// Routing scenario: A (capacity 10, workload 9, performance 80) against
/// B (capacity 10, workload 2, performance 90), equal specialization, no
/// locations. B wins on headroom and performance.
#[test]
fn scenario_prefers_headroom_and_performance() {
    let mut a = specialist("s-a");
    a.current_workload = 9;
    a.performance_score = 80.0;
    let mut b = specialist("s-b");
    b.current_workload = 2;
    b.performance_score = 90.0;

    let selection = selector::select(&item(Priority::Medium), &[a, b], &DispatchConfig::default());
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-b");
}

/// Equal scores break on lower current workload: same percentage via
/// different capacities, so the raw count decides.
#[test]
fn tie_breaks_on_lower_workload() {
    let mut a = specialist("s-a");
    a.max_concurrent_capacity = 10;
    a.current_workload = 2;
    let mut b = specialist("s-b");
    b.max_concurrent_capacity = 5;
    b.current_workload = 1;

    let selection = selector::select(&item(Priority::Medium), &[a, b], &DispatchConfig::default());
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-b", "equal 20% load, 1 open item beats 2");
}

/// With the distance weight zeroed out, equal-scoring candidates break on
/// lower known distance, and an unknown distance loses to any known one.
#[test]
fn tie_breaks_on_distance_with_nulls_worst() {
    let mut config = DispatchConfig::default();
    config.scoring.weights = ScoreWeights {
        distance: 0.0,
        workload: 0.5,
        performance: 0.3,
        specialization: 0.2,
    };

    let mut it = item(Priority::Medium);
    it.location = Some(GeoPoint::new(40.0, -75.0));

    let mut near = specialist("s-near");
    near.position = Some(GeoPoint::new(40.0, -75.05));
    let mut far = specialist("s-far");
    far.position = Some(GeoPoint::new(40.0, -75.3));
    let unknown = specialist("s-unknown");

    let selection = selector::select(&it, &[far.clone(), unknown.clone(), near], &config);
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-near");

    let selection = selector::select(&it, &[unknown, far], &config);
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-far", "known distance beats unknown");
}

/// Identical candidates resolve by staff id for reproducible routing.
#[test]
fn tie_breaks_on_staff_id_last() {
    let selection = selector::select(
        &item(Priority::Medium),
        &[specialist("s-b"), specialist("s-a")],
        &DispatchConfig::default(),
    );
    let Selection::Selected { staff_id, .. } = selection else {
        panic!("expected a selection");
    };
    assert_eq!(staff_id, "s-a");
}

/// Manual assignment bypasses scoring but still rejects the critical/junior
/// combination with a validation error.
#[test]
fn manual_assignment_validates_junior_constraint() {
    let mut junior = specialist("s-junior");
    junior.seniority = Seniority::Junior;

    let err = selector::validate_manual(&item(Priority::Critical), &junior).unwrap_err();
    assert!(matches!(err, DispatchError::Validation { .. }));

    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    let err = dispatcher
        .assign_manual(&item(Priority::Critical), &junior, now())
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation { .. }));
    assert_eq!(
        dispatcher.workload("s-junior").ok(),
        None,
        "a rejected manual assignment must not register workload"
    );
}

/// A dispatched item increments the owner's ledger workload and yields an
/// assigned decision; dispatching a non-unassigned item is a validation
/// error.
#[test]
fn dispatch_assigns_and_validates_status() {
    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    let pool = vec![specialist("s-1")];

    let decision = dispatcher.dispatch(&item(Priority::Medium), &pool, now()).unwrap();
    let AssignmentDecision::Assigned { staff_id, score, .. } = decision else {
        panic!("expected an assignment");
    };
    assert_eq!(staff_id, "s-1");
    assert!(score > 0.0);
    assert_eq!(dispatcher.workload("s-1").unwrap(), 1);

    let mut already = item(Priority::Medium);
    already.status = dispatch_core::ItemStatus::Assigned;
    let err = dispatcher.dispatch(&already, &pool, now()).unwrap_err();
    assert!(matches!(err, DispatchError::Validation { .. }));
}

/// When nobody is eligible the dispatcher surfaces the decline as a
/// decision, not an error, so the caller can queue for manual handling.
#[test]
fn dispatch_decline_is_a_decision() {
    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    let mut off = specialist("s-1");
    off.availability = AvailabilityStatus::OffDuty;

    let decision = dispatcher.dispatch(&item(Priority::Medium), &[off], now()).unwrap();
    assert_eq!(
        decision,
        AssignmentDecision::Declined {
            reason: DeclineReason::NoEligibleStaff
        }
    );
}
