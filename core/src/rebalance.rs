//! Periodic load rebalancing: propose moves from overloaded staff to
//! underloaded staff.
//!
//! RULE: the propose phase is pure. It reads a roster snapshot and the open
//! assignment list and returns a move list; it mutates nothing and holds no
//! locks. The caller applies or discards the proposals inside its own
//! transaction discipline (see dispatcher.rs).

use crate::{
    assignment::OpenAssignment,
    capacity::{self, LoadLevel},
    config::DispatchConfig,
    staff::StaffMember,
    types::{AssignmentId, StaffId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A proposed reassignment of one open item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebalanceMove {
    pub assignment_id: AssignmentId,
    pub from_staff: StaffId,
    pub to_staff: StaffId,
}

/// Propose up to `max_moves_per_source` moves away from each overloaded
/// staff member, round-robin across the underloaded pool.
///
/// Candidate order per source is furthest response deadline first (lowest
/// urgency, least disruption). Items already in progress never move. A
/// target is skipped once another proposed move would push it past its
/// capacity; an empty underloaded pool produces no moves at all.
pub fn propose_rebalance(
    pool: &[StaffMember],
    open_assignments: &[OpenAssignment],
    config: &DispatchConfig,
) -> Vec<RebalanceMove> {
    let mut overloaded: Vec<&StaffMember> = pool
        .iter()
        .filter(|s| capacity::classify(s, &config.capacity) == LoadLevel::Overloaded)
        .collect();
    let mut underloaded: Vec<&StaffMember> = pool
        .iter()
        .filter(|s| capacity::is_underloaded(s, &config.capacity))
        .collect();

    if underloaded.is_empty() {
        log::debug!("rebalance: no underloaded staff, proposing nothing");
        return Vec::new();
    }

    // Deterministic visiting order: most loaded sources first, least loaded
    // targets first, ids as tiebreak.
    overloaded.sort_by(|a, b| {
        capacity::workload_percentage(b)
            .cmp(&capacity::workload_percentage(a))
            .then_with(|| a.staff_id.cmp(&b.staff_id))
    });
    underloaded.sort_by(|a, b| {
        capacity::workload_percentage(a)
            .cmp(&capacity::workload_percentage(b))
            .then_with(|| a.staff_id.cmp(&b.staff_id))
    });

    let mut moves = Vec::new();
    let mut projected: HashMap<&str, u32> = underloaded
        .iter()
        .map(|s| (s.staff_id.as_str(), s.current_workload))
        .collect();
    let mut cursor = 0usize;

    for source in &overloaded {
        let mut candidates: Vec<&OpenAssignment> = open_assignments
            .iter()
            .filter(|a| a.assignment.staff_id == source.staff_id && a.is_movable())
            .collect();
        candidates.sort_by(|a, b| {
            b.response_due_at
                .cmp(&a.response_due_at)
                .then_with(|| a.assignment.assignment_id.cmp(&b.assignment.assignment_id))
        });

        for candidate in candidates.into_iter().take(config.rebalance.max_moves_per_source) {
            // Round-robin over targets, skipping any that a further move
            // would push past capacity.
            let mut target = None;
            for _ in 0..underloaded.len() {
                let t = underloaded[cursor % underloaded.len()];
                cursor += 1;
                let load = projected[t.staff_id.as_str()];
                if load < t.max_concurrent_capacity {
                    target = Some(t);
                    break;
                }
            }
            let Some(target) = target else {
                log::debug!("rebalance: all targets at capacity, stopping");
                return moves;
            };

            *projected.get_mut(target.staff_id.as_str()).unwrap() += 1;
            moves.push(RebalanceMove {
                assignment_id: candidate.assignment.assignment_id.clone(),
                from_staff: source.staff_id.clone(),
                to_staff: target.staff_id.clone(),
            });
        }
    }

    log::debug!(
        "rebalance: proposed {} moves from {} overloaded to {} underloaded staff",
        moves.len(),
        overloaded.len(),
        underloaded.len()
    );
    moves
}
