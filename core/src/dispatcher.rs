//! The dispatcher — thin orchestration over the pure components.
//!
//! OPERATION ORDER for a new item (fixed, documented):
//!   1. SLA clock stamps deadlines (at item construction).
//!   2. Candidate scorer + selector pick an owner from the roster snapshot.
//!   3. The workload ledger commits the increment (the only stateful step).
//!   4. An assignment link is opened.
//!
//! RULES:
//!   - Scoring and selection never mutate anything.
//!   - Every workload change goes through the ledger commit, nowhere else.
//!   - Rebalance proposals are advisory; only apply_moves touches state,
//!     and applying the same move list twice is a no-op the second time.

use crate::{
    assignment::{Assignment, AssignmentSource, OpenAssignment},
    config::DispatchConfig,
    error::{DispatchError, DispatchResult},
    item::{AssignableItem, ItemStatus},
    ledger::WorkloadLedger,
    rebalance::{self, RebalanceMove},
    selector::{self, DeclineReason, Selection},
    staff::StaffMember,
    types::{AssignmentId, StaffId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of routing one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AssignmentDecision {
    Assigned {
        assignment_id: AssignmentId,
        staff_id: StaffId,
        score: f64,
    },
    Declined {
        reason: DeclineReason,
    },
}

pub struct Dispatcher {
    config: DispatchConfig,
    ledger: WorkloadLedger,
    open: HashMap<AssignmentId, OpenAssignment>,
}

impl Dispatcher {
    /// Panics on inconsistent configuration; see `DispatchConfig::validate`.
    pub fn new(config: DispatchConfig) -> Self {
        config.validate();
        Self {
            config,
            ledger: WorkloadLedger::new(),
            open: HashMap::new(),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn ledger(&self) -> &WorkloadLedger {
        &self.ledger
    }

    /// Open workload count for one staff member, from the authoritative
    /// ledger rather than any roster snapshot.
    pub fn workload(&self, staff_id: &str) -> DispatchResult<u32> {
        self.ledger.workload(staff_id)
    }

    pub fn open_assignment(&self, assignment_id: &str) -> Option<&OpenAssignment> {
        self.open.get(assignment_id)
    }

    pub fn open_assignments(&self) -> impl Iterator<Item = &OpenAssignment> {
        self.open.values()
    }

    /// Route one item against a roster snapshot.
    ///
    /// Workload counts in the snapshot are refreshed from the ledger before
    /// scoring, so a caller holding a stale roster cannot overcommit a staff
    /// member the dispatcher already loaded up.
    pub fn dispatch(
        &mut self,
        item: &AssignableItem,
        pool: &[StaffMember],
        now: DateTime<Utc>,
    ) -> DispatchResult<AssignmentDecision> {
        if item.status != ItemStatus::Unassigned {
            return Err(DispatchError::validation(format!(
                "item {} is not unassigned (status {:?})",
                item.item_id, item.status
            )));
        }

        for staff in pool {
            self.ledger.register(staff);
        }
        let effective = self.refresh_pool(pool)?;
        let selection = selector::select(item, &effective, &self.config);
        let Selection::Selected { staff_id, score } = selection else {
            return Ok(AssignmentDecision::Declined {
                reason: DeclineReason::NoEligibleStaff,
            });
        };

        let entry = self.ledger.entry(&staff_id)?;
        self.ledger.commit(&staff_id, entry.version, 1)?;

        let assignment = Assignment::open(&item.item_id, &staff_id, now, AssignmentSource::Auto);
        let assignment_id = assignment.assignment_id.clone();
        log::debug!(
            "item={} assigned to staff={staff_id} score={score:.1} source=auto",
            item.item_id
        );
        self.track(assignment, item);

        Ok(AssignmentDecision::Assigned {
            assignment_id,
            staff_id,
            score,
        })
    }

    /// Manual assignment: bypasses scoring, keeps the junior/critical
    /// safety constraint and the capacity-bounded ledger commit.
    pub fn assign_manual(
        &mut self,
        item: &AssignableItem,
        staff: &StaffMember,
        now: DateTime<Utc>,
    ) -> DispatchResult<Assignment> {
        selector::validate_manual(item, staff)?;
        self.ledger.register(staff);
        let entry = self.ledger.entry(&staff.staff_id)?;
        self.ledger.commit(&staff.staff_id, entry.version, 1)?;

        let assignment = Assignment::open(
            &item.item_id,
            &staff.staff_id,
            now,
            AssignmentSource::Manual,
        );
        log::debug!(
            "item={} assigned to staff={} source=manual",
            item.item_id,
            staff.staff_id
        );
        self.track(assignment.clone(), item);
        Ok(assignment)
    }

    /// Mark an open assignment's item as picked up. In-progress items are
    /// never proposed for rebalancing.
    pub fn start_progress(&mut self, assignment_id: &str) -> DispatchResult<()> {
        let open = self.open.get_mut(assignment_id).ok_or_else(|| {
            DispatchError::UnknownAssignment {
                assignment_id: assignment_id.to_string(),
            }
        })?;
        open.item_status = ItemStatus::InProgress;
        Ok(())
    }

    /// Close an assignment: decrement the owner's workload and retire the
    /// link. Returns the closed assignment record.
    pub fn close(
        &mut self,
        assignment_id: &str,
        resolved_at: DateTime<Utc>,
    ) -> DispatchResult<Assignment> {
        let open = self.open.remove(assignment_id).ok_or_else(|| {
            DispatchError::UnknownAssignment {
                assignment_id: assignment_id.to_string(),
            }
        })?;

        let entry = self.ledger.entry(&open.assignment.staff_id)?;
        self.ledger.commit(&open.assignment.staff_id, entry.version, -1)?;

        let mut assignment = open.assignment;
        assignment.resolved_at = Some(resolved_at);
        Ok(assignment)
    }

    /// Propose rebalance moves over the current open set. Pure; applies
    /// nothing.
    pub fn propose_rebalance(&self, pool: &[StaffMember]) -> DispatchResult<Vec<RebalanceMove>> {
        let effective = self.refresh_pool(pool)?;
        let mut open: Vec<OpenAssignment> = self.open.values().cloned().collect();
        open.sort_by(|a, b| a.assignment.assignment_id.cmp(&b.assignment.assignment_id));
        Ok(rebalance::propose_rebalance(&effective, &open, &self.config))
    }

    /// Apply proposed moves. Idempotent: a move only applies while the
    /// assignment still belongs to its `from_staff`, so re-applying a list
    /// (a retried batch) changes nothing the second time. Moves whose
    /// target no longer fits are skipped, not errors. Returns the number
    /// of moves applied.
    pub fn apply_moves(
        &mut self,
        moves: &[RebalanceMove],
        pool: &[StaffMember],
        now: DateTime<Utc>,
    ) -> DispatchResult<usize> {
        for staff in pool {
            self.ledger.register(staff);
        }

        let mut applied = 0;
        for mv in moves {
            let Some(open) = self.open.get(&mv.assignment_id) else {
                log::debug!("move {} skipped: assignment gone", mv.assignment_id);
                continue;
            };
            if open.assignment.staff_id != mv.from_staff {
                log::debug!(
                    "move {} skipped: assignment no longer held by {}",
                    mv.assignment_id,
                    mv.from_staff
                );
                continue;
            }

            let to_entry = self.ledger.entry(&mv.to_staff)?;
            if to_entry.workload >= to_entry.capacity {
                log::warn!(
                    "move {} skipped: target {} at capacity",
                    mv.assignment_id,
                    mv.to_staff
                );
                continue;
            }

            let from_entry = self.ledger.entry(&mv.from_staff)?;
            self.ledger.commit(&mv.from_staff, from_entry.version, -1)?;
            self.ledger.commit(&mv.to_staff, to_entry.version, 1)?;

            // Supersede the old link with a fresh rebalance-sourced one.
            let old = self.open.remove(&mv.assignment_id).unwrap();
            let replacement = Assignment::open(
                &old.assignment.item_id,
                &mv.to_staff,
                now,
                AssignmentSource::Rebalance,
            );
            log::debug!(
                "item={} moved {} -> {} (assignment {} supersedes {})",
                old.assignment.item_id,
                mv.from_staff,
                mv.to_staff,
                replacement.assignment_id,
                mv.assignment_id
            );
            self.open.insert(
                replacement.assignment_id.clone(),
                OpenAssignment {
                    assignment: replacement,
                    item_status: old.item_status,
                    response_due_at: old.response_due_at,
                },
            );
            applied += 1;
        }
        Ok(applied)
    }

    /// Clone the roster snapshot with workload counts replaced by the
    /// ledger's authoritative values where known. Staff the ledger has not
    /// seen keep their snapshot counts.
    fn refresh_pool(&self, pool: &[StaffMember]) -> DispatchResult<Vec<StaffMember>> {
        pool.iter()
            .map(|staff| {
                let mut s = staff.clone();
                if let Ok(workload) = self.ledger.workload(&s.staff_id) {
                    s.current_workload = workload;
                }
                Ok(s)
            })
            .collect()
    }

    fn track(&mut self, assignment: Assignment, item: &AssignableItem) {
        self.open.insert(
            assignment.assignment_id.clone(),
            OpenAssignment {
                assignment,
                item_status: ItemStatus::Assigned,
                response_due_at: item.response_due_at,
            },
        );
    }
}
