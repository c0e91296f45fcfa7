//! Workload ledger: the one stateful piece of the core.
//!
//! Every workload change goes through `commit`, which enforces a
//! single-writer-per-record discipline with an optimistic version check.
//! Two writers that both read version N cannot both commit against it; the
//! loser gets a conflict and must retry against a fresh read. This is the
//! one correctness-critical race in the subsystem.

use crate::{
    error::{DispatchError, DispatchResult},
    staff::StaffMember,
    types::StaffId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub workload: u32,
    pub capacity: u32,
    pub version: u64,
}

#[derive(Debug, Default)]
pub struct WorkloadLedger {
    entries: HashMap<StaffId, LedgerEntry>,
}

impl WorkloadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a staff record, seeding the counter from the roster
    /// snapshot. Re-registering an already known record updates capacity
    /// but keeps the authoritative workload and version.
    pub fn register(&mut self, staff: &StaffMember) {
        self.entries
            .entry(staff.staff_id.clone())
            .and_modify(|e| e.capacity = staff.max_concurrent_capacity)
            .or_insert(LedgerEntry {
                workload: staff.current_workload,
                capacity: staff.max_concurrent_capacity,
                version: 0,
            });
    }

    pub fn entry(&self, staff_id: &str) -> DispatchResult<LedgerEntry> {
        self.entries
            .get(staff_id)
            .copied()
            .ok_or_else(|| DispatchError::UnknownStaff {
                staff_id: staff_id.to_string(),
            })
    }

    pub fn workload(&self, staff_id: &str) -> DispatchResult<u32> {
        Ok(self.entry(staff_id)?.workload)
    }

    /// Apply a workload delta against a previously read version.
    ///
    /// Fails with `ConcurrencyConflict` when the record changed since the
    /// read, and when the delta would take the counter below zero or past
    /// capacity (a stale snapshot is the only way to get there). Returns
    /// the new version on success.
    pub fn commit(&mut self, staff_id: &str, expected_version: u64, delta: i32) -> DispatchResult<u64> {
        let entry = self
            .entries
            .get_mut(staff_id)
            .ok_or_else(|| DispatchError::UnknownStaff {
                staff_id: staff_id.to_string(),
            })?;

        if entry.version != expected_version {
            return Err(DispatchError::ConcurrencyConflict {
                staff_id: staff_id.to_string(),
                expected: expected_version,
                actual: entry.version,
            });
        }

        let new_workload = entry.workload as i64 + delta as i64;
        if new_workload < 0 || new_workload > entry.capacity as i64 {
            log::warn!(
                "staff={staff_id} refused workload commit: {} {delta:+} outside [0, {}]",
                entry.workload,
                entry.capacity
            );
            return Err(DispatchError::ConcurrencyConflict {
                staff_id: staff_id.to_string(),
                expected: expected_version,
                actual: entry.version,
            });
        }

        entry.workload = new_workload as u32;
        entry.version += 1;
        Ok(entry.version)
    }
}
