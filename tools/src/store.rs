//! SQLite decision log for scenario runs.
//!
//! RULE: only store.rs talks to the database. The runner calls store
//! methods; it never executes SQL directly. The core library never sees
//! this file at all — persistence belongs to callers.

use anyhow::Result;
use rusqlite::{params, Connection};

pub struct RunStore {
    conn: Connection,
}

impl RunStore {
    /// Open (or create) the decision log at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory log (used in tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_runner.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        seed: u64,
        days: u64,
        staff_count: u64,
        version: &str,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, days, staff_count, version)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, seed as i64, days as i64, staff_count as i64, version],
        )?;
        Ok(())
    }

    // ── Decisions ──────────────────────────────────────────────

    pub fn insert_decision(
        &self,
        run_id: &str,
        day: u64,
        item_id: &str,
        priority: &str,
        outcome: &str,
        staff_id: Option<&str>,
        score: Option<f64>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO decision (run_id, day, item_id, priority, outcome, staff_id, score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![run_id, day as i64, item_id, priority, outcome, staff_id, score],
        )?;
        Ok(())
    }

    pub fn decision_count(&self, run_id: &str, outcome: &str) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM decision WHERE run_id = ?1 AND outcome = ?2",
            params![run_id, outcome],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Rebalance moves ────────────────────────────────────────

    pub fn insert_move(
        &self,
        run_id: &str,
        day: u64,
        assignment_id: &str,
        from_staff: &str,
        to_staff: &str,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO rebalance_move (run_id, day, assignment_id, from_staff, to_staff)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, day as i64, assignment_id, from_staff, to_staff],
        )?;
        Ok(())
    }

    pub fn move_count(&self, run_id: &str) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM rebalance_move WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
