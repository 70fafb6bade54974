//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The engine calls store
//! methods — nothing else executes SQL. Writes are fire-and-forget from
//! the engine's point of view: there is a single writer, so
//! last-write-wins is fine.

use crate::{
    error::GameResult,
    event::EventLogEntry,
    pet::{InventoryCounts, PetSnapshot},
    types::EpochMs,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Save slot ──────────────────────────────────────────────

    /// Persist the whole snapshot. Replaces any previous save under the
    /// same id.
    pub fn save(
        &self,
        save_id: &str,
        pet: &PetSnapshot,
        inventory: &InventoryCounts,
        now_ms: EpochMs,
    ) -> GameResult<()> {
        let pet_json = serde_json::to_string(pet)?;
        let inventory_json = serde_json::to_string(inventory)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO save (save_id, pet_json, inventory_json, saved_at_ms)
             VALUES (?1, ?2, ?3, ?4)",
            params![save_id, pet_json, inventory_json, now_ms],
        )?;
        Ok(())
    }

    /// Load a save. A corrupt row is logged and treated as absent — the
    /// caller reinitializes rather than crashing on bad bytes.
    pub fn load(&self, save_id: &str) -> GameResult<Option<(PetSnapshot, InventoryCounts)>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT pet_json, inventory_json FROM save WHERE save_id = ?1",
                params![save_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((pet_json, inventory_json)) = row else {
            return Ok(None);
        };

        let pet: PetSnapshot = match serde_json::from_str(&pet_json) {
            Ok(pet) => pet,
            Err(e) => {
                log::error!("corrupt pet save for '{save_id}', starting fresh: {e}");
                return Ok(None);
            }
        };
        let inventory: InventoryCounts = match serde_json::from_str(&inventory_json) {
            Ok(inv) => inv,
            Err(e) => {
                log::error!("corrupt inventory for '{save_id}', using empty counts: {e}");
                InventoryCounts::default()
            }
        };
        Ok(Some((pet, inventory)))
    }

    /// Delete a save and its event history (the external reset path).
    pub fn clear(&self, save_id: &str) -> GameResult<()> {
        self.conn
            .execute("DELETE FROM save WHERE save_id = ?1", params![save_id])?;
        self.conn
            .execute("DELETE FROM event_log WHERE save_id = ?1", params![save_id])?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (save_id, at_ms, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.save_id, entry.at_ms, entry.event_type, entry.payload],
        )?;
        Ok(())
    }

    pub fn events_for_save(&self, save_id: &str) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, save_id, at_ms, event_type, payload
             FROM event_log WHERE save_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![save_id], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    save_id: row.get(1)?,
                    at_ms: row.get(2)?,
                    event_type: row.get(3)?,
                    payload: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, save_id: &str, event_type: &str) -> GameResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE save_id = ?1 AND event_type = ?2",
            params![save_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
