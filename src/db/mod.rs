//! Database module - SQLite storage for workout history and settings
//!
//! Workouts are stored as JSON documents keyed by id. Small records such as
//! the active macro goals live in a string-keyed JSON table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::nutrition::{BodyStats, MacroGoals};
use crate::workout::WorkoutRecord;

const GOALS_KEY: &str = "goals";
const BODY_STATS_KEY: &str = "body_stats";

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path))?;
        let db = Self { conn };
        db.init_schema()?;
        debug!("Opened database at {}", path);
        Ok(db)
    }

    /// Fresh database that lives only as long as the value
    pub fn open_in_memory() -> Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                timestamp INTEGER,
                body TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Append a finished workout
    pub fn add_workout(&self, workout: &WorkoutRecord) -> Result<()> {
        let body = serde_json::to_string(workout)?;
        self.conn
            .execute(
                "INSERT INTO workouts (id, timestamp, body) VALUES (?1, ?2, ?3)",
                params![workout.id, workout.timestamp, body],
            )
            .with_context(|| format!("Failed to save workout {}", workout.id))?;
        info!("Saved workout {} ({} exercises)", workout.id, workout.exercises.len());
        Ok(())
    }

    /// `base`, or `base-N` for the smallest N not already taken
    pub fn unused_workout_id(&self, base: &str) -> Result<String> {
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while self.workout_exists(&candidate)? {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }

    fn workout_exists(&self, id: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM workouts WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Full history, oldest first. Rows that no longer parse are skipped.
    pub fn get_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM workouts ORDER BY timestamp ASC, rowid ASC")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let workouts = rows
            .into_iter()
            .filter_map(|(id, body)| match serde_json::from_str(&body) {
                Ok(workout) => Some(workout),
                Err(e) => {
                    warn!("Skipping malformed workout {}: {}", id, e);
                    None
                }
            })
            .collect();

        Ok(workouts)
    }

    /// Insert workouts whose id is not stored yet; returns how many were added
    pub fn merge_workouts(&self, workouts: &[WorkoutRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        for workout in workouts {
            let body = serde_json::to_string(workout)?;
            inserted += tx.execute(
                "INSERT OR IGNORE INTO workouts (id, timestamp, body) VALUES (?1, ?2, ?3)",
                params![workout.id, workout.timestamp, body],
            )?;
        }
        tx.commit()?;

        info!("Merged {} of {} workouts", inserted, workouts.len());
        Ok(inserted)
    }

    /// Remove the whole history; returns the number of workouts deleted
    pub fn clear_history(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM workouts", [])?;
        info!("Cleared {} workouts", removed);
        Ok(removed)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;

        match value {
            Some(v) => {
                let parsed = serde_json::from_str(&v)
                    .with_context(|| format!("Invalid value stored under '{}'", key))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Store a value, replacing whatever was under `key`
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])? > 0)
    }

    pub fn save_goals(&self, goals: &MacroGoals) -> Result<()> {
        self.set_json(GOALS_KEY, goals)
    }

    pub fn get_goals(&self) -> Result<Option<MacroGoals>> {
        self.get_json(GOALS_KEY)
    }

    pub fn save_body_stats(&self, stats: &BodyStats) -> Result<()> {
        self.set_json(BODY_STATS_KEY, stats)
    }

    pub fn get_body_stats(&self) -> Result<Option<BodyStats>> {
        self.get_json(BODY_STATS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{ActivityLevel, Gender, Goal};
    use crate::workout::{ExerciseSession, WorkoutSet};

    fn create_workout(id: &str, timestamp: i64) -> WorkoutRecord {
        WorkoutRecord::new(
            id,
            timestamp,
            45 * 60 * 1000,
            vec![ExerciseSession {
                exercise_id: "squat".to_string(),
                sets: vec![WorkoutSet::new(100.0, 5)],
                note: Some("felt strong".to_string()),
            }],
        )
    }

    #[test]
    fn test_add_and_get_workouts_oldest_first() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout(&create_workout("b", 2000)).unwrap();
        db.add_workout(&create_workout("a", 1000)).unwrap();

        let workouts = db.get_workouts().unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].id, "a");
        assert_eq!(workouts[1], create_workout("b", 2000));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout(&create_workout("a", 1000)).unwrap();
        assert!(db.add_workout(&create_workout("a", 1000)).is_err());
    }

    #[test]
    fn test_merge_by_id() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout(&create_workout("a", 1000)).unwrap();

        let batch = vec![
            create_workout("a", 1000),
            create_workout("b", 2000),
            create_workout("c", 3000),
        ];
        assert_eq!(db.merge_workouts(&batch).unwrap(), 2);
        // Merging again adds nothing
        assert_eq!(db.merge_workouts(&batch).unwrap(), 0);
        assert_eq!(db.get_workouts().unwrap().len(), 3);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout(&create_workout("a", 1000)).unwrap();
        db.conn
            .execute(
                "INSERT INTO workouts (id, timestamp, body) VALUES ('bad', 500, '{not json')",
                [],
            )
            .unwrap();

        let workouts = db.get_workouts().unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id, "a");
    }

    #[test]
    fn test_unused_workout_id_same_millisecond() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.unused_workout_id("1000").unwrap(), "1000");

        db.add_workout(&create_workout("1000", 1000)).unwrap();
        let second = db.unused_workout_id("1000").unwrap();
        assert_eq!(second, "1000-1");

        db.add_workout(&create_workout(&second, 1000)).unwrap();
        assert_eq!(db.unused_workout_id("1000").unwrap(), "1000-2");
        assert_eq!(db.get_workouts().unwrap().len(), 2);
    }

    #[test]
    fn test_clear_history() {
        let db = Database::open_in_memory().unwrap();
        db.add_workout(&create_workout("a", 1000)).unwrap();
        db.add_workout(&create_workout("b", 2000)).unwrap();

        assert_eq!(db.clear_history().unwrap(), 2);
        assert!(db.get_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_goals_overwritten() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_goals().unwrap().is_none());

        let first = MacroGoals { calories: 2000, protein: 150, carbs: 200, fat: 60 };
        let second = MacroGoals { calories: 2672, protein: 143, carbs: 372, fat: 68 };
        db.save_goals(&first).unwrap();
        db.save_goals(&second).unwrap();

        assert_eq!(db.get_goals().unwrap(), Some(second));
    }

    #[test]
    fn test_body_stats_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let stats = BodyStats {
            height_cm: 180.0,
            weight_kg: 82.5,
            age: 31.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::VeryActive,
            goal: Goal::GainMuscle,
        };
        db.save_body_stats(&stats).unwrap();
        assert_eq!(db.get_body_stats().unwrap(), Some(stats));
    }

    #[test]
    fn test_remove_key() {
        let db = Database::open_in_memory().unwrap();
        db.set_json("theme", &"dark").unwrap();
        assert_eq!(db.get_json::<String>("theme").unwrap().as_deref(), Some("dark"));
        assert!(db.remove("theme").unwrap());
        assert!(!db.remove("theme").unwrap());
        assert!(db.get_json::<String>("theme").unwrap().is_none());
    }
}
