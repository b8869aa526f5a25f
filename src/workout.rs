//! Workout history model - records as they are persisted in the history store

use serde::{Deserialize, Serialize};

use crate::stats::records::calculate_set_volume;

/// A finished workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    /// Creation time, milliseconds since epoch
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub exercises: Vec<ExerciseSession>,
}

/// One exercise performed within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSession {
    pub exercise_id: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Single set: weight in kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub weight: f64,
    pub reps: u32,
    #[serde(default)]
    pub completed: bool,
    /// Moment a personal record was achieved on this set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl WorkoutSet {
    pub fn new(weight: f64, reps: u32) -> Self {
        Self {
            weight,
            reps,
            completed: true,
            timestamp: None,
        }
    }

    /// Completed with positive weight and reps; everything else is ignored by stats
    pub fn is_valid(&self) -> bool {
        self.completed && self.weight > 0.0 && self.reps > 0
    }

    pub fn volume(&self) -> f64 {
        calculate_set_volume(self.weight, self.reps)
    }
}

impl ExerciseSession {
    pub fn valid_sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sets.iter().filter(|s| s.is_valid())
    }
}

impl WorkoutRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: i64,
        duration_ms: u64,
        exercises: Vec<ExerciseSession>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: Some(timestamp),
            duration_ms,
            exercises,
        }
    }

    /// Total volume (kg x reps) over valid sets
    pub fn total_volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.valid_sets())
            .map(|s| s.volume())
            .sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.valid_sets().count()).sum()
    }
}
