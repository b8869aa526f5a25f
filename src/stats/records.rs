//! Personal records: estimated 1RM, heaviest set and best set volume

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::workout::{WorkoutRecord, WorkoutSet};

/// Epley estimate; a single rep is the lift itself, zero reps estimate nothing
pub fn calculate_1rm(weight: f64, reps: u32) -> f64 {
    match reps {
        0 => 0.0,
        1 => weight,
        _ => weight * (1.0 + reps as f64 / 30.0),
    }
}

pub fn calculate_set_volume(weight: f64, reps: u32) -> f64 {
    weight * reps as f64
}

/// Best values for one exercise, derived from history on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecords {
    pub one_rep_max: f64,
    pub max_weight: f64,
    pub max_volume: f64,
    /// Timestamp of the workout that produced the best 1RM (0 = none)
    pub last_updated: i64,
}

/// Outcome of comparing a candidate set against existing records.
/// Each field holds the new value when that record was broken.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrCheck {
    pub new_1rm: Option<f64>,
    pub new_max_weight: Option<f64>,
    pub new_max_volume: Option<f64>,
}

impl PrCheck {
    pub fn is_new_1rm(&self) -> bool {
        self.new_1rm.is_some()
    }

    pub fn is_new_max_weight(&self) -> bool {
        self.new_max_weight.is_some()
    }

    pub fn is_new_max_volume(&self) -> bool {
        self.new_max_volume.is_some()
    }

    pub fn any(&self) -> bool {
        self.is_new_1rm() || self.is_new_max_weight() || self.is_new_max_volume()
    }

    /// Short human-readable summary, e.g. "1RM 105.0kg, volume 500kg"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(v) = self.new_1rm {
            parts.push(format!("1RM {:.1}kg", v));
        }
        if let Some(v) = self.new_max_weight {
            parts.push(format!("weight {:.1}kg", v));
        }
        if let Some(v) = self.new_max_volume {
            parts.push(format!("volume {:.0}kg", v));
        }
        parts.join(", ")
    }
}

/// Personal record calculator over workout history
pub struct PrCalculator;

impl PrCalculator {
    /// Records for one exercise; workouts without a timestamp count as "now"
    pub fn calculate(history: &[WorkoutRecord], exercise_id: &str) -> PersonalRecords {
        Self::calculate_at(history, exercise_id, Utc::now().timestamp_millis())
    }

    /// Same as [`PrCalculator::calculate`] with an explicit fallback timestamp
    pub fn calculate_at(
        history: &[WorkoutRecord],
        exercise_id: &str,
        now_ms: i64,
    ) -> PersonalRecords {
        let mut prs = PersonalRecords::default();

        for workout in history {
            let sessions = workout.exercises.iter().filter(|e| e.exercise_id == exercise_id);
            for session in sessions {
                for set in session.valid_sets() {
                    Self::accumulate(&mut prs, set, workout.timestamp.unwrap_or(now_ms));
                }
            }
        }

        prs
    }

    /// Records for every exercise id present in history
    pub fn all(history: &[WorkoutRecord]) -> BTreeMap<String, PersonalRecords> {
        let now_ms = Utc::now().timestamp_millis();
        let mut by_exercise: BTreeMap<String, PersonalRecords> = BTreeMap::new();

        for workout in history {
            for session in &workout.exercises {
                for set in session.valid_sets() {
                    let prs = by_exercise.entry(session.exercise_id.clone()).or_default();
                    Self::accumulate(prs, set, workout.timestamp.unwrap_or(now_ms));
                }
            }
        }

        by_exercise
    }

    fn accumulate(prs: &mut PersonalRecords, set: &WorkoutSet, workout_ts: i64) {
        let estimated = calculate_1rm(set.weight, set.reps);
        if estimated > prs.one_rep_max {
            prs.one_rep_max = estimated;
            prs.last_updated = workout_ts;
        }
        prs.max_weight = prs.max_weight.max(set.weight);
        prs.max_volume = prs.max_volume.max(calculate_set_volume(set.weight, set.reps));
    }

    /// Compare a candidate set against records computed before it was counted
    pub fn check(weight: f64, reps: u32, current: &PersonalRecords) -> PrCheck {
        let estimated = calculate_1rm(weight, reps);
        let volume = calculate_set_volume(weight, reps);

        PrCheck {
            new_1rm: (estimated > current.one_rep_max).then_some(estimated),
            new_max_weight: (weight > current.max_weight).then_some(weight),
            new_max_volume: (volume > current.max_volume).then_some(volume),
        }
    }

    /// Check a set and stamp its timestamp when it broke any record
    pub fn stamp(set: &mut WorkoutSet, current: &PersonalRecords, now_ms: i64) -> PrCheck {
        if !set.is_valid() {
            return PrCheck::default();
        }

        let check = Self::check(set.weight, set.reps, current);
        if check.any() {
            set.timestamp = Some(now_ms);
        }
        check
    }

    /// Stamp sets logged together, in order; each set is compared against
    /// `current` plus the valid sets before it
    pub fn stamp_all(
        sets: &mut [WorkoutSet],
        mut current: PersonalRecords,
        now_ms: i64,
    ) -> Vec<PrCheck> {
        sets.iter_mut()
            .map(|set| {
                let check = Self::stamp(set, &current, now_ms);
                if set.is_valid() {
                    Self::accumulate(&mut current, set, now_ms);
                }
                check
            })
            .collect()
    }
}
