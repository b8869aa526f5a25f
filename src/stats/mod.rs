//! Stats module - Derived values over workout history
//!
//! Features:
//! - Personal records per exercise (1RM, max weight, max volume)
//! - Current and longest workout streaks
//! - Achievement badges

pub mod achievements;
pub mod records;
pub mod streak;

pub use achievements::Achievement;
pub use records::{PersonalRecords, PrCalculator, PrCheck};
pub use streak::{StreakCalculator, Streaks};

use std::collections::BTreeMap;

use crate::workout::WorkoutRecord;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Training analytics
pub struct Analytics {
    history: Vec<WorkoutRecord>,
}

impl Analytics {
    pub fn new(history: Vec<WorkoutRecord>) -> Self {
        Self { history }
    }

    pub fn workout_count(&self) -> usize {
        self.history.len()
    }

    pub fn personal_records(&self, exercise_id: &str) -> PersonalRecords {
        PrCalculator::calculate(&self.history, exercise_id)
    }

    pub fn all_records(&self) -> BTreeMap<String, PersonalRecords> {
        PrCalculator::all(&self.history)
    }

    pub fn streaks(&self) -> Streaks {
        StreakCalculator::calculate(&self.history)
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        Achievement::unlocked(&self.history, &self.streaks())
    }

    /// Total volume (kg x reps) of valid sets for an exercise
    pub fn total_volume(&self, exercise_id: &str) -> f64 {
        self.history
            .iter()
            .flat_map(|w| &w.exercises)
            .filter(|e| e.exercise_id == exercise_id)
            .flat_map(|e| e.valid_sets())
            .map(|s| s.volume())
            .sum()
    }

    /// Get training frequency (sessions per week)
    pub fn weekly_frequency(&self) -> f64 {
        let timestamps: Vec<i64> = self.history.iter().filter_map(|w| w.timestamp).collect();
        if timestamps.len() < 2 {
            return 0.0;
        }

        let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) else {
            return 0.0;
        };
        let days = ((last - first) as f64 / MS_PER_DAY).floor();

        if days == 0.0 {
            return timestamps.len() as f64;
        }

        (timestamps.len() as f64 / days) * 7.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{ExerciseSession, WorkoutSet};

    const DAY_MS: i64 = 86_400_000;

    fn create_workout(exercise_id: &str, weight: f64, reps: u32, timestamp: i64) -> WorkoutRecord {
        WorkoutRecord::new(
            timestamp.to_string(),
            timestamp,
            0,
            vec![ExerciseSession {
                exercise_id: exercise_id.to_string(),
                sets: vec![WorkoutSet::new(weight, reps)],
                note: None,
            }],
        )
    }

    #[test]
    fn test_analytics_new() {
        let analytics = Analytics::new(vec![]);
        assert_eq!(analytics.workout_count(), 0);
        assert_eq!(analytics.personal_records("squat"), PersonalRecords::default());
        assert_eq!(analytics.streaks(), Streaks::default());
    }

    #[test]
    fn test_total_volume_single_exercise() {
        let history = vec![
            create_workout("squat", 100.0, 5, 0),
            create_workout("squat", 80.0, 10, DAY_MS),
            create_workout("bench_press", 60.0, 10, DAY_MS),
        ];
        let analytics = Analytics::new(history);
        assert_eq!(analytics.total_volume("squat"), 1300.0);
        assert_eq!(analytics.total_volume("deadlift"), 0.0);
    }

    #[test]
    fn test_all_records() {
        let history = vec![
            create_workout("squat", 100.0, 5, 0),
            create_workout("bench_press", 60.0, 10, DAY_MS),
        ];
        let analytics = Analytics::new(history);
        let records = analytics.all_records();
        assert_eq!(records.keys().collect::<Vec<_>>(), vec!["bench_press", "squat"]);
    }

    #[test]
    fn test_weekly_frequency_empty() {
        assert_eq!(Analytics::new(vec![]).weekly_frequency(), 0.0);
    }

    #[test]
    fn test_weekly_frequency_same_day() {
        let history = vec![
            create_workout("squat", 100.0, 5, 0),
            create_workout("squat", 100.0, 5, 1000),
        ];
        assert_eq!(Analytics::new(history).weekly_frequency(), 2.0);
    }

    #[test]
    fn test_weekly_frequency_over_week() {
        let history = vec![
            create_workout("squat", 100.0, 5, 0),
            create_workout("squat", 100.0, 5, 7 * DAY_MS),
        ];
        let freq = Analytics::new(history).weekly_frequency();
        assert!((freq - 2.0).abs() < 0.1, "Expected ~2, got {}", freq);
    }

    #[test]
    fn test_achievements_first_workout() {
        let analytics = Analytics::new(vec![create_workout("squat", 100.0, 5, 0)]);
        assert!(analytics.achievements().contains(&Achievement::FirstWorkout));
    }
}
