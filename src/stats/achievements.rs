//! Achievement badges unlocked from workout history

use serde::{Deserialize, Serialize};

use super::streak::Streaks;
use crate::workout::WorkoutRecord;

/// Volume (kg x reps) a single workout must reach for `TonSession`
const TON_SESSION_VOLUME: f64 = 1000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstWorkout,
    TenWorkouts,
    FiftyWorkouts,
    HundredWorkouts,
    WeekStreak,
    MonthStreak,
    TonSession,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "First Workout",
            Achievement::TenWorkouts => "Ten Workouts",
            Achievement::FiftyWorkouts => "Fifty Workouts",
            Achievement::HundredWorkouts => "Hundred Workouts",
            Achievement::WeekStreak => "Week Streak",
            Achievement::MonthStreak => "Month Streak",
            Achievement::TonSession => "Ton Session",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "log your first workout",
            Achievement::TenWorkouts => "log 10 workouts",
            Achievement::FiftyWorkouts => "log 50 workouts",
            Achievement::HundredWorkouts => "log 100 workouts",
            Achievement::WeekStreak => "train 7 days in a row",
            Achievement::MonthStreak => "train 30 days in a row",
            Achievement::TonSession => "move 1000kg in one workout",
        }
    }

    /// Catalogue order
    pub fn all() -> &'static [Achievement] {
        &[
            Achievement::FirstWorkout,
            Achievement::TenWorkouts,
            Achievement::FiftyWorkouts,
            Achievement::HundredWorkouts,
            Achievement::WeekStreak,
            Achievement::MonthStreak,
            Achievement::TonSession,
        ]
    }

    /// Achievements earned by `history`, in catalogue order
    pub fn unlocked(history: &[WorkoutRecord], streaks: &Streaks) -> Vec<Achievement> {
        let workouts = history.len();
        let best_session = history
            .iter()
            .map(|w| w.total_volume())
            .fold(0.0, f64::max);

        Self::all()
            .iter()
            .copied()
            .filter(|a| match a {
                Achievement::FirstWorkout => workouts >= 1,
                Achievement::TenWorkouts => workouts >= 10,
                Achievement::FiftyWorkouts => workouts >= 50,
                Achievement::HundredWorkouts => workouts >= 100,
                Achievement::WeekStreak => streaks.longest_streak >= 7,
                Achievement::MonthStreak => streaks.longest_streak >= 30,
                Achievement::TonSession => best_session >= TON_SESSION_VOLUME,
            })
            .collect()
    }
}
