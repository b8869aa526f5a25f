//! Consecutive-day workout streaks

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::workout::WorkoutRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Streak calculator over calendar days containing a workout with a valid set
pub struct StreakCalculator;

impl StreakCalculator {
    /// Streaks in the local time zone as of today
    pub fn calculate(history: &[WorkoutRecord]) -> Streaks {
        Self::calculate_in(history, &Local, Local::now().date_naive())
    }

    /// Streaks with days taken in `tz`, evaluated on `today`
    pub fn calculate_in<Tz: TimeZone>(
        history: &[WorkoutRecord],
        tz: &Tz,
        today: NaiveDate,
    ) -> Streaks {
        let dates = Self::workout_dates(history, tz);
        // Most recent first
        let dates: Vec<NaiveDate> = dates.into_iter().rev().collect();

        Streaks {
            current_streak: Self::current_run(&dates, today),
            longest_streak: Self::longest_run(&dates),
        }
    }

    /// Distinct calendar dates with a workout that has at least one valid set;
    /// records without a timestamp are skipped
    fn workout_dates<Tz: TimeZone>(history: &[WorkoutRecord], tz: &Tz) -> BTreeSet<NaiveDate> {
        history
            .iter()
            .filter(|w| w.completed_sets() > 0)
            .filter_map(|w| w.timestamp)
            .filter_map(|ms| tz.timestamp_millis_opt(ms).single())
            .map(|dt| dt.date_naive())
            .collect()
    }

    /// Length of the run starting at the most recent date, alive only if that
    /// date is today or yesterday
    fn current_run(dates: &[NaiveDate], today: NaiveDate) -> u32 {
        let mut past = dates.iter().skip_while(|d| **d > today).peekable();

        let Some(&&latest) = past.peek() else {
            return 0;
        };
        let alive = latest == today || Some(latest) == today.pred_opt();
        if !alive {
            return 0;
        }

        let mut run: u32 = 0;
        let mut expected = Some(latest);
        for date in past {
            if Some(*date) != expected {
                break;
            }
            run += 1;
            expected = date.pred_opt();
        }
        run
    }

    fn longest_run(dates: &[NaiveDate]) -> u32 {
        if dates.is_empty() {
            return 0;
        }

        let mut longest: u32 = 0;
        let mut run: u32 = 1;
        for pair in dates.windows(2) {
            if pair[1].succ_opt() == Some(pair[0]) {
                run += 1;
            } else {
                longest = longest.max(run);
                run = 1;
            }
        }
        longest.max(run)
    }
}
