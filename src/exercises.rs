//! Exercise catalog - strength movements referenced by `exerciseId`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Category {
    Push,
    Pull,
    Legs,
    Core,
}

impl Category {
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Push => "💪",
            Category::Pull => "🏋️",
            Category::Legs => "🦵",
            Category::Core => "🎯",
        }
    }
}

pub const EXERCISES: &[Exercise] = &[
    Exercise { id: "bench_press", name: "Bench Press", category: Category::Push },
    Exercise { id: "incline_bench_press", name: "Incline Bench Press", category: Category::Push },
    Exercise { id: "overhead_press", name: "Overhead Press", category: Category::Push },
    Exercise { id: "dips", name: "Dips", category: Category::Push },
    Exercise { id: "deadlift", name: "Deadlift", category: Category::Pull },
    Exercise { id: "barbell_row", name: "Barbell Row", category: Category::Pull },
    Exercise { id: "pull_up", name: "Pull-up", category: Category::Pull },
    Exercise { id: "lat_pulldown", name: "Lat Pulldown", category: Category::Pull },
    Exercise { id: "bicep_curl", name: "Bicep Curl", category: Category::Pull },
    Exercise { id: "squat", name: "Back Squat", category: Category::Legs },
    Exercise { id: "front_squat", name: "Front Squat", category: Category::Legs },
    Exercise { id: "romanian_deadlift", name: "Romanian Deadlift", category: Category::Legs },
    Exercise { id: "leg_press", name: "Leg Press", category: Category::Legs },
    Exercise { id: "calf_raise", name: "Calf Raise", category: Category::Legs },
    Exercise { id: "cable_crunch", name: "Cable Crunch", category: Category::Core },
    Exercise { id: "hanging_leg_raise", name: "Hanging Leg Raise", category: Category::Core },
];

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Display name for an id, falling back to the raw id for unknown exercises
pub fn display_name(id: &str) -> String {
    find_exercise(id)
        .map(|e| format!("{} {}", e.category.emoji(), e.name))
        .unwrap_or_else(|| id.to_string())
}
