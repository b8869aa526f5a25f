//! Daily calorie and macro targets from body statistics

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    #[serde(rename = "Very Active")]
    VeryActive,
    #[serde(rename = "Extremely Active")]
    ExtremelyActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Goal {
    #[serde(rename = "Lose Fat")]
    LoseFat,
    Maintain,
    #[serde(rename = "Gain Muscle")]
    GainMuscle,
}

impl Goal {
    /// Fixed kcal offset from TDEE
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::LoseFat => -500.0,
            Goal::Maintain => 0.0,
            Goal::GainMuscle => 400.0,
        }
    }

    /// Grams of protein per kg of body weight
    pub fn protein_per_kg(&self) -> f64 {
        match self {
            Goal::LoseFat => 2.3,
            Goal::Maintain => 1.9,
            Goal::GainMuscle => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyStats {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Active daily targets: kcal and grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Error, PartialEq)]
pub enum MacroError {
    #[error("height must be a positive number, got {0}")]
    InvalidHeight(f64),
    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f64),
    #[error("age must be a positive number, got {0}")]
    InvalidAge(f64),
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl BodyStats {
    pub fn validate(&self) -> Result<(), MacroError> {
        if !is_positive(self.height_cm) {
            return Err(MacroError::InvalidHeight(self.height_cm));
        }
        if !is_positive(self.weight_kg) {
            return Err(MacroError::InvalidWeight(self.weight_kg));
        }
        if !is_positive(self.age) {
            return Err(MacroError::InvalidAge(self.age));
        }
        Ok(())
    }
}

/// Mifflin-St Jeor BMR scaled by activity, then split into macros
pub struct MacroRecommender;

impl MacroRecommender {
    /// Kcal of energy per gram
    const KCAL_PROTEIN: f64 = 4.0;
    const KCAL_CARBS: f64 = 4.0;
    const KCAL_FAT: f64 = 9.0;

    /// Grams of fat per kg of body weight
    const FAT_PER_KG: f64 = 0.9;

    pub fn bmr(stats: &BodyStats) -> f64 {
        let base = 10.0 * stats.weight_kg + 6.25 * stats.height_cm - 5.0 * stats.age;
        match stats.gender {
            Gender::Male => base + 5.0,
            Gender::Female => base - 161.0,
        }
    }

    pub fn tdee(stats: &BodyStats) -> f64 {
        Self::bmr(stats) * stats.activity_level.multiplier()
    }

    pub fn recommend(stats: &BodyStats) -> Result<MacroGoals, MacroError> {
        stats.validate()?;

        let calories = (Self::tdee(stats) + stats.goal.calorie_offset()).round().max(0.0);
        let protein = (stats.goal.protein_per_kg() * stats.weight_kg).round();
        let fat = (Self::FAT_PER_KG * stats.weight_kg).round();
        let remaining = calories - protein * Self::KCAL_PROTEIN - fat * Self::KCAL_FAT;
        let carbs = (remaining / Self::KCAL_CARBS).round().max(0.0);

        Ok(MacroGoals {
            calories: calories as u32,
            protein: protein as u32,
            carbs: carbs as u32,
            fat: fat as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_stats(gender: Gender, activity_level: ActivityLevel, goal: Goal) -> BodyStats {
        BodyStats {
            height_cm: 175.0,
            weight_kg: 75.0,
            age: 25.0,
            gender,
            activity_level,
            goal,
        }
    }

    #[test]
    fn test_bmr_male_and_female() {
        let male = create_stats(Gender::Male, ActivityLevel::Moderate, Goal::Maintain);
        let female = create_stats(Gender::Female, ActivityLevel::Moderate, Goal::Maintain);
        assert!((MacroRecommender::bmr(&male) - 1723.75).abs() < 1e-9);
        assert!((MacroRecommender::bmr(&female) - 1557.75).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_moderate() {
        let stats = create_stats(Gender::Male, ActivityLevel::Moderate, Goal::Maintain);
        assert!((MacroRecommender::tdee(&stats) - 2671.8125).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_maintain_example() {
        let stats = create_stats(Gender::Male, ActivityLevel::Moderate, Goal::Maintain);
        let goals = MacroRecommender::recommend(&stats).unwrap();
        assert_eq!(
            goals,
            MacroGoals {
                calories: 2672,
                protein: 143,
                carbs: 372,
                fat: 68,
            }
        );
    }

    #[test]
    fn test_recommend_goal_offsets() {
        let lose_stats = create_stats(Gender::Male, ActivityLevel::Moderate, Goal::LoseFat);
        let gain_stats = create_stats(Gender::Male, ActivityLevel::Moderate, Goal::GainMuscle);
        let lose = MacroRecommender::recommend(&lose_stats).unwrap();
        let gain = MacroRecommender::recommend(&gain_stats).unwrap();

        assert_eq!(lose.calories, 2172);
        assert_eq!(lose.protein, 173); // 2.3 * 75 = 172.5
        assert_eq!(gain.calories, 3072);
        assert_eq!(gain.protein, 150);
    }

    #[test]
    fn test_carbs_clamped_at_zero() {
        let stats = BodyStats {
            height_cm: 100.0,
            weight_kg: 150.0,
            age: 90.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::LoseFat,
        };
        let goals = MacroRecommender::recommend(&stats).unwrap();
        assert_eq!(goals.carbs, 0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut stats = create_stats(Gender::Male, ActivityLevel::Light, Goal::Maintain);
        stats.height_cm = 0.0;
        assert_eq!(MacroRecommender::recommend(&stats), Err(MacroError::InvalidHeight(0.0)));

        let mut stats = create_stats(Gender::Male, ActivityLevel::Light, Goal::Maintain);
        stats.weight_kg = -70.0;
        assert_eq!(MacroRecommender::recommend(&stats), Err(MacroError::InvalidWeight(-70.0)));

        let mut stats = create_stats(Gender::Male, ActivityLevel::Light, Goal::Maintain);
        stats.age = f64::NAN;
        assert!(matches!(MacroRecommender::recommend(&stats), Err(MacroError::InvalidAge(_))));
    }

    #[test]
    fn test_activity_multipliers_increase() {
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ];
        for pair in levels.windows(2) {
            assert!(pair[1].multiplier() > pair[0].multiplier());
        }
    }

    #[test]
    fn test_body_stats_json_labels() {
        let stats = create_stats(Gender::Female, ActivityLevel::VeryActive, Goal::GainMuscle);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["heightCm"], 175.0);
        assert_eq!(json["activityLevel"], "Very Active");
        assert_eq!(json["goal"], "Gain Muscle");
        assert_eq!(json["gender"], "Female");
    }
}
