//! ironlog - Local workout and nutrition tracker

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use tracing::warn;

use ironlog::db::Database;
use ironlog::exercises::{display_name, find_exercise};
use ironlog::nutrition::{ActivityLevel, BodyStats, Gender, Goal, MacroRecommender};
use ironlog::stats::{Achievement, Analytics, PrCalculator};
use ironlog::tui::App;
use ironlog::units::WeightUnit;
use ironlog::workout::{ExerciseSession, WorkoutRecord, WorkoutSet};

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(author, version, about = "Local workout and nutrition tracker")]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "IRONLOG_DB", default_value = "ironlog.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log a workout of identical sets for one exercise
    Log {
        /// Exercise id (e.g., "squat", "bench_press")
        exercise: String,

        /// Weight per set
        #[arg(short, long)]
        weight: f64,

        /// Reps per set
        #[arg(short, long)]
        reps: u32,

        /// Number of sets
        #[arg(
            short,
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        sets: u32,

        /// Unit of --weight
        #[arg(short, long, value_enum, default_value = "kg")]
        unit: WeightUnit,

        /// Session length in minutes
        #[arg(short, long, default_value = "0")]
        minutes: u64,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List workout history
    List {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show personal records
    Records {
        /// Exercise id; all exercises when omitted
        exercise: Option<String>,

        #[arg(short, long, value_enum, default_value = "kg")]
        unit: WeightUnit,
    },

    /// Show workout streaks and achievements
    Streak,

    /// Recommend daily calories and macros, and save them as goals
    Macros {
        /// Height in centimeters
        height: f64,

        /// Body weight in kilograms
        weight: f64,

        /// Age in years
        age: f64,

        #[arg(short, long, value_enum)]
        gender: Gender,

        #[arg(short, long, value_enum, default_value = "moderate")]
        activity: ActivityLevel,

        #[arg(long, value_enum, default_value = "maintain")]
        goal: Goal,
    },

    /// Show saved macro goals
    Goals,

    /// Merge workouts from a JSON file (array of workouts), matching by id
    Import {
        path: PathBuf,
    },

    /// Delete the whole workout history
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db)?;

    match cli.command {
        Some(Commands::Log { exercise, weight, reps, sets, unit, minutes, note }) => {
            log_workout(&db, exercise, unit.to_kg(weight), reps, sets, minutes, note)?;
        }

        Some(Commands::List { limit }) => {
            let workouts = db.get_workouts()?;
            println!("Recent workouts:");
            println!("{:-<60}", "");
            for w in workouts.iter().rev().take(limit) {
                let date = w
                    .timestamp
                    .and_then(|ts| Local.timestamp_millis_opt(ts).single())
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let exercises: Vec<String> =
                    w.exercises.iter().map(|e| display_name(&e.exercise_id)).collect();
                println!(
                    "{} | {:30} | {} sets | {:.0}kg",
                    date,
                    exercises.join(", "),
                    w.completed_sets(),
                    w.total_volume()
                );
            }
        }

        Some(Commands::Records { exercise, unit }) => {
            let analytics = Analytics::new(db.get_workouts()?);
            let records = match &exercise {
                Some(id) => vec![(id.clone(), analytics.personal_records(id))],
                None => analytics.all_records().into_iter().collect(),
            };

            println!("Personal records");
            println!("{:-<60}", "");
            for (id, prs) in records {
                println!(
                    "{:30} | 1RM {:.1}{s} | max {:.1}{s} | volume {:.0}{s}",
                    display_name(&id),
                    unit.from_kg(prs.one_rep_max),
                    unit.from_kg(prs.max_weight),
                    unit.from_kg(prs.max_volume),
                    s = unit.suffix(),
                );
            }

            if let Some(id) = &exercise {
                println!(
                    "Total volume: {:.0}{}",
                    unit.from_kg(analytics.total_volume(id)),
                    unit.suffix()
                );
            }
        }

        Some(Commands::Streak) => {
            let analytics = Analytics::new(db.get_workouts()?);
            let streaks = analytics.streaks();
            println!("Workouts logged: {}", analytics.workout_count());
            println!("Current streak: {} days", streaks.current_streak);
            println!("Longest streak: {} days", streaks.longest_streak);
            println!("Weekly frequency: {:.1} workouts/week", analytics.weekly_frequency());

            let unlocked = analytics.achievements();
            println!("\nAchievements ({}/{}):", unlocked.len(), Achievement::all().len());
            for a in Achievement::all() {
                let mark = if unlocked.contains(a) { "[x]" } else { "[ ]" };
                println!("{} {} - {}", mark, a.title(), a.description());
            }
        }

        Some(Commands::Macros { height, weight, age, gender, activity, goal }) => {
            let stats = BodyStats {
                height_cm: height,
                weight_kg: weight,
                age,
                gender,
                activity_level: activity,
                goal,
            };
            let goals = MacroRecommender::recommend(&stats)?;
            db.save_body_stats(&stats)?;
            db.save_goals(&goals)?;

            println!(
                "BMR: {:.0} kcal, TDEE: {:.0} kcal",
                MacroRecommender::bmr(&stats),
                MacroRecommender::tdee(&stats)
            );
            println!(
                "Saved goals: {} kcal | protein {}g | carbs {}g | fat {}g",
                goals.calories, goals.protein, goals.carbs, goals.fat
            );
        }

        Some(Commands::Goals) => match db.get_goals()? {
            Some(g) => println!(
                "{} kcal | protein {}g | carbs {}g | fat {}g",
                g.calories, g.protein, g.carbs, g.fat
            ),
            None => println!("No goals saved yet. Run `ironlog macros` first."),
        },

        Some(Commands::Import { path }) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let workouts: Vec<WorkoutRecord> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid workout file: {}", path.display()))?;
            let added = db.merge_workouts(&workouts)?;
            println!(
                "Imported {} new workouts ({} already present)",
                added,
                workouts.len() - added
            );
        }

        Some(Commands::Clear { yes }) => {
            if !yes {
                bail!("refusing to delete history without --yes");
            }
            let removed = db.clear_history()?;
            println!("Deleted {} workouts", removed);
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(db)?;
            app.run()?;
        }
    }

    Ok(())
}

fn log_workout(
    db: &Database,
    exercise: String,
    weight_kg: f64,
    reps: u32,
    sets: u32,
    minutes: u64,
    note: Option<String>,
) -> Result<()> {
    if find_exercise(&exercise).is_none() {
        warn!("Unknown exercise id '{}', logging anyway", exercise);
    }

    let history = db.get_workouts()?;
    let now_ms = Utc::now().timestamp_millis();
    let current = PrCalculator::calculate_at(&history, &exercise, now_ms);

    let mut logged = vec![WorkoutSet::new(weight_kg, reps); sets as usize];
    let checks = PrCalculator::stamp_all(&mut logged, current, now_ms);
    for (n, check) in checks.iter().enumerate() {
        if check.any() {
            println!("New PR on set {}: {}", n + 1, check.describe());
        }
    }

    let workout = WorkoutRecord::new(
        db.unused_workout_id(&now_ms.to_string())?,
        now_ms,
        minutes * 60_000,
        vec![ExerciseSession {
            exercise_id: exercise.clone(),
            sets: logged,
            note,
        }],
    );
    db.add_workout(&workout)?;

    println!(
        "Logged: {} - {}x{} @ {:.1}kg (id: {})",
        display_name(&exercise),
        sets,
        reps,
        weight_kg,
        workout.id
    );
    Ok(())
}
