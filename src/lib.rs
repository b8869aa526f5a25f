//! ironlog - Local workout and nutrition tracker
//!
//! Personal records, workout streaks and daily macro targets computed from
//! a locally stored workout history.

pub mod db;
pub mod exercises;
pub mod nutrition;
pub mod stats;
pub mod tui;
pub mod units;
pub mod workout;

pub use db::Database;
