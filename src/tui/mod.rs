//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::{Local, TimeZone};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::db::Database;
use crate::exercises::display_name;
use crate::nutrition::MacroGoals;
use crate::stats::{StreakCalculator, Streaks};
use crate::workout::WorkoutRecord;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    db: Database,
    workouts: Vec<WorkoutRecord>,
    streaks: Streaks,
    goals: Option<MacroGoals>,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self> {
        let mut app = Self {
            db,
            workouts: Vec::new(),
            streaks: Streaks::default(),
            goals: None,
            should_quit: false,
        };
        app.reload()?;
        Ok(app)
    }

    fn reload(&mut self) -> Result<()> {
        let mut workouts = self.db.get_workouts()?;
        self.streaks = StreakCalculator::calculate(&workouts);
        workouts.reverse();
        self.workouts = workouts;
        self.goals = self.db.get_goals()?;
        Ok(())
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let goals = match self.goals {
            Some(g) => format!("{} kcal  P{} C{} F{}", g.calories, g.protein, g.carbs, g.fat),
            None => "no goals set".to_string(),
        };
        let header = Paragraph::new(format!(
            "ironlog | streak {} (best {}) | {}",
            self.streaks.current_streak, self.streaks.longest_streak, goals
        ))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Workout table
        let rows: Vec<Row> = self
            .workouts
            .iter()
            .map(|w| {
                let date = w
                    .timestamp
                    .and_then(|ts| Local.timestamp_millis_opt(ts).single())
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let exercises: Vec<String> =
                    w.exercises.iter().map(|e| display_name(&e.exercise_id)).collect();
                Row::new(vec![
                    Cell::from(date),
                    Cell::from(exercises.join(", ")),
                    Cell::from(w.completed_sets().to_string()),
                    Cell::from(format!("{:.0}kg", w.total_volume())),
                    Cell::from(format!("{}m", w.duration_ms / 60_000)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Min(20),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["Date", "Exercises", "Sets", "Volume", "Time"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Workouts"));

        frame.render_widget(table, chunks[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.reload()?,
                _ => {}
            }
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
