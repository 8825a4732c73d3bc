//! # focus-tracker-core
//!
//! Core domain model for the focus-tracker workbook generator.
//!
//! This crate provides:
//! - Calendar facts: `MonthCalendar` (month length, week count, weekday lookup)
//! - Configuration: `TrackerConfig` and the TOML `ConfigFile`
//! - Colour schemes: `Theme`, `Rgb`
//! - Grid layout: `HabitsLayout`, `WeekLayout`, `DaySlot`
//! - A1 cell addressing and formula text (`cell` module)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use focus_tracker_core::{Tracker, TrackerConfig};
//!
//! let config = TrackerConfig::new(2025, 11)
//!     .habits(["Read 20 pages", "Workout"])
//!     .tasks_per_day(8);
//! let tracker = Tracker::new(config).unwrap();
//!
//! assert_eq!(tracker.title(), "November 2025");
//! assert_eq!(tracker.calendar.days_in_month(), 30);
//! assert_eq!(tracker.calendar.num_weeks(), 5);
//! ```

pub mod calendar;
pub mod cell;
pub mod config;
pub mod layout;
pub mod theme;

pub use calendar::{weekday_label, DayInfo, DaySummary, MonthCalendar, MonthSummary, WEEKDAYS};
pub use config::{ConfigFile, TrackerConfig};
pub use layout::{DaySlot, HabitsLayout, WeekLayout};
pub use theme::{DayStyle, Rgb, Theme, ThemeOverrides};

use chrono::Weekday;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Tracker
// ============================================================================

/// A validated tracker: configuration plus the calendar month it covers.
///
/// Renderers only ever see a `Tracker`, so every layout computation can
/// rely on at least one habit and a real calendar month.
#[derive(Clone, Debug)]
pub struct Tracker {
    pub config: TrackerConfig,
    pub calendar: MonthCalendar,
}

impl Tracker {
    /// Validate a configuration and resolve its calendar month
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let calendar = config.calendar()?;
        Ok(Self { config, calendar })
    }

    /// Sheet title: the configured title, or "{Month} {Year}"
    pub fn title(&self) -> String {
        self.config
            .title
            .clone()
            .unwrap_or_else(|| self.calendar.title())
    }

    pub fn habits(&self) -> &[String] {
        &self.config.habits
    }

    pub fn habits_layout(&self) -> HabitsLayout {
        HabitsLayout::new(&self.calendar, self.config.habits.len() as u32)
    }

    pub fn week_layout(&self) -> WeekLayout {
        WeekLayout::new(&self.calendar, self.config.tasks_per_day)
    }

    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.config.rest_days.contains(&weekday)
    }

    /// Colours for cells belonging to a given weekday
    pub fn day_style(&self, weekday: Weekday) -> DayStyle {
        self.config
            .theme
            .day_style(weekday, self.is_rest_day(weekday))
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a tracker to the output format
    fn render(&self, tracker: &Tracker) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("At least one habit is required")]
    NoHabits,

    #[error("Habit #{0} has an empty name")]
    EmptyHabit(usize),

    #[error("tasks_per_day must be between 1 and {max}, got {value}")]
    TasksPerDay { value: u32, max: u32 },

    #[error("Unknown theme: {name} (available: {available})")]
    UnknownTheme { name: String, available: String },

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

// ============================================================================
// Tests
// ============================================================================
