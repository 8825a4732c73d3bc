//! Tracker configuration
//!
//! A `TrackerConfig` is assembled from three layers, highest priority first:
//! command-line flags, a TOML config file, and built-in defaults. The
//! TOML shape is [`ConfigFile`]; every field in it is optional.
//!
//! ```toml
//! year = 2025
//! month = 11
//! theme = "pastel"
//! tasks_per_day = 10
//! habits = ["Read 20 pages", "Workout"]
//! rest_days = ["Sun"]
//!
//! [colors]
//! rest_day_header = "#C00000"
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::calendar::MonthCalendar;
use crate::theme::{Theme, ThemeOverrides};
use crate::ConfigError;

pub const DEFAULT_OUTPUT: &str = "FocusTracker.xlsx";
pub const DEFAULT_TASKS_PER_DAY: u32 = 10;
pub const MAX_TASKS_PER_DAY: u32 = 100;

/// Habit list used when none is configured
pub fn default_habits() -> Vec<String> {
    [
        "Deep work 9-11AM",
        "Review notes",
        "System design 3-4PM",
        "Side project 4-5PM",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Fully resolved tracker configuration
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub year: i32,
    pub month: u32,
    /// Overrides the "{Month} {Year}" sheet title
    pub title: Option<String>,
    pub habits: Vec<String>,
    /// Task rows per day on the Week sheet
    pub tasks_per_day: u32,
    pub rest_days: Vec<Weekday>,
    pub theme: Theme,
    pub output: PathBuf,
}

impl TrackerConfig {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            title: None,
            habits: default_habits(),
            tasks_per_day: DEFAULT_TASKS_PER_DAY,
            rest_days: vec![Weekday::Sun],
            theme: Theme::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Configuration for the month containing `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Replace the habit list
    pub fn habits<I, S>(mut self, habits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.habits = habits.into_iter().map(Into::into).collect();
        self
    }

    pub fn tasks_per_day(mut self, tasks: u32) -> Self {
        self.tasks_per_day = tasks;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn rest_days(mut self, days: Vec<Weekday>) -> Self {
        self.rest_days = days;
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn calendar(&self) -> Result<MonthCalendar, ConfigError> {
        MonthCalendar::new(self.year, self.month)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar()?;
        if self.habits.is_empty() {
            return Err(ConfigError::NoHabits);
        }
        if let Some(index) = self.habits.iter().position(|h| h.trim().is_empty()) {
            return Err(ConfigError::EmptyHabit(index + 1));
        }
        if !(1..=MAX_TASKS_PER_DAY).contains(&self.tasks_per_day) {
            return Err(ConfigError::TasksPerDay {
                value: self.tasks_per_day,
                max: MAX_TASKS_PER_DAY,
            });
        }
        Ok(())
    }
}

/// On-disk TOML configuration
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub theme: Option<String>,
    pub tasks_per_day: Option<u32>,
    pub habits: Option<Vec<String>>,
    pub rest_days: Option<Vec<Weekday>>,
    pub colors: ThemeOverrides,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&text)?;
        Ok(match path.parent() {
            Some(dir) => file.relative_to(dir),
            None => file,
        })
    }

    /// Anchor a relative `output` path at `dir`
    pub fn relative_to(mut self, dir: &Path) -> Self {
        if let Some(output) = self.output.take() {
            self.output = Some(if output.is_relative() {
                dir.join(output)
            } else {
                output
            });
        }
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve into a `TrackerConfig`; missing year/month come from `today`
    pub fn into_config(self, today: NaiveDate) -> Result<TrackerConfig, ConfigError> {
        let mut config = TrackerConfig::new(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        );

        if let Some(name) = &self.theme {
            config.theme = Theme::builtin(name)?;
        }
        config.theme.apply(&self.colors);

        if let Some(habits) = self.habits {
            config.habits = habits;
        }
        if let Some(tasks) = self.tasks_per_day {
            config.tasks_per_day = tasks;
        }
        if let Some(days) = self.rest_days {
            config.rest_days = days;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.title = self.title;

        config.validate()?;
        Ok(config)
    }

    /// Commented starter file written by `focus-tracker init`
    pub fn sample_toml(name: &str, today: NaiveDate) -> String {
        let habits = default_habits()
            .iter()
            .map(|h| format!("    \"{h}\","))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r##"# focus-tracker configuration for "{name}"
#
# Generate the workbook with:
#   focus-tracker generate --config {name}.toml

# Month to lay out (defaults to the current month when omitted)
year = {year}
month = {month}

# Output workbook path, relative to this file
output = "{name}.xlsx"

# Colour scheme: {themes}
theme = "pastel"

# Checkbox rows per day on the Week sheet
tasks_per_day = {tasks}

# Weekdays highlighted with the rest-day header colour
rest_days = ["Sun"]

habits = [
{habits}
]

# Optional colour overrides (#RRGGBB)
[colors]
# weekdays = ["#E3F2FD", "#E8F5E9", "#FFF3E0", "#F3E5F5", "#FFFDE7", "#E1F5FE", "#FFC7CE"]
# rest_day_header = "#C00000"
# progress_fill = "#C6EFD2"
"##,
            year = today.year(),
            month = today.month(),
            themes = Theme::names().join(", "),
            tasks = DEFAULT_TASKS_PER_DAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Rgb;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()
    }

    #[test]
    fn defaults() {
        let config = TrackerConfig::new(2025, 11);
        assert_eq!(config.habits.len(), 4);
        assert_eq!(config.tasks_per_day, 10);
        assert_eq!(config.rest_days, vec![Weekday::Sun]);
        assert_eq!(config.theme.name, "pastel");
        assert_eq!(config.output, PathBuf::from("FocusTracker.xlsx"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = TrackerConfig::for_date(today())
            .habits(["Read", "Run"])
            .tasks_per_day(6)
            .title("Focus")
            .theme(Theme::slate())
            .rest_days(vec![Weekday::Sat, Weekday::Sun])
            .output("out.xlsx");
        assert_eq!(config.month, 11);
        assert_eq!(config.habits, vec!["Read", "Run"]);
        assert_eq!(config.tasks_per_day, 6);
        assert_eq!(config.title.as_deref(), Some("Focus"));
        assert_eq!(config.theme.name, "slate");
        assert_eq!(config.rest_days.len(), 2);
        assert_eq!(config.output, PathBuf::from("out.xlsx"));
    }

    #[test]
    fn validation_errors() {
        let config = TrackerConfig::new(2025, 11).habits(["Read", "  "]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyHabit(2))));

        let config = TrackerConfig::new(2025, 11).tasks_per_day(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TasksPerDay { value: 0, .. })
        ));

        let config = TrackerConfig::new(2025, 11).tasks_per_day(101);
        assert!(config.validate().is_err());

        let config = TrackerConfig::new(2025, 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMonth(0))
        ));
    }

    #[test]
    fn parse_full_file() {
        let file = ConfigFile::from_toml_str(
            r##"
year = 2024
month = 2
title = "Leap month"
output = "leap.xlsx"
theme = "slate"
tasks_per_day = 5
habits = ["Meditate", "Journal"]
rest_days = ["Sat", "Sun"]

[colors]
rest_day_header = "#123456"
"##,
        )
        .unwrap();

        let config = file.into_config(today()).unwrap();
        assert_eq!(config.year, 2024);
        assert_eq!(config.month, 2);
        assert_eq!(config.title.as_deref(), Some("Leap month"));
        assert_eq!(config.output, PathBuf::from("leap.xlsx"));
        assert_eq!(config.theme.name, "slate");
        assert_eq!(config.theme.rest_day_header_bg, Rgb(0x123456));
        assert_eq!(config.tasks_per_day, 5);
        assert_eq!(config.habits, vec!["Meditate", "Journal"]);
        assert_eq!(config.rest_days, vec![Weekday::Sat, Weekday::Sun]);
    }

    #[test]
    fn empty_file_uses_today() {
        let config = ConfigFile::default().into_config(today()).unwrap();
        assert_eq!((config.year, config.month), (2025, 11));
        assert_eq!(config.habits, default_habits());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ConfigFile::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_color_rejected() {
        let err = ConfigFile::from_toml_str("[colors]\nheader_grey = \"grey\"").unwrap_err();
        assert!(err.to_string().contains("grey"));
    }

    #[test]
    fn unknown_theme_rejected() {
        let file = ConfigFile {
            theme: Some("neon".into()),
            ..Default::default()
        };
        assert!(matches!(
            file.into_config(today()),
            Err(ConfigError::UnknownTheme { .. })
        ));
    }

    #[test]
    fn sample_round_trips() {
        let text = ConfigFile::sample_toml("plan", today());
        let config = ConfigFile::from_toml_str(&text)
            .unwrap()
            .into_config(today())
            .unwrap();
        assert_eq!((config.year, config.month), (2025, 11));
        assert_eq!(config.output, PathBuf::from("plan.xlsx"));
        assert_eq!(config.habits, default_habits());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.toml");
        std::fs::write(&path, "month = 3\nyear = 2026\n").unwrap();
        let config = ConfigFile::load(&path).unwrap().into_config(today()).unwrap();
        assert_eq!((config.year, config.month), (2026, 3));
    }

    #[test]
    fn load_anchors_output_at_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, "output = \"plan.xlsx\"\n").unwrap();

        let config = ConfigFile::load(&path).unwrap().into_config(today()).unwrap();
        assert_eq!(config.output, dir.path().join("plan.xlsx"));
    }

    #[test]
    fn relative_to_keeps_absolute_output() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("out.xlsx");
        let file = ConfigFile {
            output: Some(absolute.clone()),
            ..Default::default()
        };
        assert_eq!(
            file.relative_to(Path::new("elsewhere")).output,
            Some(absolute)
        );
        assert_eq!(ConfigFile::default().relative_to(Path::new("x")).output, None);
    }
}
