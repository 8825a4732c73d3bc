//! Colour schemes
//!
//! Every weekday has its own background colour which is shared by the
//! Habits and Week sheets. Rest days (Sunday unless configured otherwise)
//! get a strong header colour and a tinted data font instead.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// RGB colour, written as `#RRGGBB` in config files
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    pub fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Resolved colours for one weekday
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayStyle {
    pub header_bg: Rgb,
    pub header_font: Rgb,
    pub data_bg: Rgb,
    pub data_font: Rgb,
}

/// Named colour scheme
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Background per weekday, Monday first
    pub weekday_backgrounds: [Rgb; 7],
    /// Fill for label and header cells
    pub header_grey: Rgb,
    pub rest_day_header_bg: Rgb,
    pub rest_day_header_font: Rgb,
    pub rest_day_font: Rgb,
    /// Area fill of the daily progress chart
    pub progress_fill: Rgb,
    /// Bar fill of the habit progress chart
    pub habit_bar_fill: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self::pastel()
    }
}

impl Theme {
    pub fn pastel() -> Self {
        Self {
            name: "pastel".into(),
            weekday_backgrounds: [
                Rgb(0xE3F2FD), // Mon - light blue
                Rgb(0xE8F5E9), // Tue - light green
                Rgb(0xFFF3E0), // Wed - light orange
                Rgb(0xF3E5F5), // Thu - light purple
                Rgb(0xFFFDE7), // Fri - light yellow
                Rgb(0xE1F5FE), // Sat - light cyan
                Rgb(0xFFC7CE), // Sun - light red
            ],
            header_grey: Rgb(0xEDEDED),
            rest_day_header_bg: Rgb(0xC00000),
            rest_day_header_font: Rgb::WHITE,
            rest_day_font: Rgb(0x9C0006),
            progress_fill: Rgb(0xC6EFD2),
            habit_bar_fill: Rgb(0x82C785),
        }
    }

    pub fn slate() -> Self {
        Self {
            name: "slate".into(),
            weekday_backgrounds: [
                Rgb(0xE8EAF6),
                Rgb(0xE0F2F1),
                Rgb(0xECEFF1),
                Rgb(0xEDE7F6),
                Rgb(0xE3F2FD),
                Rgb(0xF1F8E9),
                Rgb(0xFFCDD2),
            ],
            header_grey: Rgb(0xE0E0E0),
            rest_day_header_bg: Rgb(0x455A64),
            rest_day_header_font: Rgb::WHITE,
            rest_day_font: Rgb(0x263238),
            progress_fill: Rgb(0xB3E5FC),
            habit_bar_fill: Rgb(0x4FC3F7),
        }
    }

    /// Names accepted by [`Theme::builtin`]
    pub fn names() -> &'static [&'static str] {
        &["pastel", "slate"]
    }

    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pastel" => Ok(Self::pastel()),
            "slate" => Ok(Self::slate()),
            _ => Err(ConfigError::UnknownTheme {
                name: name.to_string(),
                available: Self::names().join(", "),
            }),
        }
    }

    pub fn weekday_background(&self, weekday: Weekday) -> Rgb {
        self.weekday_backgrounds[weekday.num_days_from_monday() as usize]
    }

    pub fn day_style(&self, weekday: Weekday, is_rest_day: bool) -> DayStyle {
        let background = self.weekday_background(weekday);
        if is_rest_day {
            DayStyle {
                header_bg: self.rest_day_header_bg,
                header_font: self.rest_day_header_font,
                data_bg: background,
                data_font: self.rest_day_font,
            }
        } else {
            DayStyle {
                header_bg: background,
                header_font: Rgb::BLACK,
                data_bg: background,
                data_font: Rgb::BLACK,
            }
        }
    }

    /// Apply per-field overrides from a config file
    pub fn apply(&mut self, overrides: &ThemeOverrides) {
        if let Some(weekdays) = overrides.weekdays {
            self.weekday_backgrounds = weekdays;
        }
        if let Some(c) = overrides.header_grey {
            self.header_grey = c;
        }
        if let Some(c) = overrides.rest_day_header {
            self.rest_day_header_bg = c;
        }
        if let Some(c) = overrides.rest_day_header_font {
            self.rest_day_header_font = c;
        }
        if let Some(c) = overrides.rest_day_font {
            self.rest_day_font = c;
        }
        if let Some(c) = overrides.progress_fill {
            self.progress_fill = c;
        }
        if let Some(c) = overrides.habit_bar_fill {
            self.habit_bar_fill = c;
        }
    }
}

/// `[colors]` table of the config file
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverrides {
    /// Seven backgrounds, Monday first
    pub weekdays: Option<[Rgb; 7]>,
    pub header_grey: Option<Rgb>,
    pub rest_day_header: Option<Rgb>,
    pub rest_day_header_font: Option<Rgb>,
    pub rest_day_font: Option<Rgb>,
    pub progress_fill: Option<Rgb>,
    pub habit_bar_fill: Option<Rgb>,
}

impl ThemeOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
