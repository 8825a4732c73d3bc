//! Plain-text preview of a tracker
//!
//! Shows how the month splits into week chunks, which days are rest days
//! (marked `*`) and what will land on each sheet, without writing a file.
//!
//! ```text
//! November 2025
//! =============
//! Theme: pastel
//!
//! Habits sheet: 4 habits x 30 days
//!   Week 1  01 SAT  02 SUN* 03 MON  04 TUE  05 WED  06 THU  07 FRI
//!   ...
//! ```

use focus_tracker_core::{weekday_label, RenderError, Renderer, Tracker};

/// Text preview renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Append `*` to rest days
    pub mark_rest_days: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            mark_rest_days: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_rest_day_marks(mut self) -> Self {
        self.mark_rest_days = false;
        self
    }

    fn week_line(&self, tracker: &Tracker, week: u32) -> Option<String> {
        let days = tracker.calendar.week_days(week)?;
        let entries: Vec<String> = days
            .filter_map(|day| tracker.calendar.weekday(day).map(|wd| (day, wd)))
            .map(|(day, weekday)| {
                let mark = if self.mark_rest_days && tracker.is_rest_day(weekday) {
                    "*"
                } else {
                    " "
                };
                format!("{:02} {}{}", day, weekday_label(weekday), mark)
            })
            .collect();
        Some(format!("  Week {}  {}", week + 1, entries.join(" ")).trim_end().to_string())
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, tracker: &Tracker) -> Result<String, RenderError> {
        let calendar = &tracker.calendar;
        let week_layout = tracker.week_layout();
        let title = tracker.title();
        let mut output = String::new();

        output.push_str(&format!("{}\n", title));
        output.push_str(&format!("{}\n", "=".repeat(title.chars().count())));
        output.push_str(&format!("Theme: {}\n\n", tracker.config.theme.name));

        output.push_str(&format!(
            "Habits sheet: {} habits x {} days\n",
            tracker.habits().len(),
            calendar.days_in_month()
        ));
        for week in 0..calendar.num_weeks() {
            if let Some(line) = self.week_line(tracker, week) {
                output.push_str(&format!("{}\n", line));
            }
        }
        output.push('\n');

        output.push_str("Habits:\n");
        for (i, habit) in tracker.habits().iter().enumerate() {
            output.push_str(&format!("  {:>2}. {}\n", i + 1, habit));
        }
        output.push('\n');

        output.push_str(&format!(
            "Week sheet: {} blocks x {} tasks per day\n",
            week_layout.block_count(),
            week_layout.tasks_per_day()
        ));

        Ok(output)
    }
}
