//! JSON preview of a resolved tracker

use serde::Serialize;

use focus_tracker_core::{weekday_label, MonthSummary, RenderError, Renderer, Tracker};

/// Machine-readable preview renderer
#[derive(Clone, Debug)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[derive(Serialize)]
struct TrackerPreview<'a> {
    title: String,
    theme: &'a str,
    habits: &'a [String],
    tasks_per_day: u32,
    rest_days: Vec<&'static str>,
    output: String,
    #[serde(flatten)]
    month: MonthSummary,
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, tracker: &Tracker) -> Result<String, RenderError> {
        let preview = TrackerPreview {
            title: tracker.title(),
            theme: &tracker.config.theme.name,
            habits: tracker.habits(),
            tasks_per_day: tracker.config.tasks_per_day,
            rest_days: tracker
                .config
                .rest_days
                .iter()
                .map(|d| weekday_label(*d))
                .collect(),
            output: tracker.config.output.display().to_string(),
            month: tracker.calendar.summary(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&preview)
        } else {
            serde_json::to_string(&preview)
        };
        json.map_err(|e| RenderError::Format(format!("JSON error: {e}")))
    }
}
