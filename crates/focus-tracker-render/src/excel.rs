//! Excel workbook renderer
//!
//! Generates an XLSX file with two sheets:
//! - Habits: habits × days checkbox grid with daily Done/Not Done/Progress
//!   formulas, a per-habit Analysis block and two charts
//! - Week: the month as stacked weekly blocks, one checklist per day with
//!   Completed/Not Completed/Total formulas
//!
//! Checkbox cells hold `☐` and carry a list validation offering `☐`/`☑`, so
//! ticking a box is a dropdown pick and every summary is a live formula.
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Habits
//! |   | B          | C    | D    | ... |     | AI      | AJ   | AK     | AL       |
//! |---|------------|------|------|-----|-----|---------|------|--------|----------|
//! | 2 |        November 2025 (merged)     |     |         |      |        |          |
//! | 4 | Progress   | =IF( | =IF( | ... |     |         |      |        |          |
//! | 5 | Done       | =CO  | =CO  | ... |     |    Analysis (merged)              |
//! | 8 |            |  Week 1 (merged)    |     | Habit   | Goal | Actual | Progress |
//! | 9 |            | SAT  | SUN  | ... |     | =B12    | =CO  | =CO    | =IF(     |
//! |10 |            | 1    | 2    | ... |     | ...     |      |        |          |
//! |11 | My Habits  |      |      |     |     |         |      |        |          |
//! |12 | Read       | ☐    | ☐    | ... |     |         |      |        |          |
//! ```
//!
//! Every day-specific cell takes its colours from the weekday it falls on;
//! rest days (Sunday by default) get the strong header colour.

use chrono::Weekday;
use rust_xlsxwriter::{
    Chart, ChartFormat, ChartSolidFill, ChartType, DataValidation, Format, FormatAlign,
    FormatBorder, Workbook, Worksheet, XlsxError,
};
use std::path::Path;
use tracing::debug;

use focus_tracker_core::cell::{
    cell_ref, completion_ratio, count_checked, count_filled, count_unchecked, link, safe_ratio,
    CHECKBOX_CHOICES, UNCHECKED,
};
use focus_tracker_core::{
    weekday_label, DaySlot, DayStyle, HabitsLayout, RenderError, Renderer, Theme, Tracker,
    WeekLayout, WEEKDAYS,
};

pub const HABITS_SHEET: &str = "Habits";
pub const WEEK_SHEET: &str = "Week";
const WEEK_TITLE: &str = "Weekly Planning";
const PERCENT: &str = "0%";

/// Excel workbook renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Whether to insert the two Habits sheet charts
    pub include_charts: bool,
    /// Whether checkbox cells get a `☐`/`☑` dropdown validation
    pub validate_checkboxes: bool,
    /// Daily progress chart size in pixels (width, height)
    pub progress_chart_size: (u32, u32),
    /// Habit progress chart size in pixels (width, height)
    pub habit_chart_size: (u32, u32),
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            include_charts: true,
            validate_checkboxes: true,
            progress_chart_size: (1200, 346),
            habit_chart_size: (576, 403),
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_charts(mut self, include: bool) -> Self {
        self.include_charts = include;
        self
    }

    /// Skip the charts (faster, smaller files)
    pub fn no_charts(self) -> Self {
        self.include_charts(false)
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_checkboxes = validate;
        self
    }

    /// Leave checkbox cells as plain text
    pub fn no_validation(self) -> Self {
        self.with_validation(false)
    }

    pub fn progress_chart_size(mut self, width: u32, height: u32) -> Self {
        self.progress_chart_size = (width, height);
        self
    }

    pub fn habit_chart_size(mut self, width: u32, height: u32) -> Self {
        self.habit_chart_size = (width, height);
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, tracker: &Tracker) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = ExcelFormats::new(tracker);

        self.add_habits_sheet(&mut workbook, tracker, &formats)?;
        self.add_week_sheet(&mut workbook, tracker, &formats)?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        Ok(buffer)
    }

    /// Render and write the workbook to `path`
    pub fn save(&self, tracker: &Tracker, path: &Path) -> Result<(), RenderError> {
        let bytes = self.render(tracker)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn checkbox_validation(&self) -> Result<Option<DataValidation>, RenderError> {
        if !self.validate_checkboxes {
            return Ok(None);
        }
        let validation = DataValidation::new()
            .allow_list_strings(&CHECKBOX_CHOICES)
            .map_err(xlsx_error)?;
        Ok(Some(validation))
    }

    // ========================================================================
    // Habits sheet
    // ========================================================================

    fn add_habits_sheet(
        &self,
        workbook: &mut Workbook,
        tracker: &Tracker,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let layout = tracker.habits_layout();
        debug!(
            sheet = HABITS_SHEET,
            days = layout.days(),
            habits = layout.habit_count(),
            "writing sheet"
        );

        let sheet = workbook.add_worksheet();
        sheet.set_name(HABITS_SHEET).map_err(xlsx_error)?;

        // Column widths
        sheet
            .set_column_width(HabitsLayout::GUTTER_COL, 2)
            .map_err(xlsx_error)?;
        sheet
            .set_column_width(HabitsLayout::NAME_COL, 24)
            .map_err(xlsx_error)?;
        for col in HabitsLayout::DAY_START_COL..=HabitsLayout::MAX_DAY_COL {
            sheet.set_column_width(col, 3).map_err(xlsx_error)?;
        }
        for col in HabitsLayout::SIDE_FIRST_COL..=HabitsLayout::ANALYSIS_PROGRESS_COL {
            sheet.set_column_width(col, 10).map_err(xlsx_error)?;
        }

        // Title
        sheet
            .merge_range(
                HabitsLayout::TITLE_ROW,
                HabitsLayout::NAME_COL,
                HabitsLayout::TITLE_ROW,
                layout.last_day_col(),
                &tracker.title(),
                &formats.title,
            )
            .map_err(xlsx_error)?;

        self.write_calendar_header(sheet, tracker, &layout, formats)?;

        // Daily progress labels
        let labels = [
            (HabitsLayout::PROGRESS_ROW, "Progress"),
            (HabitsLayout::DONE_ROW, "Done"),
            (HabitsLayout::NOT_DONE_ROW, "Not Done"),
        ];
        for (row, label) in labels {
            sheet
                .write_string_with_format(row, HabitsLayout::NAME_COL, label, &formats.grey_left)
                .map_err(xlsx_error)?;
        }
        sheet
            .write_string_with_format(
                HabitsLayout::HABITS_HEADER_ROW,
                HabitsLayout::NAME_COL,
                "My Habits",
                &formats.grey_header,
            )
            .map_err(xlsx_error)?;

        self.write_habit_rows(sheet, tracker, &layout, formats)?;
        self.write_daily_summary(sheet, tracker, &layout, formats)?;
        self.write_analysis(sheet, tracker, &layout, formats)?;

        if self.include_charts {
            self.insert_habit_charts(sheet, &tracker.config.theme, &layout)?;
        }

        Ok(())
    }

    /// Week headers, weekday labels and day numbers above the habit grid
    fn write_calendar_header(
        &self,
        sheet: &mut Worksheet,
        tracker: &Tracker,
        layout: &HabitsLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let row = HabitsLayout::WEEK_HEADER_ROW;
        for week in 0..tracker.calendar.num_weeks() {
            let Some((first_col, last_col)) = layout.week_span(week) else {
                continue;
            };
            let label = format!("Week {}", week + 1);
            // A trailing one-day week (e.g. Feb 29) cannot be merged
            if first_col == last_col {
                sheet
                    .write_string_with_format(row, first_col, &label, &formats.grey_header)
                    .map_err(xlsx_error)?;
            } else {
                sheet
                    .merge_range(row, first_col, row, last_col, &label, &formats.grey_header)
                    .map_err(xlsx_error)?;
            }
        }

        for day in tracker.calendar.days() {
            let col = layout.day_col(day.day);
            let fmt = formats.day(day.weekday);
            sheet
                .write_string_with_format(
                    HabitsLayout::WEEKDAY_ROW,
                    col,
                    weekday_label(day.weekday),
                    &fmt.header_boxed,
                )
                .map_err(xlsx_error)?;
            sheet
                .write_number_with_format(HabitsLayout::DAY_NUMBER_ROW, col, day.day, &fmt.data_boxed)
                .map_err(xlsx_error)?;
        }

        Ok(())
    }

    fn write_habit_rows(
        &self,
        sheet: &mut Worksheet,
        tracker: &Tracker,
        layout: &HabitsLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let validation = self.checkbox_validation()?;

        for (index, name) in tracker.habits().iter().enumerate() {
            let row = layout.habit_row(index as u32);
            sheet
                .write_string_with_format(row, HabitsLayout::NAME_COL, name, &formats.habit_name)
                .map_err(xlsx_error)?;

            for day in tracker.calendar.days() {
                sheet
                    .write_string_with_format(
                        row,
                        layout.day_col(day.day),
                        UNCHECKED,
                        &formats.day(day.weekday).data_boxed,
                    )
                    .map_err(xlsx_error)?;
            }

            if let Some(validation) = &validation {
                sheet
                    .add_data_validation(
                        row,
                        HabitsLayout::DAY_START_COL,
                        row,
                        layout.last_day_col(),
                        validation,
                    )
                    .map_err(xlsx_error)?;
            }
        }

        Ok(())
    }

    /// Done / Not Done / Progress formulas for each day column
    fn write_daily_summary(
        &self,
        sheet: &mut Worksheet,
        tracker: &Tracker,
        layout: &HabitsLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        for day in tracker.calendar.days() {
            let col = layout.day_col(day.day);
            let fmt = formats.day(day.weekday);
            let range = layout.day_checkbox_range(day.day);

            let done = count_checked(&range);
            sheet
                .write_formula_with_format(HabitsLayout::DONE_ROW, col, done.as_str(), &fmt.data_boxed)
                .map_err(xlsx_error)?;

            let not_done = count_unchecked(&range);
            sheet
                .write_formula_with_format(
                    HabitsLayout::NOT_DONE_ROW,
                    col,
                    not_done.as_str(),
                    &fmt.data_boxed,
                )
                .map_err(xlsx_error)?;

            let progress = completion_ratio(&range);
            sheet
                .write_formula_with_format(
                    HabitsLayout::PROGRESS_ROW,
                    col,
                    progress.as_str(),
                    &fmt.percent_boxed,
                )
                .map_err(xlsx_error)?;
        }

        Ok(())
    }

    /// Goal / Actual / Progress per habit on the right of the grid
    fn write_analysis(
        &self,
        sheet: &mut Worksheet,
        tracker: &Tracker,
        layout: &HabitsLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        sheet
            .merge_range(
                HabitsLayout::ANALYSIS_TITLE_ROW,
                HabitsLayout::ANALYSIS_HABIT_COL,
                HabitsLayout::ANALYSIS_TITLE_ROW,
                HabitsLayout::ANALYSIS_PROGRESS_COL,
                "Analysis",
                &formats.grey_header,
            )
            .map_err(xlsx_error)?;

        let headers = [
            (HabitsLayout::ANALYSIS_HABIT_COL, "Habit"),
            (HabitsLayout::ANALYSIS_GOAL_COL, "Goal"),
            (HabitsLayout::ANALYSIS_ACTUAL_COL, "Actual"),
            (HabitsLayout::ANALYSIS_PROGRESS_COL, "Progress"),
        ];
        for (col, header) in headers {
            sheet
                .write_string_with_format(HabitsLayout::ANALYSIS_HEADER_ROW, col, header, &formats.label)
                .map_err(xlsx_error)?;
        }

        // Goal is the number of days in the month, counted from the day row
        let goal = count_filled(&layout.day_number_range());

        for index in 0..tracker.habits().len() as u32 {
            let row = layout.analysis_row(index);

            let name = link(&layout.habit_name_cell(index));
            sheet
                .write_formula(row, HabitsLayout::ANALYSIS_HABIT_COL, name.as_str())
                .map_err(xlsx_error)?;
            sheet
                .write_formula(row, HabitsLayout::ANALYSIS_GOAL_COL, goal.as_str())
                .map_err(xlsx_error)?;

            let actual = count_checked(&layout.habit_checkbox_range(index));
            sheet
                .write_formula(row, HabitsLayout::ANALYSIS_ACTUAL_COL, actual.as_str())
                .map_err(xlsx_error)?;

            let progress = safe_ratio(
                &cell_ref(row, HabitsLayout::ANALYSIS_ACTUAL_COL),
                &cell_ref(row, HabitsLayout::ANALYSIS_GOAL_COL),
            );
            sheet
                .write_formula_with_format(
                    row,
                    HabitsLayout::ANALYSIS_PROGRESS_COL,
                    progress.as_str(),
                    &formats.percent,
                )
                .map_err(xlsx_error)?;
        }

        Ok(())
    }

    fn insert_habit_charts(
        &self,
        sheet: &mut Worksheet,
        theme: &Theme,
        layout: &HabitsLayout,
    ) -> Result<(), RenderError> {
        let first_col = HabitsLayout::DAY_START_COL;
        let last_col = layout.last_day_col();

        // Daily progress area chart over the Done row
        let mut progress = Chart::new(ChartType::Area);
        progress
            .add_series()
            .set_name("Daily Progress")
            .set_categories((
                HABITS_SHEET,
                HabitsLayout::DAY_NUMBER_ROW,
                first_col,
                HabitsLayout::DAY_NUMBER_ROW,
                last_col,
            ))
            .set_values((
                HABITS_SHEET,
                HabitsLayout::DONE_ROW,
                first_col,
                HabitsLayout::DONE_ROW,
                last_col,
            ))
            .set_format(
                ChartFormat::new()
                    .set_solid_fill(ChartSolidFill::new().set_color(theme.progress_fill.value()))
                    .set_no_border(),
            );
        progress.legend().set_hidden();
        progress.y_axis().set_major_gridlines(false);
        progress
            .set_width(self.progress_chart_size.0)
            .set_height(self.progress_chart_size.1);

        let (row, col) = layout.progress_chart_anchor();
        sheet.insert_chart(row, col, &progress).map_err(xlsx_error)?;

        // Habit progress bar chart over the Analysis block
        let first_row = HabitsLayout::ANALYSIS_START_ROW;
        let last_row = layout.last_analysis_row();
        let mut bars = Chart::new(ChartType::Bar);
        bars.add_series()
            .set_name("Habit progress")
            .set_categories((
                HABITS_SHEET,
                first_row,
                HabitsLayout::ANALYSIS_HABIT_COL,
                last_row,
                HabitsLayout::ANALYSIS_HABIT_COL,
            ))
            .set_values((
                HABITS_SHEET,
                first_row,
                HabitsLayout::ANALYSIS_PROGRESS_COL,
                last_row,
                HabitsLayout::ANALYSIS_PROGRESS_COL,
            ))
            .set_format(
                ChartFormat::new()
                    .set_solid_fill(ChartSolidFill::new().set_color(theme.habit_bar_fill.value())),
            );
        // Bar charts run horizontally: x is the value axis
        bars.x_axis().set_num_format(PERCENT);
        bars.legend().set_hidden();
        bars.set_width(self.habit_chart_size.0)
            .set_height(self.habit_chart_size.1);

        let (row, col) = layout.habit_chart_anchor();
        sheet.insert_chart(row, col, &bars).map_err(xlsx_error)?;

        Ok(())
    }

    // ========================================================================
    // Week sheet
    // ========================================================================

    fn add_week_sheet(
        &self,
        workbook: &mut Workbook,
        tracker: &Tracker,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let layout = tracker.week_layout();
        debug!(
            sheet = WEEK_SHEET,
            blocks = layout.block_count(),
            tasks_per_day = layout.tasks_per_day(),
            "writing sheet"
        );

        let sheet = workbook.add_worksheet();
        sheet.set_name(WEEK_SHEET).map_err(xlsx_error)?;

        sheet.set_column_width(0, 2).map_err(xlsx_error)?;
        for col in WeekLayout::TICK_COLS {
            sheet.set_column_width(col, 3).map_err(xlsx_error)?;
        }
        for col in WeekLayout::TEXT_COLS {
            sheet.set_column_width(col, 22).map_err(xlsx_error)?;
        }
        for col in WeekLayout::NOTE_COLS {
            sheet.set_column_width(col, 16).map_err(xlsx_error)?;
        }

        sheet
            .merge_range(
                WeekLayout::TITLE_FIRST_ROW,
                WeekLayout::TITLE_FIRST_COL,
                WeekLayout::TITLE_LAST_ROW,
                WeekLayout::TITLE_LAST_COL,
                WEEK_TITLE,
                &formats.title,
            )
            .map_err(xlsx_error)?;

        let validation = self.checkbox_validation()?;
        for day in tracker.calendar.days() {
            let Some(slot) = layout.day_slot(day.day) else {
                continue;
            };
            self.write_day_block(sheet, &slot, day.weekday, formats, validation.as_ref())?;
        }

        Ok(())
    }

    /// One day's checklist: date, weekday, task rows and completion stats
    fn write_day_block(
        &self,
        sheet: &mut Worksheet,
        slot: &DaySlot,
        weekday: Weekday,
        formats: &ExcelFormats,
        validation: Option<&DataValidation>,
    ) -> Result<(), RenderError> {
        let fmt = formats.day(weekday);
        let (tick, text) = (slot.tick_col, slot.text_col);

        // merge_range only takes strings; the day number overwrites the first cell
        sheet
            .merge_range(slot.date_row, tick, slot.date_row, text, "", &fmt.data)
            .map_err(xlsx_error)?;
        sheet
            .write_number_with_format(slot.date_row, tick, slot.day, &fmt.data)
            .map_err(xlsx_error)?;

        sheet
            .merge_range(slot.title_row, tick, slot.title_row, text, weekday_label(weekday), &fmt.header)
            .map_err(xlsx_error)?;
        sheet
            .merge_range(slot.header_row, tick, slot.header_row, text, "Tasks", &fmt.header)
            .map_err(xlsx_error)?;

        for row in slot.task_rows() {
            sheet
                .write_string_with_format(row, tick, UNCHECKED, &fmt.data_boxed)
                .map_err(xlsx_error)?;
            sheet
                .write_blank(row, text, &fmt.text_boxed)
                .map_err(xlsx_error)?;
        }
        if let Some(validation) = validation {
            sheet
                .add_data_validation(slot.first_task_row, tick, slot.last_task_row, tick, validation)
                .map_err(xlsx_error)?;
        }

        let stats = [
            (slot.completed_row, "Completed", count_checked(&slot.tick_range())),
            (slot.not_completed_row, "Not Completed", count_unchecked(&slot.tick_range())),
            (slot.total_row, "Total tasks", count_filled(&slot.text_range())),
        ];
        for (row, label, formula) in stats {
            sheet
                .write_string_with_format(row, tick, label, &fmt.stats_label)
                .map_err(xlsx_error)?;
            sheet
                .write_formula_with_format(row, text, formula.as_str(), &fmt.data_boxed)
                .map_err(xlsx_error)?;
        }

        Ok(())
    }
}

/// Renderer implementation producing workbook bytes
impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, tracker: &Tracker) -> Result<Vec<u8>, RenderError> {
        if tracker.habits().is_empty() {
            return Err(RenderError::InvalidData("No habits to render".into()));
        }
        self.render_to_bytes(tracker)
    }
}

fn xlsx_error(err: XlsxError) -> RenderError {
    RenderError::Format(err.to_string())
}

// ============================================================================
// Formats
// ============================================================================

/// Reusable Excel formats
struct ExcelFormats {
    title: Format,
    grey_header: Format,
    grey_left: Format,
    habit_name: Format,
    percent: Format,
    label: Format,
    /// Per-weekday formats, Monday first
    days: [DayFormats; 7],
}

/// Formats coloured for one weekday
struct DayFormats {
    /// Weekday label on the Habits sheet
    header_boxed: Format,
    /// Weekday title and "Tasks" header on the Week sheet
    header: Format,
    /// Date cell on the Week sheet
    data: Format,
    /// Day numbers, checkboxes and counts
    data_boxed: Format,
    percent_boxed: Format,
    text_boxed: Format,
    stats_label: Format,
}

impl ExcelFormats {
    fn new(tracker: &Tracker) -> Self {
        let theme = &tracker.config.theme;
        let grey = theme.header_grey.value();

        let title = Format::new()
            .set_bold()
            .set_font_size(24)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let grey_header = Format::new()
            .set_bold()
            .set_background_color(grey)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let grey_left = Format::new()
            .set_bold()
            .set_background_color(grey)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let habit_name = Format::new()
            .set_background_color(grey)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let percent = Format::new()
            .set_num_format(PERCENT)
            .set_align(FormatAlign::Center);

        let label = Format::new().set_bold().set_align(FormatAlign::Left);

        let days = WEEKDAYS.map(|weekday| DayFormats::new(tracker.day_style(weekday)));

        Self {
            title,
            grey_header,
            grey_left,
            habit_name,
            percent,
            label,
            days,
        }
    }

    fn day(&self, weekday: Weekday) -> &DayFormats {
        &self.days[weekday.num_days_from_monday() as usize]
    }
}

impl DayFormats {
    fn new(style: DayStyle) -> Self {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(style.header_bg.value())
            .set_font_color(style.header_font.value());

        let data = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(style.data_bg.value())
            .set_font_color(style.data_font.value());

        let text_boxed = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(style.data_bg.value())
            .set_font_color(style.data_font.value())
            .set_border(FormatBorder::Thin);

        let stats_label = Format::new()
            .set_bold()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(style.data_bg.value())
            .set_font_color(style.data_font.value());

        Self {
            header_boxed: header.clone().set_border(FormatBorder::Thin),
            data_boxed: data.clone().set_border(FormatBorder::Thin),
            percent_boxed: data
                .clone()
                .set_num_format(PERCENT)
                .set_border(FormatBorder::Thin),
            header,
            data,
            text_boxed,
            stats_label,
        }
    }
}
