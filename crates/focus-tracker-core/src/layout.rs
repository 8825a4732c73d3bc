//! Grid layout of the Habits and Week sheets
//!
//! All coordinates are zero-based `(row, col)` pairs. Rows are `u32` and
//! columns `u16`, matching the worksheet API they are fed into.

use std::ops::RangeInclusive;

use crate::calendar::MonthCalendar;
use crate::cell::{cell_ref, range_ref};

// ============================================================================
// Habits sheet
// ============================================================================

/// Row/column map of the monthly habit grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HabitsLayout {
    days: u32,
    weeks: u32,
    habit_count: u32,
}

impl HabitsLayout {
    pub const TITLE_ROW: u32 = 1;
    pub const PROGRESS_ROW: u32 = 3;
    pub const DONE_ROW: u32 = 4;
    pub const NOT_DONE_ROW: u32 = 5;
    pub const WEEK_HEADER_ROW: u32 = 7;
    pub const WEEKDAY_ROW: u32 = 8;
    pub const DAY_NUMBER_ROW: u32 = 9;
    pub const HABITS_HEADER_ROW: u32 = 10;
    pub const HABIT_START_ROW: u32 = 11;

    pub const GUTTER_COL: u16 = 0;
    pub const NAME_COL: u16 = 1;
    pub const DAY_START_COL: u16 = 2;
    /// Day columns are sized for the longest month (C:AG)
    pub const MAX_DAY_COL: u16 = Self::DAY_START_COL + 30;

    pub const ANALYSIS_TITLE_ROW: u32 = 5;
    pub const ANALYSIS_HEADER_ROW: u32 = 7;
    pub const ANALYSIS_START_ROW: u32 = 8;
    pub const ANALYSIS_HABIT_COL: u16 = 34;
    pub const ANALYSIS_GOAL_COL: u16 = 35;
    pub const ANALYSIS_ACTUAL_COL: u16 = 36;
    pub const ANALYSIS_PROGRESS_COL: u16 = 37;
    /// Narrow spacer columns before and around the analysis block (AH:AL)
    pub const SIDE_FIRST_COL: u16 = 33;

    const PROGRESS_CHART_MIN_ROW: u32 = 21;
    const HABIT_CHART_MIN_ROW: u32 = 19;
    const CHART_GAP: u32 = 3;

    pub fn new(calendar: &MonthCalendar, habit_count: u32) -> Self {
        Self {
            days: calendar.days_in_month(),
            weeks: calendar.num_weeks(),
            habit_count,
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn habit_count(&self) -> u32 {
        self.habit_count
    }

    /// Column of a 1-based day of month
    pub fn day_col(&self, day: u32) -> u16 {
        Self::DAY_START_COL + (day - 1) as u16
    }

    pub fn last_day_col(&self) -> u16 {
        self.day_col(self.days)
    }

    pub fn habit_row(&self, index: u32) -> u32 {
        Self::HABIT_START_ROW + index
    }

    pub fn last_habit_row(&self) -> u32 {
        self.habit_row(self.habit_count.saturating_sub(1))
    }

    /// First and last column of a zero-based week chunk
    pub fn week_span(&self, week: u32) -> Option<(u16, u16)> {
        if week >= self.weeks {
            return None;
        }
        let start = week * 7 + 1;
        let end = (start + 6).min(self.days);
        Some((self.day_col(start), self.day_col(end)))
    }

    pub fn analysis_row(&self, index: u32) -> u32 {
        Self::ANALYSIS_START_ROW + index
    }

    pub fn last_analysis_row(&self) -> u32 {
        self.analysis_row(self.habit_count.saturating_sub(1))
    }

    /// All habit checkboxes of one day, e.g. `C12:C15`
    pub fn day_checkbox_range(&self, day: u32) -> String {
        let col = self.day_col(day);
        range_ref(Self::HABIT_START_ROW, col, self.last_habit_row(), col)
    }

    /// All day checkboxes of one habit, e.g. `C12:AF12`
    pub fn habit_checkbox_range(&self, index: u32) -> String {
        let row = self.habit_row(index);
        range_ref(row, Self::DAY_START_COL, row, self.last_day_col())
    }

    /// The day-number row, e.g. `C10:AF10`
    pub fn day_number_range(&self) -> String {
        range_ref(
            Self::DAY_NUMBER_ROW,
            Self::DAY_START_COL,
            Self::DAY_NUMBER_ROW,
            self.last_day_col(),
        )
    }

    /// Habit name cell that an analysis row links to
    pub fn habit_name_cell(&self, index: u32) -> String {
        cell_ref(self.habit_row(index), Self::NAME_COL)
    }

    /// Anchor of the daily progress chart, kept clear of the habit rows
    pub fn progress_chart_anchor(&self) -> (u32, u16) {
        let row = (self.last_habit_row() + Self::CHART_GAP).max(Self::PROGRESS_CHART_MIN_ROW);
        (row, Self::NAME_COL)
    }

    /// Anchor of the habit progress chart, kept clear of the analysis rows
    pub fn habit_chart_anchor(&self) -> (u32, u16) {
        let row = (self.last_analysis_row() + Self::CHART_GAP).max(Self::HABIT_CHART_MIN_ROW);
        (row, Self::ANALYSIS_HABIT_COL)
    }
}

// ============================================================================
// Week sheet
// ============================================================================

/// Row/column map of the stacked weekly planning blocks
///
/// Each week chunk occupies one block of rows; each day of the chunk takes a
/// checkbox column and the text column to its right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekLayout {
    days: u32,
    weeks: u32,
    tasks_per_day: u32,
}

/// Coordinates of one day's checklist on the Week sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySlot {
    pub day: u32,
    /// Zero-based week chunk
    pub week: u32,
    pub tick_col: u16,
    pub text_col: u16,
    pub date_row: u32,
    pub title_row: u32,
    pub header_row: u32,
    pub first_task_row: u32,
    pub last_task_row: u32,
    pub completed_row: u32,
    pub not_completed_row: u32,
    pub total_row: u32,
}

impl DaySlot {
    pub fn task_rows(&self) -> RangeInclusive<u32> {
        self.first_task_row..=self.last_task_row
    }

    pub fn tick_range(&self) -> String {
        range_ref(
            self.first_task_row,
            self.tick_col,
            self.last_task_row,
            self.tick_col,
        )
    }

    pub fn text_range(&self) -> String {
        range_ref(
            self.first_task_row,
            self.text_col,
            self.last_task_row,
            self.text_col,
        )
    }
}

impl WeekLayout {
    pub const FIRST_BLOCK_ROW: u32 = 8;
    /// Date, day title, "Tasks" header, three stat rows and a spacer
    pub const FIXED_BLOCK_ROWS: u32 = 7;
    pub const TITLE_FIRST_ROW: u32 = 1;
    pub const TITLE_LAST_ROW: u32 = 3;
    pub const TITLE_FIRST_COL: u16 = 1;
    pub const TITLE_LAST_COL: u16 = 14;
    /// Checkbox columns B, D, F, H, J, L, N
    pub const TICK_COLS: [u16; 7] = [1, 3, 5, 7, 9, 11, 13];
    /// Task text columns C, E, G, I, K, M, O
    pub const TEXT_COLS: [u16; 7] = [2, 4, 6, 8, 10, 12, 14];
    /// Spare note columns Q:R
    pub const NOTE_COLS: [u16; 2] = [16, 17];

    pub fn new(calendar: &MonthCalendar, tasks_per_day: u32) -> Self {
        Self {
            days: calendar.days_in_month(),
            weeks: calendar.num_weeks(),
            tasks_per_day,
        }
    }

    pub fn tasks_per_day(&self) -> u32 {
        self.tasks_per_day
    }

    pub fn block_count(&self) -> u32 {
        self.weeks
    }

    pub fn block_height(&self) -> u32 {
        self.tasks_per_day + Self::FIXED_BLOCK_ROWS
    }

    pub fn block_top(&self, week: u32) -> u32 {
        Self::FIRST_BLOCK_ROW + week * self.block_height()
    }

    /// Coordinates for a 1-based day of month
    pub fn day_slot(&self, day: u32) -> Option<DaySlot> {
        if day == 0 || day > self.days {
            return None;
        }
        let week = (day - 1) / 7;
        let slot = ((day - 1) % 7) as usize;
        let base = self.block_top(week);
        let first_task_row = base + 3;
        let last_task_row = first_task_row + self.tasks_per_day - 1;

        Some(DaySlot {
            day,
            week,
            tick_col: Self::TICK_COLS[slot],
            text_col: Self::TEXT_COLS[slot],
            date_row: base,
            title_row: base + 1,
            header_row: base + 2,
            first_task_row,
            last_task_row,
            completed_row: last_task_row + 1,
            not_completed_row: last_task_row + 2,
            total_row: last_task_row + 3,
        })
    }

    /// Every day slot in day order
    pub fn slots(&self) -> impl Iterator<Item = DaySlot> + '_ {
        (1..=self.days).filter_map(move |day| self.day_slot(day))
    }

    /// Last row used by any block
    pub fn last_row(&self) -> u32 {
        self.block_top(self.weeks.saturating_sub(1)) + self.block_height() - 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn calendar(year: i32, month: u32) -> MonthCalendar {
        MonthCalendar::new(year, month).unwrap()
    }

    #[test]
    fn habits_columns() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 4);
        assert_eq!(layout.day_col(1), 2);
        assert_eq!(layout.day_col(30), 31);
        assert_eq!(layout.last_day_col(), 31);
        assert_eq!(HabitsLayout::MAX_DAY_COL, 32);
    }

    #[test]
    fn habits_rows() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 4);
        assert_eq!(layout.habit_row(0), 11);
        assert_eq!(layout.last_habit_row(), 14);
        assert_eq!(layout.analysis_row(0), 8);
        assert_eq!(layout.last_analysis_row(), 11);
    }

    #[test]
    fn habits_week_spans() {
        let layout = HabitsLayout::new(&calendar(2025, 1), 4);
        assert_eq!(layout.week_span(0), Some((2, 8)));
        assert_eq!(layout.week_span(3), Some((23, 29)));
        // 31-day month: week 5 holds days 29-31
        assert_eq!(layout.week_span(4), Some((30, 32)));
        assert_eq!(layout.week_span(5), None);
    }

    #[test]
    fn habits_ranges() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 4);
        assert_eq!(layout.day_checkbox_range(1), "C12:C15");
        assert_eq!(layout.habit_checkbox_range(0), "C12:AF12");
        assert_eq!(layout.habit_checkbox_range(3), "C15:AF15");
        assert_eq!(layout.day_number_range(), "C10:AF10");
        assert_eq!(layout.habit_name_cell(2), "B14");
    }

    #[test]
    fn single_habit_ranges() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 1);
        assert_eq!(layout.day_checkbox_range(5), "G12:G12");
        assert_eq!(layout.last_analysis_row(), 8);
    }

    #[test]
    fn chart_anchors_default_positions() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 4);
        // B22 and AI20
        assert_eq!(layout.progress_chart_anchor(), (21, 1));
        assert_eq!(layout.habit_chart_anchor(), (19, 34));
    }

    #[test]
    fn chart_anchors_move_below_long_habit_lists() {
        let layout = HabitsLayout::new(&calendar(2025, 11), 15);
        assert_eq!(layout.last_habit_row(), 25);
        assert_eq!(layout.progress_chart_anchor(), (28, 1));
        assert_eq!(layout.last_analysis_row(), 22);
        assert_eq!(layout.habit_chart_anchor(), (25, 34));
    }

    #[test]
    fn week_block_geometry() {
        let layout = WeekLayout::new(&calendar(2025, 11), 10);
        assert_eq!(layout.block_height(), 17);
        assert_eq!(layout.block_count(), 5);
        assert_eq!(layout.block_top(0), 8);
        assert_eq!(layout.block_top(1), 25);
    }

    #[test]
    fn first_day_slot() {
        let layout = WeekLayout::new(&calendar(2025, 11), 10);
        let slot = layout.day_slot(1).unwrap();
        assert_eq!(
            slot,
            DaySlot {
                day: 1,
                week: 0,
                tick_col: 1,
                text_col: 2,
                date_row: 8,
                title_row: 9,
                header_row: 10,
                first_task_row: 11,
                last_task_row: 20,
                completed_row: 21,
                not_completed_row: 22,
                total_row: 23,
            }
        );
        assert_eq!(slot.tick_range(), "B12:B21");
        assert_eq!(slot.text_range(), "C12:C21");
        assert_eq!(slot.task_rows().count(), 10);
    }

    #[test]
    fn later_day_slots() {
        let layout = WeekLayout::new(&calendar(2025, 11), 10);

        let day7 = layout.day_slot(7).unwrap();
        assert_eq!((day7.week, day7.tick_col, day7.text_col), (0, 13, 14));

        let day8 = layout.day_slot(8).unwrap();
        assert_eq!((day8.week, day8.tick_col, day8.date_row), (1, 1, 25));

        let day30 = layout.day_slot(30).unwrap();
        assert_eq!((day30.week, day30.tick_col), (4, 3));
        assert_eq!(day30.date_row, 8 + 4 * 17);

        assert_eq!(layout.day_slot(0), None);
        assert_eq!(layout.day_slot(31), None);
    }

    #[test]
    fn february_has_no_trailing_block() {
        let layout = WeekLayout::new(&calendar(2026, 2), 10);
        assert_eq!(layout.block_count(), 4);
        let slots: Vec<DaySlot> = layout.slots().collect();
        assert_eq!(slots.len(), 28);
        assert!(slots.iter().all(|s| s.week < 4));
        assert_eq!(layout.last_row(), slots[27].total_row);
    }

    #[test]
    fn small_task_lists() {
        let layout = WeekLayout::new(&calendar(2025, 11), 1);
        let slot = layout.day_slot(1).unwrap();
        assert_eq!(slot.first_task_row, slot.last_task_row);
        assert_eq!(slot.tick_range(), "B12:B12");
        assert_eq!(layout.block_height(), 8);
    }
}
