//! # focus-tracker-render
//!
//! Rendering backends for focus-tracker.
//!
//! This crate provides:
//! - Excel workbook output (Habits and Week sheets with charts)
//! - Plain-text month preview
//! - JSON preview of the resolved tracker
//!
//! ## Example
//!
//! ```rust,ignore
//! use focus_tracker_core::{Renderer, Tracker, TrackerConfig};
//! use focus_tracker_render::{ExcelRenderer, TextRenderer};
//!
//! let tracker = Tracker::new(TrackerConfig::new(2025, 11))?;
//!
//! // Workbook bytes
//! let xlsx = ExcelRenderer::new().render(&tracker)?;
//! std::fs::write("FocusTracker.xlsx", xlsx)?;
//!
//! // Terminal preview
//! println!("{}", TextRenderer::new().render(&tracker)?);
//! ```

pub mod excel;
pub mod json;
pub mod text;

pub use excel::{ExcelRenderer, HABITS_SHEET, WEEK_SHEET};
pub use json::JsonRenderer;
pub use text::TextRenderer;
