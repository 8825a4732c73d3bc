//! focus-tracker CLI - Monthly habit and task tracker generator
//!
//! Command-line interface for generating tracker workbooks, previewing a
//! month layout and writing starter configuration files.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use focus_tracker_core::{ConfigFile, Renderer, Theme, Tracker};
use focus_tracker_render::{ExcelRenderer, JsonRenderer, TextRenderer};

const DEFAULT_CONFIG_NAME: &str = "focus-tracker";

#[derive(Parser)]
#[command(name = "focus-tracker")]
#[command(author, version, about = "Monthly habit and task tracker generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the tracker workbook
    Generate {
        #[command(flatten)]
        selection: Selection,

        /// Skip the Habits sheet charts
        #[arg(long)]
        no_charts: bool,

        /// Output workbook path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Preview the month layout without writing a workbook
    Preview {
        #[command(flatten)]
        selection: Selection,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },

    /// Write a commented starter configuration file
    Init {
        /// Config name (file is written as <NAME>.toml)
        #[arg(value_name = "NAME", default_value = DEFAULT_CONFIG_NAME)]
        name: String,

        /// Directory to write into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the built-in colour themes
    Themes,
}

/// Flags that pick the month and content; each one overrides the config file
#[derive(Args, Debug, Default)]
struct Selection {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "FOCUS_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Month 1-12 (defaults to the current month)
    #[arg(long)]
    month: Option<u32>,

    /// Colour theme
    #[arg(long)]
    theme: Option<String>,

    /// Habit row; repeat for several habits
    #[arg(long = "habit", value_name = "TEXT")]
    habits: Vec<String>,

    /// Checkbox rows per day on the Week sheet
    #[arg(long, value_name = "N")]
    tasks_per_day: Option<u32>,

    /// Title above the habit grid (defaults to "<Month> <Year>")
    #[arg(long)]
    title: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PreviewFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Generate {
            selection,
            no_charts,
            output,
        }) => cmd_generate(selection, no_charts, output),
        Some(Commands::Preview { selection, format }) => cmd_preview(selection, format),
        Some(Commands::Init {
            name,
            output,
            force,
        }) => cmd_init(&name, &output, force),
        Some(Commands::Themes) => {
            cmd_themes();
            Ok(())
        }
        None => {
            println!("focus-tracker - Monthly habit and task tracker generator");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve flags, config file and defaults into a validated tracker
fn resolve_tracker(selection: Selection, output: Option<PathBuf>) -> Result<Tracker> {
    let mut file = match &selection.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            ConfigFile::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => ConfigFile::default(),
    };

    if selection.year.is_some() {
        file.year = selection.year;
    }
    if selection.month.is_some() {
        file.month = selection.month;
    }
    if selection.theme.is_some() {
        file.theme = selection.theme;
    }
    if !selection.habits.is_empty() {
        file.habits = Some(selection.habits);
    }
    if selection.tasks_per_day.is_some() {
        file.tasks_per_day = selection.tasks_per_day;
    }
    if selection.title.is_some() {
        file.title = selection.title;
    }
    if output.is_some() {
        file.output = output;
    }

    let config = file
        .into_config(today())
        .context("Invalid tracker configuration")?;
    Ok(Tracker::new(config)?)
}

fn cmd_generate(selection: Selection, no_charts: bool, output: Option<PathBuf>) -> Result<()> {
    let tracker = resolve_tracker(selection, output)?;
    let path = tracker.config.output.clone();

    ExcelRenderer::new()
        .include_charts(!no_charts)
        .save(&tracker, &path)
        .with_context(|| format!("Failed to write workbook {}", path.display()))?;

    info!(path = %path.display(), month = %tracker.calendar.title(), "workbook written");
    println!("Created: {}", path.display());
    Ok(())
}

fn cmd_preview(selection: Selection, format: PreviewFormat) -> Result<()> {
    let tracker = resolve_tracker(selection, None)?;
    let rendered = match format {
        PreviewFormat::Text => TextRenderer::new().render(&tracker)?,
        PreviewFormat::Json => JsonRenderer::new().render(&tracker)?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_init(name: &str, dir: &Path, force: bool) -> Result<()> {
    let stem = sanitize_name(name);
    if stem.is_empty() {
        bail!("Config name '{name}' has no usable characters");
    }
    let path = dir.join(format!("{stem}.toml"));

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, ConfigFile::sample_toml(&stem, today()))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created: {}", path.display());
    println!("Next: focus-tracker generate --config {}", path.display());
    Ok(())
}

fn cmd_themes() {
    for name in Theme::names() {
        println!("{name}");
    }
}

/// Keep ASCII letters, digits, `-` and `_`; everything else becomes `_`
fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
