//! Command-line parsing for the dashboard CLI.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/decode code.

use clap::{Parser, Subcommand, ValueEnum};

use crate::fetch::ConnectionQuality;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "riksdata",
    version,
    about = "Norwegian economic statistics in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the chart catalog.
    List,
    /// Load every chart concurrently and print a summary table.
    Dashboard(LoadArgs),
    /// Load one chart; print its tail and optionally an ASCII plot.
    Show(ShowArgs),
}

/// Options shared by everything that loads charts.
#[derive(Debug, Parser, Clone)]
pub struct LoadArgs {
    /// Drop observations before this year.
    #[arg(long, default_value_t = 2000)]
    pub from_year: i32,

    /// Connection-quality tier used for request timeouts.
    #[arg(long, value_enum, default_value_t = Quality::Good)]
    pub quality: Quality,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Chart id from `riksdata list`.
    pub id: String,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Render an ASCII plot under the listing.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Number of trailing observations to list.
    #[arg(long, default_value_t = 12)]
    pub tail: usize,
}

/// CLI-facing mirror of [`ConnectionQuality`], so the fetch layer stays
/// free of argument-parsing concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Quality {
    Good,
    Slow,
    Offline,
}

impl From<Quality> for ConnectionQuality {
    fn from(value: Quality) -> Self {
        match value {
            Quality::Good => ConnectionQuality::Good,
            Quality::Slow => ConnectionQuality::Slow,
            Quality::Offline => ConnectionQuality::Offline,
        }
    }
}
