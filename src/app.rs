//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the fetch client for the requested connection tier
//! - runs the chart pipeline
//! - prints reports/plots

use clap::Parser;

use crate::cli::{Cli, Command, LoadArgs, ShowArgs};
use crate::domain::catalog;
use crate::error::AppError;
use crate::fetch::{FetchClient, FetchConfig};

pub mod pipeline;

/// Entry point for the `riksdata` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            handle_list();
            Ok(())
        }
        Command::Dashboard(args) => handle_dashboard(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_list() {
    for spec in catalog::charts() {
        let unit = spec.unit.map(|u| format!(" ({u})")).unwrap_or_default();
        println!("{:<24} {}{unit}", spec.id, spec.title);
    }
}

fn handle_dashboard(args: LoadArgs) -> Result<(), AppError> {
    let client = client_for(&args);
    let outcomes = pipeline::load_dashboard(&client, args.from_year);
    print!("{}", crate::report::format_dashboard(&outcomes));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let spec = catalog::find(&args.id).ok_or_else(|| {
        AppError::usage(format!(
            "Unknown chart id '{}'; run `riksdata list` for the catalog",
            args.id
        ))
    })?;

    let client = client_for(&args.load);
    let chart = pipeline::load_chart(&client, spec, args.load.from_year)?;

    print!("{}", crate::report::format_series(&chart, args.tail));
    if args.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_series_plot(&chart.points, args.width, args.height)
        );
    }
    Ok(())
}

fn client_for(args: &LoadArgs) -> FetchClient {
    FetchClient::with_config(FetchConfig {
        quality: args.quality.into(),
        ..FetchConfig::default()
    })
}
