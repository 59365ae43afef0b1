//! Almanac CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use almanac::AlmanacError;
use almanac_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match almanac_cli::run(&args) {
        Ok(()) => info!(output_file = args.output; "Timeline laid out"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Falls back to `warn` when the requested level is not recognized
fn init_logger(requested: &str) {
    let level = LevelFilter::from_str(requested).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {requested}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();

    info!(log_level:? = level; "Starting Almanac");
}

/// Logs one rendered report per document problem
fn report(err: &AlmanacError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &reportable) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{reportable}"),
        }
    }
}
