#![warn(rust_2024_compatibility, clippy::all)]
#![allow(clippy::needless_pass_by_value)]

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use boxoffice::cli::{Args, Command};
use boxoffice::commands::{run_book, run_cancel, run_list, run_shell, run_stats};
use boxoffice::init::run_init;
use boxoffice::session::resolve_config;

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the menu and listings
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config_path = args.config.as_deref();
    let data_dir = args.data_dir.as_deref();
    let mut out = io::stdout();
    match args.command.unwrap_or(Command::Shell) {
        Command::Init(init) => run_init(init, data_dir),
        Command::Shell => run_shell(&resolve_config(config_path, data_dir)?),
        Command::List(list) => run_list(&list, &resolve_config(config_path, data_dir)?, &mut out),
        Command::Stats(stats) => run_stats(&stats, &resolve_config(config_path, data_dir)?, &mut out),
        Command::Book(book) => run_book(&book, &resolve_config(config_path, data_dir)?, &mut out),
        Command::Cancel(cancel) => {
            run_cancel(&cancel, &resolve_config(config_path, data_dir)?, &mut out)
        }
    }
}
