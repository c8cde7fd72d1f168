//! One-shot commands: each loads the stores, does one thing and saves if needed

use std::io::{self, Write};

use anyhow::{Result, bail};
use boxoffice_core::BoxOfficeConfig;
use boxoffice_core::model::EventKind;

use crate::cli::{BookArgs, CancelArgs, ListArgs, StatsArgs};
use crate::output::{write_stats, write_store};
use crate::session;
use crate::shell::Shell;

/// Load, run the interactive menu on stdin/stdout, save.
pub fn run_shell(config: &BoxOfficeConfig) -> Result<()> {
    let mut office = session::open(config)?;
    {
        let stdin = io::stdin();
        let mut shell = Shell::new(&mut office, config.autosave, stdin.lock(), io::stdout());
        shell.run()?;
    }
    session::save(&office)?;
    println!("Thank you for using the box office!");
    Ok(())
}

pub fn run_list(args: &ListArgs, config: &BoxOfficeConfig, out: &mut impl Write) -> Result<()> {
    let office = session::open(config)?;
    write_store(out, &office, args.store, args.json)
}

pub fn run_stats(args: &StatsArgs, config: &BoxOfficeConfig, out: &mut impl Write) -> Result<()> {
    let office = session::open(config)?;
    write_stats(out, &office.stats(), args.json)
}

pub fn run_book(args: &BookArgs, config: &BoxOfficeConfig, out: &mut impl Write) -> Result<()> {
    let mut office = session::open(config)?;
    let kind = EventKind::from(args.kind);
    let id = match office.book(args.customer, kind, args.event) {
        Ok(booking) => booking.id(),
        Err(e) => {
            tracing::warn!(error = %e, "booking rejected");
            bail!("booking rejected: {e}");
        }
    };
    tracing::info!(id, customer_id = args.customer, %kind, event_id = args.event, "booking admitted");
    session::save(&office)?;
    writeln!(out, "Booking #{id} confirmed")?;
    Ok(())
}

pub fn run_cancel(args: &CancelArgs, config: &BoxOfficeConfig, out: &mut impl Write) -> Result<()> {
    let mut office = session::open(config)?;
    if office.cancel(args.booking).is_none() {
        bail!("no booking with id {}", args.booking);
    }
    tracing::info!(id = args.booking, "booking cancelled");
    session::save(&office)?;
    writeln!(out, "Cancelled booking #{}", args.booking)?;
    Ok(())
}
