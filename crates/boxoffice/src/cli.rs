//! CLI argument parsing and command definitions

use boxoffice_core::model::EventKind;
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "boxoffice",
    version,
    about = "Booking desk for theater plays and music shows"
)]
pub struct Args {
    /// Optional config file (TOML only). Default: boxoffice.toml if present.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the data files (overrides data_dir from the config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<Utf8PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive shell.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Parser)]
pub enum Command {
    /// Interactive menu for managing shows, customers and bookings
    Shell,
    /// Print every record of one store
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Tickets booked per show
    Stats(StatsArgs),
    /// Book a customer onto a show
    Book(BookArgs),
    /// Cancel a booking
    Cancel(CancelArgs),
    /// Write a default boxoffice.toml
    Init(InitArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreName {
    Theater,
    Music,
    Customers,
    Bookings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Theater,
    Music,
}

impl From<KindArg> for EventKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Theater => Self::Theater,
            KindArg::Music => Self::Music,
        }
    }
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub store: StoreName,

    /// Output JSON instead of human format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Output JSON instead of human format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct BookArgs {
    /// Customer identifier
    #[arg(long)]
    pub customer: u32,

    /// Which catalog the event is in
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Show identifier within that catalog
    #[arg(long)]
    pub event: u32,
}

#[derive(Debug, Parser)]
pub struct CancelArgs {
    /// Booking identifier
    pub booking: u32,
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Directory to write boxoffice.toml into
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: Utf8PathBuf,

    /// Overwrite an existing boxoffice.toml
    #[arg(long)]
    pub force: bool,
}
