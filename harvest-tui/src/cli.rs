use clap::{Parser, Subcommand};
use time::Date;

use crate::time_utils::parse_date;

#[derive(Debug, Parser)]
#[command(name = "harvest-tui")]
#[command(about = "Terminal UI for Harvest time tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Day to open instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    pub date: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run against the Harvest API (default)
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

fn parse_date_arg(s: &str) -> Result<Date, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}
