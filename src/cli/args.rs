//! Command-line argument definitions for the winds aloft decoder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::source::ForecastHorizon;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the winds aloft decoder
///
/// Decodes winds and temperatures aloft (FD) bulletins into per-station,
/// per-altitude wind and temperature forecasts.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "winds-aloft",
    version,
    about = "Decode winds and temperatures aloft forecast bulletins"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a bulletin and print the forecast table
    Decode(DecodeArgs),
    /// Show the validity window and the altitude columns of a bulletin
    Columns(ColumnsArgs),
    /// Print the product listing URL for a forecast horizon
    Url(UrlArgs),
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Bulletin text or saved product document (JSON)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Issuance time to record, overriding the one found in the input
    #[arg(long, value_name = "TIME")]
    pub issuance: Option<String>,

    /// Only show these stations (repeatable)
    #[arg(short = 's', long = "station", value_name = "CODE")]
    pub stations: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Decoder configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail on the first malformed cell
    #[arg(long)]
    pub strict: bool,
}

impl DecodeArgs {
    /// Whether a station passes the `--station` filter
    pub fn includes_station(&self, code: &str) -> bool {
        self.stations.is_empty()
            || self
                .stations
                .iter()
                .any(|station| station.eq_ignore_ascii_case(code))
    }
}

/// Arguments for the columns command
#[derive(Debug, Clone, Parser)]
pub struct ColumnsArgs {
    /// Bulletin text or saved product document (JSON)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Arguments for the url command
#[derive(Debug, Clone, Parser)]
pub struct UrlArgs {
    /// Forecast horizon; all horizons when omitted
    #[arg(long, value_enum)]
    pub horizon: Option<ForecastHorizon>,
}

/// Output formats for decoded products
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode_command() {
        let args = Args::try_parse_from([
            "winds-aloft",
            "decode",
            "fd1.txt",
            "--station",
            "BOS",
            "-s",
            "mia",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        match args.command {
            Some(Commands::Decode(decode)) => {
                assert_eq!(decode.input, PathBuf::from("fd1.txt"));
                assert_eq!(decode.format, OutputFormat::Json);
                assert!(decode.includes_station("BOS"));
                assert!(decode.includes_station("MIA"));
                assert!(!decode.includes_station("DEN"));
                assert!(!decode.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_url_command() {
        let args =
            Args::try_parse_from(["winds-aloft", "url", "--horizon", "twelve-hour", "-q"]).unwrap();

        assert_eq!(args.get_log_level(), "warn");
        match args.command {
            Some(Commands::Url(url)) => assert_eq!(url.horizon, Some(ForecastHorizon::TwelveHour)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["winds-aloft", "-v", "-q"]).is_err());
    }
}
