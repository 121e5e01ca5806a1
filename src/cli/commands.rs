//! Command implementations for the winds aloft CLI
//!
//! This module contains the command execution logic, logging setup and
//! output rendering for the CLI interface.

use crate::cli::args::{Args, ColumnsArgs, Commands, DecodeArgs, OutputFormat, UrlArgs};
use crate::config::DecoderConfig;
use crate::decoder::{
    DecodeStats, WindsAloftDecoder, extract_sections, parse_altitude_header, parse_validity_line,
};
use crate::models::{ParsedProduct, WindDirection, WindTempCell};
use crate::source::{ForecastHorizon, read_product_file};
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

const CELL_WIDTH: usize = 12;

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    match args.command {
        Some(Commands::Decode(decode_args)) => run_decode(&decode_args),
        Some(Commands::Columns(columns_args)) => run_columns(&columns_args),
        Some(Commands::Url(url_args)) => {
            run_url(&url_args);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("winds_aloft={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

fn load_config(args: &DecodeArgs) -> Result<DecoderConfig> {
    let mut config = match &args.config {
        Some(path) => DecoderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DecoderConfig::default(),
    };
    if args.strict {
        config = config.with_strict();
    }
    Ok(config)
}

fn run_decode(args: &DecodeArgs) -> Result<()> {
    let config = load_config(args)?;
    let decoder = WindsAloftDecoder::new(config)?;

    let mut raw = read_product_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    if let Some(issuance) = &args.issuance {
        raw.issuance_time = issuance.clone();
    }

    let result = decoder
        .decode_raw(&raw)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    let mut product = result.product;
    product
        .locations
        .retain(|code, _| args.includes_station(code));
    info!("Showing {} locations", product.locations.len());

    match args.format {
        OutputFormat::Table => print_table(&product),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&product)?),
    }

    report_anomalies(&result.stats);
    Ok(())
}

fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let raw = read_product_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let sections = extract_sections(&raw.product_text)?;
    let validity = parse_validity_line(sections.validity_line)?;
    let columns = parse_altitude_header(sections.header_line)?;

    println!(
        "{} {}Z, for use {}-{}Z, temperatures negative above {}",
        "Valid".bright_green().bold(),
        validity.valid,
        validity.for_use_from,
        validity.for_use_to,
        validity.neg_above
    );
    println!();
    println!(
        "{}",
        format!("{:>8} {:>6} {:>6} {:>6}", "ALT", "START", "END", "WIDTH").bright_cyan()
    );
    for column in &columns {
        println!(
            "{:>8} {:>6} {:>6} {:>6}",
            column.altitude,
            column.start_offset,
            column.end_offset,
            column.width()
        );
    }
    Ok(())
}

fn run_url(args: &UrlArgs) {
    let horizons = match args.horizon {
        Some(horizon) => vec![horizon],
        None => ForecastHorizon::ALL.to_vec(),
    };
    for horizon in horizons {
        println!("{:>8}  {}", horizon.to_string(), horizon.listing_url());
    }
}

fn print_table(product: &ParsedProduct) {
    println!(
        "{} {}Z  {} {}-{}Z  {} {}",
        "Valid".bright_green().bold(),
        product.validity.valid,
        "For use".bright_green().bold(),
        product.validity.for_use_from,
        product.validity.for_use_to,
        "Issued".bright_green().bold(),
        product.issuance_time
    );
    println!();

    let header: String = product
        .altitudes()
        .map(|altitude| format!("{:>width$}", altitude, width = CELL_WIDTH))
        .collect();
    println!("{}", format!("{:<4}{}", "STN", header).bright_cyan().bold());

    for (code, record) in &product.locations {
        let row: String = record
            .cells()
            .iter()
            .map(|cell| {
                let text = format!("{:>width$}", format_cell(cell), width = CELL_WIDTH);
                if cell.is_missing() {
                    text.bright_black().to_string()
                } else {
                    text
                }
            })
            .collect();
        println!("{}{}", format!("{:<4}", code).bright_yellow(), row);
    }
}

/// Render a cell as `DDD/SS±TT`, e.g. `280/100-50` or `VRB/05+19`
pub fn format_cell(cell: &WindTempCell) -> String {
    let direction = match cell.direction {
        WindDirection::Degrees(degrees) => format!("{:03}", degrees),
        WindDirection::LightAndVariable => "VRB".to_string(),
        WindDirection::Missing => return "---".to_string(),
    };
    let speed = cell
        .speed_kts
        .map(|speed| format!("{:02}", speed))
        .unwrap_or_default();
    let temp = cell
        .temp_c
        .map(|temp| format!("{:+03}", temp))
        .unwrap_or_default();
    format!("{}/{}{}", direction, speed, temp)
}

fn report_anomalies(stats: &DecodeStats) {
    if !stats.has_anomalies() {
        return;
    }
    eprintln!(
        "{} {} malformed cells, {} duplicate locations",
        "Warning:".yellow().bold(),
        stats.cells_malformed,
        stats.duplicate_locations
    );
    for message in &stats.errors {
        eprintln!("  {}", message.yellow());
    }
}
