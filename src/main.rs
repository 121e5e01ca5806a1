use clap::Parser;
use std::process;
use winds_aloft::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Winds Aloft - FD Bulletin Decoder");
    println!("=================================");
    println!();
    println!("Decode winds and temperatures aloft forecast bulletins into");
    println!("per-station, per-altitude wind and temperature forecasts.");
    println!();
    println!("USAGE:");
    println!("    winds-aloft <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode a bulletin and print the forecast table");
    println!("    columns     Show the validity window and altitude columns of a bulletin");
    println!("    url         Print the product listing URL for a forecast horizon");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode a saved bulletin:");
    println!("    winds-aloft decode fd1us1.txt");
    println!();
    println!("    # Decode a saved product document for two stations as JSON:");
    println!("    winds-aloft decode fd1us1.json --station BOS --station MIA --format json");
    println!();
    println!("    # Print the listing URL for the 12 hour forecast:");
    println!("    winds-aloft url --horizon twelve-hour");
    println!();
    println!("For detailed help on any command, use:");
    println!("    winds-aloft <COMMAND> --help");
}
