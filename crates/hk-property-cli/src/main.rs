mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::MortgageArgs;
use commands::property::{CalculateArgs, TimelineArgs};
use commands::stamp_duty::StampDutyArgs;

/// Hong Kong residential property return calculations
#[derive(Parser)]
#[command(
    name = "hkprop",
    version,
    about = "Hong Kong residential property return calculations",
    long_about = "Computes upfront cost, mortgage instalment, net cash flow, yields, \
                  appreciation-adjusted ROI, break-even and ad valorem stamp duty \
                  (Scale 2) for a residential purchase, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log intermediate values (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Full return analysis for a purchase
    Calculate(CalculateArgs),
    /// ROI for each year of the holding horizon
    Timeline(TimelineArgs),
    /// Ad valorem stamp duty for a price
    StampDuty(StampDutyArgs),
    /// Print the stamp duty bands
    Schedule,
    /// Monthly instalment for a fixed-rate mortgage
    Mortgage(MortgageArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::property::run_calculate(args),
        Commands::Timeline(args) => commands::property::run_timeline(args),
        Commands::StampDuty(args) => commands::stamp_duty::run_stamp_duty(args),
        Commands::Schedule => commands::stamp_duty::run_schedule(),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Version => {
            println!("hkprop {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let rendered = result.and_then(|value| output::format_output(&cli.output, &value));

    if let Err(e) = rendered {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}
