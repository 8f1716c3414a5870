// src/main.rs

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use randomorg::{ClientConfig, RandomOrgClient, Result};
use serde_json::json;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "randomorg", version, about = "Fetch true random numbers from random.org")]
struct Args {
    /// Configuration file (defaults to ./randomorg.toml or ./randomorg.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Random integers in [min, max], one per line
    Integers {
        count: usize,
        #[arg(allow_hyphen_values = true)]
        min: i64,
        #[arg(allow_hyphen_values = true)]
        max: i64,
    },
    /// Random bytes, printed as hex
    Bytes { count: usize },
    /// Remaining bit allowance
    Quota {
        #[arg(long)]
        ip: Option<IpAddr>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ClientConfig::load_from_file(path),
        None => ClientConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize the logger
    let env = Env::default()
        .filter_or("RANDOMORG_LOG", config.log_level.as_str())
        .write_style_or("RANDOMORG_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: ClientConfig) -> Result<()> {
    let mut client = RandomOrgClient::new(config)?;

    match &args.command {
        Command::Integers { count, min, max } => {
            let values = client.integers(*count, *min, *max)?;
            info!("Fetched {} integers in [{}, {}]", values.len(), min, max);
            if args.json {
                println!("{}", json!({ "min": min, "max": max, "values": values }));
            } else {
                for value in values {
                    println!("{}", value);
                }
            }
        }
        Command::Bytes { count } => {
            let bytes = client.bytes(*count)?;
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            if args.json {
                println!("{}", json!({ "length": bytes.len(), "hex": hex }));
            } else {
                println!("{}", hex);
            }
        }
        Command::Quota { ip } => {
            let status = client.quota_status(*ip)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", status.bits_remaining);
            }
        }
    }

    Ok(())
}
