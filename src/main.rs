// src/main.rs - diagnostic host for the virtual input pins
use ams_vmcu::config::{self, Config, ConfigError, InputPinsConfig};
use ams_vmcu::VmcuHost;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Virtual MCU host CLI
#[derive(Parser, Debug)]
#[command(name = "vmcu-host", about = "Inspect and exercise the virtual input pins of a printer configuration.")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the virtual MCU prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every virtual pin with its mode and state
    List {
        #[arg(long)]
        json: bool,
    },
    /// Apply pin states, then report each configured sensor
    Check {
        /// Pin state to apply before reading (e.g. --set pin3=1)
        #[arg(long = "set", value_parser = parse_pin_assignment)]
        set: Vec<(String, bool)>,

        #[arg(long)]
        json: bool,
    },
}

fn parse_pin_assignment(s: &str) -> Result<(String, bool), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid PIN=VALUE: no `=` found in '{}'.", s))?;
    let value = match value.trim() {
        "1" | "true" | "high" => true,
        "0" | "false" | "low" => false,
        other => return Err(format!("Invalid pin value '{}', expected 0 or 1.", other)),
    };
    Ok((key.trim().to_string(), value))
}

/// Load the configured file, or an `[input_pins]`-only config, then apply `--prefix`.
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::load_config(path)?
        }
        None => Config::with_prefix(&config::default_prefix()),
    };
    if let Some(prefix) = &cli.prefix {
        config.input_pins.get_or_insert_with(InputPinsConfig::default).prefix = prefix.clone();
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = build_config(&cli)?;
    let host = VmcuHost::from_config(&config)?;

    match cli.command {
        Commands::List { json } => {
            let report = host.pin_report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_empty() {
                println!("No virtual MCU configured");
            } else {
                for pin in report {
                    println!("{:<12} {:<6} {}", pin.name, pin.mode, pin.state);
                }
            }
        }
        Commands::Check { set, json } => {
            let mcu = host
                .mcu()
                .ok_or("configuration has no [input_pins] section")?;
            for (key, value) in &set {
                mcu.set_pin(key, *value)?;
            }
            let states = host.sensor_states();
            if json {
                println!("{}", serde_json::to_string_pretty(&states)?);
            } else if states.is_empty() {
                println!("No sensors configured");
            } else {
                for sensor in states {
                    println!(
                        "{:<16} {:<14} level={} {}",
                        sensor.name,
                        sensor.pin,
                        sensor.level,
                        if sensor.triggered { "TRIGGERED" } else { "open" }
                    );
                }
            }
        }
    }

    Ok(())
}
