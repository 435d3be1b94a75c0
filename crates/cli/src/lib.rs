pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use gemflow_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "gemflow",
    about = "Gemflow staff CLI",
    long_about = "Operate the diamond-appraisal worklist: list requests, inspect one, \
                  issue lifecycle actions, and validate configuration and backend readiness.",
    after_help = "Examples:\n  gemflow list\n  gemflow show R-1042\n  gemflow act R-1042 request_sealing\n  gemflow doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Fetch and render the staff worklist with the action each request offers")]
    List,
    #[command(about = "Fetch one request and show its lifecycle position")]
    Show {
        #[arg(help = "Backend-assigned request id")]
        id: String,
    },
    #[command(about = "Issue one lifecycle action against a request (one invocation, one attempt)")]
    Act {
        #[arg(help = "Backend-assigned request id")]
        id: String,
        #[arg(
            help = "send_to_valuation_staff | customer_took_sample | request_sealing | request_commitment"
        )]
        action: String,
    },
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
    #[command(about = "Validate config, credential readiness, and backend connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use gemflow_core::config::LogFormat::{Compact, Json, Pretty};
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // A second init in the same process (tests) is a no-op, not a panic.
    let result = match config.logging.format {
        Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .compact()
            .try_init(),
        Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .pretty()
            .try_init(),
        Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .json()
            .try_init(),
    };
    let _ = result;
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::List => commands::list::run().await,
        Command::Show { id } => commands::show::run(&id).await,
        Command::Act { id, action } => commands::act::run(&id, &action).await,
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json).await,
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
