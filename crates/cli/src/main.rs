mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use recnorm_mapper::PolicyKind;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Adapt expected test records to what a destination can store.
#[derive(Parser)]
#[command(
    name = "recnorm",
    version,
    about = "Normalize expected records for a destination's type system"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress error messages
    #[arg(long, global = true)]
    quiet: bool,

    /// Log filter, e.g. `info` or `recnorm_mapper=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Path to a recnorm.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map JSON-lines records through a policy
    Map {
        /// Path to the stream's JSON schema
        #[arg(long)]
        schema: PathBuf,
        /// Policy to apply
        #[arg(long, required_unless_present = "destination", conflicts_with = "destination")]
        policy: Option<PolicyKind>,
        /// Destination profile from the config file
        #[arg(long)]
        destination: Option<String>,
        /// Lines are bare data objects rather than `{"data": ...}` envelopes
        #[arg(long)]
        bare: bool,
        /// JSON-lines records file (stdin when omitted)
        records: Option<PathBuf>,
    },

    /// List the available policies
    Policies,
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(msg) => {
            report_error(&format!("error: {}", msg), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    if let Err(msg) = logging::init(cli.log_level.as_deref(), config.logging.level.as_deref()) {
        report_error(&format!("error: {}", msg), cli.output, cli.quiet);
        process::exit(1);
    }

    match cli.command {
        Commands::Map {
            schema,
            policy,
            destination,
            bare,
            records,
        } => {
            commands::map::cmd_map(
                commands::map::MapOptions {
                    schema: &schema,
                    policy,
                    destination: destination.as_deref(),
                    bare,
                    records: records.as_deref(),
                },
                &config,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Policies => {
            commands::policies::cmd_policies(&config, cli.output);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
