//! # svcint CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

use svcint_cli::config::SettingsArgs;

/// ServiceIntentions toolchain.
///
/// Validates ServiceIntentions manifests, converts them to Consul
/// service-intentions config entries, and compares them against entries
/// already in the store.
#[derive(Parser, Debug)]
#[command(name = "svcint", version, about)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Default and validate manifests.
    Validate(svcint_cli::validate::ValidateArgs),
    /// Convert a manifest to a Consul config entry.
    Convert(svcint_cli::convert::ConvertArgs),
    /// Compare a manifest with a stored config entry.
    Compare(svcint_cli::compare::CompareArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let settings = cli.settings.resolve()?;
    tracing::debug!(?settings, "resolved settings");

    let mut stdout = std::io::stdout().lock();
    let ok = match &cli.command {
        Commands::Validate(args) => svcint_cli::validate::run_validate(args, &settings, &mut stdout)?,
        Commands::Convert(args) => {
            svcint_cli::convert::run_convert(args, &settings, &mut stdout, &mut std::io::stderr())?;
            true
        }
        Commands::Compare(args) => svcint_cli::compare::run_compare(args, &settings, &mut stdout)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
