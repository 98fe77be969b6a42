//! `tenant-rules` binary

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tenant_rules_cli::{commands, Cli, CliConfig, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing()?;

    // Load configuration
    let config = CliConfig::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let status = match &cli.command {
        Commands::Eval(args) => commands::eval(args, &config, &mut out)?,
        Commands::Validate(args) => commands::validate(args, &mut out)?,
        Commands::Templates(args) => commands::templates(args, &mut out)?,
    };
    out.flush()?;

    Ok(status.into())
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays machine readable
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tenant_rules_cli=info,tenant_rules_sdk=warn,tenant_rules_runtime=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
