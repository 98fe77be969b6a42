//! Command line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tenant-rules",
    version,
    about = "Evaluate and validate tenant business rules"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate rules against a context document and print the outcome as JSON
    Eval(EvalArgs),

    /// Load rule files and report static problems
    Validate(ValidateArgs),

    /// List built-in rule templates or instantiate one for a tenant
    Templates(TemplatesArgs),
}

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Rule file (JSON or YAML); repeatable
    #[arg(short, long = "rules", value_name = "FILE")]
    pub rules: Vec<PathBuf>,

    /// Built-in template to add for the tenant; repeatable
    #[arg(long = "template", value_name = "KEY", requires = "tenant")]
    pub templates: Vec<String>,

    /// Context JSON file (`entity`, `entityType`, `tenantConfig`); `-` reads stdin
    #[arg(short, long, value_name = "FILE")]
    pub context: PathBuf,

    /// Only evaluate rules owned by this tenant or by no tenant
    #[arg(short, long)]
    pub tenant: Option<String>,

    /// Only evaluate rules for this trigger event
    #[arg(short, long)]
    pub event: Option<String>,

    #[arg(long)]
    pub stop_on_first_match: bool,

    /// Attach condition traces to the output
    #[arg(long)]
    pub explain: bool,

    /// Exit with status 2 when a matched rule raised an error
    #[arg(long)]
    pub fail_on_error: bool,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Rule file (JSON or YAML); repeatable
    #[arg(required = true, value_name = "FILE")]
    pub rules: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Only list templates for this business type
    #[arg(short, long)]
    pub business_type: Option<String>,

    /// Print the template with this key as a rule owned by `--tenant`
    #[arg(long, value_name = "KEY", requires = "tenant")]
    pub instantiate: Option<String>,

    #[arg(short, long)]
    pub tenant: Option<String>,

    #[arg(long)]
    pub pretty: bool,
}
