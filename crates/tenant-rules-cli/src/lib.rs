//! Tenant rules command line tool
//!
//! Loads rule files, evaluates them against a context document and
//! reports outcomes or validation problems.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
pub use commands::Status;
pub use config::CliConfig;
