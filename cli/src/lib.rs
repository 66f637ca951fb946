//! `cinder`: command-line front end for the Cinder ledger.
//!
//! Each invocation restores the ledger from a snapshot file, applies exactly
//! one call and writes the snapshot back if the call changed state.

pub mod args;
pub mod commands;
pub mod config;

pub use args::{Cli, Command};
pub use commands::{execute, CommandClock, Context};
pub use config::{CliConfig, ConfigError};
