//! Command-line front end for the `targetinfo` registry.
//!
//! The binary is a thin wrapper around [`commands::run`]; everything it does
//! is reachable from this library so it can be exercised in tests.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Subcommand dispatch
//! - [`error`] - Error types and exit statuses
//! - [`list_output`] - Output formatting for target listing
//! - [`locate`] - Executable lookup with a `PATH` fallback
//! - [`logging`] - Stderr logger set-up
//! - [`outcome`] - Successful results and their exit statuses
//! - [`process`] - Running resolved executables

pub mod cli;
pub mod commands;
pub mod error;
pub mod list_output;
pub mod locate;
pub mod logging;
pub mod outcome;
pub mod process;

#[cfg(test)]
mod test_utils;
