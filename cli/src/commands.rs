//! Command dispatch.
//!
//! Each subcommand prints a single result line. Lookups of unknown targets
//! print an empty line and finish with [`Outcome::NotFound`] so shell callers
//! can test the exit status.

use std::fmt::Display;
use std::io::Write;

use log::debug;
use targetinfo::{RegistryConfig, RegistryError, TargetRegistry};

use crate::cli::{Cli, Command, ListArgs, RunArgs};
use crate::error::{CliError, Result};
use crate::list_output::{format_human, format_json};
use crate::locate::{ExecutableSearch, SystemExecutableSearch, locate};
use crate::outcome::Outcome;
use crate::process::{ProcessRunner, RunOptions, SystemProcessRunner, run_program};

/// External collaborators used while executing a command.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Starts executables for `run`.
    pub runner: &'a dyn ProcessRunner,
    /// Searches `PATH` for unregistered names.
    pub search: &'a dyn ExecutableSearch,
}

impl Services<'static> {
    /// Services backed by the host system.
    #[must_use]
    pub fn system() -> Self {
        Self {
            runner: &SystemProcessRunner,
            search: &SystemExecutableSearch,
        }
    }
}

/// Load configuration from the environment and execute `cli`.
///
/// # Errors
///
/// Returns an error when the registry cannot be loaded, output cannot be
/// written, or a run fails.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<Outcome> {
    let registry = load_registry(cli, RegistryConfig::from_env())?;
    let outcome = execute(cli, &registry, Services::system(), out)?;
    out.flush()?;
    Ok(outcome)
}

/// Build the registry for `cli`, layering its flags over `base`.
///
/// `uid` only needs a namespace, so it works without a manifest.
///
/// # Errors
///
/// Returns the registry's load error.
pub fn load_registry(cli: &Cli, base: RegistryConfig) -> Result<TargetRegistry> {
    let config = cli.config(base);
    match config.load_registry() {
        Err(RegistryError::NoManifest) if matches!(cli.command, Command::Uid(_)) => {
            let namespace = config.fallback_namespace();
            debug!("no manifest configured; normalising against `{namespace}`");
            TargetRegistry::empty(namespace).map_err(|err| RegistryError::from(err).into())
        }
        result => Ok(result?),
    }
}

/// Execute the subcommand against `registry`.
///
/// # Errors
///
/// Returns an error when output cannot be written or a run fails.
pub fn execute(
    cli: &Cli,
    registry: &TargetRegistry,
    services: Services<'_>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match &cli.command {
        Command::Uid(args) => {
            writeln!(out, "{}", registry.normalise(&args.target))?;
            Ok(Outcome::Success)
        }
        Command::Known(args) => {
            let known = registry.is_known(&args.target);
            writeln!(out, "{known}")?;
            Ok(if known { Outcome::Success } else { Outcome::NotFound })
        }
        Command::Name(args) => print_lookup(registry.executable_name(&args.target), out),
        Command::BuildDir(args) => print_lookup(registry.build_directory(&args.target), out),
        Command::InstallDir(args) => {
            print_lookup(registry.installation_directory(&args.target), out)
        }
        Command::Path(args) => print_lookup(
            locate(registry, &args.target, args.tree(), services.search),
            out,
        ),
        Command::List(args) => list(registry, args, out),
        Command::Run(args) => run_target(registry, args, cli.verbose, services, out),
    }
}

fn print_lookup<T: Display>(value: Option<T>, out: &mut dyn Write) -> Result<Outcome> {
    match value {
        Some(value) => {
            writeln!(out, "{value}")?;
            Ok(Outcome::Success)
        }
        None => {
            writeln!(out)?;
            Ok(Outcome::NotFound)
        }
    }
}

fn list(registry: &TargetRegistry, args: &ListArgs, out: &mut dyn Write) -> Result<Outcome> {
    if args.json {
        writeln!(out, "{}", format_json(registry))?;
    } else {
        write!(out, "{}", format_human(registry))?;
    }
    Ok(Outcome::Success)
}

fn run_target(
    registry: &TargetRegistry,
    args: &RunArgs,
    verbose: bool,
    services: Services<'_>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let program = locate(registry, &args.target, args.tree(), services.search).ok_or_else(
        || CliError::UnknownTarget {
            uid: registry.normalise(&args.target),
        },
    )?;
    let options = RunOptions {
        allow_fail: args.allow_fail,
        simulate: args.simulate,
        echo: verbose,
        discard_stdout: args.discard_stdout,
    };
    run_program(services.runner, &program, &args.args, options, out)
}
