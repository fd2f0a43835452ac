//! CLI argument definitions for `targetinfo`.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use targetinfo::{RegistryConfig, Tree};

/// Resolve executable targets to build and installation paths.
#[derive(Parser, Debug, Clone)]
#[command(name = "targetinfo")]
#[command(version, about)]
#[command(long_about = concat!(
    "Resolve executable targets to build and installation paths.\n\n",
    "Targets are named either by UID (`namespace::name`) or by bare name, which ",
    "is looked up in the project namespace of the target manifest. A leading ",
    "`::` refers to the global namespace.\n\n",
    "The manifest is read from --manifest or from TARGETINFO_MANIFEST.",
))]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0  the lookup succeeded\n",
    "  1  the target is unknown (an empty line is printed)\n",
    "  2  the manifest could not be loaded or another error occurred\n\n",
    "EXAMPLES:\n",
    "  Canonical UID of a bare name:\n",
    "    $ targetinfo uid helloworld\n\n",
    "  Installation directory of an external target:\n",
    "    $ targetinfo install-dir basis::basisproject.sh\n\n",
    "  Run a target from the build tree:\n",
    "    $ targetinfo run --build helloworld -- --verbose\n\n",
    "  List every known target as JSON:\n",
    "    $ targetinfo list --json",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Target manifest [default: $TARGETINFO_MANIFEST].
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<Utf8PathBuf>,

    /// Override the project namespace [default: $TARGETINFO_NAMESPACE or the manifest's].
    #[arg(long, global = true, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Log debug details to stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Layer the command-line overrides on top of `base`.
    ///
    /// A blank `--namespace` counts as not given.
    #[must_use]
    pub fn config(&self, base: RegistryConfig) -> RegistryConfig {
        RegistryConfig {
            manifest: self.manifest.clone().or(base.manifest),
            namespace: self
                .namespace
                .clone()
                .filter(|namespace| !namespace.trim().is_empty())
                .or(base.namespace),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the canonical UID of a target name.
    Uid(TargetArgs),

    /// Report whether a target is registered.
    Known(TargetArgs),

    /// Print the executable file name of a target.
    Name(TargetArgs),

    /// Print the build-tree directory of a target.
    BuildDir(TargetArgs),

    /// Print the installation directory of a target.
    InstallDir(TargetArgs),

    /// Print the absolute executable path of a target.
    Path(PathArgs),

    /// List registered targets.
    List(ListArgs),

    /// Run a target's executable.
    Run(RunArgs),
}

/// A single target reference.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Target name or UID.
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Arguments for the path command.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Target name or UID.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Use the build tree instead of the installation tree.
    #[arg(long)]
    pub build: bool,
}

impl PathArgs {
    /// Tree selected by the flags.
    #[must_use]
    pub fn tree(&self) -> Tree {
        tree_for(self.build)
    }
}

/// Arguments for the list command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Target name or UID.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Run the executable from the build tree.
    #[arg(long)]
    pub build: bool,

    /// Return the child's exit code without reporting an error.
    #[arg(long)]
    pub allow_fail: bool,

    /// Print the command line without running it.
    #[arg(long)]
    pub simulate: bool,

    /// Discard the executable's standard output.
    #[arg(long)]
    pub discard_stdout: bool,

    /// Arguments passed to the executable.
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl RunArgs {
    /// Tree selected by the flags.
    #[must_use]
    pub fn tree(&self) -> Tree {
        tree_for(self.build)
    }
}

const fn tree_for(build: bool) -> Tree {
    if build { Tree::Build } else { Tree::Installation }
}
