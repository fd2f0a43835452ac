//! `targetinfo` entry point.
//!
//! Prints build and installation locations of executable targets and runs
//! them. Exit status 1 reports an unknown target; 2 reports an error.

use std::error::Error;
use std::io::Write;

use clap::Parser;
use targetinfo_cli::cli::Cli;
use targetinfo_cli::commands::run;
use targetinfo_cli::error::Result;
use targetinfo_cli::logging::init_logging;
use targetinfo_cli::outcome::Outcome;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut stdout = std::io::stdout().lock();
    let run_result = run(&cli, &mut stdout);
    drop(stdout);

    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<Outcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            let mut source = err.source();
            while let Some(cause) = source {
                write_stderr_line(stderr, format_args!("  caused by: {cause}"));
                source = cause.source();
            }
            err.exit_code()
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use targetinfo::{MetadataError, RegistryError};
    use targetinfo_cli::error::{CliError, ERROR_EXIT_CODE};

    #[rstest]
    #[case::success(Outcome::Success, 0)]
    #[case::not_found(Outcome::NotFound, 1)]
    #[case::allowed_failure(Outcome::Exit(5), 5)]
    fn exit_code_for_run_result_maps_outcomes(#[case] outcome: Outcome, #[case] expected: i32) {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(outcome), &mut stderr), expected);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_chain() {
        let err = CliError::from(RegistryError::from(MetadataError::Io {
            path: Utf8PathBuf::from("/missing/targets.toml"),
            source: std::io::Error::other("no such file"),
        }));

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, ERROR_EXIT_CODE);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.starts_with("error: "));
        assert!(stderr_text.contains("/missing/targets.toml"));
        assert!(stderr_text.contains("caused by: no such file"));
    }

    #[test]
    fn failed_command_exits_with_child_code() {
        let err = CliError::CommandFailed {
            command: "/bin/false".to_owned(),
            code: 9,
        };
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(err), &mut stderr), 9);
    }
}
