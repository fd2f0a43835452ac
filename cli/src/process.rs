//! Running a target's executable.
//!
//! The child inherits the caller's standard streams; `targetinfo` only
//! decides which program to start and how to report its exit status.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use camino::Utf8Path;
use log::debug;

use crate::error::{CliError, ERROR_EXIT_CODE, Result};
use crate::outcome::Outcome;

/// Abstraction for starting executables.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// The child's standard output is discarded when `discard_stdout` is set.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while spawning the process.
    fn run(
        &self,
        program: &Utf8Path,
        args: &[String],
        discard_stdout: bool,
    ) -> std::io::Result<ExitStatus>;
}

/// Runs executables on the host system with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        program: &Utf8Path,
        args: &[String],
        discard_stdout: bool,
    ) -> std::io::Result<ExitStatus> {
        let mut command = Command::new(program);
        command.args(args);
        if discard_stdout {
            command.stdout(Stdio::null());
        }
        command.status()
    }
}

/// How a resolved executable should be started.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report a non-zero exit through the outcome instead of an error.
    pub allow_fail: bool,
    /// Print the command line instead of running it.
    pub simulate: bool,
    /// Print the command line before running it.
    pub echo: bool,
    /// Discard the child's standard output.
    pub discard_stdout: bool,
}

/// Start `program` and translate its exit status.
///
/// When echoing or simulating, the quoted command line is written to `out`
/// first as `$ <command>`, with a ` (simulated)` suffix when it is not run.
///
/// # Errors
///
/// Returns [`CliError::Spawn`] when the process cannot be started and
/// [`CliError::CommandFailed`] when it exits unsuccessfully without
/// `allow_fail`.
pub fn run_program(
    runner: &dyn ProcessRunner,
    program: &Utf8Path,
    args: &[String],
    options: RunOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let command = command_line(program, args);
    if options.echo || options.simulate {
        let suffix = if options.simulate { " (simulated)" } else { "" };
        writeln!(out, "$ {command}{suffix}")?;
    }
    if options.simulate {
        return Ok(Outcome::Success);
    }

    debug!("running {command}");
    let status = runner
        .run(program, args, options.discard_stdout)
        .map_err(|source| CliError::Spawn {
        program: program.to_owned(),
        source,
    })?;
    if status.success() {
        return Ok(Outcome::Success);
    }

    let code = exit_code(status);
    if options.allow_fail {
        debug!("{command} exited with {code}");
        Ok(Outcome::Exit(code))
    } else {
        Err(CliError::CommandFailed { command, code })
    }
}

/// Exit code to report for an unsuccessful child.
///
/// A child killed by a signal reports `128 + signal`, as shells do. Statuses
/// carrying neither map to [`ERROR_EXIT_CODE`].
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    ERROR_EXIT_CODE
}

/// Quoted command line for display.
#[must_use]
pub fn command_line(program: &Utf8Path, args: &[String]) -> String {
    std::iter::once(program.as_str())
        .chain(args.iter().map(String::as_str))
        .map(quote_argument)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one argument so the printed command line reads unambiguously.
///
/// Double quotes are backslash-escaped. Arguments that are empty or contain
/// whitespace or a single quote are wrapped in double quotes.
///
/// # Examples
///
/// ```
/// use targetinfo_cli::process::quote_argument;
///
/// assert_eq!(quote_argument("--verbose"), "--verbose");
/// assert_eq!(quote_argument("two words"), "\"two words\"");
/// assert_eq!(quote_argument("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
#[must_use]
pub fn quote_argument(arg: &str) -> String {
    let escaped = arg.replace('"', "\\\"");
    if arg.is_empty() || arg.contains('\'') || arg.chars().any(char::is_whitespace) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::exit_status;
    #[cfg(unix)]
    use crate::test_utils::signal_status;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[rstest]
    #[case::plain("--flag", "--flag")]
    #[case::space("two words", "\"two words\"")]
    #[case::tab("a\tb", "\"a\tb\"")]
    #[case::single_quote("it's", "\"it's\"")]
    #[case::double_quote("a\"b", "a\\\"b")]
    #[case::empty("", "\"\"")]
    fn quotes_arguments(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(quote_argument(raw), expected);
    }

    #[test]
    fn command_line_joins_program_and_arguments() {
        let line = command_line(
            Utf8Path::new("/opt/basis/bin/basisproject"),
            &args(&["--name", "my project"]),
        );
        assert_eq!(line, "/opt/basis/bin/basisproject --name \"my project\"");
    }

    #[test]
    fn successful_run_reports_success() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|program, args, discard_stdout| {
                program.as_str() == "/bin/tool" && args == ["-x"] && !*discard_stdout
            })
            .times(1)
            .returning(|_, _, _| Ok(exit_status(0)));

        let mut out = Vec::new();
        let outcome = run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &args(&["-x"]),
            RunOptions::default(),
            &mut out,
        )
        .expect("expected run to succeed");
        assert_eq!(outcome, Outcome::Success);
        assert!(out.is_empty());
    }

    #[test]
    fn failure_without_allow_fail_is_an_error() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_, _, _| Ok(exit_status(3)));

        let err = run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &[],
            RunOptions::default(),
            &mut Vec::new(),
        )
        .expect_err("expected failure");
        assert!(matches!(err, CliError::CommandFailed { code: 3, .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn allow_fail_returns_exit_code() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_, _, _| Ok(exit_status(4)));

        let outcome = run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &[],
            RunOptions {
                allow_fail: true,
                ..RunOptions::default()
            },
            &mut Vec::new(),
        )
        .expect("expected outcome");
        assert_eq!(outcome, Outcome::Exit(4));
        assert_eq!(outcome.exit_code(), 4);
    }

    #[test]
    fn simulate_prints_without_running() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();

        let mut out = Vec::new();
        let outcome = run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &args(&["a b"]),
            RunOptions {
                simulate: true,
                ..RunOptions::default()
            },
            &mut out,
        )
        .expect("expected simulation to succeed");
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "$ /bin/tool \"a b\" (simulated)\n"
        );
    }

    #[test]
    fn echo_prints_before_running() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _, _| Ok(exit_status(0)));

        let mut out = Vec::new();
        run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &[],
            RunOptions {
                echo: true,
                ..RunOptions::default()
            },
            &mut out,
        )
        .expect("expected run to succeed");
        assert_eq!(String::from_utf8(out).expect("utf-8"), "$ /bin/tool\n");
    }

    #[test]
    fn spawn_failure_names_program() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_, _, _| Err(std::io::Error::from(std::io::ErrorKind::NotFound)));

        let err = run_program(
            &runner,
            Utf8Path::new("/missing/tool"),
            &[],
            RunOptions::default(),
            &mut Vec::new(),
        )
        .expect_err("expected spawn failure");
        assert!(matches!(err, CliError::Spawn { ref program, .. } if program == "/missing/tool"));
    }

    #[test]
    fn discard_stdout_is_passed_to_runner() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|_, _, discard_stdout| *discard_stdout)
            .times(1)
            .returning(|_, _, _| Ok(exit_status(0)));

        run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &[],
            RunOptions {
                discard_stdout: true,
                ..RunOptions::default()
            },
            &mut Vec::new(),
        )
        .expect("expected run to succeed");
    }

    #[cfg(unix)]
    #[test]
    fn signalled_child_reports_shell_exit_code() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_, _, _| Ok(signal_status(9)));

        let err = run_program(
            &runner,
            Utf8Path::new("/bin/tool"),
            &[],
            RunOptions::default(),
            &mut Vec::new(),
        )
        .expect_err("expected failure");
        assert!(matches!(err, CliError::CommandFailed { code: 137, .. }));
        assert_ne!(err.exit_code(), crate::outcome::NOT_FOUND_EXIT_CODE);
    }
}
