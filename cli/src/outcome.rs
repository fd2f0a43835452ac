//! Successful command results and their exit statuses.

/// Exit status for a lookup of an unknown target.
pub const NOT_FOUND_EXIT_CODE: i32 = 1;

/// How a command finished when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The lookup or run succeeded.
    Success,
    /// The target is unknown; an empty line was printed.
    NotFound,
    /// A child exited with this non-zero code and failures were allowed.
    Exit(i32),
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::NotFound => NOT_FOUND_EXIT_CODE,
            Self::Exit(code) => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::success(Outcome::Success, 0)]
    #[case::not_found(Outcome::NotFound, NOT_FOUND_EXIT_CODE)]
    #[case::child(Outcome::Exit(7), 7)]
    fn maps_to_exit_code(#[case] outcome: Outcome, #[case] expected: i32) {
        assert_eq!(outcome.exit_code(), expected);
    }
}
