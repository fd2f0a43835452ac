use std::convert::Infallible;
use std::str::FromStr;

/// Wrapper for quoted text supplied via behaviour-driven test steps.
#[derive(Clone, Debug)]
pub struct StepText {
    raw: String,
}

impl FromStr for StepText {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''))
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepText {
    /// Borrows the unquoted text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the step value, yielding the unquoted string.
    pub fn into_inner(self) -> String {
        self.raw
    }
}
