//! Shared test support utilities for behaviour-driven suites.
//!
//! Exposes the `step_text` wrapper that strips quotes from BDD step
//! parameters and the `fixtures` module holding the sample manifest used
//! across the registry suites.
pub mod fixtures;
pub mod step_text;
