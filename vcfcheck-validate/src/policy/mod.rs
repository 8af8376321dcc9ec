//!
//! Validation policies. Every policy checks the same three stages of a file (the meta
//! section, each body record, and the end of the body) against its own rule set; the
//! severity a policy reports with decides whether its violations are shown as errors or
//! as warnings.
//!
pub mod mandatory;
pub mod optional;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use vcfcheck_core::errors::Result;
use vcfcheck_core::models::Record;

use crate::state::ParsingState;

pub use mandatory::MandatoryPolicy;
pub use optional::OptionalPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

pub trait ValidationPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn severity(&self) -> Severity;

    ///
    /// Checks that need the whole meta section, run once before the first record.
    ///
    fn check_meta_section(&self, state: &ParsingState) -> Result<()>;

    ///
    /// Checks one body record. The first violation found aborts the checks for that record.
    ///
    fn check_body_entry(&self, state: &mut ParsingState, record: &Record) -> Result<()>;

    ///
    /// Checks that need the whole body, run once after the last record.
    ///
    fn check_body_section(&self, state: &ParsingState) -> Result<()>;
}
