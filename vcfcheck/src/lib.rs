//! # vcfcheck
//!
//! Semantic validation of variant-call files. The workspace is split in two crates, both
//! re-exported here behind cargo features:
//!
//! - `core`: the data model of a parsed file (header entries, records, the file-level
//!   source) and the typed violations raised while building or checking it.
//! - `validate`: the mandatory and advisory policies, the per-run parsing state and the
//!   driver that reports violations to a sink.

#[cfg(feature = "core")]
#[doc(inline)]
pub use vcfcheck_core as core;

#[cfg(feature = "validate")]
#[doc(inline)]
pub use vcfcheck_validate as validate;
