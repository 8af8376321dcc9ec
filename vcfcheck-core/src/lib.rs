//! # vcfcheck-core
//!
//! Data model shared by the vcfcheck validators. A tokenizer turns the raw text of a
//! variant-call file into the types defined here:
//!
//! - **`MetaEntry`**: one meta section declaration, checked against the rules of its
//!   category (and the reserved-tag tables of the file's revision) when it is built.
//! - **`Source`**: the file-level context (revision, ploidy, declarations, sample names).
//! - **`Record`**: one body line, with its alternate alleles classified.
//! - **`VcfError`**: the typed violations raised by construction and by the validation
//!   policies.
//!
//! ## Example
//!
//! ```rust
//! use vcfcheck_core::models::{MetaEntry, Version};
//!
//! let entry = MetaEntry::key_value(
//!     3,
//!     "INFO",
//!     &[("ID", "AN"), ("Number", "1"), ("Type", "Float"), ("Description", "Allele number")],
//!     Version::V43,
//! );
//! assert!(entry.is_err()); // AN is a reserved tag and must be an Integer
//! ```
//!
pub mod consts;
pub mod errors;
pub mod models;

// re-export things
pub use errors::*;
pub use models::*;
