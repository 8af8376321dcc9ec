//! # vcfcheck-validate
//!
//! Semantic checks over a parsed variant-call file. A run goes through three stages:
//!
//! 1. the meta section as a whole, once every declaration has been read
//! 2. each body record, in file order
//! 3. the body as a whole, after the last record
//!
//! Two policies are provided. [MandatoryPolicy] reports violations of the format as
//! errors; [OptionalPolicy] reports conditions that are legal but suspicious (undeclared
//! contigs, filters or tags, inconsistent ploidy) as warnings. Cross-references from the
//! body to the meta section are confirmed once per run and cached in the [ParsingState].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vcfcheck_core::models::{MetaEntry, Ploidy, Record, Source, Version};
//! use vcfcheck_validate::{CollectingReportWriter, Validator, ValidatorConfig};
//!
//! let entries = vec![
//!     MetaEntry::plain(1, "fileformat", "VCFv4.3", Version::V43).unwrap(),
//!     MetaEntry::plain(2, "reference", "GRCh38.fa", Version::V43).unwrap(),
//! ];
//! let source = Arc::new(Source::new("input.vcf", Version::V43, Ploidy::default(), entries, vec![]));
//!
//! let record = Record::new(
//!     3, "chr1", 100, vec![], "A", vec!["T".to_string()], None,
//!     vec![], vec![], vec![], vec![], &source,
//! );
//!
//! let mut validator = Validator::new(ValidatorConfig::default(), CollectingReportWriter::default());
//! let summary = validator.validate(source, vec![record]);
//!
//! assert!(summary.is_valid());
//! assert_eq!(summary.warnings, 1); // chr1 is not declared in the meta section
//! ```
//!
pub mod cache;
pub mod config;
pub mod error;
pub mod policy;
pub mod report;
pub mod state;
pub mod validator;

// re-export things
pub use cache::ConsistencyCache;
pub use config::{PloidyConfig, ValidationLevel, ValidatorConfig};
pub use error::{ConfigError, ConfigResult};
pub use policy::{MandatoryPolicy, OptionalPolicy, Severity, ValidationPolicy};
pub use report::{CollectingReportWriter, LogReportWriter, ReportWriter};
pub use state::{ContigBlocks, ParsingState};
pub use validator::{ValidationSummary, Validator};
