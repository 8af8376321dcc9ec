use std::fmt::{self, Display};

use thiserror::Error;

///
/// Every semantic violation that can be found in a variant-call file. Each variant carries the
/// line that triggered it and a human-readable message; the cross-reference and per-sample
/// variants also carry the column and value involved, so sinks can report them in a
/// structured way.
///
/// Whether a violation is shown as an error or as a warning is decided by the policy that
/// raised it, not by the variant.
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VcfError {
    #[error("Line {line}: {message}")]
    MetaSectionError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    BodySectionError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    ChromosomeBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    PositionBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    IdBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    ReferenceAlleleBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    AlternateAllelesBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    QualityBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    FormatBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    SamplesBodyError { line: usize, message: String },

    #[error("Line {line}: {message}")]
    SamplesFieldBodyError {
        line: usize,
        message: String,
        field: String,
        value: i64,
    },

    #[error("Line {line}: {message}")]
    NoMetaDefinitionError {
        line: usize,
        message: String,
        field: String,
        value: String,
    },
}

///
/// Discriminant of [VcfError], for callers that aggregate or filter violations by kind.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    MetaSection,
    BodySection,
    ChromosomeBody,
    PositionBody,
    IdBody,
    ReferenceAlleleBody,
    AlternateAllelesBody,
    QualityBody,
    FormatBody,
    SamplesBody,
    SamplesFieldBody,
    NoMetaDefinition,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MetaSection => "MetaSectionError",
            ErrorKind::BodySection => "BodySectionError",
            ErrorKind::ChromosomeBody => "ChromosomeBodyError",
            ErrorKind::PositionBody => "PositionBodyError",
            ErrorKind::IdBody => "IdBodyError",
            ErrorKind::ReferenceAlleleBody => "ReferenceAlleleBodyError",
            ErrorKind::AlternateAllelesBody => "AlternateAllelesBodyError",
            ErrorKind::QualityBody => "QualityBodyError",
            ErrorKind::FormatBody => "FormatBodyError",
            ErrorKind::SamplesBody => "SamplesBodyError",
            ErrorKind::SamplesFieldBody => "SamplesFieldBodyError",
            ErrorKind::NoMetaDefinition => "NoMetaDefinitionError",
        };
        write!(f, "{}", name)
    }
}

impl VcfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VcfError::MetaSectionError { .. } => ErrorKind::MetaSection,
            VcfError::BodySectionError { .. } => ErrorKind::BodySection,
            VcfError::ChromosomeBodyError { .. } => ErrorKind::ChromosomeBody,
            VcfError::PositionBodyError { .. } => ErrorKind::PositionBody,
            VcfError::IdBodyError { .. } => ErrorKind::IdBody,
            VcfError::ReferenceAlleleBodyError { .. } => ErrorKind::ReferenceAlleleBody,
            VcfError::AlternateAllelesBodyError { .. } => ErrorKind::AlternateAllelesBody,
            VcfError::QualityBodyError { .. } => ErrorKind::QualityBody,
            VcfError::FormatBodyError { .. } => ErrorKind::FormatBody,
            VcfError::SamplesBodyError { .. } => ErrorKind::SamplesBody,
            VcfError::SamplesFieldBodyError { .. } => ErrorKind::SamplesFieldBody,
            VcfError::NoMetaDefinitionError { .. } => ErrorKind::NoMetaDefinition,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            VcfError::MetaSectionError { line, .. }
            | VcfError::BodySectionError { line, .. }
            | VcfError::ChromosomeBodyError { line, .. }
            | VcfError::PositionBodyError { line, .. }
            | VcfError::IdBodyError { line, .. }
            | VcfError::ReferenceAlleleBodyError { line, .. }
            | VcfError::AlternateAllelesBodyError { line, .. }
            | VcfError::QualityBodyError { line, .. }
            | VcfError::FormatBodyError { line, .. }
            | VcfError::SamplesBodyError { line, .. }
            | VcfError::SamplesFieldBodyError { line, .. }
            | VcfError::NoMetaDefinitionError { line, .. } => *line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            VcfError::MetaSectionError { message, .. }
            | VcfError::BodySectionError { message, .. }
            | VcfError::ChromosomeBodyError { message, .. }
            | VcfError::PositionBodyError { message, .. }
            | VcfError::IdBodyError { message, .. }
            | VcfError::ReferenceAlleleBodyError { message, .. }
            | VcfError::AlternateAllelesBodyError { message, .. }
            | VcfError::QualityBodyError { message, .. }
            | VcfError::FormatBodyError { message, .. }
            | VcfError::SamplesBodyError { message, .. }
            | VcfError::SamplesFieldBodyError { message, .. }
            | VcfError::NoMetaDefinitionError { message, .. } => message,
        }
    }

    ///
    /// Column name attached to the violation, for the kinds that carry one.
    ///
    pub fn field(&self) -> Option<&str> {
        match self {
            VcfError::SamplesFieldBodyError { field, .. }
            | VcfError::NoMetaDefinitionError { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn meta_section(line: usize, message: impl Into<String>) -> Self {
        VcfError::MetaSectionError {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VcfError>;
