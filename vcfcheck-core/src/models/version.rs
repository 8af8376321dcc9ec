use std::fmt::{self, Display};
use std::str::FromStr;

///
/// Revision of the variant-call format a file declares in its `fileformat` entry.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    V41,
    V42,
    V43,
}

impl Version {
    ///
    /// Versions 4.1 and 4.2 share the same reserved INFO/FORMAT tag requirements.
    ///
    pub fn uses_legacy_tags(&self) -> bool {
        matches!(self, Version::V41 | Version::V42)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V41 => write!(f, "VCFv4.1"),
            Version::V42 => write!(f, "VCFv4.2"),
            Version::V43 => write!(f, "VCFv4.3"),
        }
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "VCFv4.1" => Ok(Version::V41),
            "VCFv4.2" => Ok(Version::V42),
            "VCFv4.3" => Ok(Version::V43),
            other => Err(format!("Unsupported file format version: {}", other)),
        }
    }
}
