use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use vcfcheck_core::models::{MetaEntry, Ploidy, Source, Version};

use crate::error::{ConfigError, ConfigResult};

///
/// How strict a run is: `error` runs only the mandatory policy, `warning` also runs the
/// advisory one, and `stop` runs both but stops at the first mandatory violation.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    Error,
    #[default]
    Warning,
    Stop,
}

impl ValidationLevel {
    pub fn runs_advisory_checks(&self) -> bool {
        !matches!(self, ValidationLevel::Error)
    }

    pub fn stops_at_first_error(&self) -> bool {
        matches!(self, ValidationLevel::Stop)
    }
}

fn default_ploidy() -> usize {
    2
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PloidyConfig {
    #[serde(default = "default_ploidy")]
    pub default: usize,
    #[serde(default)]
    pub contigs: BTreeMap<String, usize>,
}

impl Default for PloidyConfig {
    fn default() -> Self {
        PloidyConfig {
            default: default_ploidy(),
            contigs: BTreeMap::new(),
        }
    }
}

impl TryFrom<&PloidyConfig> for Ploidy {
    type Error = ConfigError;

    fn try_from(config: &PloidyConfig) -> Result<Self, Self::Error> {
        if config.default == 0 {
            return Err(ConfigError::InvalidPloidy {
                target: "the default".to_string(),
                value: 0,
            });
        }

        let mut contigs = HashMap::default();
        for (contig, ploidy) in &config.contigs {
            if *ploidy == 0 {
                return Err(ConfigError::InvalidPloidy {
                    target: format!("contig {}", contig),
                    value: 0,
                });
            }
            contigs.insert(contig.clone(), *ploidy);
        }
        Ok(Ploidy::new(config.default, contigs))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub level: ValidationLevel,
    /// Read by the policies through the [Source], see [ValidatorConfig::build_source].
    #[serde(default)]
    pub ploidy: PloidyConfig,
}

impl ValidatorConfig {
    pub fn new(level: ValidationLevel) -> Self {
        ValidatorConfig {
            level,
            ..Default::default()
        }
    }

    pub fn ploidy(&self) -> ConfigResult<Ploidy> {
        Ploidy::try_from(&self.ploidy)
    }

    ///
    /// Build the [Source] of a file with the ploidy of this configuration.
    ///
    /// # Arguments
    /// - `name`: name of the file, used in log messages
    /// - `version`: revision declared by the file
    /// - `meta_entries`: every declaration of the meta section
    /// - `samples_names`: sample columns of the header line
    ///
    pub fn build_source(
        &self,
        name: &str,
        version: Version,
        meta_entries: Vec<MetaEntry>,
        samples_names: Vec<String>,
    ) -> ConfigResult<Source> {
        Ok(Source::new(
            name,
            version,
            self.ploidy()?,
            meta_entries,
            samples_names,
        ))
    }
}

impl TryFrom<&Path> for ValidatorConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::path::PathBuf;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/validator/validator.toml");
        let config = ValidatorConfig::try_from(path.as_path()).unwrap();
        assert_eq!(config.level, ValidationLevel::Stop);

        let ploidy = config.ploidy().unwrap();
        assert_eq!(ploidy.get_ploidy("chr1"), 2);
        assert_eq!(ploidy.get_ploidy("Y"), 1);
        assert_eq!(ploidy.get_ploidy("MT"), 1);
    }

    #[rstest]
    fn test_build_source_uses_configured_ploidy() {
        let path = PathBuf::from("../tests/data/validator/validator.toml");
        let config = ValidatorConfig::try_from(path.as_path()).unwrap();

        let source = config
            .build_source("input.vcf", Version::V43, vec![], vec!["S1".to_string()])
            .unwrap();
        assert_eq!(source.version(), Version::V43);
        assert_eq!(source.ploidy().get_ploidy("Y"), 1);
        assert_eq!(source.ploidy().get_ploidy("chr2"), 2);
        assert_eq!(source.samples_names(), &["S1".to_string()]);
    }

    #[rstest]
    fn test_build_source_rejects_zero_ploidy() {
        let path = PathBuf::from("../tests/data/validator/zero_ploidy.toml");
        let config = ValidatorConfig::try_from(path.as_path()).unwrap();
        let result = config.build_source("input.vcf", Version::V42, vec![], vec![]);
        assert_eq!(matches!(result, Err(ConfigError::InvalidPloidy { .. })), true);
    }

    #[rstest]
    fn test_defaults_from_empty_toml() {
        let config: ValidatorConfig = toml::from_str("").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.level, ValidationLevel::Warning);
        assert_eq!(config.ploidy.default, 2);
    }

    #[rstest]
    fn test_zero_ploidy_is_rejected() {
        let path = PathBuf::from("../tests/data/validator/zero_ploidy.toml");
        let config = ValidatorConfig::try_from(path.as_path()).unwrap();
        assert_eq!(
            matches!(config.ploidy(), Err(ConfigError::InvalidPloidy { .. })),
            true
        );
    }

    #[rstest]
    fn test_unknown_level_is_rejected() {
        let result: Result<ValidatorConfig, _> = toml::from_str("level = \"pedantic\"");
        assert_eq!(result.is_err(), true);
    }

    #[rstest]
    fn test_missing_file() {
        let path = PathBuf::from("../tests/data/validator/does_not_exist.toml");
        let result = ValidatorConfig::try_from(path.as_path());
        assert_eq!(matches!(result, Err(ConfigError::Io(_))), true);
    }

    #[rstest]
    #[case(ValidationLevel::Error, false, false)]
    #[case(ValidationLevel::Warning, true, false)]
    #[case(ValidationLevel::Stop, true, true)]
    fn test_level_semantics(
        #[case] level: ValidationLevel,
        #[case] advisory: bool,
        #[case] stops: bool,
    ) {
        assert_eq!(level.runs_advisory_checks(), advisory);
        assert_eq!(level.stops_at_first_error(), stops);
    }
}
