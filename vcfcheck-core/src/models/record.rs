use std::fmt::{self, Display};

use fxhash::FxHashSet as HashSet;

use crate::consts::{GT, MISSING_VALUE, SPANNING_DELETION};
use crate::errors::{Result, VcfError};
use crate::models::Source;

///
/// Classification of one alternate allele relative to the reference allele.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    Snv,
    Mnv,
    Indel,
    Structural,
    StructuralBreakend,
    SpanningDeletion,
    NoVariation,
}

impl RecordType {
    pub fn classify(reference_allele: &str, alternate: &str) -> Self {
        if alternate == MISSING_VALUE {
            RecordType::NoVariation
        } else if alternate == SPANNING_DELETION {
            RecordType::SpanningDeletion
        } else if alternate.starts_with('<') && alternate.ends_with('>') {
            RecordType::Structural
        } else if alternate.contains(['[', ']']) {
            RecordType::StructuralBreakend
        } else if alternate.len() == reference_allele.len() {
            if alternate.len() == 1 {
                RecordType::Snv
            } else {
                RecordType::Mnv
            }
        } else {
            RecordType::Indel
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Snv => write!(f, "SNV"),
            RecordType::Mnv => write!(f, "MNV"),
            RecordType::Indel => write!(f, "INDEL"),
            RecordType::Structural => write!(f, "STRUCTURAL"),
            RecordType::StructuralBreakend => write!(f, "STRUCTURAL_BREAKEND"),
            RecordType::SpanningDeletion => write!(f, "SPANNING_DELETION"),
            RecordType::NoVariation => write!(f, "NO_VARIATION"),
        }
    }
}

///
/// One body line, already split into its columns. Construction checks the invariants that
/// do not depend on the meta section (besides the sample count) and classifies every
/// alternate allele.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub line: usize,
    pub chromosome: String,
    pub position: u64,
    pub ids: Vec<String>,
    pub reference_allele: String,
    pub alternate_alleles: Vec<String>,
    pub types: Vec<RecordType>,
    /// `None` when the quality is missing (`.`)
    pub quality: Option<f64>,
    pub filters: Vec<String>,
    pub info: Vec<(String, String)>,
    pub format: Vec<String>,
    pub samples: Vec<String>,
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        line: usize,
        chromosome: &str,
        position: u64,
        ids: Vec<String>,
        reference_allele: &str,
        alternate_alleles: Vec<String>,
        quality: Option<f64>,
        filters: Vec<String>,
        info: Vec<(String, String)>,
        format: Vec<String>,
        samples: Vec<String>,
        source: &Source,
    ) -> Result<Self> {
        let types = alternate_alleles
            .iter()
            .map(|alternate| RecordType::classify(reference_allele, alternate))
            .collect();

        let record = Record {
            line,
            chromosome: chromosome.to_string(),
            position,
            ids,
            reference_allele: reference_allele.to_string(),
            alternate_alleles,
            types,
            quality,
            filters,
            info,
            format,
            samples,
        };

        record.check_chromosome()?;
        record.check_ids()?;
        record.check_alternate_alleles()?;
        record.check_quality()?;
        record.check_format()?;
        record.check_samples(source)?;

        Ok(record)
    }

    ///
    /// Whether the FORMAT column starts with the genotype field.
    ///
    pub fn has_genotypes(&self) -> bool {
        self.format.first().is_some_and(|field| field == GT)
    }

    fn check_chromosome(&self) -> Result<()> {
        if self
            .chromosome
            .chars()
            .any(|c| c == ':' || c.is_whitespace())
        {
            return Err(VcfError::ChromosomeBodyError {
                line: self.line,
                message: "Chromosome is not a string without colons or whitespaces".to_string(),
            });
        }
        Ok(())
    }

    fn check_ids(&self) -> Result<()> {
        if self
            .ids
            .iter()
            .any(|id| id.chars().any(char::is_whitespace))
        {
            return Err(VcfError::IdBodyError {
                line: self.line,
                message: "ID is not a single dot or a list of strings without whitespaces"
                    .to_string(),
            });
        }

        let mut seen = HashSet::default();
        if !self.ids.iter().all(|id| seen.insert(id.as_str())) {
            return Err(VcfError::IdBodyError {
                line: self.line,
                message: "ID must not have duplicate values".to_string(),
            });
        }
        Ok(())
    }

    fn check_alternate_alleles(&self) -> Result<()> {
        if self
            .alternate_alleles
            .iter()
            .any(|alternate| *alternate == self.reference_allele)
        {
            return Err(VcfError::AlternateAllelesBodyError {
                line: self.line,
                message: "Reference and alternate alleles must not be the same".to_string(),
            });
        }

        let mut seen = HashSet::default();
        if !self
            .alternate_alleles
            .iter()
            .all(|alternate| seen.insert(alternate.as_str()))
        {
            return Err(VcfError::AlternateAllelesBodyError {
                line: self.line,
                message: "Alternate alleles must not be duplicated".to_string(),
            });
        }
        Ok(())
    }

    fn check_quality(&self) -> Result<()> {
        if self.quality.is_some_and(|quality| quality < 0.0) {
            return Err(VcfError::QualityBodyError {
                line: self.line,
                message: "Quality is not a single dot or a positive number".to_string(),
            });
        }
        Ok(())
    }

    fn check_format(&self) -> Result<()> {
        let mut seen = HashSet::default();
        if !self.format.iter().all(|field| seen.insert(field.as_str())) {
            return Err(VcfError::FormatBodyError {
                line: self.line,
                message: "FORMAT must not have duplicate fields".to_string(),
            });
        }

        if self.format.iter().skip(1).any(|field| field == GT) {
            return Err(VcfError::FormatBodyError {
                line: self.line,
                message: "Genotype (GT) must be the first field in the FORMAT column".to_string(),
            });
        }
        Ok(())
    }

    fn check_samples(&self, source: &Source) -> Result<()> {
        let expected = source.samples_names().len();
        if self.samples.len() != expected {
            return Err(VcfError::SamplesBodyError {
                line: self.line,
                message: format!(
                    "The number of samples ({}) must match those listed in the header line ({})",
                    self.samples.len(),
                    expected
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::errors::ErrorKind;
    use crate::models::{MetaEntry, Ploidy, Version};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[fixture]
    fn source() -> Source {
        let version = Version::V41;
        let mut ploidy = fxhash::FxHashMap::default();
        ploidy.insert("Y".to_string(), 1);
        let entries = vec![
            MetaEntry::key_value(
                1,
                "FORMAT",
                &[
                    ("ID", "GT"),
                    ("Number", "1"),
                    ("Type", "String"),
                    ("Description", "Genotype"),
                ],
                version,
            )
            .unwrap(),
            MetaEntry::key_value(
                2,
                "INFO",
                &[
                    ("ID", "AN"),
                    ("Number", "1"),
                    ("Type", "Integer"),
                    ("Description", "Allele number"),
                ],
                version,
            )
            .unwrap(),
        ];
        Source::new(
            "Example VCF source",
            version,
            Ploidy::new(2, ploidy),
            entries,
            strings(&["Sample1"]),
        )
    }

    fn build(
        source: &Source,
        chromosome: &str,
        ids: &[&str],
        alternates: &[&str],
        quality: Option<f64>,
        format: &[&str],
        samples: &[&str],
    ) -> Result<Record> {
        Record::new(
            1,
            chromosome,
            123456,
            strings(ids),
            "A",
            strings(alternates),
            quality,
            strings(&["PASS"]),
            vec![
                ("AN".to_string(), "12".to_string()),
                ("AF".to_string(), "0.5,0.3".to_string()),
            ],
            strings(format),
            strings(samples),
            source,
        )
    }

    #[rstest]
    fn test_correct_arguments(source: Source) {
        let record = build(
            &source,
            "chr1",
            &["id123", "id456"],
            &["AC", "AT"],
            Some(1.0),
            &["GT", "DP"],
            &["0|1"],
        )
        .unwrap();
        assert_eq!(record.types, vec![RecordType::Indel, RecordType::Indel]);
        assert_eq!(record.has_genotypes(), true);

        assert_eq!(
            build(&source, "chr1", &[], &["AC", "AT"], Some(1.0), &["GT", "DP"], &["0|1"]).is_ok(),
            true
        );
        assert_eq!(
            build(&source, "chr1", &[], &["AC", "AT"], None, &["DP"], &["1"]).is_ok(),
            true
        );
    }

    #[rstest]
    #[case("chr 1")]
    #[case("chr:1")]
    #[case("chr\t1")]
    fn test_bad_chromosome(source: Source, #[case] chromosome: &str) {
        let err = build(&source, chromosome, &[], &["T"], Some(1.0), &["GT"], &["0|1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChromosomeBody);
    }

    #[rstest]
    #[case(&["id 123", "id456"])]
    #[case(&["id123", "id123"])]
    fn test_bad_ids(source: Source, #[case] ids: &[&str]) {
        let err = build(&source, "chr1", ids, &["T"], Some(1.0), &["GT"], &["0|1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdBody);
    }

    #[rstest]
    fn test_comma_in_id_is_accepted(source: Source) {
        let result = build(&source, "chr1", &["id,123"], &["T"], Some(1.0), &["GT"], &["0|1"]);
        assert_eq!(result.is_ok(), true);
    }

    #[rstest]
    #[case(&["A"])]
    #[case(&["T", "T"])]
    fn test_bad_alternates(source: Source, #[case] alternates: &[&str]) {
        let err =
            build(&source, "chr1", &[], alternates, Some(1.0), &["GT"], &["0|1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlternateAllelesBody);
    }

    #[rstest]
    fn test_negative_quality(source: Source) {
        let err = build(&source, "chr1", &[], &["C"], Some(-1.0), &["GT"], &["0|1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QualityBody);
    }

    #[rstest]
    #[case(&["DP", "GT"], &["12:0|1"])]
    #[case(&["DP", "DP"], &["12:13"])]
    fn test_bad_format(source: Source, #[case] format: &[&str], #[case] samples: &[&str]) {
        let err = build(&source, "chr1", &[], &["T", "C"], Some(1.0), format, samples).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatBody);
    }

    #[rstest]
    #[case(&["GT"], &["0|1"])]
    #[case(&["DP"], &["13"])]
    #[case(&["DP", "GL"], &["12:0.5"])]
    fn test_good_format(source: Source, #[case] format: &[&str], #[case] samples: &[&str]) {
        let result = build(&source, "chr1", &[], &["T", "C"], Some(1.0), format, samples);
        assert_eq!(result.is_ok(), true);
    }

    #[rstest]
    fn test_sample_count_must_match_header(source: Source) {
        let err = build(&source, "chr1", &[], &["T"], Some(1.0), &["GT"], &["0|1", "1|1"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SamplesBody);
    }

    #[rstest]
    #[case("A", "T", RecordType::Snv)]
    #[case("AC", "GT", RecordType::Mnv)]
    #[case("A", "AT", RecordType::Indel)]
    #[case("AT", "A", RecordType::Indel)]
    #[case("A", "<DEL>", RecordType::Structural)]
    #[case("A", "G]17:198982]", RecordType::StructuralBreakend)]
    #[case("A", "*", RecordType::SpanningDeletion)]
    #[case("A", ".", RecordType::NoVariation)]
    fn test_classify(#[case] reference: &str, #[case] alternate: &str, #[case] expected: RecordType) {
        assert_eq!(RecordType::classify(reference, alternate), expected);
    }
}
