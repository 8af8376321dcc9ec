use fxhash::FxHashSet as HashSet;

use vcfcheck_core::consts::{
    ALLELE_SEPARATORS, ALT, CONTIG, FILEFORMAT, FILTER, FORMAT, GT, INFO, MISSING_VALUE, SAMPLE,
    SUBFIELD_SEPARATOR,
};
use vcfcheck_core::errors::{Result, VcfError};
use vcfcheck_core::models::Record;

use super::{Severity, ValidationPolicy};
use crate::state::ParsingState;

const UNIQUE_ID_CATEGORIES: [&str; 6] = [INFO, FORMAT, FILTER, ALT, CONTIG, SAMPLE];

///
/// Checks for conditions that must never occur in a well-formed file. Violations are
/// reported as errors.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct MandatoryPolicy;

impl ValidationPolicy for MandatoryPolicy {
    fn name(&self) -> &'static str {
        "mandatory"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check_meta_section(&self, state: &ParsingState) -> Result<()> {
        self.check_fileformat(state)?;
        self.check_unique_ids(state)
    }

    fn check_body_entry(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        state
            .contig_blocks_mut()
            .observe(record.line, &record.chromosome);

        self.check_reference_bases(record)?;
        self.check_samples_subfields(record)?;
        self.check_genotype_indexes(record)
    }

    fn check_body_section(&self, state: &ParsingState) -> Result<()> {
        if let Some((line, contig)) = state.contig_blocks().first_reentry() {
            return Err(VcfError::BodySectionError {
                line: state.n_lines,
                message: format!(
                    "Records of contig '{}' are not contiguous: they appear again at line {} after other contigs",
                    contig, line
                ),
            });
        }
        Ok(())
    }
}

impl MandatoryPolicy {
    fn check_fileformat(&self, state: &ParsingState) -> Result<()> {
        let source = state.source();
        let Some(entry) = source.meta_entries(FILEFORMAT).first() else {
            return Err(VcfError::MetaSectionError {
                line: state.n_lines,
                message: "A valid 'fileformat' entry is not listed in the meta section".to_string(),
            });
        };

        let expected = source.version().to_string();
        if entry.plain_value() != Some(expected.as_str()) {
            return Err(VcfError::MetaSectionError {
                line: entry.line,
                message: format!("The 'fileformat' entry does not declare {}", expected),
            });
        }
        Ok(())
    }

    fn check_unique_ids(&self, state: &ParsingState) -> Result<()> {
        for category in UNIQUE_ID_CATEGORIES {
            let mut seen = HashSet::default();
            for entry in state.source().meta_entries(category) {
                let Some(id) = entry.id_field() else {
                    continue;
                };
                if !seen.insert(id) {
                    return Err(VcfError::MetaSectionError {
                        line: entry.line,
                        message: format!("{} metadata with ID '{}' is declared twice", category, id),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_reference_bases(&self, record: &Record) -> Result<()> {
        let valid = !record.reference_allele.is_empty()
            && record
                .reference_allele
                .bytes()
                .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'N'));

        if !valid {
            return Err(VcfError::ReferenceAlleleBodyError {
                line: record.line,
                message: format!(
                    "Reference allele '{}' is not a sequence of A, C, G, T or N",
                    record.reference_allele
                ),
            });
        }
        Ok(())
    }

    fn check_samples_subfields(&self, record: &Record) -> Result<()> {
        for (i, sample) in record.samples.iter().enumerate() {
            let subfields = sample.split(SUBFIELD_SEPARATOR).count();
            if subfields > record.format.len() {
                return Err(VcfError::SamplesFieldBodyError {
                    line: record.line,
                    message: format!(
                        "Sample #{} has {} subfield(s), but FORMAT only declares {}",
                        i + 1,
                        subfields,
                        record.format.len()
                    ),
                    field: FORMAT.to_string(),
                    value: subfields as i64,
                });
            }
        }
        Ok(())
    }

    ///
    /// Every allele index of a genotype must be missing or refer to the reference or one of
    /// the alternates.
    ///
    fn check_genotype_indexes(&self, record: &Record) -> Result<()> {
        if !record.has_genotypes() {
            return Ok(());
        }

        let max_index = record.alternate_alleles.len();
        for (i, sample) in record.samples.iter().enumerate() {
            let genotype = sample.split(SUBFIELD_SEPARATOR).next().unwrap_or_default();
            // an empty genotype is as good as missing
            if genotype.is_empty() {
                continue;
            }
            for allele in genotype.split(ALLELE_SEPARATORS) {
                if allele == MISSING_VALUE {
                    continue;
                }
                let index = allele.parse::<usize>().ok().filter(|index| *index <= max_index);
                if index.is_none() {
                    return Err(VcfError::SamplesFieldBodyError {
                        line: record.line,
                        message: format!(
                            "Sample #{} has allele index '{}' in {}, but only {} alternate allele(s) are listed",
                            i + 1,
                            allele,
                            GT,
                            max_index
                        ),
                        field: GT.to_string(),
                        value: allele.parse::<i64>().unwrap_or(-1),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use vcfcheck_core::errors::ErrorKind;
    use vcfcheck_core::models::{MetaEntry, Ploidy, Source, Version};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn source_with(entries: Vec<MetaEntry>) -> Arc<Source> {
        Arc::new(Source::new(
            "test",
            Version::V43,
            Ploidy::default(),
            entries,
            strings(&["S1"]),
        ))
    }

    fn fileformat(line: usize, value: &str) -> MetaEntry {
        MetaEntry::plain(line, "fileformat", value, Version::V43).unwrap()
    }

    #[fixture]
    fn state() -> ParsingState {
        ParsingState::new(source_with(vec![fileformat(1, "VCFv4.3")]))
    }

    fn record(
        state: &ParsingState,
        line: usize,
        chromosome: &str,
        reference: &str,
        alternates: &[&str],
        format: &[&str],
        sample: &str,
    ) -> Record {
        Record::new(
            line,
            chromosome,
            100,
            vec![],
            reference,
            strings(alternates),
            None,
            strings(&["PASS"]),
            vec![],
            strings(format),
            strings(&[sample]),
            state.source(),
        )
        .unwrap()
    }

    #[rstest]
    fn test_meta_section_ok(state: ParsingState) {
        assert_eq!(MandatoryPolicy.check_meta_section(&state), Ok(()));
    }

    #[rstest]
    fn test_missing_fileformat() {
        let state = ParsingState::new(source_with(vec![]));
        let err = MandatoryPolicy.check_meta_section(&state).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MetaSection);
    }

    #[rstest]
    fn test_fileformat_disagrees_with_version() {
        let state = ParsingState::new(source_with(vec![fileformat(1, "VCFv4.1")]));
        let err = MandatoryPolicy.check_meta_section(&state).unwrap_err();
        assert_eq!(err.line(), 1);
        assert_eq!(err.message(), "The 'fileformat' entry does not declare VCFv4.3");
    }

    #[rstest]
    fn test_duplicate_declarations() {
        let contig = |line| MetaEntry::key_value(line, "contig", &[("ID", "chr1")], Version::V43);
        let state = ParsingState::new(source_with(vec![
            fileformat(1, "VCFv4.3"),
            contig(2).unwrap(),
            contig(3).unwrap(),
        ]));
        let err = MandatoryPolicy.check_meta_section(&state).unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(err.message(), "contig metadata with ID 'chr1' is declared twice");
    }

    #[rstest]
    #[case("ACGTN", true)]
    #[case("acgtn", true)]
    #[case("AXG", false)]
    #[case("<DEL>", false)]
    fn test_reference_bases(
        mut state: ParsingState,
        #[case] reference: &str,
        #[case] ok: bool,
    ) {
        let record = record(&state, 5, "chr1", reference, &["C"], &["GT"], "0/1");
        let result = MandatoryPolicy.check_body_entry(&mut state, &record);
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert_eq!(err.kind(), ErrorKind::ReferenceAlleleBody);
        }
    }

    #[rstest]
    fn test_too_many_subfields(mut state: ParsingState) {
        let record = record(&state, 5, "chr1", "A", &["C"], &["GT"], "0/1:35");
        let err = MandatoryPolicy
            .check_body_entry(&mut state, &record)
            .unwrap_err();
        assert_eq!(err.field(), Some("FORMAT"));
    }

    #[rstest]
    #[case("0/1", true)]
    #[case("./.", true)]
    #[case("1|2", true)]
    #[case("0/3", false)]
    #[case("0/x", false)]
    #[case("", true)]
    #[case("0/", false)]
    fn test_genotype_indexes(mut state: ParsingState, #[case] genotype: &str, #[case] ok: bool) {
        let record = record(&state, 5, "chr1", "A", &["C", "G"], &["GT"], genotype);
        let result = MandatoryPolicy.check_body_entry(&mut state, &record);
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert_eq!(err.field(), Some("GT"));
        }
    }

    #[rstest]
    fn test_contiguous_contigs(mut state: ParsingState) {
        for (line, contig) in [(10, "chr1"), (11, "chr1"), (12, "chr2")] {
            let record = record(&state, line, contig, "A", &["C"], &["GT"], "0/1");
            assert_eq!(MandatoryPolicy.check_body_entry(&mut state, &record), Ok(()));
        }
        assert_eq!(MandatoryPolicy.check_body_section(&state), Ok(()));
    }

    #[rstest]
    fn test_split_contig_blocks(mut state: ParsingState) {
        for (line, contig) in [(10, "chr1"), (11, "chr2"), (12, "chr1")] {
            let record = record(&state, line, contig, "A", &["C"], &["GT"], "0/1");
            assert_eq!(MandatoryPolicy.check_body_entry(&mut state, &record), Ok(()));
        }
        state.set_line(12);
        let err = MandatoryPolicy.check_body_section(&state).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BodySection);
        assert_eq!(
            err.message(),
            "Records of contig 'chr1' are not contiguous: they appear again at line 12 after other contigs"
        );
    }
}
