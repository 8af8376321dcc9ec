use once_cell::sync::Lazy;
use regex::Regex;

use vcfcheck_core::consts::{
    ALLELE_SEPARATORS, ALT, CHROM_COLUMN, CONTIG, FILTER, FORMAT, INFO, MISSING_VALUE,
    PASS_VALUE, REFERENCE, SUBFIELD_SEPARATOR,
};
use vcfcheck_core::errors::{Result, VcfError};
use vcfcheck_core::models::{Record, RecordType};

use super::{Severity, ValidationPolicy};
use crate::state::ParsingState;

static SYMBOLIC_ALLELE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<([a-zA-Z0-9:_]+)>$").unwrap());

///
/// Advisory checks: things that are very likely mistakes but do not make the file
/// unreadable. Violations are reported as warnings.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalPolicy;

impl ValidationPolicy for OptionalPolicy {
    fn name(&self) -> &'static str {
        "optional"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check_meta_section(&self, state: &ParsingState) -> Result<()> {
        if !state.source().has_meta(REFERENCE) {
            return Err(VcfError::MetaSectionError {
                line: state.n_lines,
                message: "A valid 'reference' entry is not listed in the meta section".to_string(),
            });
        }
        Ok(())
    }

    fn check_body_entry(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        self.check_ploidy(state, record)?;
        self.check_position_zero(record)?;
        self.check_id_commas(record)?;
        self.check_reference_alternate_matching(record)?;

        // cross-references against the meta section, each pair looked up only once per run
        self.check_contig_meta(state, record)?;
        self.check_alternate_allele_meta(state, record)?;
        self.check_filter_meta(state, record)?;
        self.check_info_meta(state, record)?;
        self.check_format_meta(state, record)
    }

    fn check_body_section(&self, _state: &ParsingState) -> Result<()> {
        Ok(())
    }
}

impl OptionalPolicy {
    ///
    /// All samples must show the same number of alleles, and that number must be the ploidy
    /// configured for the record's contig.
    ///
    fn check_ploidy(&self, state: &ParsingState, record: &Record) -> Result<()> {
        if !record.has_genotypes() {
            return Ok(());
        }

        let mut observed: Option<usize> = None;
        for (i, sample) in record.samples.iter().enumerate() {
            let genotype = sample.split(SUBFIELD_SEPARATOR).next().unwrap_or_default();
            let alleles = genotype
                .split(ALLELE_SEPARATORS)
                .filter(|allele| !allele.is_empty())
                .count();

            match observed {
                Some(ploidy) if ploidy != alleles => {
                    return Err(VcfError::SamplesFieldBodyError {
                        line: record.line,
                        message: format!(
                            "Sample #{} has {} allele(s), but {} were found in others",
                            i + 1,
                            alleles,
                            ploidy
                        ),
                        field: "GT".to_string(),
                        value: ploidy as i64,
                    });
                }
                Some(_) => {}
                None => observed = Some(alleles),
            }
        }

        // a genotype column with no samples shows ploidy 0
        let observed = observed.unwrap_or(0);
        let expected = state.source().ploidy().get_ploidy(&record.chromosome);
        if expected != observed {
            return Err(VcfError::SamplesFieldBodyError {
                line: record.line,
                message: format!(
                    "The specified ploidy for contig \"{}\" was {}, which doesn't match the genotypes, which show ploidy {}",
                    record.chromosome, expected, observed
                ),
                field: "GT".to_string(),
                value: expected as i64,
            });
        }
        Ok(())
    }

    fn check_position_zero(&self, record: &Record) -> Result<()> {
        if record.position == 0 {
            return Err(VcfError::PositionBodyError {
                line: record.line,
                message: "Position zero should only be used to reference a telomere".to_string(),
            });
        }
        Ok(())
    }

    fn check_id_commas(&self, record: &Record) -> Result<()> {
        if record.ids.iter().any(|id| id.contains(',')) {
            return Err(VcfError::IdBodyError {
                line: record.line,
                message: "Comma found in the ID column; if used as separator, please replace it with semi-colon".to_string(),
            });
        }
        Ok(())
    }

    fn check_reference_alternate_matching(&self, record: &Record) -> Result<()> {
        let reference_base = record.reference_allele.as_bytes().first();
        let mismatch = record
            .alternate_alleles
            .iter()
            .zip(&record.types)
            .any(|(alternate, kind)| {
                *kind == RecordType::Indel && alternate.as_bytes().first() != reference_base
            });

        if mismatch {
            return Err(VcfError::ReferenceAlleleBodyError {
                line: record.line,
                message: "Reference and alternate alleles do not share the first nucleotide"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn check_contig_meta(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        let contig = &record.chromosome;
        if !state.cross_reference(CONTIG, contig) {
            return Err(VcfError::NoMetaDefinitionError {
                line: record.line,
                message: format!(
                    "Chromosome/contig '{}' is not described in a 'contig' meta description",
                    contig
                ),
                field: CHROM_COLUMN.to_string(),
                value: contig.clone(),
            });
        }
        Ok(())
    }

    fn check_alternate_allele_meta(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        for alternate in &record.alternate_alleles {
            let Some(captures) = SYMBOLIC_ALLELE.captures(alternate) else {
                continue;
            };
            let alt_id = &captures[1];
            if !state.cross_reference(ALT, alt_id) {
                return Err(VcfError::NoMetaDefinitionError {
                    line: record.line,
                    message: format!(
                        "Alternate '<{}>' is not listed in a valid meta-data ALT entry",
                        alt_id
                    ),
                    field: ALT.to_string(),
                    value: alt_id.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_filter_meta(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        for filter in &record.filters {
            if filter == PASS_VALUE || filter == MISSING_VALUE {
                continue;
            }
            if !state.cross_reference(FILTER, filter) {
                return Err(no_definition(record.line, "Filter", FILTER, filter));
            }
        }
        Ok(())
    }

    fn check_info_meta(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        for (key, _) in &record.info {
            if key == MISSING_VALUE {
                continue;
            }
            if !state.cross_reference(INFO, key) {
                return Err(no_definition(record.line, "Info", INFO, key));
            }
        }
        Ok(())
    }

    fn check_format_meta(&self, state: &mut ParsingState, record: &Record) -> Result<()> {
        for field in &record.format {
            if !state.cross_reference(FORMAT, field) {
                return Err(no_definition(record.line, "Format", FORMAT, field));
            }
        }
        Ok(())
    }
}

fn no_definition(line: usize, label: &str, category: &str, value: &str) -> VcfError {
    VcfError::NoMetaDefinitionError {
        line,
        message: format!(
            "{} '{}' is not listed in a valid meta-data {} entry",
            label, value, category
        ),
        field: category.to_string(),
        value: value.to_string(),
    }
}
