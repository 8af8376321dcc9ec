use fxhash::FxHashMap as HashMap;
use once_cell::sync::Lazy;

use crate::models::Version;

// Meta section categories
pub const ALT: &str = "ALT";
pub const ASSEMBLY: &str = "assembly";
pub const CONTIG: &str = "contig";
pub const FILEFORMAT: &str = "fileformat";
pub const FILTER: &str = "FILTER";
pub const FORMAT: &str = "FORMAT";
pub const INFO: &str = "INFO";
pub const PEDIGREE: &str = "PEDIGREE";
pub const PEDIGREE_DB: &str = "pedigreeDB";
pub const REFERENCE: &str = "reference";
pub const SAMPLE: &str = "SAMPLE";

// Keys of key-value meta entries
pub const ID: &str = "ID";
pub const NUMBER: &str = "Number";
pub const TYPE: &str = "Type";
pub const DESCRIPTION: &str = "Description";

// Body columns, as named in violations
pub const CHROM_COLUMN: &str = "CHROM";

// Values with a special meaning in the body
pub const MISSING_VALUE: &str = ".";
pub const PASS_VALUE: &str = "PASS";
pub const GT: &str = "GT";
pub const SPANNING_DELETION: &str = "*";
pub const ALLELE_SEPARATORS: [char; 2] = ['|', '/'];
pub const SUBFIELD_SEPARATOR: char = ':';

// Number sentinels
pub const NUMBER_PER_ALT: &str = "A";
pub const NUMBER_PER_ALLELE: &str = "R";
pub const NUMBER_PER_GENOTYPE: &str = "G";
pub const NUMBER_UNKNOWN: &str = ".";
pub const NUMBER_SENTINELS: [&str; 4] = [
    NUMBER_PER_ALT,
    NUMBER_PER_ALLELE,
    NUMBER_PER_GENOTYPE,
    NUMBER_UNKNOWN,
];

// Types
pub const INTEGER: &str = "Integer";
pub const FLOAT: &str = "Float";
pub const FLAG: &str = "Flag";
pub const CHARACTER: &str = "Character";
pub const STRING: &str = "String";
pub const FORMAT_TYPES: [&str; 4] = [INTEGER, FLOAT, CHARACTER, STRING];
pub const INFO_TYPES: [&str; 5] = [INTEGER, FLOAT, FLAG, CHARACTER, STRING];

/// Structural variant codes an ALT declaration ID (or its prefix before a colon) must use.
pub const ALT_ID_PREFIXES: [&str; 5] = ["DEL", "INS", "DUP", "INV", "CNV"];

///
/// The Type and Number a reserved INFO or FORMAT tag must be declared with. `None` means the
/// slot is unconstrained and any declared value is accepted.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagConstraint {
    pub type_: Option<&'static str>,
    pub number: Option<&'static str>,
}

pub type TagTable = HashMap<&'static str, TagConstraint>;

fn build_table(rows: &[(&'static str, Option<&'static str>, Option<&'static str>)]) -> TagTable {
    rows.iter()
        .map(|&(id, type_, number)| (id, TagConstraint { type_, number }))
        .collect()
}

const SV_INFO_TAGS: [(&str, Option<&str>, Option<&str>); 24] = [
    ("IMPRECISE", Some(FLAG), Some("0")),
    ("NOVEL", Some(FLAG), Some("0")),
    ("SVTYPE", Some(STRING), Some("1")),
    ("SVLEN", Some(INTEGER), None),
    ("CIPOS", Some(INTEGER), Some("2")),
    ("CIEND", Some(INTEGER), Some("2")),
    ("HOMLEN", Some(INTEGER), None),
    ("HOMSEQ", Some(STRING), None),
    ("BKPTID", Some(STRING), None),
    ("MEINFO", Some(STRING), Some("4")),
    ("METRANS", Some(STRING), Some("4")),
    ("DGVID", Some(STRING), Some("1")),
    ("DBVARID", Some(STRING), Some("1")),
    ("DBRIPID", Some(STRING), Some("1")),
    ("MATEID", Some(STRING), None),
    ("PARID", Some(STRING), Some("1")),
    ("EVENT", Some(STRING), Some("1")),
    ("CILEN", Some(INTEGER), Some("2")),
    ("DPADJ", Some(INTEGER), None),
    ("CN", Some(INTEGER), Some("1")),
    ("CNADJ", Some(INTEGER), None),
    ("CICN", Some(INTEGER), Some("2")),
    ("CICNADJ", Some(INTEGER), None),
    ("END", Some(INTEGER), Some("1")),
];

static INFO_V41_V42: Lazy<TagTable> = Lazy::new(|| {
    let mut table = build_table(&[
        ("AA", Some(STRING), Some("1")),
        ("AC", Some(INTEGER), Some(NUMBER_PER_ALT)),
        ("AF", Some(FLOAT), Some(NUMBER_PER_ALT)),
        ("AN", Some(INTEGER), Some("1")),
        ("BQ", None, Some("1")),
        ("CIGAR", Some(STRING), Some(NUMBER_PER_ALT)),
        ("DB", Some(FLAG), Some("0")),
        ("DP", Some(INTEGER), Some("1")),
        ("H2", Some(FLAG), Some("0")),
        ("H3", Some(FLAG), Some("0")),
        ("MQ", None, Some("1")),
        ("MQ0", Some(INTEGER), Some("1")),
        ("NS", Some(INTEGER), Some("1")),
        ("SB", None, Some("4")),
        ("SOMATIC", Some(FLAG), Some("0")),
        ("VALIDATED", Some(FLAG), Some("0")),
        ("1000G", Some(FLAG), Some("0")),
    ]);
    table.extend(build_table(&SV_INFO_TAGS));
    table
});

static INFO_V43: Lazy<TagTable> = Lazy::new(|| {
    let mut table = build_table(&[
        ("AA", Some(STRING), Some("1")),
        ("AC", Some(INTEGER), Some(NUMBER_PER_ALT)),
        ("AD", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("ADF", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("ADR", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("AF", Some(FLOAT), Some(NUMBER_PER_ALT)),
        ("AN", Some(INTEGER), Some("1")),
        ("BQ", Some(FLOAT), Some("1")),
        ("CIGAR", Some(STRING), Some(NUMBER_PER_ALT)),
        ("DB", Some(FLAG), Some("0")),
        ("DP", Some(INTEGER), Some("1")),
        ("H2", Some(FLAG), Some("0")),
        ("H3", Some(FLAG), Some("0")),
        ("MQ", Some(FLOAT), Some("1")),
        ("MQ0", Some(INTEGER), Some("1")),
        ("NS", Some(INTEGER), Some("1")),
        ("SB", Some(INTEGER), Some("4")),
        ("SOMATIC", Some(FLAG), Some("0")),
        ("VALIDATED", Some(FLAG), Some("0")),
        ("1000G", Some(FLAG), Some("0")),
    ]);
    table.extend(build_table(&SV_INFO_TAGS));
    table
});

static FORMAT_V41_V42: Lazy<TagTable> = Lazy::new(|| {
    build_table(&[
        ("DP", Some(INTEGER), Some("1")),
        ("EC", Some(INTEGER), Some(NUMBER_PER_ALT)),
        ("FT", Some(STRING), Some("1")),
        ("GL", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("GLE", Some(STRING), None),
        ("GP", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("GQ", Some(INTEGER), Some("1")),
        ("GT", Some(STRING), Some("1")),
        ("HQ", Some(INTEGER), Some("2")),
        ("MQ", Some(INTEGER), Some("1")),
        ("PL", Some(INTEGER), Some(NUMBER_PER_GENOTYPE)),
        ("PQ", Some(INTEGER), Some("1")),
        ("PS", Some(INTEGER), Some("1")),
        // structural variants
        ("CN", Some(INTEGER), Some("1")),
        ("CNQ", Some(FLOAT), Some("1")),
        ("CNL", Some(FLOAT), None),
        ("NQ", Some(INTEGER), Some("1")),
        ("HAP", Some(INTEGER), Some("1")),
        ("AHAP", Some(INTEGER), Some("1")),
    ])
});

static FORMAT_V43: Lazy<TagTable> = Lazy::new(|| {
    build_table(&[
        ("AD", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("ADF", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("ADR", Some(INTEGER), Some(NUMBER_PER_ALLELE)),
        ("DP", Some(INTEGER), Some("1")),
        ("EC", Some(INTEGER), Some(NUMBER_PER_ALT)),
        ("FT", Some(STRING), Some("1")),
        ("GL", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("GP", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("GQ", Some(INTEGER), Some("1")),
        ("GT", Some(STRING), Some("1")),
        ("HQ", Some(INTEGER), Some("2")),
        ("MQ", Some(INTEGER), Some("1")),
        ("PL", Some(INTEGER), Some(NUMBER_PER_GENOTYPE)),
        ("PQ", Some(INTEGER), Some("1")),
        ("PS", Some(INTEGER), Some("1")),
        // structural variants
        ("CN", Some(INTEGER), Some("1")),
        ("CNQ", Some(FLOAT), Some("1")),
        ("CNL", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("CNP", Some(FLOAT), Some(NUMBER_PER_GENOTYPE)),
        ("NQ", Some(INTEGER), Some("1")),
        ("HAP", Some(INTEGER), Some("1")),
        ("AHAP", Some(INTEGER), Some("1")),
    ])
});

///
/// Reserved-tag table for a meta category under a given format revision. Only `INFO` and
/// `FORMAT` have reserved tags; any other category yields `None`.
///
pub fn reserved_tags(category: &str, version: Version) -> Option<&'static TagTable> {
    match (category, version.uses_legacy_tags()) {
        (INFO, true) => Some(&*INFO_V41_V42),
        (INFO, false) => Some(&*INFO_V43),
        (FORMAT, true) => Some(&*FORMAT_V41_V42),
        (FORMAT, false) => Some(&*FORMAT_V43),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Version::V41)]
    #[case(Version::V42)]
    fn test_legacy_revisions_share_tables(#[case] version: Version) {
        let info = reserved_tags(INFO, version).unwrap();
        let bq = info.get("BQ").unwrap();
        assert_eq!(bq.type_, None);
        assert_eq!(bq.number, Some("1"));
        assert_eq!(info.contains_key("AD"), false);
    }

    #[rstest]
    fn test_newest_revision_constrains_more() {
        let info = reserved_tags(INFO, Version::V43).unwrap();
        assert_eq!(info.get("BQ").unwrap().type_, Some(FLOAT));
        assert_eq!(info.get("AD").unwrap().number, Some(NUMBER_PER_ALLELE));

        let format = reserved_tags(FORMAT, Version::V43).unwrap();
        assert_eq!(format.get("CNL").unwrap().number, Some(NUMBER_PER_GENOTYPE));
    }

    #[rstest]
    #[case(FILTER)]
    #[case(ALT)]
    #[case(CONTIG)]
    fn test_no_table_for_other_categories(#[case] category: &str) {
        assert_eq!(reserved_tags(category, Version::V43).is_none(), true);
    }
}
