use fxhash::FxHashMap as HashMap;

use crate::models::{MetaEntry, Ploidy, Version};

///
/// Everything known about a file once its meta section has been read: the format revision,
/// the ploidy configuration, the declarations grouped by category and the sample names of
/// the header line. A `Source` is built once and only read afterwards.
///
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    version: Version,
    ploidy: Ploidy,
    meta_entries: HashMap<String, Vec<MetaEntry>>,
    samples_names: Vec<String>,
}

impl Source {
    pub fn new(
        name: &str,
        version: Version,
        ploidy: Ploidy,
        meta_entries: Vec<MetaEntry>,
        samples_names: Vec<String>,
    ) -> Self {
        let mut grouped: HashMap<String, Vec<MetaEntry>> = HashMap::default();
        for entry in meta_entries {
            grouped
                .entry(entry.category.clone())
                .or_default()
                .push(entry);
        }

        Source {
            name: name.to_string(),
            version,
            ploidy,
            meta_entries: grouped,
            samples_names,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ploidy(&self) -> &Ploidy {
        &self.ploidy
    }

    pub fn samples_names(&self) -> &[String] {
        &self.samples_names
    }

    ///
    /// All declarations of one category, in the order they were given.
    ///
    pub fn meta_entries(&self, category: &str) -> &[MetaEntry] {
        self.meta_entries
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_meta(&self, category: &str) -> bool {
        !self.meta_entries(category).is_empty()
    }

    ///
    /// Whether some key-value declaration of `category` has the given `ID`.
    ///
    pub fn declares(&self, category: &str, id: &str) -> bool {
        self.meta_entries(category)
            .iter()
            .any(|entry| entry.id_field() == Some(id))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.meta_entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn source() -> Source {
        let version = Version::V42;
        let entries = vec![
            MetaEntry::plain(1, "fileformat", "VCFv4.2", version).unwrap(),
            MetaEntry::key_value(2, "contig", &[("ID", "chr1")], version).unwrap(),
            MetaEntry::key_value(3, "contig", &[("ID", "chr2")], version).unwrap(),
            MetaEntry::key_value(
                4,
                "FILTER",
                &[("ID", "q10"), ("Description", "Quality below 10")],
                version,
            )
            .unwrap(),
        ];
        Source::new(
            "example",
            version,
            Ploidy::default(),
            entries,
            vec!["NA001".to_string()],
        )
    }

    #[rstest]
    fn test_group_by_category(source: Source) {
        assert_eq!(source.meta_entries("contig").len(), 2);
        assert_eq!(source.meta_entries("FILTER").len(), 1);
        assert_eq!(source.meta_entries("INFO").len(), 0);
        assert_eq!(source.has_meta("fileformat"), true);
        assert_eq!(source.has_meta("reference"), false);
    }

    #[rstest]
    fn test_declares(source: Source) {
        assert_eq!(source.declares("contig", "chr2"), true);
        assert_eq!(source.declares("contig", "chr3"), false);
        assert_eq!(source.declares("FILTER", "q10"), true);
        assert_eq!(source.declares("INFO", "q10"), false);
    }

    #[rstest]
    fn test_accessors(source: Source) {
        assert_eq!(source.version(), Version::V42);
        assert_eq!(source.samples_names(), &["NA001".to_string()]);
        assert_eq!(source.ploidy().get_ploidy("chr1"), 2);
        assert_eq!(source.categories().count(), 3);
    }
}
