use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

///
/// Memo of the `(category, identifier)` pairs already found declared in the meta section.
///
/// A file never un-declares metadata, so entries are only ever added: once a pair has been
/// confirmed it stays confirmed for the rest of the run. The cache also counts how many
/// times a caller had to fall back to scanning the header.
///
#[derive(Debug, Clone, Default)]
pub struct ConsistencyCache {
    confirmed: HashMap<String, HashSet<String>>,
    header_scans: usize,
}

impl ConsistencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_confirmed(&self, category: &str, id: &str) -> bool {
        self.confirmed
            .get(category)
            .is_some_and(|ids| ids.contains(id))
    }

    pub fn confirm(&mut self, category: &str, id: &str) {
        if let Some(ids) = self.confirmed.get_mut(category) {
            ids.insert(id.to_string());
        } else {
            let mut ids = HashSet::default();
            ids.insert(id.to_string());
            self.confirmed.insert(category.to_string(), ids);
        }
    }

    pub(crate) fn record_header_scan(&mut self) {
        self.header_scans += 1;
    }

    pub fn header_scans(&self) -> usize {
        self.header_scans
    }

    ///
    /// Number of confirmed pairs, across all categories.
    ///
    pub fn len(&self) -> usize {
        self.confirmed.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
