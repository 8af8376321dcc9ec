use std::sync::Arc;

use fxhash::FxHashSet as HashSet;
use log::trace;

use vcfcheck_core::models::Source;

use crate::cache::ConsistencyCache;

///
/// Order in which contigs appear in the body, used to detect records of one contig split
/// in several blocks.
///
#[derive(Debug, Clone, Default)]
pub struct ContigBlocks {
    current: Option<String>,
    finished: HashSet<String>,
    first_reentry: Option<(usize, String)>,
}

impl ContigBlocks {
    pub fn observe(&mut self, line: usize, contig: &str) {
        if self.current.as_deref() == Some(contig) {
            return;
        }
        if self.finished.contains(contig) && self.first_reentry.is_none() {
            self.first_reentry = Some((line, contig.to_string()));
        }
        if let Some(previous) = self.current.replace(contig.to_string()) {
            self.finished.insert(previous);
        }
    }

    ///
    /// Line and name of the first contig that appeared again after another contig started.
    ///
    pub fn first_reentry(&self) -> Option<(usize, &str)> {
        self.first_reentry
            .as_ref()
            .map(|(line, contig)| (*line, contig.as_str()))
    }
}

///
/// Mutable context of one validation run: the line being checked, the file's [Source] and
/// the [ConsistencyCache]. Each run (and each policy run in parallel) owns its own state.
///
#[derive(Debug, Clone)]
pub struct ParsingState {
    pub n_lines: usize,
    source: Arc<Source>,
    cache: ConsistencyCache,
    contig_blocks: ContigBlocks,
}

impl ParsingState {
    pub fn new(source: Arc<Source>) -> Self {
        ParsingState {
            n_lines: 0,
            source,
            cache: ConsistencyCache::new(),
            contig_blocks: ContigBlocks::default(),
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn set_line(&mut self, line: usize) {
        self.n_lines = line;
    }

    pub fn cache(&self) -> &ConsistencyCache {
        &self.cache
    }

    pub fn is_well_defined_meta(&self, category: &str, id: &str) -> bool {
        self.cache.is_confirmed(category, id)
    }

    pub fn add_well_defined_meta(&mut self, category: &str, id: &str) {
        self.cache.confirm(category, id);
    }

    ///
    /// Whether `id` is declared in the meta section under `category`. The header is scanned
    /// only until the pair is found once; after that the cached answer is used.
    ///
    pub fn cross_reference(&mut self, category: &str, id: &str) -> bool {
        if self.is_well_defined_meta(category, id) {
            return true;
        }

        self.cache.record_header_scan();
        trace!("Scanning {} declarations for '{}'", category, id);
        let declared = self.source.declares(category, id);
        if declared {
            self.add_well_defined_meta(category, id);
        }
        declared
    }

    pub fn contig_blocks(&self) -> &ContigBlocks {
        &self.contig_blocks
    }

    pub fn contig_blocks_mut(&mut self) -> &mut ContigBlocks {
        &mut self.contig_blocks
    }
}
