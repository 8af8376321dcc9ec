use fxhash::FxHashMap as HashMap;

///
/// Number of allele copies expected per genotype: one default for every contig, and
/// optional overrides for specific contigs (e.g. a haploid `Y`).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ploidy {
    default_ploidy: usize,
    contig_ploidy: HashMap<String, usize>,
}

impl Ploidy {
    pub fn new(default_ploidy: usize, contig_ploidy: HashMap<String, usize>) -> Self {
        Ploidy {
            default_ploidy,
            contig_ploidy,
        }
    }

    pub fn default_ploidy(&self) -> usize {
        self.default_ploidy
    }

    ///
    /// Ploidy configured for a contig, falling back to the default.
    ///
    pub fn get_ploidy(&self, contig: &str) -> usize {
        self.contig_ploidy
            .get(contig)
            .copied()
            .unwrap_or(self.default_ploidy)
    }
}

impl Default for Ploidy {
    fn default() -> Self {
        Ploidy::new(2, HashMap::default())
    }
}
