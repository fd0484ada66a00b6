use tracing::{info, info_span};

use crate::{
    config::{MinerConfig, Support},
    database::TransactionSource,
    error::Result,
    itemsets::{
        count::{count_candidates, prune_min},
        search::{generate_1_itemset_counts, generate_candidates_from_prev},
    },
    types::{CandidateTable, Count, FrequentPatterns, Itemset, ItemsetLength},
};

/// What one level of the search produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    pub level: ItemsetLength,
    pub num_candidates: usize,
    pub num_frequent: usize,
}

#[derive(Debug, Clone)]
pub struct MiningResult {
    pub support: Support,
    /// Every frequent itemset, level 1 first, each level in generation order.
    pub patterns: FrequentPatterns,
    /// One entry per level that was run. The last one has no frequent itemsets
    /// unless the run was cut short by `max_len`.
    pub levels: Vec<LevelStats>,
}

impl MiningResult {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn at_level(&self, level: ItemsetLength) -> impl Iterator<Item = (&Itemset, Count)> + '_ {
        self.patterns
            .iter()
            .filter(move |(itemset, _)| itemset.len() == level)
            .map(|(itemset, &count)| (itemset, count))
    }
}

/// Run Apriori over `source` until no candidate survives pruning.
///
/// Level 1 is counted while it is generated. Every later level is generated
/// by self-joining the previous survivors, counted with one bucketed scan of
/// the source and pruned against `ceil(threshold * N)`.
pub fn generate_frequent_itemsets<S: TransactionSource + ?Sized>(
    source: &S,
    config: &MinerConfig,
) -> Result<MiningResult> {
    let support = Support::new(config.threshold, source.num_transactions());
    // level 1 always runs
    let max_len = config.max_len.map(|k| k.max(1));

    info!(
        num_transactions = support.num_transactions,
        threshold = support.threshold.value(),
        min_count = support.min_count,
        "mining frequent itemsets"
    );

    let mut levels = Vec::new();

    let mut frequent = {
        let _span = info_span!("level", k = 1).entered();
        let mut candidates = generate_1_itemset_counts(source)?;
        let num_candidates = candidates.len();
        prune_min(&mut candidates, &support);
        levels.push(level_done(1, num_candidates, &candidates));
        candidates
    };

    let mut patterns: FrequentPatterns = frequent.clone();
    let mut size: ItemsetLength = 2;

    while !frequent.is_empty() && max_len.map_or(true, |max| size <= max) {
        let _span = info_span!("level", k = size).entered();

        let mut candidates = generate_candidates_from_prev(&frequent);
        let num_candidates = candidates.len();
        count_candidates(&mut candidates, source, config.counting)?;
        prune_min(&mut candidates, &support);
        levels.push(level_done(size, num_candidates, &candidates));

        patterns.extend(candidates.iter().map(|(itemset, &count)| (itemset.clone(), count)));
        frequent = candidates;
        size += 1;
    }

    info!(num_patterns = patterns.len(), num_levels = levels.len(), "mining finished");

    Ok(MiningResult {
        support,
        patterns,
        levels,
    })
}

fn level_done(
    level: ItemsetLength,
    num_candidates: usize,
    frequent: &CandidateTable,
) -> LevelStats {
    info!(level, num_candidates, num_frequent = frequent.len(), "level done");
    LevelStats {
        level,
        num_candidates,
        num_frequent: frequent.len(),
    }
}
