use tracing::debug;

use crate::{
    combi::join_step,
    database::TransactionSource,
    error::Result,
    types::{CandidateTable, Itemset},
};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// C1: every item seen in the database with its count, in first-seen order.
/// Items are discovered in record order, then in the order each record lists
/// them.
///
/// Unlike the later levels this needs no separate counting pass; the single
/// scan that discovers the items also counts them.
pub fn generate_1_itemset_counts<S: TransactionSource + ?Sized>(
    source: &S,
) -> Result<CandidateTable> {
    let mut item_counts = CandidateTable::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
    let mut num_scanned = 0_usize;

    for transaction in source.scan()? {
        let transaction = transaction?;
        for &item in transaction.items() {
            *item_counts.entry(Itemset::singleton(item)).or_insert(0) += 1;
        }
        num_scanned += 1;
    }

    debug!(num_scanned, unique_items = item_counts.len(), "scanned for 1-itemsets");

    Ok(item_counts)
}

/// Ck from the frequent (k-1)-itemsets, every count starting at zero.
pub fn generate_candidates_from_prev(frequent: &CandidateTable) -> CandidateTable {
    let prev: Vec<Itemset> = frequent.keys().cloned().collect();

    // a repeated candidate keeps the position of its first emission
    join_step(&prev)
        .into_iter()
        .map(|candidate| (candidate, 0))
        .collect()
}
