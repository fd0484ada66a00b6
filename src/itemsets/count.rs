use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::{CountingMode, Support},
    database::{Scan, TransactionSource},
    error::Result,
    itemsets::bucket::BucketIndex,
    types::{CandidateTable, Count, Transaction},
};

/// Count every candidate of `candidates` with one scan of `source`.
///
/// Counts are added to whatever the table already holds; candidate order is
/// left untouched.
pub fn count_candidates<S: TransactionSource + ?Sized>(
    candidates: &mut CandidateTable,
    source: &S,
    mode: CountingMode,
) -> Result<()> {
    if candidates.is_empty() {
        return Ok(());
    }

    let counts = {
        let index = BucketIndex::new(candidates);
        debug!(
            num_candidates = index.num_candidates(),
            num_buckets = index.num_buckets(),
            ?mode,
            "counting candidates"
        );

        match mode {
            CountingMode::Sequential => count_sequential(&index, source.scan()?)?,
            CountingMode::Parallel => count_parallel(&index, source.scan()?)?,
        }
    };

    for (count, found) in candidates.values_mut().zip(counts) {
        *count += found;
    }

    Ok(())
}

fn count_sequential(index: &BucketIndex, scan: Scan) -> Result<Vec<Count>> {
    let mut counts = vec![0; index.num_candidates()];
    let mut buckets_searched = 0_usize;
    let mut num_scanned = 0_usize;

    for transaction in scan {
        buckets_searched += index.count_transaction(&transaction?, &mut counts);
        num_scanned += 1;
    }

    debug!(num_scanned, buckets_searched, "scan finished");

    Ok(counts)
}

/// Per-worker count vectors, summed once the scan is done.
fn count_parallel(index: &BucketIndex, scan: Scan) -> Result<Vec<Count>> {
    let transactions: Vec<Transaction> = scan.collect::<Result<_>>()?;
    let num_candidates = index.num_candidates();

    let counts = transactions
        .par_iter()
        .fold(
            || vec![0; num_candidates],
            |mut counts, transaction| {
                index.count_transaction(transaction, &mut counts);
                counts
            },
        )
        .reduce(
            || vec![0; num_candidates],
            |mut total, partial| {
                total
                    .iter_mut()
                    .zip(partial)
                    .for_each(|(count, found)| *count += found);
                total
            },
        );

    debug!(num_scanned = transactions.len(), "parallel scan finished");

    Ok(counts)
}

/// Drop every candidate whose count is below `threshold * N`.
pub fn prune_min(candidates: &mut CandidateTable, support: &Support) {
    candidates.retain(|_, &mut count| support.is_frequent(count));
}
