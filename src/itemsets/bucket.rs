use indexmap::IndexMap;

use crate::types::{CandidateTable, Count, Item, Itemset, Transaction};

/// Candidates partitioned by their minimum item.
///
/// A candidate can only be contained in a transaction that holds its minimum
/// item, so a whole bucket is skipped whenever its key is missing from the
/// transaction. Each entry remembers the candidate's position in the table it
/// was built from, so counts can be written back without re-hashing.
#[derive(Debug)]
pub struct BucketIndex<'t> {
    buckets: IndexMap<Item, Vec<(usize, &'t Itemset)>>,
    num_candidates: usize,
}

impl<'t> BucketIndex<'t> {
    pub fn new(candidates: &'t CandidateTable) -> Self {
        let mut buckets: IndexMap<Item, Vec<(usize, &'t Itemset)>> = IndexMap::new();
        for (position, candidate) in candidates.keys().enumerate() {
            if let Some(key) = candidate.first() {
                buckets.entry(key).or_default().push((position, candidate));
            }
        }

        BucketIndex {
            buckets,
            num_candidates: candidates.len(),
        }
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// Add one to `counts[position]` for every candidate contained in
    /// `transaction`. Returns the number of buckets that were searched.
    pub fn count_transaction(&self, transaction: &Transaction, counts: &mut [Count]) -> usize {
        let mut searched = 0;

        // walk whichever side is smaller; both visit exactly the buckets whose
        // key is in the transaction
        if transaction.len() < self.buckets.len() {
            for item in transaction.items() {
                if let Some(bucket) = self.buckets.get(item) {
                    searched += 1;
                    count_bucket(bucket, transaction, counts);
                }
            }
        } else {
            for (&key, bucket) in &self.buckets {
                if !transaction.contains(key) {
                    continue;
                }
                searched += 1;
                count_bucket(bucket, transaction, counts);
            }
        }

        searched
    }
}

fn count_bucket(bucket: &[(usize, &Itemset)], transaction: &Transaction, counts: &mut [Count]) {
    for &(position, candidate) in bucket {
        if candidate.is_contained_in(transaction) {
            counts[position] += 1;
        }
    }
}
