use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

pub type Item = u32;
pub type Count = u32;
pub type ItemsetLength = usize;

/// Canonical itemset -> support count, in generation order.
pub type CandidateTable = IndexMap<Itemset, Count>;

/// All frequent itemsets of a run, in discovery order.
pub type FrequentPatterns = IndexMap<Itemset, Count>;

/// A duplicate-free, strictly increasing sequence of items.
///
/// Every constructor canonicalises, so two itemsets compare equal exactly when
/// they hold the same items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Vec<Item>);

impl Itemset {
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_unstable();
        items.dedup();
        Itemset(items)
    }

    pub fn singleton(item: Item) -> Self {
        Itemset(vec![item])
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> ItemsetLength {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The minimum item, which is also the bucket key of the itemset.
    pub fn first(&self) -> Option<Item> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Item> {
        self.0.last().copied()
    }

    /// The first `len` items, or the whole itemset if it is shorter.
    pub fn prefix(&self, len: usize) -> &[Item] {
        &self.0[..len.min(self.0.len())]
    }

    pub fn is_contained_in(&self, transaction: &Transaction) -> bool {
        self.0.iter().all(|&item| transaction.contains(item))
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Self {
        Itemset::new(items)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}

/// The items of one database record.
///
/// Duplicates are dropped but the record's own order is kept, since level 1
/// discovers items in that order. A sorted copy answers membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    items: Vec<Item>,
    sorted: Vec<Item>,
}

impl Transaction {
    pub fn new(items: Vec<Item>) -> Self {
        let items: Vec<Item> = items.into_iter().unique().collect();
        let mut sorted = items.clone();
        sorted.sort_unstable();
        Transaction { items, sorted }
    }

    pub fn contains(&self, item: Item) -> bool {
        self.sorted.binary_search(&item).is_ok()
    }

    /// Items in the order the record lists them.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Item>> for Transaction {
    fn from(items: Vec<Item>) -> Self {
        Transaction::new(items)
    }
}
