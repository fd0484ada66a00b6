//! Frequent-itemset mining with the level-wise Apriori algorithm.
//!
//! Each level self-joins the previous level's frequent itemsets into
//! candidates, counts them with a single database scan that skips every
//! candidate whose minimum item is missing from the transaction, and prunes
//! the ones below `ceil(threshold * N)`. The search stops at the first level
//! with no survivors.
//!
//! ```no_run
//! use apriori::{mine_file, MinerConfig, Threshold};
//!
//! let config = MinerConfig::new(Threshold::new(0.03)?);
//! let result = mine_file("retail.txt", &config)?;
//! println!("|FPs| = {}", result.len());
//! # Ok::<(), apriori::AprioriError>(())
//! ```

use std::path::Path;

pub mod cli;
pub mod combi;
pub mod config;
pub mod database;
pub mod error;
pub mod itemset;
pub mod itemsets;
pub mod output;
pub mod types;

pub use config::{CountingMode, MinerConfig, Support, Threshold};
pub use database::{FileDatabase, MemoryDatabase, TransactionSource};
pub use error::{AprioriError, Result};
pub use itemset::{generate_frequent_itemsets, LevelStats, MiningResult};
pub use types::{CandidateTable, Count, FrequentPatterns, Item, Itemset, Transaction};

/// Open a transaction file and mine it.
pub fn mine_file(path: impl AsRef<Path>, config: &MinerConfig) -> Result<MiningResult> {
    let database = FileDatabase::open(path)?;
    generate_frequent_itemsets(&database, config)
}
