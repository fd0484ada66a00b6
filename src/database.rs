//! Transaction sources.
//!
//! The on-disk format is a header line holding the transaction count `N`,
//! followed by one record per line:
//!
//! ```text
//! 4
//! 0\t0\t1 2 3
//! 1\t1\t1 2
//! ```
//!
//! Fields 0 and 1 of a record are metadata and ignored. Field 2 is the
//! space-separated list of items. `N` comes from the header, not from the
//! number of records actually present. Blank lines may only trail the last
//! record; a blank line between records is malformed.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AprioriError, Result};
use crate::types::{Item, Transaction};

const ITEMS_FIELD: usize = 2;

pub type Scan<'a> = Box<dyn Iterator<Item = Result<Transaction>> + 'a>;

/// A database that can be scanned from the beginning any number of times.
pub trait TransactionSource {
    /// `N`, the count every support threshold is relative to.
    fn num_transactions(&self) -> usize;

    /// Start a fresh pass over every transaction.
    fn scan(&self) -> Result<Scan<'_>>;
}

/// A transaction file, reopened for every scan.
#[derive(Debug, Clone)]
pub struct FileDatabase {
    path: PathBuf,
    num_transactions: usize,
}

impl FileDatabase {
    /// Open `path` and read the transaction count from its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut lines = open_lines(&path)?;

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(AprioriError::malformed(1, "missing transaction count")),
        };
        let num_transactions = header.trim().parse::<usize>().map_err(|_| {
            AprioriError::malformed(1, format!("invalid transaction count '{}'", header.trim()))
        })?;

        debug!(path = %path.display(), num_transactions, "opened transaction database");

        Ok(FileDatabase {
            path,
            num_transactions,
        })
    }
}

impl TransactionSource for FileDatabase {
    fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    fn scan(&self) -> Result<Scan<'_>> {
        let mut lines = open_lines(&self.path)?;
        // header
        if let Some(line) = lines.next() {
            line?;
        }
        Ok(Box::new(Records {
            lines,
            line_no: 1,
            blank_line: None,
        }))
    }
}

fn open_lines(path: &Path) -> Result<Lines<BufReader<File>>> {
    let file = File::open(path).map_err(|_| AprioriError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    Ok(BufReader::new(file).lines())
}

struct Records {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    /// First blank line not yet followed by a record.
    blank_line: Option<usize>,
}

impl Iterator for Records {
    type Item = Result<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                self.blank_line.get_or_insert(self.line_no);
                continue;
            }
            if let Some(blank) = self.blank_line {
                return Some(Err(AprioriError::malformed(blank, "blank line between records")));
            }
            return Some(parse_record(self.line_no, &line));
        }
    }
}

/// Parse one record line into its transaction.
pub fn parse_record(line_no: usize, line: &str) -> Result<Transaction> {
    let field = line
        .trim_end_matches('\r')
        .split('\t')
        .nth(ITEMS_FIELD)
        .ok_or_else(|| AprioriError::malformed(line_no, "expected 3 tab-separated fields"))?;

    let items = field
        .split_whitespace()
        .map(|token| {
            token
                .parse::<Item>()
                .map_err(|_| AprioriError::malformed(line_no, format!("invalid item '{}'", token)))
        })
        .collect::<Result<Vec<Item>>>()?;

    Ok(Transaction::new(items))
}

/// Transactions held in memory. `N` is the number of transactions.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    transactions: Vec<Transaction>,
}

impl MemoryDatabase {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        MemoryDatabase { transactions }
    }
}

impl From<Vec<Vec<Item>>> for MemoryDatabase {
    fn from(raw: Vec<Vec<Item>>) -> Self {
        MemoryDatabase::new(raw.into_iter().map(Transaction::new).collect())
    }
}

impl TransactionSource for MemoryDatabase {
    fn num_transactions(&self) -> usize {
        self.transactions.len()
    }

    fn scan(&self) -> Result<Scan<'_>> {
        Ok(Box::new(self.transactions.iter().cloned().map(Ok)))
    }
}
