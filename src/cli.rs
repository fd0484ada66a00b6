use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use crate::config::{CountingMode, MinerConfig, Threshold};
use crate::error::{AprioriError, Result};
use crate::output::DEFAULT_OUTPUT;

pub const USAGE: &str = "run as `apriori <FILE> <0.xx>` \
    where 0.xx is the minimum support as a fraction, e.g. 3% is 0.03";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "apriori")]
#[command(about = "Find frequent itemsets in a transaction file with Apriori", long_about = None)]
pub struct Cli {
    /// Transaction file: a count line, then `meta<TAB>meta<TAB>item item ...` records
    pub input: PathBuf,

    /// Minimum support as a fraction between 0.01 and 0.99
    #[arg(allow_hyphen_values = true)]
    pub threshold: String,

    /// Where to write the frequent itemsets
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Largest itemset size to search for
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_len: Option<u64>,

    /// Count candidates on all cores
    #[arg(long)]
    pub parallel: bool,
}

impl Cli {
    /// Parse command-line arguments. Help and version requests print and exit.
    pub fn parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            kind => {
                debug!(%kind, "argument parsing failed");
                AprioriError::InvalidArguments {
                    usage: USAGE.to_owned(),
                }
            }
        })
    }

    /// Check the input file and threshold, in that order, before any mining
    /// work starts.
    pub fn validate(&self) -> Result<MinerConfig> {
        if !self.input.is_file() {
            return Err(AprioriError::FileNotFound {
                path: self.input.clone(),
            });
        }

        let threshold: Threshold = self.threshold.parse()?;
        let mut config = MinerConfig::new(threshold);
        if let Some(max_len) = self.max_len {
            config = config.with_max_len(max_len as usize);
        }
        if self.parallel {
            config = config.with_counting(CountingMode::Parallel);
        }

        Ok(config)
    }
}
