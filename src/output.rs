use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::FrequentPatterns;

pub const DEFAULT_OUTPUT: &str = "MiningResult.txt";

/// Write the mining result in its text form:
///
/// ```text
/// |FPs| = 3
/// 1 : 3
/// 2 : 3
/// 1, 2 : 2
/// ```
pub fn write_patterns<W: Write>(mut writer: W, patterns: &FrequentPatterns) -> Result<()> {
    writeln!(writer, "|FPs| = {}", patterns.len())?;
    for (itemset, count) in patterns {
        writeln!(writer, "{} : {}", itemset, count)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_patterns(path: impl AsRef<Path>, patterns: &FrequentPatterns) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_patterns(BufWriter::new(file), patterns)?;
    debug!(path = %path.display(), num_patterns = patterns.len(), "wrote mining result");
    Ok(())
}
