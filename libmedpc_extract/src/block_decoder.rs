use regex::Regex;

use super::anomaly::{Anomaly, AnomalyTally};
use super::data_file::DataFile;
use super::error::DataFileError;
use super::record::{Bin, VariableBlock};

/// Decodes the binned timestamp section belonging to one variable label.
///
/// After a label line (`D:`) the section is a run of indented rows, each a
/// right-aligned bin index, a colon, and up to five decimal values. The
/// section has no terminator of its own; it ends at the first line that is
/// not an indented bin row, which is left unconsumed for the record builder
/// to interpret. Labels may also carry their value inline (`A:37.00000`),
/// which becomes bin 0 of that variable.
#[derive(Debug)]
pub struct BlockDecoder {
    bin_row_re: Regex,
}

impl BlockDecoder {
    pub fn new() -> Self {
        Self {
            bin_row_re: Regex::new(r"^\s+([^\s:]+):\s*(.*)$").unwrap(),
        }
    }

    /// Decode one variable section.
    ///
    /// `inline` is whatever followed the colon on the label line itself.
    /// Corrupt rows and tokens degrade only themselves: a row whose index is
    /// not a non-negative integer is discarded whole, a value token that is
    /// not a number is skipped while the rest of its row is kept.
    pub fn decode_block(
        &self,
        letter: char,
        inline: &str,
        file: &mut DataFile,
        tally: &mut AnomalyTally,
    ) -> Result<VariableBlock, DataFileError> {
        let mut block = VariableBlock::new(letter);

        let inline = inline.trim();
        if !inline.is_empty() {
            let values = decode_values(inline, tally);
            block.bins.push(Bin { index: 0, values });
        }

        loop {
            let row = match file.peek_line()? {
                Some(line) => self
                    .bin_row_re
                    .captures(line)
                    .map(|caps| (caps[1].to_string(), caps[2].to_string())),
                None => None,
            };
            let (index_token, value_part) = match row {
                Some(row) => row,
                None => break,
            };
            file.next_line()?;

            let index: u32 = match index_token.parse() {
                Ok(index) => index,
                Err(_) => {
                    tally.report(Anomaly::CorruptBinIndex(index_token));
                    continue;
                }
            };
            let values = decode_values(&value_part, tally);
            block.bins.push(Bin { index, values });
        }

        Ok(block)
    }
}

impl Default for BlockDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse whitespace-separated decimal tokens, skipping malformed ones
fn decode_values(text: &str, tally: &mut AnomalyTally) -> Vec<f64> {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => tally.report(Anomaly::CorruptTimestamp(token.to_string())),
        }
    }
    values
}
