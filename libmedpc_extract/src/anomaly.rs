use thiserror::Error;

/// Recoverable conditions encountered while walking a data file.
///
/// An anomaly degrades the affected field, line, or token. It is logged and
/// counted but never stops the current record or the run.
#[derive(Debug, Clone, Error)]
pub enum Anomaly {
    #[error("Required header field {0} was not found for this record")]
    MissingField(&'static str),
    #[error("Bin line with unparseable index {0:?} was discarded")]
    CorruptBinIndex(String),
    #[error("Timestamp token {0:?} was not a valid number and was skipped")]
    CorruptTimestamp(String),
}

/// Running anomaly totals for a single extraction pass.
#[derive(Debug, Clone, Default)]
pub struct AnomalyTally {
    pub missing_fields: u64,
    pub corrupt_bin_indices: u64,
    pub corrupt_timestamps: u64,
}

impl AnomalyTally {
    /// Log the anomaly and bump the matching counter
    pub fn report(&mut self, anomaly: Anomaly) {
        log::warn!("{anomaly}");
        match anomaly {
            Anomaly::MissingField(_) => self.missing_fields += 1,
            Anomaly::CorruptBinIndex(_) => self.corrupt_bin_indices += 1,
            Anomaly::CorruptTimestamp(_) => self.corrupt_timestamps += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.missing_fields + self.corrupt_bin_indices + self.corrupt_timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_per_kind() {
        let mut tally = AnomalyTally::default();
        tally.report(Anomaly::MissingField("BOX"));
        tally.report(Anomaly::CorruptBinIndex(String::from("x5")));
        tally.report(Anomaly::CorruptTimestamp(String::from("12..3")));
        tally.report(Anomaly::CorruptTimestamp(String::from("abc")));
        assert_eq!(tally.missing_fields, 1);
        assert_eq!(tally.corrupt_bin_indices, 1);
        assert_eq!(tally.corrupt_timestamps, 2);
        assert_eq!(tally.total(), 4);
    }
}
