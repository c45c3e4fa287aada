use regex::Regex;

use super::record::Record;

/// Extracts the labeled metadata fields from record header lines.
///
/// Each field is matched independently by a label-anchored pattern, so the
/// fields may share a line in any left-to-right order, as they do in the
/// fixed MED-PC layout. A label that never appears leaves its field unset;
/// the record builder reports those when the record is finalized.
#[derive(Debug)]
pub struct FieldScanner {
    box_re: Regex,
    subject_re: Regex,
    experiment_re: Regex,
    group_re: Regex,
    msn_re: Regex,
    start_re: Regex,
    end_re: Regex,
}

impl FieldScanner {
    pub fn new() -> Self {
        Self {
            box_re: Regex::new(r"BOX:\s*(\d+)").unwrap(),
            subject_re: Regex::new(r"SUBJECT:\s*(\S+)").unwrap(),
            experiment_re: Regex::new(r"EXPERIMENT:\s*(\S+)").unwrap(),
            group_re: Regex::new(r"GROUP:\s*(\S+)").unwrap(),
            msn_re: Regex::new(r"MSN:\s*(\S+)").unwrap(),
            start_re: Regex::new(r"START:\s*([0-9/]+)\s+([0-9:]+)").unwrap(),
            end_re: Regex::new(r"END:\s*([0-9/]+)\s+([0-9:]+)").unwrap(),
        }
    }

    /// Scan one header line, filling any fields whose labels appear on it.
    ///
    /// Date and time tokens of START/END are concatenated into a single
    /// timestamp string. Tokens are stored verbatim, trailing underscore
    /// padding included.
    pub fn scan_line(&self, line: &str, record: &mut Record) {
        if let Some(caps) = self.box_re.captures(line) {
            record.box_number = caps[1].parse().ok();
        }
        if let Some(caps) = self.subject_re.captures(line) {
            record.subject = Some(caps[1].to_string());
        }
        if let Some(caps) = self.experiment_re.captures(line) {
            record.experiment = Some(caps[1].to_string());
        }
        if let Some(caps) = self.group_re.captures(line) {
            record.group = Some(caps[1].to_string());
        }
        if let Some(caps) = self.msn_re.captures(line) {
            record.msn = Some(caps[1].to_string());
        }
        if let Some(caps) = self.start_re.captures(line) {
            record.start = Some(format!("{} {}", &caps[1], &caps[2]));
        }
        if let Some(caps) = self.end_re.captures(line) {
            record.end = Some(format!("{} {}", &caps[1], &caps[2]));
        }
    }
}

impl Default for FieldScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_shared_header_line() {
        let scanner = FieldScanner::new();
        let mut record = Record::new();
        scanner.scan_line(
            "BOX:  1 SUBJECT:      E1_ EXPERIMENT: COCESC_RUNA GROUP:        2 MSN:    1102L",
            &mut record,
        );
        assert_eq!(record.box_number, Some(1));
        assert_eq!(record.subject.as_deref(), Some("E1_"));
        assert_eq!(record.experiment.as_deref(), Some("COCESC_RUNA"));
        assert_eq!(record.group.as_deref(), Some("2"));
        assert_eq!(record.msn.as_deref(), Some("1102L"));
    }

    #[test]
    fn test_scan_time_line() {
        let scanner = FieldScanner::new();
        let mut record = Record::new();
        scanner.scan_line("START: 01/31/09 11:23:37 END: 01/31/09 17:25:18", &mut record);
        assert_eq!(record.start.as_deref(), Some("01/31/09 11:23:37"));
        assert_eq!(record.end.as_deref(), Some("01/31/09 17:25:18"));
    }

    #[test]
    fn test_absent_labels_leave_fields_unset() {
        let scanner = FieldScanner::new();
        let mut record = Record::new();
        scanner.scan_line("BOX:  4 MSN: 1102L", &mut record);
        assert_eq!(record.box_number, Some(4));
        assert_eq!(record.msn.as_deref(), Some("1102L"));
        assert!(record.subject.is_none());
        assert!(record.experiment.is_none());
        assert!(record.start.is_none());
    }

    #[test]
    fn test_fields_are_order_insensitive() {
        let scanner = FieldScanner::new();
        let mut record = Record::new();
        scanner.scan_line("MSN: 1102L BOX: 2 SUBJECT: R12_", &mut record);
        assert_eq!(record.box_number, Some(2));
        assert_eq!(record.subject.as_deref(), Some("R12_"));
        assert_eq!(record.msn.as_deref(), Some("1102L"));
    }
}
