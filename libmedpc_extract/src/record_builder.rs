use std::path::Path;

use regex::Regex;

use super::anomaly::{Anomaly, AnomalyTally};
use super::block_decoder::BlockDecoder;
use super::data_file::DataFile;
use super::error::RecordBuilderError;
use super::record::{parse_session_timestamp, Record};
use super::scanner::FieldScanner;

/// The four phases of walking one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    Seeking,
    HeaderParsing,
    VariableParsing,
    Emitting,
}

/// RecordBuilder walks a data file and composes complete session Records.
///
/// The builder pulls lines from the DataFile, hands header lines to the
/// FieldScanner and variable sections to the BlockDecoder, and finishes the
/// record in progress when the next `File:` marker or the end of input is
/// reached. A marker that finishes one record is left unconsumed so the next
/// pull starts the following record from it.
#[derive(Debug)]
pub struct RecordBuilder {
    file: DataFile,
    scanner: FieldScanner,
    decoder: BlockDecoder,
    state: BuilderState,
    current: Option<Record>,
    tally: AnomalyTally,
    marker_re: Regex,
    label_re: Regex,
}

impl RecordBuilder {
    /// Open the data file at path and ready the builder
    pub fn new(path: &Path) -> Result<Self, RecordBuilderError> {
        Ok(Self {
            file: DataFile::new(path)?,
            scanner: FieldScanner::new(),
            decoder: BlockDecoder::new(),
            state: BuilderState::Seeking,
            current: None,
            tally: AnomalyTally::default(),
            marker_re: Regex::new(r"^File:\s*(.*)$").unwrap(),
            label_re: Regex::new(r"^([A-Z]):(.*)$").unwrap(),
        })
    }

    /// Total size of the underlying data file in bytes
    pub fn size_bytes(&self) -> u64 {
        self.file.size_bytes()
    }

    /// Anomaly totals accumulated so far
    pub fn tally(&self) -> &AnomalyTally {
        &self.tally
    }

    /// Assemble the next complete Record.
    ///
    /// Returns `Ok(None)` once the input is exhausted and the final record
    /// has been emitted. A record degraded by missing header fields is still
    /// emitted; nothing in here is fatal to the run besides losing the file.
    pub fn next_record(&mut self) -> Result<Option<Record>, RecordBuilderError> {
        loop {
            match self.state {
                BuilderState::Seeking => match self.file.next_line()? {
                    Some(line) => {
                        if let Some(caps) = self.marker_re.captures(&line) {
                            log::debug!("Record marker for {}", caps[1].trim());
                            self.current = Some(Record::new());
                            self.state = BuilderState::HeaderParsing;
                        }
                        // anything else before a marker is noise
                    }
                    None => return Ok(None),
                },
                BuilderState::HeaderParsing => self.parse_header_line()?,
                BuilderState::VariableParsing => self.parse_variable_section()?,
                BuilderState::Emitting => {
                    self.state = BuilderState::Seeking;
                    if let Some(record) = self.current.take() {
                        return Ok(Some(self.finalize(record)));
                    }
                }
            }
        }
    }

    /// Consume header lines until the first variable label, a new record
    /// marker, or the end of input appears.
    fn parse_header_line(&mut self) -> Result<(), RecordBuilderError> {
        let line = match self.file.peek_line()? {
            Some(line) => line.to_string(),
            None => {
                self.state = BuilderState::Emitting;
                return Ok(());
            }
        };
        if self.label_re.is_match(&line) {
            self.state = BuilderState::VariableParsing;
        } else if self.marker_re.is_match(&line) {
            // a new record began before any variable section
            self.state = BuilderState::Emitting;
        } else {
            self.file.next_line()?;
            if let Some(record) = self.current.as_mut() {
                self.scanner.scan_line(&line, record);
            }
        }
        Ok(())
    }

    /// Dispatch one peeked line while inside the variable sections.
    fn parse_variable_section(&mut self) -> Result<(), RecordBuilderError> {
        let line = match self.file.peek_line()? {
            Some(line) => line.to_string(),
            None => {
                self.state = BuilderState::Emitting;
                return Ok(());
            }
        };
        if self.marker_re.is_match(&line) {
            self.state = BuilderState::Emitting;
        } else if let Some(caps) = self.label_re.captures(&line) {
            let letter = caps[1].chars().next().unwrap();
            let inline = caps[2].to_string();
            self.file.next_line()?;
            let block = self
                .decoder
                .decode_block(letter, &inline, &mut self.file, &mut self.tally)?;
            if let Some(record) = self.current.as_mut() {
                record.variables.push(block);
            }
        } else {
            // blank separator or unrecognized line between sections
            self.file.next_line()?;
        }
        Ok(())
    }

    /// Report missing required fields and sanity-check the session times
    fn finalize(&mut self, record: Record) -> Record {
        if record.box_number.is_none() {
            self.tally.report(Anomaly::MissingField("BOX"));
        }
        if record.subject.is_none() {
            self.tally.report(Anomaly::MissingField("SUBJECT"));
        }
        if record.experiment.is_none() {
            self.tally.report(Anomaly::MissingField("EXPERIMENT"));
        }
        if record.group.is_none() {
            self.tally.report(Anomaly::MissingField("GROUP"));
        }
        if record.msn.is_none() {
            self.tally.report(Anomaly::MissingField("MSN"));
        }
        if record.start.is_none() {
            self.tally.report(Anomaly::MissingField("START"));
        }
        if record.end.is_none() {
            self.tally.report(Anomaly::MissingField("END"));
        }
        if let (Some(start), Some(end)) = (record.start.as_deref(), record.end.as_deref()) {
            if let (Some(start), Some(end)) =
                (parse_session_timestamp(start), parse_session_timestamp(end))
            {
                if start > end {
                    log::warn!("Session start {start:?} is after its end {end:?}");
                }
            }
        }
        record
    }
}
