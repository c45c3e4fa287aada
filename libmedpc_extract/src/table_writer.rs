use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::config::WriteMode;
use super::error::TableWriterError;
use super::record::Record;

/// Marker written for metadata fields that could not be scanned
const ABSENT: &str = "NA";

/// Serializes finished Records as rows of a tab-separated table.
///
/// One row per record: the seven metadata columns followed by a single
/// column packing every variable as `<letter>=<v>,<v>,...` joined with `;`.
/// An empty variable keeps its bare `<letter>=` entry so it is not
/// indistinguishable from an omitted one. In Append mode an existing
/// destination is preserved and extended.
#[derive(Debug)]
pub struct TableWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: u64,
}

impl TableWriter {
    /// Open the destination according to the requested mode
    pub fn new(path: &Path, mode: WriteMode) -> Result<Self, TableWriterError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(TableWriterError::BadFilePath(path.to_path_buf()));
            }
        }
        let handle = match mode {
            WriteMode::Write => File::create(path)?,
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
        };
        Ok(Self {
            writer: BufWriter::new(handle),
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    /// Serialize one record as a single row
    pub fn write_record(&mut self, record: &Record) -> Result<(), TableWriterError> {
        let box_field = match record.box_number {
            Some(number) => number.to_string(),
            None => String::from(ABSENT),
        };
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            box_field,
            text_field(&record.subject),
            text_field(&record.experiment),
            text_field(&record.group),
            text_field(&record.msn),
            text_field(&record.start),
            text_field(&record.end),
            variables_field(record),
        )?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush buffered rows and consume the writer
    pub fn close(mut self) -> Result<(), TableWriterError> {
        self.writer.flush()?;
        log::info!(
            "{} rows written to {}",
            self.rows_written,
            self.path.to_string_lossy()
        );
        Ok(())
    }
}

fn text_field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(ABSENT)
}

/// Pack the variables into one column, bins flattened in order
fn variables_field(record: &Record) -> String {
    let mut sections = Vec::new();
    for block in &record.variables {
        let mut values = Vec::new();
        for bin in &block.bins {
            for value in &bin.values {
                values.push(value.to_string());
            }
        }
        sections.push(format!("{}={}", block.letter, values.join(",")));
    }
    sections.join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Bin, VariableBlock};

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.box_number = Some(1);
        record.subject = Some(String::from("E1_"));
        record.experiment = Some(String::from("COCESC_RUNA"));
        record.group = Some(String::from("2"));
        record.msn = Some(String::from("1102L"));
        record.start = Some(String::from("01/31/09 11:23:37"));
        record.end = Some(String::from("01/31/09 17:25:18"));
        let mut block = VariableBlock::new('D');
        block.bins.push(Bin {
            index: 0,
            values: vec![536.3, 771.1],
        });
        block.bins.push(Bin {
            index: 5,
            values: vec![2486.3],
        });
        record.variables.push(block);
        record.variables.push(VariableBlock::new('E'));
        record
    }

    #[test]
    fn test_row_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut writer = TableWriter::new(&path, WriteMode::Write).unwrap();
        writer.write_record(&sample_record()).unwrap();
        assert_eq!(writer.rows_written(), 1);
        writer.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "1\tE1_\tCOCESC_RUNA\t2\t1102L\t01/31/09 11:23:37\t01/31/09 17:25:18\tD=536.3,771.1,2486.3;E=\n"
        );
    }

    #[test]
    fn test_absent_fields_render_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut writer = TableWriter::new(&path, WriteMode::Write).unwrap();
        writer.write_record(&Record::new()).unwrap();
        writer.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "NA\tNA\tNA\tNA\tNA\tNA\tNA\t\n");
    }

    #[test]
    fn test_write_mode_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        std::fs::write(&path, "old contents\n").unwrap();
        let mut writer = TableWriter::new(&path, WriteMode::Write).unwrap();
        writer.write_record(&sample_record()).unwrap();
        writer.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("old contents"));
    }

    #[test]
    fn test_append_mode_preserves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        std::fs::write(&path, "old contents\n").unwrap();
        let mut writer = TableWriter::new(&path, WriteMode::Append).unwrap();
        writer.write_record(&sample_record()).unwrap();
        writer.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("old contents\n"));
        assert!(contents.lines().count() == 2);
    }

    #[test]
    fn test_missing_parent_directory_is_bad_path() {
        let result = TableWriter::new(Path::new("/no/such/dir/out.tsv"), WriteMode::Write);
        assert!(matches!(result, Err(TableWriterError::BadFilePath(_))));
    }
}
