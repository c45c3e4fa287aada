use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::DataFileError;

/// Line-by-line view of a MED-PC data file with one line of lookahead.
///
/// Block boundaries in the format are only visible by inspecting the next
/// line, so the reader exposes `peek_line` alongside `next_line`. A peeked
/// line is held until consumed; no line is ever returned twice by
/// `next_line`.
#[derive(Debug)]
pub struct DataFile {
    reader: BufReader<File>,
    peeked: Option<String>,
    size_bytes: u64,
    bytes_read: u64,
}

impl DataFile {
    /// Open a data file for reading
    pub fn new(path: &Path) -> Result<Self, DataFileError> {
        if !path.exists() {
            return Err(DataFileError::BadFilePath(path.to_path_buf()));
        }
        let handle = File::open(path)?;
        let size_bytes = handle.metadata()?.len();
        Ok(Self {
            reader: BufReader::new(handle),
            peeked: None,
            size_bytes,
            bytes_read: 0,
        })
    }

    /// The next physical line, or None once the input is exhausted.
    ///
    /// The trailing line break is stripped; leading whitespace is preserved
    /// because it distinguishes bin rows from labels.
    pub fn next_line(&mut self) -> Result<Option<String>, DataFileError> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.read_line()
    }

    /// The upcoming line without consuming it.
    ///
    /// Repeated calls return the same line until `next_line` is invoked.
    pub fn peek_line(&mut self) -> Result<Option<&str>, DataFileError> {
        if self.peeked.is_none() {
            self.peeked = self.read_line()?;
        }
        Ok(self.peeked.as_deref())
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn read_line(&mut self) -> Result<Option<String>, DataFileError> {
        let mut buffer = String::new();
        let count = self.reader.read_line(&mut buffer)?;
        if count == 0 {
            return Ok(None);
        }
        self.bytes_read += count as u64;
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        Ok(Some(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn data_file(contents: &str) -> (tempfile::NamedTempFile, DataFile) {
        let mut file = tempfile::NamedTempFile::new().expect("temp data file");
        file.write_all(contents.as_bytes()).unwrap();
        let reader = DataFile::new(file.path()).expect("open data file");
        (file, reader)
    }

    #[test]
    fn test_missing_file_is_bad_path() {
        let result = DataFile::new(Path::new("/no/such/data.txt"));
        assert!(matches!(result, Err(DataFileError::BadFilePath(_))));
    }

    #[test]
    fn test_peek_is_stable_until_consumed() {
        let (_guard, mut reader) = data_file("first\nsecond\n");
        assert_eq!(reader.peek_line().unwrap(), Some("first"));
        assert_eq!(reader.peek_line().unwrap(), Some("first"));
        assert_eq!(reader.next_line().unwrap(), Some(String::from("first")));
        assert_eq!(reader.peek_line().unwrap(), Some("second"));
        assert_eq!(reader.next_line().unwrap(), Some(String::from("second")));
        assert_eq!(reader.peek_line().unwrap(), None);
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_line_breaks_stripped_indentation_kept() {
        let (_guard, mut reader) = data_file("   0: 536.3000\r\nD:\n");
        assert_eq!(reader.next_line().unwrap(), Some(String::from("   0: 536.3000")));
        assert_eq!(reader.next_line().unwrap(), Some(String::from("D:")));
    }

    #[test]
    fn test_last_line_without_newline() {
        let (_guard, mut reader) = data_file("only line");
        assert_eq!(reader.next_line().unwrap(), Some(String::from("only line")));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_byte_accounting() {
        let (_guard, mut reader) = data_file("abc\ndef\n");
        assert_eq!(reader.size_bytes(), 8);
        reader.next_line().unwrap();
        assert_eq!(reader.bytes_read(), 4);
        // a peeked line is already read from the underlying file
        reader.peek_line().unwrap();
        assert_eq!(reader.bytes_read(), 8);
    }
}
