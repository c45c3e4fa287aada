use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("Could not open DataFile because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("DataFile failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum TableWriterError {
    #[error("Could not open output table because the parent of {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("TableWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RecordBuilderError {
    #[error("RecordBuilder failed due to DataFile error: {0}")]
    FileError(#[from] DataFileError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to DataFile error: {0}")]
    FileError(#[from] DataFileError),
    #[error("Processor failed due to RecordBuilder error: {0}")]
    BuilderError(#[from] RecordBuilderError),
    #[error("Processor failed due to TableWriter error: {0}")]
    WriterError(#[from] TableWriterError),
    #[error("Processor failed due to configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
