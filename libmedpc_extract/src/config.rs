use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Destination handling for the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate or create the destination
    Write,
    /// Preserve an existing destination and extend it
    Append,
}

/// Structure representing the extraction configuration. Contains pathing and the output mode
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub mode: WriteMode,
}

impl Default for Config {
    /// Generate a new Config object. All paths will be empty/invalid
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("None"),
            output_path: PathBuf::from("None"),
            mode: WriteMode::Write,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Check that the input data file exists
    pub fn does_data_file_exist(&self) -> bool {
        self.data_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_config() {
        let yaml = "data_path: /data/session.txt\noutput_path: /data/session.tsv\nmode: append\n";
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::read_config_file(file.path()).expect("config should parse");
        assert_eq!(config.data_path, PathBuf::from("/data/session.txt"));
        assert_eq!(config.output_path, PathBuf::from("/data/session.tsv"));
        assert_eq!(config.mode, WriteMode::Append);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::read_config_file(Path::new("/no/such/config.yml"));
        assert!(matches!(result, Err(ConfigError::BadFilePath(_))));
    }

    #[test]
    fn test_default_round_trips() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.mode, WriteMode::Write);
        assert_eq!(back.data_path, PathBuf::from("None"));
    }
}
