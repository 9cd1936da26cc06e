use serde::Deserialize;

use crate::database::core::DEFAULT_SEARCH_START;
use crate::database::rules::DatabaseVersion;
use crate::error::Result;

/// Decoder settings, loadable from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Lowest offset scanned for the database signature
    pub signature_search_start: usize,
    /// Database version that produced the image; selects the action argument table
    pub database_version: u8,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            signature_search_start: DEFAULT_SEARCH_START,
            database_version: 0,
        }
    }
}

impl DecoderOptions {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn version(&self) -> Result<DatabaseVersion> {
        DatabaseVersion::from_number(self.database_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_empty_file_gives_defaults() {
        let options = DecoderOptions::from_toml_str("").unwrap();
        assert_eq!(options, DecoderOptions::default());
        assert_eq!(options.signature_search_start, 16384);
    }

    #[test]
    fn test_partial_override() {
        let options = DecoderOptions::from_toml_str("signature_search_start = 23755\n").unwrap();
        assert_eq!(options.signature_search_start, 23755);
        assert_eq!(options.version().unwrap(), DatabaseVersion::V0);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let options = DecoderOptions::from_toml_str("database_version = 3").unwrap();
        assert!(matches!(
            options.version(),
            Err(DecodeError::UnsupportedVariant { version: 3 })
        ));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            DecoderOptions::from_toml_str("signature_search_start = \"high\""),
            Err(DecodeError::Config(_))
        ));
    }
}
