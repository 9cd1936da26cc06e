use std::fmt;

use thiserror::Error;

/// The sub-table a reader was working on when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Header,
    Responses,
    Processes,
    Objects,
    Locations,
    Messages,
    Connections,
    Vocabulary,
    ObjectPositions,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Header => "header",
            Table::Responses => "response table",
            Table::Processes => "process table",
            Table::Objects => "object descriptions",
            Table::Locations => "location descriptions",
            Table::Messages => "message table",
            Table::Connections => "connection table",
            Table::Vocabulary => "vocabulary",
            Table::ObjectPositions => "initial object positions",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("database signature not found at or after offset {search_start:#06x}")]
    SignatureNotFound { search_start: usize },

    #[error("malformed {table}: read outside the image at offset {offset:#06x}")]
    MalformedTable { table: Table, offset: usize },

    #[error("unsupported database version {version}")]
    UnsupportedVariant { version: u8 },

    #[error("invalid decoder options: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
