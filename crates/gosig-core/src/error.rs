use std::path::PathBuf;

use thiserror::Error;

use crate::types::Position;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Root unreadable: {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File unreadable: {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {position}: {message}")]
    ParseFailed { position: Position, message: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
