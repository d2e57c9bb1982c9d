use std::io;
use std::path::PathBuf;

/// Errors that can occur while generating bundle rules
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Cannot read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{} is not inside the repository {}", path.display(), repo_root.display())]
    OutsideRepository { path: PathBuf, repo_root: PathBuf },
}

/// Result type alias for protolake operations
pub type Result<T> = std::result::Result<T, Error>;
