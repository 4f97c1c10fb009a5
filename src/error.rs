use std::{io, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

fn in_file(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" in file {p}"),
        None => String::new(),
    }
}

fn file_suffix(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" {p}"),
        None => String::new(),
    }
}

/// An enum for describing and handling the various errors encountered while
/// validating run inputs, loading side inputs, or streaming commits through
/// a changelog writer.
///
/// The `Display` forms of the per-source variants are exactly the lines the
/// orchestrator reports on the error channel.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Expected a version number")]
    MissingVersion,

    #[error("Invalid Version: {0}")]
    InvalidVersion(String),

    #[error("Failed to get {name} from file {path}\n{reason}")]
    ResourceLoad {
        name: &'static str,
        path: String,
        reason: String,
    },

    #[error("You must specify at least one line delimited json file")]
    NoInput,

    #[error("Failed to read file {path}\n{source}")]
    SourceRead { path: String, source: io::Error },

    #[error("Failed to split commits{}\n{reason}", in_file(.path))]
    LineParse {
        path: Option<String>,
        reason: String,
    },

    #[error("Failed to process file{}\n{reason}", file_suffix(.path))]
    Render {
        path: Option<String>,
        reason: String,
    },

    #[error("fatal I/O error with output stream")]
    Io(#[from] io::Error),

    #[error("failed to serialize commit record")]
    Json(#[from] serde_json::Error),

    #[error("failed to convert date/time to string format")]
    TimeStrFormat(#[from] time::error::Format),
}

impl Error {
    /// Wraps a writer failure so callers can catch it at the source
    /// boundary. Already-wrapped render errors pass through unchanged.
    pub(crate) fn into_render(self) -> Error {
        match self {
            e @ Error::Render { .. } => e,
            e => Error::Render {
                path: None,
                reason: e.to_string(),
            },
        }
    }

    /// Attributes a per-source error to the file it occurred in. Errors
    /// that already carry their origin are left alone.
    pub(crate) fn with_path(self, path: &str) -> Error {
        match self {
            Error::Io(source) => Error::SourceRead {
                path: path.to_owned(),
                source,
            },
            Error::LineParse { reason, .. } => Error::LineParse {
                path: Some(path.to_owned()),
                reason,
            },
            Error::Render { reason, .. } => Error::Render {
                path: Some(path.to_owned()),
                reason,
            },
            e => e,
        }
    }
}
