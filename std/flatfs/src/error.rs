//! Error types for the flat filesystem server.
//!
//! Operations return [`Error`]; the tool layer renders it into the
//! single-line text reply through [`Op::report`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening the root directory at startup.
#[derive(Error, Debug)]
pub enum RootError {
    /// The root path does not exist or cannot be resolved.
    #[error("root directory {path} cannot be resolved: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The root path exists but is not a directory.
    #[error("root path {0} is not a directory")]
    NotADirectory(PathBuf),
}

/// Errors raised by a single file operation.
#[derive(Error, Debug)]
pub enum Error {
    /// No file (or directory, where allowed) exists under the given name.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The name does not resolve to a direct child of the root.
    #[error("{0} does not resolve to a name inside the root directory (not found)")]
    OutsideRoot(String),
    /// The search pattern is not a valid glob.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// An I/O error from the underlying filesystem call.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The operations exposed as tools, used to phrase error replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    ReadFile,
    WriteFile,
    ListFiles,
    SearchFiles,
    GetFileInfo,
}

impl Op {
    fn action(self) -> &'static str {
        match self {
            Op::ReadFile => "reading file",
            Op::WriteFile => "writing file",
            Op::ListFiles => "listing files",
            Op::SearchFiles => "searching files",
            Op::GetFileInfo => "getting file info",
        }
    }

    /// Render an operation failure as `Error <verb>ing <noun>: <message>`.
    ///
    /// The reply is always a single line.
    pub fn report(self, err: &Error) -> String {
        let message = err.to_string().replace(['\r', '\n'], " ");
        tracing::warn!(op = ?self, error = %message, "operation failed");
        format!("Error {}: {}", self.action(), message)
    }
}
