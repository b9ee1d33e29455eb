//! Name confinement for the flat filesystem server.
//!
//! Every client-supplied name passes through [`Root::resolve`], which flattens
//! it with [`sanitize`] to a single segment and joins it onto the root. No
//! operation ever touches a nested path built from client input.

use crate::error::{Error, RootError};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Reduce a client-supplied name to its final path segment.
///
/// Both `/` and `\` count as separators. If the final segment is empty
/// (empty input, or input ending in a separator) the input is returned
/// unchanged; [`Root::resolve`] rejects such names.
pub fn sanitize(filename: &str) -> String {
    let normalized: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    match normalized.rsplit(MAIN_SEPARATOR).next() {
        Some(base) if !base.is_empty() => base.to_owned(),
        _ => filename.to_owned(),
    }
}

/// The directory every operation is confined to.
///
/// Canonical and absolute; built once at startup and never changed.
#[derive(Debug, Clone)]
pub struct Root(PathBuf);

impl Root {
    /// Canonicalize `path` and check that it names a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RootError> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|source| RootError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(RootError::NotADirectory(canonical));
        }
        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Map a client-supplied name to a direct child of the root.
    ///
    /// Names that still carry a separator after sanitizing, or that are
    /// `.`/`..`, are refused before any filesystem call.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, Error> {
        let name = sanitize(filename);
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            tracing::warn!(filename, "refusing name outside root");
            return Err(Error::OutsideRoot(filename.to_owned()));
        }
        let path = self.0.join(&name);
        if path.parent() != Some(self.0.as_path()) {
            tracing::warn!(filename, "refusing name outside root");
            return Err(Error::OutsideRoot(filename.to_owned()));
        }
        tracing::debug!(filename, sanitized = %name, "resolved name");
        Ok(path)
    }
}
