//! The file operations behind each tool.
//!
//! Each function takes the [`Root`] by reference, performs one filesystem
//! call and returns the reply text. Failures come back as [`Error`]; the tool
//! layer turns them into the textual error convention.

use crate::error::Error;
use crate::info::FileInfo;
use crate::validate::Root;
use glob::{MatchOptions, Pattern};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Reply for [`list_files`] when the root holds no regular files.
pub const NO_FILES: &str = "No files found";

/// Reply for [`search_files`] when nothing matches.
pub const NO_MATCHES: &str = "No matches found";

/// Which lines of a file [`read_text_file`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineWindow {
    #[default]
    All,
    /// The first `n` lines.
    Head(i64),
    /// The last `n` lines, in file order.
    Tail(i64),
}

impl LineWindow {
    /// Build a window from optional head/tail counts. `head` wins when both
    /// are given.
    pub fn new(head: Option<i64>, tail: Option<i64>) -> Self {
        match (head, tail) {
            (Some(n), _) => LineWindow::Head(n),
            (None, Some(n)) => LineWindow::Tail(n),
            (None, None) => LineWindow::All,
        }
    }

    /// Select lines from `text`, split on `\n` and rejoined with `\n`.
    pub fn apply(self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let kept = match self {
            LineWindow::All => &lines[..],
            LineWindow::Head(n) => &lines[..clamp(n, lines.len())],
            LineWindow::Tail(n) => &lines[lines.len() - clamp(n, lines.len())..],
        };
        kept.join("\n")
    }
}

fn clamp(n: i64, len: usize) -> usize {
    usize::try_from(n).unwrap_or(0).min(len)
}

/// Read a text file from the root, optionally keeping only its head or tail.
pub async fn read_text_file(root: &Root, filename: &str, window: LineWindow) -> Result<String, Error> {
    let path = root.resolve(filename)?;
    if !is_file(&path).await {
        return Err(Error::NotFound(filename.to_owned()));
    }
    let bytes = tokio::fs::read(&path).await?;
    let text = decode_text(&bytes);
    tracing::debug!(path = %path.display(), ?window, bytes = text.len(), "read file");
    Ok(window.apply(&text))
}

/// Decode file bytes as UTF-8, dropping a leading byte order mark and
/// replacing invalid sequences with U+FFFD.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Create or overwrite a file in the root.
pub async fn write_file(root: &Root, filename: &str, content: &str) -> Result<String, Error> {
    let path = root.resolve(filename)?;
    tokio::fs::write(&path, content).await?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(format!("Successfully wrote to {filename}"))
}

/// List the regular files directly inside the root.
pub async fn list_files(root: &Root) -> Result<String, Error> {
    let mut names = Vec::new();
    let mut read_dir = tokio::fs::read_dir(root.path()).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        if is_file(&entry.path()).await {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    tracing::debug!(count = names.len(), "listed files");
    if names.is_empty() {
        return Ok(NO_FILES.to_owned());
    }
    Ok(names.join("\n"))
}

/// Search the root recursively for files whose name matches a glob.
///
/// A pattern without separators is matched against each file name; one with
/// separators is matched against the path relative to the root, so `**`
/// crosses directories.
///
/// The tree is walked here instead of through `glob::glob` so that directory
/// symlinks are never descended into: a link back up the tree cannot loop,
/// and each file is reported once. File symlinks are matched like files.
pub async fn search_files(root: &Root, pattern: &str) -> Result<String, Error> {
    let normalized = pattern.replace(['/', '\\'], "/");
    let by_path = normalized.contains('/');
    let matcher = Pattern::new(&normalized)?;
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };

    let mut names = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root.path().to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
                continue;
            }
            if !is_file(&path).await {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let matched = if by_path {
                let relative = relative_slash_path(root.path(), &path);
                matcher.matches_with(&relative, options)
            } else {
                matcher.matches_with(&name, options)
            };
            if matched {
                names.push(name);
            }
        }
    }
    tracing::debug!(pattern, count = names.len(), "searched files");
    if names.is_empty() {
        return Ok(NO_MATCHES.to_owned());
    }
    Ok(names.join("\n"))
}

/// Describe a file or directory in the root.
pub async fn get_file_info(root: &Root, name: &str) -> Result<String, Error> {
    let path = root.resolve(name)?;
    let meta = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() || meta.is_dir() => meta,
        Ok(_) => return Err(Error::NotFound(name.to_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(name.to_owned()));
        }
        Err(e) => return Err(e.into()),
    };
    let is_symlink = tokio::fs::symlink_metadata(&path)
        .await
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    Ok(FileInfo::new(&path, &meta, is_symlink).to_string())
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        relative.into_owned()
    } else {
        relative.replace(MAIN_SEPARATOR, "/")
    }
}
