//! Text rendering for `get_file_info`.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Attribute flags reported for an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub read_only: bool,
    pub hidden: bool,
    pub directory: bool,
    pub symlink: bool,
}

impl Attributes {
    fn from_metadata(path: &Path, meta: &Metadata, is_symlink: bool) -> Self {
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        Self {
            read_only: meta.permissions().readonly(),
            hidden,
            directory: meta.is_dir(),
            symlink: is_symlink,
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.read_only, "ReadOnly"),
            (self.hidden, "Hidden"),
            (self.directory, "Directory"),
            (self.symlink, "ReparsePoint"),
        ];
        let set: Vec<&str> = flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            f.write_str("Normal")
        } else {
            f.write_str(&set.join(", "))
        }
    }
}

/// Metadata of a single entry, rendered one `Field: value` per line.
#[derive(Debug)]
pub struct FileInfo {
    pub name: String,
    pub full_name: PathBuf,
    pub length: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub attributes: Attributes,
    pub extension: String,
    pub directory_name: Option<PathBuf>,
}

impl FileInfo {
    pub fn new(path: &Path, meta: &Metadata, is_symlink: bool) -> Self {
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            full_name: path.to_path_buf(),
            length: meta.len(),
            created: timestamp(meta.created()),
            modified: timestamp(meta.modified()),
            accessed: timestamp(meta.accessed()),
            attributes: Attributes::from_metadata(path, meta, is_symlink),
            extension: extension(path),
            directory_name: path.parent().map(Path::to_path_buf),
        }
    }
}

/// Everything from the last `.` of the file name, so `.env` has extension
/// `.env`. A trailing `.` yields no extension.
fn extension(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => name[dot..].to_owned(),
        _ => String::new(),
    }
}

/// Times outside chrono's range come back as `None`.
fn timestamp(time: io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    let time = time.ok()?;
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            DateTime::from_timestamp(i64::try_from(after.as_secs()).ok()?, after.subsec_nanos())
        }
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0),
                nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
            }
        }
    }
}

struct Time<'a>(&'a Option<DateTime<Utc>>);

impl fmt::Display for Time<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("unavailable"),
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "FullName: {}", self.full_name.display())?;
        writeln!(f, "Length: {}", self.length)?;
        writeln!(f, "CreationTime: {}", Time(&self.created))?;
        writeln!(f, "LastWriteTime: {}", Time(&self.modified))?;
        writeln!(f, "LastAccessTime: {}", Time(&self.accessed))?;
        writeln!(f, "Attributes: {}", self.attributes)?;
        writeln!(f, "Extension: {}", self.extension)?;
        match &self.directory_name {
            Some(dir) => write!(f, "DirectoryName: {}", dir.display()),
            None => write!(f, "DirectoryName: "),
        }
    }
}
