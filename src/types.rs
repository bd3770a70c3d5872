use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::FileType;
use std::path::PathBuf;

/// Type tag of a walked filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}
impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A file that passed every filter, with its content read verbatim.
#[derive(Debug)]
pub struct FileEntry {
    /// Path as produced by the walk (the root joined with the relative path).
    pub path: PathBuf,
    /// Raw bytes, no decoding applied.
    pub content: Vec<u8>,
    /// Size reported by the file's metadata at selection time.
    pub size: u64,
}

/// Summary of a finished extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub output: PathBuf,
    pub files_processed: usize,
    pub bytes_written: u64,
    pub started: DateTime<Local>,
    pub completed: DateTime<Local>,
}
