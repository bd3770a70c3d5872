//! # Textcat
//!
//! `textcat` walks a directory tree, keeps the text files that pass a set of
//! filters (extension, directory name, size, binary sniff, symlink policy)
//! and concatenates their paths and raw contents into a single report file.
//!
//! The walk is lazy and single-threaded: each accepted file is read, written
//! to a buffered report and dropped before the next entry is visited. Use
//! [`extract`] for a full run into a file, [`extract_to`] for any
//! [`std::io::Write`] sink, or [`ScanStream`] to consume accepted files
//! directly.
//!
//! # Example
//!
//! ```no_run
//! use textcat::{ScanBuilder, extract};
//!
//! let config = ScanBuilder::new("./src")
//!     .output("context.txt")
//!     .include_extensions([".rs", ".toml"])
//!     .exclude_dirs(["target", ".git"])
//!     .max_file_size(1024 * 1024)
//!     .build();
//!
//! let summary = extract(&config).expect("extraction failed");
//! println!("{} files written to {}", summary.files_processed, summary.output.display());
//! ```

mod engine;
mod error;
pub mod filter;
mod options;
pub mod output;
pub mod sniff;
mod types;

pub use engine::{ScanStream, extract, extract_to};
pub use error::TextcatError;
pub use options::{
    BinaryDetection, DEFAULT_MAX_FILE_SIZE, ScanBuilder, ScanConfig, default_output_path,
    split_list,
};
pub use types::{EntryKind, ExtractionResult, FileEntry};
