//! Streaming report serialization.
//!
//! The report is written strictly in order: one header, one block per
//! accepted file, one footer. Nothing is kept in memory beyond the
//! [`BufWriter`] buffer.

use crate::TextcatError;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 50;

/// Formats a timestamp the way it appears in the report.
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Buffered writer for the extraction report.
///
/// Dropping the writer flushes the buffer, so a run aborted by a fatal error
/// still leaves everything written so far on disk (without a footer). Call
/// [`finish`](Self::finish) to observe flush errors.
pub struct ReportWriter<W: Write> {
    sink: BufWriter<W>,
    dest: PathBuf,
}

impl ReportWriter<File> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TextcatError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TextcatError::output(path, e))?;
        Ok(Self {
            sink: BufWriter::new(file),
            dest: path.to_path_buf(),
        })
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wraps an arbitrary sink. `dest` only labels errors.
    pub fn new(sink: W, dest: impl Into<PathBuf>) -> Self {
        Self {
            sink: BufWriter::new(sink),
            dest: dest.into(),
        }
    }

    pub fn write_header(
        &mut self,
        root: &Path,
        generated: &DateTime<Local>,
    ) -> Result<(), TextcatError> {
        let res = write!(
            self.sink,
            "File Content Extraction Report\nGenerated: {}\nSource Directory: {}\n{}\n\n",
            format_timestamp(generated),
            root.display(),
            "=".repeat(RULE_WIDTH)
        );
        self.check(res)
    }

    /// Path line, blank line, the raw bytes, blank line, separator rule.
    pub fn write_entry(&mut self, path: &Path, content: &[u8]) -> Result<(), TextcatError> {
        let res = (|| -> io::Result<()> {
            write!(self.sink, "{}\n\n", path.display())?;
            self.sink.write_all(content)?;
            write!(self.sink, "\n\n{}\n\n", "-".repeat(RULE_WIDTH))
        })();
        self.check(res)
    }

    pub fn write_footer(
        &mut self,
        files: usize,
        completed: &DateTime<Local>,
    ) -> Result<(), TextcatError> {
        let res = write!(
            self.sink,
            "\nExtraction Summary\nFiles processed: {}\nCompleted: {}\n",
            files,
            format_timestamp(completed)
        );
        self.check(res)
    }

    /// Flushes the buffer and hands back the underlying sink.
    pub fn finish(self) -> Result<W, TextcatError> {
        let dest = self.dest;
        self.sink
            .into_inner()
            .map_err(|e| TextcatError::io(dest, e.into_error()))
    }

    fn check(&self, res: io::Result<()>) -> Result<(), TextcatError> {
        res.map_err(|e| TextcatError::io(&self.dest, e))
    }
}
