use crate::error::TextcatError;
use crate::filter::{dir_excluded, dir_included, extension_allowed};
use crate::options::ScanConfig;
use crate::output::ReportWriter;
use crate::sniff::{SNIFF_LEN, classify};
use crate::types::{EntryKind, ExtractionResult, FileEntry};
use chrono::Local;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// What the pipeline does with one walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Directory whose children must never be visited.
    Prune(&'static str),
    Descend,
    Skip(&'static str),
    /// File that passed the name-based checks; size, sniff and read follow.
    Candidate,
}

/// Name-based part of the pipeline, in order: symlink policy, directory
/// pruning, then the file checks that need no I/O.
fn decide(config: &ScanConfig, globs: Option<&GlobSet>, entry: &DirEntry) -> Action {
    if entry.path_is_symlink() && !config.follow_symlinks {
        return Action::Skip("symlink");
    }
    let kind = entry.file_type().map_or(EntryKind::Other, EntryKind::from);
    let glob_hit = entry.depth() > 0
        && globs.is_some_and(|set| set.is_match(relative(entry.path(), &config.root)));
    match kind {
        EntryKind::Directory => {
            if dir_excluded(&entry.file_name().to_string_lossy(), &config.exclude_dirs) {
                Action::Prune("excluded directory")
            } else if glob_hit {
                Action::Prune("directory matching exclude glob")
            } else {
                Action::Descend
            }
        }
        EntryKind::File | EntryKind::Symlink => {
            if glob_hit {
                Action::Skip("matches exclude glob")
            } else if !extension_allowed(
                entry.path(),
                &config.include_extensions,
                &config.exclude_extensions,
            ) {
                Action::Skip("extension filtered")
            } else {
                Action::Candidate
            }
        }
        EntryKind::Other => Action::Skip("not a regular file"),
    }
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, TextcatError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| TextcatError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| TextcatError::Pattern {
            pattern: patterns.join(","),
            message: e.to_string(),
        })
}

/// Depth-first walk with children sorted by file name. Excluded directories
/// are pruned inside the walker so their subtrees are never read.
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(config: &ScanConfig, globs: Option<GlobSet>) -> Self {
        let mut builder = WalkBuilder::new(&config.root);
        builder
            .standard_filters(false)
            .follow_links(config.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b));
        let cfg = config.clone();
        builder.filter_entry(move |entry| match decide(&cfg, globs.as_ref(), entry) {
            Action::Prune(reason) => {
                if cfg.verbose {
                    tracing::info!("Skipping {}: {}", reason, entry.path().display());
                }
                false
            }
            _ => true,
        });
        Self {
            inner: builder.build(),
        }
    }
}
impl Iterator for Walker {
    type Item = Result<DirEntry, ignore::Error>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Identifies the report file so a run never reads its own output.
#[derive(Debug)]
struct OutputGuard {
    name: OsString,
    canonical: PathBuf,
}
impl OutputGuard {
    fn resolve(output: &Path) -> Option<Self> {
        Some(Self {
            name: output.file_name()?.to_os_string(),
            canonical: fs::canonicalize(output).ok()?,
        })
    }
    fn matches(&self, path: &Path) -> bool {
        path.file_name() == Some(self.name.as_os_str())
            && fs::canonicalize(path).is_ok_and(|p| p == self.canonical)
    }
}

fn is_root_failure(err: &ignore::Error) -> bool {
    matches!(err, ignore::Error::WithDepth { depth: 0, .. })
}

/// Lazy stream of the files that pass every filter, in traversal order.
///
/// Per-entry problems (unreadable entries, oversized or binary files) are
/// skipped. The stream only yields an error when the root itself cannot be
/// walked, and ends right after it.
pub struct ScanStream {
    walker: Walker,
    config: ScanConfig,
    globs: Option<GlobSet>,
    output: Option<OutputGuard>,
    done: bool,
}
impl ScanStream {
    pub fn new(config: ScanConfig) -> Result<Self, TextcatError> {
        if config.root.as_os_str().is_empty() {
            return Err(TextcatError::InvalidPath("empty root directory".into()));
        }
        fs::metadata(&config.root).map_err(|e| TextcatError::io(&config.root, e))?;
        let globs = build_globset(&config.exclude_globs)?;
        let output = OutputGuard::resolve(&config.output);
        Ok(Self {
            walker: Walker::new(&config, globs.clone()),
            config,
            globs,
            output,
            done: false,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Re-resolves the output path once the report file exists on disk.
    fn guard_output(&mut self) {
        self.output = OutputGuard::resolve(&self.config.output);
    }

    /// Size gate, then a single open that classifies the first [`SNIFF_LEN`]
    /// bytes (the same check as [`looks_binary`](crate::sniff::looks_binary))
    /// and reads the rest only for text files.
    fn read_candidate(&self, entry: &DirEntry) -> Option<FileEntry> {
        let cfg = &self.config;
        let path = entry.path();
        if self.output.as_ref().is_some_and(|g| g.matches(path)) {
            if cfg.verbose {
                tracing::info!("Skipping report output: {}", path.display());
            }
            return None;
        }
        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                if cfg.verbose {
                    tracing::warn!("Cannot get file info for {}: {}", path.display(), e);
                }
                return None;
            }
        };
        if size > cfg.max_file_size {
            if cfg.verbose {
                tracing::info!("Skipping large file: {} ({} bytes)", path.display(), size);
            }
            return None;
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                if cfg.verbose {
                    tracing::warn!("Cannot read file {}: {}", path.display(), e);
                }
                return None;
            }
        };
        let mut reader = BufReader::new(file);
        let mut content = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        if let Err(e) = reader
            .by_ref()
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut content)
        {
            if cfg.verbose {
                tracing::warn!("Cannot read file {}: {}", path.display(), e);
            }
            return None;
        }
        if classify(&content, cfg.binary_detection) {
            if cfg.verbose {
                tracing::info!("Skipping binary file: {}", path.display());
            }
            return None;
        }
        if let Err(e) = reader.read_to_end(&mut content) {
            if cfg.verbose {
                tracing::warn!("Cannot read file {}: {}", path.display(), e);
            }
            return None;
        }
        Some(FileEntry {
            path: path.to_path_buf(),
            content,
            size,
        })
    }
}
impl Iterator for ScanStream {
    type Item = Result<FileEntry, TextcatError>;
    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) if is_root_failure(&err) => {
                    self.done = true;
                    return Some(Err(TextcatError::Walk(err.to_string())));
                }
                Err(err) => {
                    if self.config.verbose {
                        tracing::warn!("Error accessing entry: {}", err);
                    }
                    continue;
                }
            };
            match decide(&self.config, self.globs.as_ref(), &entry) {
                // Only the root reaches this point; the walker prunes the rest.
                Action::Prune(reason) => {
                    if self.config.verbose {
                        tracing::info!("Skipping {}: {}", reason, entry.path().display());
                    }
                    self.done = true;
                }
                Action::Descend => {
                    let include = &self.config.include_dirs;
                    if !include.is_empty()
                        && !dir_included(&entry.file_name().to_string_lossy(), include)
                    {
                        tracing::debug!(
                            "{} not in include list, still descending",
                            entry.path().display()
                        );
                    }
                }
                Action::Skip(reason) => {
                    tracing::trace!("Skipping {} ({})", entry.path().display(), reason);
                    // The walker descends into the root even when it is a
                    // symlink; a skipped root ends the walk.
                    if entry.depth() == 0 {
                        self.done = true;
                    }
                }
                Action::Candidate => {
                    if let Some(file) = self.read_candidate(&entry) {
                        return Some(Ok(file));
                    }
                }
            }
        }
        None
    }
}

/// Runs a full extraction into `config.output`.
///
/// The output file is created only after the root and glob patterns have been
/// validated, so a missing root fails without leaving an empty report behind.
/// A fatal error part-way through leaves the partial report on disk without a
/// footer.
pub fn extract(config: &ScanConfig) -> Result<ExtractionResult, TextcatError> {
    let mut stream = ScanStream::new(config.clone())?;
    let writer = ReportWriter::create(&config.output)?;
    stream.guard_output();
    drive(stream, writer)
}

/// Same as [`extract`] but writes the report into an arbitrary sink.
/// `config.output` is only used to label errors and to keep the file out of
/// its own report.
pub fn extract_to<W: Write>(
    config: &ScanConfig,
    sink: W,
) -> Result<ExtractionResult, TextcatError> {
    let stream = ScanStream::new(config.clone())?;
    let writer = ReportWriter::new(sink, &config.output);
    drive(stream, writer)
}

fn drive<W: Write>(
    stream: ScanStream,
    mut writer: ReportWriter<W>,
) -> Result<ExtractionResult, TextcatError> {
    let config = stream.config().clone();
    tracing::debug!("Starting extraction from {}", config.root.display());
    let started = Local::now();
    let mut result = ExtractionResult {
        output: config.output.clone(),
        files_processed: 0,
        bytes_written: 0,
        started,
        completed: started,
    };
    writer.write_header(&config.root, &result.started)?;
    for file in stream {
        let file = file?;
        writer.write_entry(&file.path, &file.content)?;
        result.files_processed += 1;
        result.bytes_written += file.content.len() as u64;
        if config.verbose {
            tracing::info!("Processed: {}", file.path.display());
        }
    }
    result.completed = Local::now();
    writer.write_footer(result.files_processed, &result.completed)?;
    writer.finish()?;
    tracing::debug!(
        "Extraction finished: {} files into {}",
        result.files_processed,
        result.output.display()
    );
    Ok(result)
}
