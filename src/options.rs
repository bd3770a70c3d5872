use crate::error::TextcatError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Files larger than this many bytes are skipped unless configured otherwise.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryDetection {
    /// A NUL byte anywhere in the first 512 bytes marks the file as binary.
    #[default]
    Simple,
    /// `content_inspector` over the same prefix; also understands UTF-16/32 BOMs
    /// and NUL-free binary signatures.
    Accurate,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub include_extensions: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub include_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_globs: Vec<String>,
    pub max_file_size: u64,
    pub follow_symlinks: bool,
    pub binary_detection: BinaryDetection,
    pub verbose: bool,
}
impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: default_output_path(Local::now()),
            include_extensions: Vec::new(),
            exclude_extensions: Vec::new(),
            include_dirs: Vec::new(),
            exclude_dirs: Vec::new(),
            exclude_globs: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            follow_symlinks: false,
            binary_detection: BinaryDetection::Simple,
            verbose: false,
        }
    }
}
impl ScanConfig {
    /// Loads a config from a JSON document. Missing fields take their
    /// defaults and every list goes through the same normalization as the
    /// builder setters.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TextcatError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| TextcatError::io(path, e))?;
        let config: ScanConfig =
            serde_json::from_str(&raw).map_err(|source| TextcatError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(ScanBuilder::from(config).build())
    }
}

/// `extracted_content_YYYYMMDD_HHMMSS.txt` in the working directory.
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "extracted_content_{}.txt",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Splits a comma-separated flag value, trimming items and dropping empty ones.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().to_lowercase();
    if ext.is_empty() {
        None
    } else if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}

fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    (!name.is_empty()).then_some(name)
}

fn normalize_all<I, S>(items: I, normalize: fn(&str) -> Option<String>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|s| normalize(s.as_ref()))
        .collect()
}

#[derive(Debug, Default)]
pub struct ScanBuilder {
    config: ScanConfig,
}
impl ScanBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: ScanConfig {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }
    pub fn include_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.include_extensions = normalize_all(exts, normalize_extension);
        self
    }
    pub fn exclude_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.exclude_extensions = normalize_all(exts, normalize_extension);
        self
    }
    pub fn include_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.include_dirs = normalize_all(names, normalize_name);
        self
    }
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.exclude_dirs = normalize_all(names, normalize_name);
        self
    }
    pub fn exclude_globs(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude_globs = patterns
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        self
    }
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }
    pub fn follow_symlinks(mut self, yes: bool) -> Self {
        self.config.follow_symlinks = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.config.binary_detection = method;
        self
    }
    pub fn verbose(mut self, yes: bool) -> Self {
        self.config.verbose = yes;
        self
    }
    pub fn build(self) -> ScanConfig {
        self.config
    }
}
impl From<ScanConfig> for ScanBuilder {
    fn from(config: ScanConfig) -> Self {
        let ScanConfig {
            include_extensions,
            exclude_extensions,
            include_dirs,
            exclude_dirs,
            exclude_globs,
            ..
        } = config.clone();
        Self { config }
            .include_extensions(include_extensions)
            .exclude_extensions(exclude_extensions)
            .include_dirs(include_dirs)
            .exclude_dirs(exclude_dirs)
            .exclude_globs(exclude_globs)
    }
}
