//! Command-line interface for textcat.
//!
//! Resolves flags (optionally layered over a JSON config file) into a single
//! [`ScanConfig`], runs the extraction and maps fatal errors to exit code 1.

use clap::Parser;
use std::path::PathBuf;
use std::process::exit;
use textcat::{BinaryDetection, ScanBuilder, ScanConfig, TextcatError, extract, split_list};

/// textcat: concatenate every text file under a directory into one report
#[derive(Parser)]
#[command(
    name = "textcat",
    version,
    about,
    long_about = None,
    after_help = "EXAMPLES:\n  textcat -d ./src -o output.txt --ie '.go,.md' --ed 'vendor,.git'\n  textcat --include-ext '.py,.js' --exclude-dir 'node_modules,__pycache__'\n  textcat --max-size 5242880 --verbose"
)]
struct Cli {
    /// Input directory to scan [default: .]
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Output file [default: extracted_content_TIMESTAMP.txt]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Comma-separated extensions to include (e.g. '.go,.txt,.md')
    #[arg(long = "include-ext", visible_alias = "ie")]
    include_ext: Option<String>,

    /// Comma-separated extensions to exclude (e.g. '.exe,.bin,.jpg')
    #[arg(long = "exclude-ext", visible_alias = "ee")]
    exclude_ext: Option<String>,

    /// Comma-separated directory names to include
    #[arg(long = "include-dir", visible_alias = "id")]
    include_dir: Option<String>,

    /// Comma-separated directory names to exclude (e.g. 'node_modules,.git,vendor')
    #[arg(long = "exclude-dir", visible_alias = "ed")]
    exclude_dir: Option<String>,

    /// Glob patterns, relative to the input directory, to exclude (can be repeated)
    #[arg(long = "exclude-glob")]
    exclude_glob: Vec<String>,

    /// Maximum file size in bytes [default: 10485760]
    #[arg(long = "max-size", visible_alias = "ms")]
    max_size: Option<u64>,

    /// Follow symbolic links
    #[arg(long = "follow-symlinks", visible_alias = "fs")]
    follow_symlinks: bool,

    /// Binary detection strategy: simple, accurate or none
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the extraction summary as JSON on stdout
    #[arg(long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_config(self) -> Result<(ScanConfig, bool), TextcatError> {
        let base = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };
        let mut builder = ScanBuilder::from(base);

        if let Some(dir) = self.dir {
            builder = builder.root(dir);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if let Some(exts) = self.include_ext {
            builder = builder.include_extensions(split_list(&exts));
        }
        if let Some(exts) = self.exclude_ext {
            builder = builder.exclude_extensions(split_list(&exts));
        }
        if let Some(dirs) = self.include_dir {
            builder = builder.include_dirs(split_list(&dirs));
        }
        if let Some(dirs) = self.exclude_dir {
            builder = builder.exclude_dirs(split_list(&dirs));
        }
        if !self.exclude_glob.is_empty() {
            builder = builder.exclude_globs(self.exclude_glob);
        }
        if let Some(bytes) = self.max_size {
            builder = builder.max_file_size(bytes);
        }
        if let Some(mode) = self.binary_detection {
            builder = builder.binary_detection(mode);
        }
        if self.follow_symlinks {
            builder = builder.follow_symlinks(true);
        }
        if self.verbose {
            builder = builder.verbose(true);
        }

        Ok((builder.build(), self.summary))
    }
}

fn setup_logging(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (config, print_summary) = match cli.into_config() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };
    setup_logging(config.verbose);

    if config.verbose {
        tracing::info!("Starting extraction from: {}", config.root.display());
        tracing::info!("Output file: {}", config.output.display());
    }

    let result = match extract(&config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if config.verbose {
        tracing::info!("Extraction completed successfully!");
    }

    if print_summary {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("JSON serialization error: {}", e);
                exit(1);
            }
        }
    }
}
