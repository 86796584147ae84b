/*!
 * Configuration handling for dumpctx
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;

/// Output file name used when `--output` is not given
pub const DEFAULT_OUTPUT_FILE: &str = "context.txt";

/// Command-line arguments for dumpctx
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dumpctx",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapshot a directory tree and selected file contents into one text file",
    long_about = "Walks a directory, selects files with comma-separated include/exclude glob patterns, and writes a rendered file tree followed by the contents of every selected file into a single document."
)]
pub struct Args {
    /// Directory to process
    #[clap(long, default_value = ".")]
    pub dir: String,

    /// Comma-separated list of include patterns (empty includes everything not excluded)
    #[clap(long)]
    pub include: Option<String>,

    /// Comma-separated list of exclude patterns (always wins over include)
    #[clap(long)]
    pub exclude: Option<String>,

    /// Output file name, written inside the processed directory
    #[clap(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[clap(short, long)]
    pub quiet: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to scan
    pub target_dir: PathBuf,

    /// Path of the document to write, inside `target_dir`
    pub output_file: PathBuf,

    /// Patterns a file must match one of (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Patterns that reject a file outright
    pub exclude_patterns: Vec<String>,
}

impl Config {
    /// Configuration for `target_dir` with no patterns and the default output name
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        Self {
            output_file: target_dir.join(DEFAULT_OUTPUT_FILE),
            target_dir,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let target_dir = PathBuf::from(args.dir);
        Self {
            output_file: target_dir.join(&args.output),
            target_dir,
            include_patterns: split_patterns(args.include.as_deref().unwrap_or_default()),
            exclude_patterns: split_patterns(args.exclude.as_deref().unwrap_or_default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );
        Ok(())
    }
}

/// Split a comma-delimited pattern list, trimming each segment.
///
/// An empty string yields no patterns at all rather than one empty pattern.
pub fn split_patterns(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(|p| p.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_segments() {
        assert_eq!(split_patterns("a, b ,c"), vec!["a", "b", "c"]);
        assert!(split_patterns("").is_empty());
        assert_eq!(split_patterns("*.rs"), vec!["*.rs"]);
    }

    #[test]
    fn from_args_defaults() {
        let args = Args::parse_from(["dumpctx"]);
        let config = Config::from_args(args);

        assert_eq!(config.target_dir, PathBuf::from("."));
        assert_eq!(config.output_file, PathBuf::from(".").join("context.txt"));
        assert!(config.include_patterns.is_empty());
        assert!(config.exclude_patterns.is_empty());
    }

    #[test]
    fn from_args_patterns_and_output() {
        let args = Args::parse_from([
            "dumpctx",
            "--dir",
            "proj",
            "--include",
            "*.rs, src/*.toml",
            "--exclude",
            "target",
            "--output",
            "snap.txt",
        ]);
        let config = Config::from_args(args);

        assert_eq!(config.include_patterns, vec!["*.rs", "src/*.toml"]);
        assert_eq!(config.exclude_patterns, vec!["target"]);
        assert_eq!(config.output_file, PathBuf::from("proj").join("snap.txt"));
    }

    #[test]
    fn validate_rejects_missing_dir() {
        let config = Config::new("/definitely/not/a/real/dir");
        assert!(config.validate().is_err());
    }
}
