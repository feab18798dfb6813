use std::collections::HashSet;
use std::path::PathBuf;

/// Final configuration for one run, after merging defaults, presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub ignore_dirs: HashSet<String>,
    pub ignore_globs: Vec<String>,
    /// Maximum file size in bytes. 0 disables the limit.
    pub max_bytes: u64,
    pub include_hidden: bool,
    pub skip_symlinks: bool,
}

/// A file that survived every path-policy filter during the scan.
#[derive(Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path relative to the scan root, forward-slash separators.
    pub relative_path: String,
}

/// What happened to a single entry at emission time.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// Header and normalized content were written.
    Written,
    /// Nothing was written: the file vanished or exceeded the size limit.
    Skipped,
    /// Header plus an inline error note were written.
    Failed,
}

/// Summary of one run.
#[derive(Debug)]
pub struct RunResult {
    pub files_written: usize,
}
