use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Concatenate a project's text files into one txt with per-file headers"
)]
pub struct Cli {
    /// Path to the project root
    pub root: PathBuf,

    /// Path to the output txt file
    pub output: PathBuf,

    /// Extra directory names to ignore (added to the defaults)
    #[arg(long, num_args = 1..)]
    pub ignore_dirs: Vec<String>,

    /// Extra file globs to ignore, like '*.log' (added to the defaults)
    #[arg(long, num_args = 1..)]
    pub ignore_globs: Vec<String>,

    /// Skip files larger than this many megabytes. Use 0 to disable
    #[arg(long, default_value_t = 2.0)]
    pub max_mb: f64,

    /// Include hidden files and folders that start with a dot
    #[arg(long)]
    pub include_hidden: bool,

    /// Follow symlinked files instead of skipping them
    #[arg(long)]
    pub no_skip_symlinks: bool,

    /// Use extra ignore rules from a named preset in presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
