use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "List all file paths under a directory, skipping named folders"
)]
struct Cli {
    /// The root directory to start scanning
    #[arg(default_value = ".")]
    base_dir: PathBuf,

    /// File to save the list of paths into
    #[arg(long, default_value = "file_list.txt")]
    output: PathBuf,

    /// Folder names to skip
    #[arg(long, num_args = 1.., default_values_t = [
        ".git".to_string(),
        "node_modules".to_string(),
        "venv".to_string(),
        "__pycache__".to_string(),
    ])]
    ignore: Vec<String>,
}

/// Writes one path per line: the current directory's files in sorted order,
/// then each non-ignored subdirectory in sorted order.
fn walk(dir: &Path, ignore: &[String], out: &mut impl Write) -> Result<()> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    let read = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in read {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            if !ignore.iter().any(|skip| *skip == name) {
                subdirs.push(entry.path());
            }
        } else {
            files.push(entry.path());
        }
    }
    subdirs.sort();
    files.sort();
    for file in files {
        writeln!(out, "{}", file.display())?;
    }
    for sub in subdirs {
        walk(&sub, ignore, out)?;
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if !cli.base_dir.is_dir() {
        bail!(
            "Base directory does not exist or is not a directory: {}",
            cli.base_dir.display()
        );
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create output file {}", cli.output.display()))?;
    let mut out = BufWriter::new(file);
    walk(&cli.base_dir, &cli.ignore, &mut out)?;
    out.flush()?;

    println!("File list saved to {}", cli.output.display());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
