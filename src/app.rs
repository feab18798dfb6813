// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputWriter;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse args and resolve configuration (defaults + presets + CLI)
    let args = Cli::parse();
    let mut config = resolve_config(args)?;

    // 2. Validate and resolve the scan root
    if !config.root.is_dir() {
        bail!(
            "Root folder does not exist or is not a directory: {}",
            config.root.display()
        );
    }
    let root = fs::canonicalize(&config.root)
        .with_context(|| format!("Failed to resolve root {}", config.root.display()))?;

    // 3. Create the output up front so its resolved path is known for the
    //    self-reference guards below
    let out_file = File::create(&config.output)
        .with_context(|| format!("Failed to create output file {}", config.output.display()))?;
    let output = fs::canonicalize(&config.output)
        .with_context(|| format!("Failed to resolve output {}", config.output.display()))?;

    // Make sure we will not read the output file back in. The name is
    // escaped so metacharacters in a legal filename cannot abort the run
    // as a malformed pattern.
    if output.starts_with(&root) {
        if let Some(name) = output.file_name() {
            config
                .ignore_globs
                .push(globset::escape(&name.to_string_lossy()));
        }
    }

    // 4. Scan the tree
    let scanner = Scanner::new(root, output.clone(), &config)?;
    let entries = scanner.scan();

    // 5. Stream the entries into the output document
    let mut writer = OutputWriter::new(BufWriter::new(out_file), config.max_bytes);
    for entry in &entries {
        writer
            .write_entry(entry)
            .with_context(|| format!("Failed writing to {}", output.display()))?;
    }
    let result = writer.finish().context("Failed to flush output")?;

    // 6. Report
    println!(
        "Done. Wrote {} files into {}",
        result.files_written,
        output.display()
    );

    Ok(())
}
