use crate::app::config::BINARY_EXTS;
use crate::app::models::{FileEntry, RuntimeConfig};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Walks the tree top-down and yields the files that survive every
/// path-policy filter, in deterministic order: within each directory all
/// surviving files (sorted by name) come before any subdirectory descent,
/// and subdirectories are visited in sorted order.
pub struct Scanner {
    root: PathBuf,
    output: PathBuf,
    ignore_dirs: HashSet<String>,
    glob_set: GlobSet,
    include_hidden: bool,
    skip_symlinks: bool,
}

impl Scanner {
    /// `root` and `output` must already be resolved to absolute paths.
    pub fn new(root: PathBuf, output: PathBuf, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            output,
            ignore_dirs: config.ignore_dirs.clone(),
            glob_set: build_globset(&config.ignore_globs)?,
            include_hidden: config.include_hidden,
            skip_symlinks: config.skip_symlinks,
        })
    }

    pub fn scan(&self) -> Vec<FileEntry> {
        let mut entries = Vec::new();
        self.walk_dir(&self.root, &mut entries);
        entries
    }

    fn walk_dir(&self, dir: &Path, entries: &mut Vec<FileEntry>) {
        let read = match fs::read_dir(dir) {
            Ok(read) => read,
            Err(err) => {
                log::warn!("Cannot read directory {}: {}", dir.display(), err);
                return;
            }
        };

        let mut subdirs: Vec<(String, PathBuf)> = Vec::new();
        let mut files: Vec<(String, PathBuf, bool)> = Vec::new();
        for item in read {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error reading entry in {}: {}", dir.display(), err);
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    log::warn!("Cannot stat {}: {}", entry.path().display(), err);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if file_type.is_dir() {
                subdirs.push((name, entry.path()));
            } else {
                // Symlinks land here regardless of target; the symlink
                // policy decides what happens to them.
                files.push((name, entry.path(), file_type.is_symlink()));
            }
        }

        // Directory iteration order is unspecified; sort both lists so the
        // output is reproducible across runs and platforms.
        subdirs.sort_by(|a, b| a.0.cmp(&b.0));
        files.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_symlink) in &files {
            if let Some(entry) = self.filter_file(name, path, *is_symlink) {
                entries.push(entry);
            }
        }
        for (name, path) in &subdirs {
            if !self.prune_dir(name, path) {
                self.walk_dir(path, entries);
            }
        }
    }

    /// True when the subdirectory must not be entered at all.
    fn prune_dir(&self, name: &str, path: &Path) -> bool {
        if name.starts_with('.') && !self.include_hidden {
            return true;
        }
        let rel = match self.relative_posix(path) {
            Some(rel) => rel,
            None => return false,
        };
        if rel.split('/').any(|part| self.ignore_dirs.contains(part)) {
            return true;
        }
        self.glob_set.is_match(rel.as_str())
    }

    fn filter_file(&self, name: &str, path: &Path, is_symlink: bool) -> Option<FileEntry> {
        if is_symlink && self.skip_symlinks {
            return None;
        }
        if name.starts_with('.') && !self.include_hidden {
            return None;
        }
        if self.glob_set.is_match(name) {
            return None;
        }
        if has_binary_ext(path) {
            return None;
        }
        if is_symlink {
            // Followed symlinks are only eligible when they point at a
            // regular file. Broken links fall through and surface later as
            // a transient skip.
            if let Ok(meta) = fs::metadata(path) {
                if meta.is_dir() {
                    return None;
                }
            }
        }
        // Never read our own output back in, even when glob matching and
        // path resolution disagree about it.
        if let Ok(resolved) = fs::canonicalize(path) {
            if resolved == self.output {
                return None;
            }
        }
        let relative_path = self.relative_posix(path)?;
        Some(FileEntry {
            path: path.to_path_buf(),
            relative_path,
        })
    }

    fn relative_posix(&self, path: &Path) -> Option<String> {
        let rel = diff_paths(path, &self.root)?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn has_binary_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            BINARY_EXTS.iter().any(|b| b.eq_ignore_ascii_case(ext))
        })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
