use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;

/// Directory names that are never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "build",
    "dist",
    ".next",
    ".cache",
    "coverage",
    ".turbo",
    ".yarn",
    ".pnpm",
    ".husky",
];

/// Glob patterns applied to directory relative-paths and file names.
pub const DEFAULT_IGNORED_GLOBS: &[&str] = &[
    "*.png", "*.jpg", "*.jpeg", "*.gif", "*.webp", "*.ico", "*.svg", "*.mp4", "*.mp3", "*.wav",
    "*.mov", "*.zip", "*.gz", "*.br", "*.tar", "*.rar", "*.7z", "*.woff", "*.woff2", "*.ttf",
    "*.eot", "*.otf", "*.pdf", "*.dll", "*.DS_Store", "*.lock",
];

/// Obvious binary extensions, checked case-insensitively for a fast skip.
pub const BINARY_EXTS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "ico", "svg", "mp4", "mp3", "wav", "mov", "zip", "gz",
    "br", "tar", "rar", "7z", "woff", "woff2", "ttf", "eot", "otf", "pdf", "dll",
];

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    ignore_dirs: Option<Vec<String>>,
    ignore_globs: Option<Vec<String>>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".config").join("treecat").join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// Appends extras to the defaults, deduplicating while keeping order.
fn merge_globs(defaults: &[&str], preset: Option<Vec<String>>, cli: &[String]) -> Vec<String> {
    let mut combined: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
    combined.extend(preset.unwrap_or_default());
    combined.extend(cli.iter().cloned());
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn merge_dirs(defaults: &[&str], preset: Option<Vec<String>>, cli: &[String]) -> HashSet<String> {
    let mut combined: HashSet<String> = defaults.iter().map(|s| s.to_string()).collect();
    combined.extend(preset.unwrap_or_default());
    combined.extend(cli.iter().cloned());
    combined
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = load_presets_file()?;

    // Preset to use: explicit flag > root folder name > none. The root is
    // resolved first so invocations like `treecat . out.txt` still map to
    // the folder's real name.
    let resolved_root = fs::canonicalize(&cli.root).unwrap_or_else(|_| cli.root.clone());
    let root_name = resolved_root.file_name().and_then(|n| n.to_str());
    let preset_key = cli.preset.as_deref().or(root_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();
    if let Some(name) = cli.preset.as_deref() {
        if !presets.contains_key(name) {
            log::warn!("Preset '{}' not found in presets.toml", name);
        }
    }

    let config = RuntimeConfig {
        root: cli.root,
        output: cli.output,
        ignore_dirs: merge_dirs(DEFAULT_IGNORED_DIRS, preset.ignore_dirs, &cli.ignore_dirs),
        ignore_globs: merge_globs(DEFAULT_IGNORED_GLOBS, preset.ignore_globs, &cli.ignore_globs),
        max_bytes: (cli.max_mb * 1024.0 * 1024.0) as u64,
        include_hidden: cli.include_hidden,
        skip_symlinks: !cli.no_skip_symlinks,
    };
    log::debug!(
        "Resolved config: {} ignore dirs, {} ignore globs, limit {} bytes",
        config.ignore_dirs.len(),
        config.ignore_globs.len(),
        config.max_bytes
    );

    Ok(config)
}
