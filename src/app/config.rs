use crate::app::cli::Cli;
use crate::app::models::FilterConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PresetConfig {
    exclude_dirs: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    include_dirs: Option<Vec<String>>,
    include_files: Option<Vec<String>>,
    #[serde(default)]
    minify: bool,
}

/// Reads `~/.config/codebase_review/presets.toml`. A missing file means no presets.
pub fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home
        .join(".config")
        .join("codebase_review")
        .join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;
    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Picks the preset (CLI flag > root directory name > none) and merges it
/// with the CLI lists on top of the default ignore sets.
pub fn resolve_config(cli: &Cli, presets: &HashMap<String, PresetConfig>) -> FilterConfig {
    let dir_name = directory_name(&cli.directory);
    let preset_key = cli.preset.as_deref().or(dir_name.as_deref());
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    if let Some(key) = cli.preset.as_deref() {
        if !presets.contains_key(key) {
            log::warn!("Preset '{}' not found, using CLI options only", key);
        }
    }

    FilterConfig {
        exclude_dirs: merge_vecs(preset.exclude_dirs, cli.exclude_dirs.clone()),
        exclude_files: merge_vecs(preset.exclude_files, cli.exclude_files.clone()),
        include_dirs: merge_vecs(preset.include_dirs, cli.include_dirs.clone()),
        include_files: merge_vecs(preset.include_files, cli.include_files.clone()),
        minify: preset.minify || cli.minify,
        ..FilterConfig::default()
    }
}

fn directory_name(directory: &Path) -> Option<String> {
    let resolved = directory.canonicalize().ok()?;
    resolved.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("codebase_review").chain(args.iter().copied()))
    }

    #[test]
    fn cli_lists_apply_over_defaults() {
        let config = resolve_config(
            &cli(&["--exclude-dirs", "vendor", "tmp", "--minify"]),
            &HashMap::new(),
        );

        assert_eq!(config.exclude_dirs, vec!["vendor", "tmp"]);
        assert!(config.include_files.is_empty());
        assert!(config.minify);
        assert!(config.ignored_dirs.contains(&"node_modules".to_string()));
    }

    #[test]
    fn preset_lists_come_first_and_are_deduplicated() {
        let presets = parse_presets(
            r#"
            [web]
            exclude_dirs = ["coverage", "vendor"]
            include_files = [".tsx"]
            minify = true
            "#,
        )
        .unwrap();

        let config = resolve_config(
            &cli(&["--preset", "web", "--exclude-dirs", "vendor", "tmp"]),
            &presets,
        );

        assert_eq!(config.exclude_dirs, vec!["coverage", "vendor", "tmp"]);
        assert_eq!(config.include_files, vec![".tsx"]);
        assert!(config.minify);
    }

    #[test]
    fn unknown_preset_falls_back_to_cli() {
        let config = resolve_config(&cli(&["--preset", "missing"]), &HashMap::new());

        assert!(config.exclude_dirs.is_empty());
        assert!(!config.minify);
    }

    #[test]
    fn invalid_presets_file_is_an_error() {
        assert!(parse_presets("[web\nexclude_dirs = 3").is_err());
    }
}
