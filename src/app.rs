// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::time::Instant;

use self::cli::Cli;
use self::config::{load_presets_file, resolve_config};
use self::error::ScanError;
use self::formatter::{join_or_none, OutputGenerator, ReportContext};
use self::models::FilterConfig;
use self::scanner::Scanner;

const DEFAULT_OUTPUT_NAME: &str = "codebase_review.txt";

/// Walks `root` and renders either the structured report or the minified
/// blob. Any unreadable path aborts with no partial output.
pub fn assemble_codebase_document(root: &Path, config: &FilterConfig) -> Result<String, ScanError> {
    let started = Instant::now();
    let result = Scanner::new(root, config).scan()?;
    let elapsed = started.elapsed();

    log::info!(
        "Processed {} files ({} lines) in {:.2} seconds",
        result.file_count,
        result.total_lines,
        elapsed.as_secs_f64()
    );
    if result.files.is_empty() {
        log::warn!("No files matched the current filters.");
    }

    if config.minify {
        return Ok(OutputGenerator::generate_minified(&result));
    }

    let directory = root.display().to_string();
    let ctx = ReportContext {
        directory: &directory,
        elapsed,
        config,
    };
    Ok(OutputGenerator::generate_report(&result, &ctx))
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    let presets = load_presets_file()?;
    let config = resolve_config(&args, &presets);

    let document = assemble_codebase_document(&args.directory, &config)
        .with_context(|| format!("Failed to review {}", args.directory.display()))?;

    if args.stdout {
        // No trailing newline after a minified blob.
        if config.minify {
            print!("{}", document);
        } else {
            println!("{}", document);
        }
    } else {
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| args.directory.join(DEFAULT_OUTPUT_NAME));
        fs::write(&output_path, &document)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        log::info!("Codebase contents have been written to {}", output_path.display());
    }

    log::info!("Excluded directories: {}", join_or_none(&config.exclude_dirs));
    log::info!("Excluded files: {}", join_or_none(&config.exclude_files));
    log::info!("Included directories: {}", join_or_none(&config.include_dirs));
    log::info!("Included files: {}", join_or_none(&config.include_files));
    if config.minify {
        log::info!("Minified output: whitespace removed, no summary or headers");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn structured_document_follows_listing_with_start_lines() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "src/a.js", "let a = 1;\nlet b = 2;");
        write_file(temp.path(), "src/b.py", "print('b')");
        write_file(temp.path(), "node_modules/x.js", "ignored");

        let config = FilterConfig::default();
        let document = assemble_codebase_document(temp.path(), &config).unwrap();
        let lines: Vec<&str> = document.split('\n').collect();

        assert!(document.starts_with("Summary:\n"));
        assert!(document.contains("  - Files processed: 2\n"));
        assert!(!document.contains("node_modules"));

        let mut starts = Vec::new();
        for (path, first_line) in [("src/a.js", "let a = 1;"), ("src/b.py", "print('b')")] {
            let marker = format!("File: {} (starts at line ", path);
            let header = lines.iter().position(|l| l.starts_with(&marker)).unwrap();
            let start: usize = lines[header]
                .trim_start_matches(&marker)
                .trim_end_matches(')')
                .parse()
                .unwrap();
            assert_eq!(lines[start - 1], first_line);
            starts.push((header, start));
        }

        starts.sort();
        assert!(starts[0].1 < starts[1].1);
    }

    #[test]
    fn start_lines_hold_across_nesting_levels() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "src/x.js", "const x = 1;\n");
        write_file(temp.path(), "src/lib/y.js", "const y = 2;\nconst z = 3;");

        let config = FilterConfig::default();
        let document = assemble_codebase_document(temp.path(), &config).unwrap();
        let lines: Vec<&str> = document.split('\n').collect();

        let mut starts = Vec::new();
        for (path, first_line) in [("src/lib/y.js", "const y = 2;"), ("src/x.js", "const x = 1;")] {
            let marker = format!("File: {} (starts at line ", path);
            let header = lines.iter().position(|l| l.starts_with(&marker)).unwrap();
            let start: usize = lines[header]
                .trim_start_matches(&marker)
                .trim_end_matches(')')
                .parse()
                .unwrap();
            assert_eq!(lines[start - 1], first_line);
            assert!(document.contains(&format!("\n{} (starts at line {})\n", path, start)));
            starts.push(start);
        }

        assert!(starts[0] < starts[1]);
    }

    #[test]
    fn minified_document_is_whitespace_free_concatenation() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "src/only.ts", "export const x = 1;\n\tfoo( y );\n");

        let config = FilterConfig {
            minify: true,
            ..FilterConfig::default()
        };
        let document = assemble_codebase_document(temp.path(), &config).unwrap();

        assert_eq!(document, "exportconstx=1;foo(y);");
        assert!(!document.contains("Summary:"));
        assert!(!document.contains("File:"));
    }

    #[test]
    fn missing_root_fails_without_output() {
        let temp = tempdir().unwrap();
        let config = FilterConfig::default();
        let err = assemble_codebase_document(&temp.path().join("absent"), &config).unwrap_err();

        assert!(matches!(err, ScanError::PathNotFound { .. }));
    }
}
