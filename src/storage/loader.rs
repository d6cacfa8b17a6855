//! Markdown file discovery and loading
//!
//! Recursively finds `*.md` files under a root, scans each into todos, and
//! aggregates the results. A file that cannot be read becomes a diagnostic
//! rather than aborting the whole scan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::ProjectConfig;
use crate::scanner::{scan_document, ScanDiagnostic, ScanResult};

/// Scans all markdown files under `root` into one aggregated result.
///
/// The root may also be a single markdown file. Files are visited in
/// sorted path order so output is deterministic.
pub fn load_tree(root: &Path, config: &ProjectConfig) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    if root.is_file() {
        scan_file(root, config, &mut result);
        return Ok(result);
    }

    let mut files = Vec::new();
    collect_markdown_files(root, config, &mut files)
        .with_context(|| format!("Failed to scan directory: {}", root.display()))?;
    files.sort();

    for file in files {
        scan_file(&file, config, &mut result);
    }

    Ok(result)
}

fn collect_markdown_files(
    dir: &Path,
    config: &ProjectConfig,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || config.is_ignored(&name) {
                continue;
            }
            collect_markdown_files(&path, config, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }

    Ok(())
}

fn scan_file(path: &Path, config: &ProjectConfig, result: &mut ScanResult) {
    match fs::read_to_string(path) {
        Ok(text) => {
            result.merge(scan_document(&text, Some(path), config.indent_width));
        }
        Err(e) => result.diagnostics.push(ScanDiagnostic {
            file: Some(path.to_path_buf()),
            line: 0,
            message: format!("Failed to read file: {}", e),
        }),
    }
}
