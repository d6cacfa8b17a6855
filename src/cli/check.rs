//! `todomd check` - report scheduling-option problems

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::storage::{load_tree, Config};

pub fn run(output: &Output, config: &Config, root: &Path) -> Result<()> {
    let result = load_tree(root, &config.project)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "problems": result.diagnostics,
            "count": result.diagnostics.len(),
        }));
    } else if result.diagnostics.is_empty() {
        output.success(&format!(
            "No problems found in {} todo(s)",
            result.total_todos()
        ));
    } else {
        for diagnostic in &result.diagnostics {
            output.line(&diagnostic.display_line());
        }
        output.blank();
        output.line(&format!("{} problem(s) found", result.diagnostics.len()));
    }

    if !result.diagnostics.is_empty() {
        // Usable from scripts and CI; the report has already been printed
        std::process::exit(1);
    }

    Ok(())
}
