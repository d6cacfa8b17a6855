//! `todomd scan` - print the full todo tree

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use super::render;
use crate::storage::{load_tree, Config};

pub fn run(output: &Output, config: &Config, root: &Path) -> Result<()> {
    let result = load_tree(root, &config.project)?;

    output.verbose_ctx(
        "scan",
        &format!(
            "{} todo(s), {} problem(s)",
            result.total_todos(),
            result.diagnostics.len()
        ),
    );

    if output.is_json() {
        output.data(&result);
        return Ok(());
    }

    if result.todos.is_empty() {
        output.line("No todos found.");
        return Ok(());
    }

    // Group top-level todos under their source file
    let mut current_file: Option<&Path> = None;
    let mut first = true;
    for todo in &result.todos {
        let file = todo.file.as_deref();
        if file != current_file {
            if !first {
                output.blank();
            }
            if let Some(file) = file {
                output.line(&format!("{}:", file.display()));
            }
            current_file = file;
        }
        first = false;
        render::print_tree(output, std::slice::from_ref(todo), 0);
    }

    if !result.diagnostics.is_empty() {
        output.blank();
        output.line(&format!(
            "{} problem(s) found; run `todomd check` for details",
            result.diagnostics.len()
        ));
    }

    Ok(())
}
