//! `todomd list` - todos grouped by due-date status

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use super::render;
use crate::domain::{group_todos, PlainDate, Todo};
use crate::storage::{load_tree, Config};

pub fn run(output: &Output, config: &Config, root: &Path, date: Option<&str>) -> Result<()> {
    let today: PlainDate = match date {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid --date value: {}", raw))?,
        None => PlainDate::today(),
    };

    let result = load_tree(root, &config.project)?;
    let groups = group_todos(&result.todos, today);

    output.verbose_ctx(
        "list",
        &format!("{} top-level todo(s) as of {}", groups.len(), today),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "date": today,
            "overdue": groups.overdue,
            "today": groups.today,
            "active": groups.active,
            "completed": groups.completed,
        }));
        return Ok(());
    }

    if groups.is_empty() {
        output.line("No todos found.");
        return Ok(());
    }

    let sections: [(&str, &[Todo]); 4] = [
        ("OVERDUE", &groups.overdue),
        ("TODAY", &groups.today),
        ("ACTIVE", &groups.active),
        ("COMPLETED", &groups.completed),
    ];

    let mut first = true;
    for (title, todos) in sections {
        if todos.is_empty() {
            continue;
        }
        if !first {
            output.blank();
        }
        first = false;

        output.line(&format!("{} ({})", title, todos.len()));
        render::print_tree(output, todos, 1);
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
