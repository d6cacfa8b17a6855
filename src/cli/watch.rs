//! `todomd watch` - rescan on markdown changes

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;

use super::output::Output;
use crate::storage::{load_tree, Config};

/// Delay before acting on a burst of file events
const DEBOUNCE: Duration = Duration::from_millis(500);

pub fn run(output: &Output, config: &Config, root: &Path) -> Result<()> {
    rescan(output, config, root)?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    debouncer
        .watcher()
        .watch(root, RecursiveMode::Recursive)?;

    output.line(&format!("Watching {} (Ctrl-C to stop)", root.display()));

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                if !events.iter().any(|e| is_markdown(&e.path)) {
                    continue;
                }

                output.verbose_ctx("watch", &format!("Detected {} change(s)", events.len()));
                output.blank();
                if let Err(e) = rescan(output, config, root) {
                    output.error(&format!("{:#}", e));
                }
            }
            Ok(Err(error)) => {
                output.verbose_ctx("watch", &format!("Watch error: {:?}", error));
            }
            Err(_) => break,
        }
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Scans once and prints a one-line summary
fn rescan(output: &Output, config: &Config, root: &Path) -> Result<()> {
    let result = load_tree(root, &config.project)?;
    let timestamp = chrono::Local::now().format("%H:%M:%S");

    if output.is_json() {
        output.data(&serde_json::json!({
            "todos": result.total_todos(),
            "problems": result.diagnostics.len(),
        }));
    } else {
        output.line(&format!(
            "[{}] {} todo(s), {} problem(s)",
            timestamp,
            result.total_todos(),
            result.diagnostics.len()
        ));
        for diagnostic in &result.diagnostics {
            output.line(&format!("  {}", diagnostic.display_line()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn markdown_filter() {
        assert!(is_markdown(&PathBuf::from("notes/inbox.md")));
        assert!(!is_markdown(&PathBuf::from("notes/inbox.txt")));
        assert!(!is_markdown(&PathBuf::from("notes")));
    }
}
