//! Document scanning and tree assembly
//!
//! Walks a document line by line, turns checkbox lines into [`Todo`]s,
//! nests them by indentation, and parses each line's option blocks. A bad
//! option block becomes a [`ScanDiagnostic`] and the todo is kept without
//! scheduling metadata, so one malformed line never drops the rest of the
//! document.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::line::scan_line;
use crate::domain::{parse_options, Todo};

/// A non-fatal problem found while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanDiagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// 1-based line number; 0 when the problem is file-level.
    pub line: usize,

    pub message: String,
}

impl ScanDiagnostic {
    /// Formats as `file:line: message` for text output.
    pub fn display_line(&self) -> String {
        match &self.file {
            Some(file) if self.line > 0 => {
                format!("{}:{}: {}", file.display(), self.line, self.message)
            }
            Some(file) => format!("{}: {}", file.display(), self.message),
            None if self.line > 0 => format!("line {}: {}", self.line, self.message),
            None => self.message.clone(),
        }
    }
}

/// The outcome of scanning one document or a whole directory tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    /// Top-level todos, children nested inside.
    pub todos: Vec<Todo>,

    /// Problems encountered along the way.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanResult {
    /// Total todo count including nested children.
    pub fn total_todos(&self) -> usize {
        self.todos.iter().map(Todo::subtree_len).sum()
    }

    /// Merges another result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.todos.extend(other.todos);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Appends `todo` as the last child at the given depth, following the
/// chain of most recent todos.
fn insert_at_depth(roots: &mut Vec<Todo>, todo: Todo, depth: usize) {
    let mut target = roots;
    for _ in 0..depth {
        if target.is_empty() {
            break;
        }
        target = &mut target.last_mut().unwrap().children;
    }
    target.push(todo);
}

/// Scans a document into a todo tree.
///
/// Indent level is leading-whitespace width divided by `indent_width`. A
/// line indented deeper than its predecessor becomes a child; a shallower
/// line pops back to its matching ancestor, however many levels away.
pub fn scan_document(text: &str, file: Option<&Path>, indent_width: usize) -> ScanResult {
    let indent_width = indent_width.max(1);
    let mut result = ScanResult::default();

    // Indent levels of the open ancestor chain; its length is the depth
    // at which the next todo would be inserted.
    let mut chain: Vec<usize> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let Some(scanned) = scan_line(raw_line) else {
            continue;
        };

        let line_number = index + 1;
        let level = scanned.indent / indent_width;

        let mut todo = Todo::new(scanned.text);
        todo.done = scanned.done;
        todo.priority = scanned.priority;
        todo.projects = scanned.projects;
        todo.contexts = scanned.contexts;
        todo.line = line_number;
        todo.file = file.map(Path::to_path_buf);
        todo.indent_level = level;
        todo.raw_text = scanned.raw_text;
        todo.raw_options = scanned.option_fragments;

        match parse_options(&todo.raw_options) {
            Ok(options) => todo.options = options,
            Err(e) => result.diagnostics.push(ScanDiagnostic {
                file: file.map(Path::to_path_buf),
                line: line_number,
                message: e.to_string(),
            }),
        }

        while chain.last().is_some_and(|&open| open >= level) {
            chain.pop();
        }
        let depth = chain.len();
        insert_at_depth(&mut result.todos, todo, depth);
        chain.push(level);
    }

    result
}
