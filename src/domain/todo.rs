//! The todo item model
//!
//! A [`Todo`] is one checkbox line from a markdown document together with
//! everything extracted from it: cleaned text, priority, projects and
//! contexts, scheduling options, and nested child todos.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::options::TodoOptions;

/// One checkbox item extracted from a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Display text with priority, tags, and option blocks stripped.
    pub text: String,

    /// Whether the checkbox was marked `[x]`.
    pub done: bool,

    /// Priority letter from a leading `(A)`..`(Z)` marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<char>,

    /// `+project` tags, in order of appearance.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub projects: Vec<String>,

    /// `@context` tags, in order of appearance.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contexts: Vec<String>,

    /// Parsed scheduling metadata.
    #[serde(default)]
    pub options: TodoOptions,

    /// 1-based line number in the source document.
    pub line: usize,

    /// Source file, when the todo came from disk rather than a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Nesting depth derived from indentation.
    pub indent_level: usize,

    /// Nested child todos (more deeply indented lines).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Todo>,

    /// The raw text after the checkbox, kept for diagnostics.
    #[serde(skip)]
    pub raw_text: String,

    /// The raw interiors of the `{...}` option blocks, kept for diagnostics.
    #[serde(skip)]
    pub raw_options: Vec<String>,
}

impl Todo {
    /// Creates a bare todo with the given text; everything else defaults.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw_text: text.clone(),
            text,
            done: false,
            priority: None,
            projects: Vec::new(),
            contexts: Vec::new(),
            options: TodoOptions::default(),
            line: 0,
            file: None,
            indent_level: 0,
            children: Vec::new(),
            raw_options: Vec::new(),
        }
    }

    /// Total number of todos in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Todo::subtree_len).sum::<usize>()
    }

    /// True if this todo and every descendant is done.
    pub fn subtree_done(&self) -> bool {
        self.done && self.children.iter().all(Todo::subtree_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_defaults() {
        let todo = Todo::new("write the report");
        assert_eq!(todo.text, "write the report");
        assert!(!todo.done);
        assert_eq!(todo.priority, None);
        assert!(todo.children.is_empty());
        assert!(todo.options.due_date.is_none());
    }

    #[test]
    fn subtree_len_counts_nested() {
        let mut parent = Todo::new("parent");
        let mut child = Todo::new("child");
        child.children.push(Todo::new("grandchild"));
        parent.children.push(child);

        assert_eq!(parent.subtree_len(), 3);
    }

    #[test]
    fn subtree_done_requires_all() {
        let mut parent = Todo::new("parent");
        parent.done = true;
        let mut child = Todo::new("child");
        child.done = false;
        parent.children.push(child);

        assert!(!parent.subtree_done());
        parent.children[0].done = true;
        assert!(parent.subtree_done());
    }

    #[test]
    fn serialize_skips_empty_collections() {
        let todo = Todo::new("simple");
        let json = serde_json::to_string(&todo).unwrap();
        assert!(!json.contains("projects"));
        assert!(!json.contains("children"));
        assert!(!json.contains("priority"));
    }
}
