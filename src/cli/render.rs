//! Text rendering of todo trees

use crate::domain::Todo;

use super::output::Output;

/// Renders one todo as a single display line, children excluded.
pub(super) fn todo_line(todo: &Todo) -> String {
    let mut line = String::new();
    line.push_str(if todo.done { "- [x] " } else { "- [ ] " });

    if let Some(priority) = todo.priority {
        line.push('(');
        line.push(priority);
        line.push_str(") ");
    }

    line.push_str(&todo.text);

    for project in &todo.projects {
        line.push_str(" +");
        line.push_str(project);
    }
    for context in &todo.contexts {
        line.push_str(" @");
        line.push_str(context);
    }

    if let Some(due) = &todo.options.due_date {
        match (due.repeat, due.every) {
            (Some(repeat), Some(every)) => {
                line.push_str(&format!(" (due {}, repeats {} every {})", due.next, repeat, every));
            }
            (Some(repeat), None) => {
                line.push_str(&format!(" (due {}, repeats {})", due.next, repeat));
            }
            _ => line.push_str(&format!(" (due {})", due.next)),
        }
    }

    line
}

/// Prints a todo subtree, indenting children two spaces per level.
pub(super) fn print_tree(output: &Output, todos: &[Todo], depth: usize) {
    for todo in todos {
        output.line(&format!("{}{}", "  ".repeat(depth), todo_line(todo)));
        print_tree(output, &todo.children, depth + 1);
    }
}
