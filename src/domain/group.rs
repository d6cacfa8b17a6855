//! Grouped presentation of scanned todos
//!
//! Partitions top-level todos into Overdue, Today, Active, and Completed
//! relative to a reference date. Pure derived view; the scan result is
//! never mutated.

use serde::Serialize;

use super::date::PlainDate;
use super::todo::Todo;

/// Top-level todos partitioned for display.
///
/// A done todo lands in `completed` with its whole subtree; children of a
/// done parent are never surfaced as active on their own. Of the rest,
/// `overdue` holds due dates before the reference date, `today` exact
/// matches, and `active` everything else (future or no due date).
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedTodos {
    pub overdue: Vec<Todo>,
    pub today: Vec<Todo>,
    pub active: Vec<Todo>,
    pub completed: Vec<Todo>,
}

impl GroupedTodos {
    /// Total number of top-level todos across all groups.
    pub fn len(&self) -> usize {
        self.overdue.len() + self.today.len() + self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn due_of(todo: &Todo) -> Option<PlainDate> {
    todo.options.due_date.as_ref().map(|d| d.next)
}

/// Sorts dated todos first by due date ascending, then file and line;
/// undated todos keep scan order after the dated ones.
fn sort_group(group: &mut [Todo]) {
    group.sort_by(|a, b| match (due_of(a), due_of(b)) {
        (Some(da), Some(db)) => da
            .cmp(&db)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Groups top-level todos for the given reference date.
pub fn group_todos(todos: &[Todo], today: PlainDate) -> GroupedTodos {
    let mut groups = GroupedTodos::default();

    for todo in todos {
        if todo.done {
            groups.completed.push(todo.clone());
            continue;
        }

        match due_of(todo) {
            Some(due) if due.is_past(today) => groups.overdue.push(todo.clone()),
            Some(due) if due.is_today(today) => groups.today.push(todo.clone()),
            _ => groups.active.push(todo.clone()),
        }
    }

    sort_group(&mut groups.overdue);
    sort_group(&mut groups.today);
    sort_group(&mut groups.active);
    sort_group(&mut groups.completed);

    groups
}
