//! Kanban board view of a task list

use serde::Serialize;
use taskboard_core::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub status: TaskStatus,
    pub title: &'static str,
    pub tasks: Vec<Task>,
}

impl Column {
    fn new(status: TaskStatus) -> Self {
        Self {
            status,
            title: column_title(status),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

pub fn column_title(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To Do",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Completed => "Completed",
    }
}

/// Three columns in [`TaskStatus::ALL`] order; task order within a column is preserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    columns: Vec<Column>,
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self {
            columns: TaskStatus::ALL.iter().copied().map(Column::new).collect(),
        }
    }
}

impl KanbanBoard {
    pub fn new(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status).tasks.push(task);
        }
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &Column {
        &self.columns[column_index(status)]
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Column {
        &mut self.columns[column_index(status)]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|column| column.tasks.iter())
            .find(|task| task.id == id)
    }

    /// Take a task off the board
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        self.columns.iter_mut().find_map(|column| {
            let position = column.tasks.iter().position(|task| task.id == id)?;
            Some(column.tasks.remove(position))
        })
    }

    /// Move a task to the end of another column; returns false when the id is unknown
    pub fn move_task(&mut self, id: &str, status: TaskStatus) -> bool {
        match self.remove_task(id) {
            Some(mut task) => {
                task.status = status;
                self.column_mut(status).tasks.push(task);
                true
            }
            None => false,
        }
    }

    /// Put back a task returned by the backend, replacing any stale copy
    pub fn upsert(&mut self, task: Task) {
        self.remove_task(&task.id);
        self.column_mut(task.status).tasks.push(task);
    }
}

fn column_index(status: TaskStatus) -> usize {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Completed => 2,
    }
}
