//! Task metrics and the dashboard load

use crate::adapter::TaskFilter;
use crate::client::ApiClient;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use taskboard_core::{Task, TaskStatus, User};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Todo => self.todo += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.completed
    }
}

/// Per-user task totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_id: String,
    pub name: String,
    pub total: usize,
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMetrics {
    pub total: usize,
    pub counts: StatusCounts,
    /// Completed over total, in percent (0 when there are no tasks)
    pub completion_rate: f64,
    /// Tasks per listed user (0 when there are no users)
    pub average_per_user: f64,
    /// One entry per listed user, in listing order
    pub per_user: Vec<UserStats>,
}

impl TaskMetrics {
    pub fn compute(tasks: &[Task], users: &[User]) -> Self {
        let mut counts = StatusCounts::default();
        let mut by_assignee: HashMap<&str, StatusCounts> = HashMap::new();

        for task in tasks {
            counts.record(task.status);
            if let Some(assignee) = task.assigned_to.as_deref() {
                by_assignee.entry(assignee).or_default().record(task.status);
            }
        }

        let per_user = users
            .iter()
            .map(|user| {
                let counts = by_assignee.get(user.id.as_str()).copied().unwrap_or_default();
                UserStats {
                    user_id: user.id.clone(),
                    name: user.name.clone(),
                    total: counts.total(),
                    counts,
                }
            })
            .collect();

        let total = tasks.len();
        let completion_rate = if total == 0 {
            0.0
        } else {
            counts.completed as f64 * 100.0 / total as f64
        };
        let average_per_user = if users.is_empty() {
            0.0
        } else {
            total as f64 / users.len() as f64
        };

        Self {
            total,
            counts,
            completion_rate,
            average_per_user,
            per_user,
        }
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    pub metrics: TaskMetrics,
}

/// Fetch tasks and users concurrently; either failure fails the load
pub async fn load_dashboard(api: &ApiClient, filter: &TaskFilter) -> Result<Dashboard> {
    let (tasks, users) = tokio::try_join!(api.list_tasks(filter), api.list_users())?;
    debug!("Dashboard loaded: tasks={} users={}", tasks.len(), users.len());

    let metrics = TaskMetrics::compute(&tasks, &users);
    Ok(Dashboard {
        tasks,
        users,
        metrics,
    })
}
