//! Tasks in the internal vocabulary

use super::user::UserSummary;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kanban status of a task
///
/// This is the internal vocabulary; the backend uses a different one and
/// every crossing goes through the adapter's status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        TaskStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::invalid_value("task status", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(CoreError::invalid_value("priority", other)),
        }
    }
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    LandingPage,
    #[default]
    Edicao,
    Api,
    Manutencao,
    Urgente,
}

impl FromStr for TaskType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "landing_page" => Ok(TaskType::LandingPage),
            "edicao" => Ok(TaskType::Edicao),
            "api" => Ok(TaskType::Api),
            "manutencao" => Ok(TaskType::Manutencao),
            "urgente" => Ok(TaskType::Urgente),
            other => Err(CoreError::invalid_value("task type", other)),
        }
    }
}

/// A task as the rest of the application sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,

    /// Authoritative assignee reference
    pub assigned_to: Option<String>,

    /// Display summary of the assignee, derived from `assigned_to`
    pub assigned_user: Option<UserSummary>,

    pub created_by: Option<String>,
    pub created_by_user: Option<UserSummary>,

    pub created_at: String,
    pub updated_at: String,

    /// Date-only (`YYYY-MM-DD`)
    pub due_date: Option<String>,

    pub priority: Option<Priority>,

    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
}

impl Task {
    /// Whether the task is assigned to the given user id
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(user_id)
    }
}
