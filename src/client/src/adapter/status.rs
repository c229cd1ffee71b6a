//! Task status vocabulary mapping
//!
//! Backend: `pendente | fazendo | concluido`
//! Internal: `todo | in_progress | completed`

use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_core::TaskStatus;
use tracing::warn;

/// Task status as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Pendente,
    Fazendo,
    Concluido,
}

impl BackendStatus {
    pub const ALL: [BackendStatus; 3] = [
        BackendStatus::Pendente,
        BackendStatus::Fazendo,
        BackendStatus::Concluido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendStatus::Pendente => "pendente",
            BackendStatus::Fazendo => "fazendo",
            BackendStatus::Concluido => "concluido",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == raw)
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BackendStatus> for TaskStatus {
    fn from(status: BackendStatus) -> Self {
        match status {
            BackendStatus::Pendente => TaskStatus::Todo,
            BackendStatus::Fazendo => TaskStatus::InProgress,
            BackendStatus::Concluido => TaskStatus::Completed,
        }
    }
}

impl From<TaskStatus> for BackendStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => BackendStatus::Pendente,
            TaskStatus::InProgress => BackendStatus::Fazendo,
            TaskStatus::Completed => BackendStatus::Concluido,
        }
    }
}

/// Map a raw backend status to the internal vocabulary
///
/// Values outside the backend vocabulary fall back to [`TaskStatus::default`].
pub fn status_from_backend(raw: &str) -> TaskStatus {
    match BackendStatus::parse(raw) {
        Some(status) => status.into(),
        None => {
            warn!("Unknown backend task status '{}', using '{}'", raw, TaskStatus::default());
            TaskStatus::default()
        }
    }
}

pub fn status_to_backend(status: TaskStatus) -> BackendStatus {
    status.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_from_backend() {
        for status in BackendStatus::ALL {
            assert_eq!(status_to_backend(status_from_backend(status.as_str())), status);
        }
    }

    #[test]
    fn test_round_trip_from_internal() {
        for status in TaskStatus::ALL {
            assert_eq!(status_from_backend(status_to_backend(status).as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(status_from_backend("arquivado"), TaskStatus::Todo);
        assert_eq!(status_from_backend(""), TaskStatus::Todo);
        // Internal spellings are not backend spellings
        assert_eq!(status_from_backend("completed"), TaskStatus::Todo);
    }

    #[test]
    fn test_serializes_backend_spelling() {
        let json = serde_json::to_string(&BackendStatus::from(TaskStatus::InProgress)).unwrap();
        assert_eq!(json, "\"fazendo\"");
    }
}
