//! # Task wire model
//!
//! [`Task`] mirrors the backend's task row. Timestamps are kept as the opaque
//! strings the backend sends; nothing on the client computes with them.
//!
//! [`TaskDraft`] is the validated form input for create and update:
//! the title is trimmed and required, a blank description becomes `None`.
//!
//! [`TaskList`] accepts the list endpoint's payload either as a bare array or
//! wrapped as `{"tasks": [...]}`, so call sites never inspect the shape.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated title/description pair ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
}

impl TaskDraft {
    pub fn new(title: &str, description: &str) -> Result<Self, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation(vec!["Title is required".to_string()]));
        }
        let description = description.trim();
        Ok(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// List endpoint payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskList {
    Bare(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

impl TaskList {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::Bare(tasks) | Self::Wrapped { tasks } => tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK: &str = r#"{
        "id": 3,
        "user_id": 7,
        "title": "Buy milk",
        "description": null,
        "completed": false,
        "created_at": "2025-01-02T03:04:05.123456",
        "updated_at": "2025-01-02T03:04:05.123456"
    }"#;

    #[test]
    fn test_draft_trims_and_requires_title() {
        let draft = TaskDraft::new("  Buy milk  ", "   ").unwrap();
        assert_eq!(draft.title(), "Buy milk");
        assert_eq!(draft.description(), None);

        let draft = TaskDraft::new("Call", "  mum ").unwrap();
        assert_eq!(draft.description(), Some("mum"));

        let err = TaskDraft::new("   ", "desc").unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_task_list_shapes() {
        let bare: TaskList = serde_json::from_str(&format!("[{TASK}]")).unwrap();
        let tasks = bare.into_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].description, None);

        let wrapped: TaskList = serde_json::from_str(&format!(r#"{{"tasks": [{TASK}]}}"#)).unwrap();
        assert_eq!(wrapped.into_tasks()[0].id, 3);

        assert!(serde_json::from_str::<TaskList>(r#"{"items": []}"#).is_err());
        assert!(serde_json::from_str::<TaskList>(r#"{"detail": "boom"}"#).is_err());
    }
}
