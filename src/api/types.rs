//! Payloads returned by the workspace API.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "member".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id":"7","title":"Ship it"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_task_status_snake_case() {
        let task: Task =
            serde_json::from_str(r#"{"id":"7","title":"x","status":"in_progress"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.status.label(), "In progress");
    }

    #[test]
    fn test_member_role_defaults() {
        let member: Member = serde_json::from_str(r#"{"name":"Ada","email":"ada@x.io"}"#).unwrap();
        assert_eq!(member.role, "member");
    }
}
