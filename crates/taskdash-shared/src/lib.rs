use serde::{
  Deserialize,
  Serialize
};

pub type TaskId = i64;
pub type UserId = i64;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub enum TaskPriority {
  Low,
  #[default]
  Medium,
  High,
  /// Any label the server stores outside the three known ones.
  #[serde(other)]
  Other
}

impl TaskPriority {
  pub const ALL: [TaskPriority; 3] = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | TaskPriority::Low => "Low",
      | TaskPriority::Medium => "Medium",
      | TaskPriority::High => "High",
      | TaskPriority::Other => "Other"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|p| p.as_str() == value.trim())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub enum TaskStatus {
  #[default]
  Pending,
  #[serde(rename = "In Progress")]
  InProgress,
  Completed,
  #[serde(rename = "On Hold")]
  OnHold,
  #[serde(other)]
  Other
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 4] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::OnHold
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | TaskStatus::Pending => "Pending",
      | TaskStatus::InProgress => {
        "In Progress"
      }
      | TaskStatus::Completed => {
        "Completed"
      }
      | TaskStatus::OnHold => "On Hold",
      | TaskStatus::Other => "Other"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|s| s.as_str() == value.trim())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  #[default]
  Developer
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      | Role::Admin => "admin",
      | Role::Developer => "developer"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    match value
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "admin" => Some(Role::Admin),
      | "developer" => {
        Some(Role::Developer)
      }
      | _ => None
    }
  }

  pub fn is_admin(self) -> bool {
    self == Role::Admin
  }
}

/// A task as the backend returns it. Dates are ISO strings
/// (`YYYY-MM-DD` for start/due, full timestamps for audit fields).
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct TaskDto {
  pub id:               TaskId,
  #[serde(default)]
  pub title:            String,
  #[serde(default)]
  pub description:      Option<String>,
  #[serde(default)]
  pub assigned_to:      Option<UserId>,
  #[serde(default)]
  pub assigned_to_name: Option<String>,
  #[serde(default)]
  pub priority:         TaskPriority,
  #[serde(default)]
  pub status:           TaskStatus,
  #[serde(default)]
  pub start_date:       Option<String>,
  #[serde(default)]
  pub due_date:         Option<String>,
  #[serde(default)]
  pub is_overdue:       bool,
  #[serde(default)]
  pub created_by:       Option<UserId>,
  #[serde(default)]
  pub created_by_name:  Option<String>,
  #[serde(default)]
  pub created_at:       Option<String>,
  #[serde(default)]
  pub updated_at:       Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct UserDto {
  pub id:         UserId,
  #[serde(default)]
  pub name:       String,
  #[serde(default)]
  pub email:      String,
  #[serde(default)]
  pub role:       Role,
  #[serde(default)]
  pub created_at: Option<String>
}

/// One note on a task, oldest first in a listing.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct CommentDto {
  pub id:           i64,
  #[serde(default)]
  pub task_id:      TaskId,
  #[serde(default)]
  pub user_id:      Option<UserId>,
  #[serde(default)]
  pub user_name:    Option<String>,
  #[serde(default)]
  pub comment_text: String,
  #[serde(default)]
  pub created_at:   Option<String>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct DashboardStats {
  #[serde(default)]
  pub total_tasks:       u64,
  #[serde(default)]
  pub completed_tasks:   u64,
  #[serde(default)]
  pub pending_tasks:     u64,
  #[serde(default)]
  pub in_progress_tasks: u64,
  #[serde(default)]
  pub overdue_tasks:     u64
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct PageMeta {
  #[serde(default)]
  pub page:        u32,
  #[serde(default)]
  pub per_page:    u32,
  #[serde(default)]
  pub total_pages: u32,
  #[serde(default)]
  pub total_items: u64,
  #[serde(default)]
  pub has_prev:    bool,
  #[serde(default)]
  pub has_next:    bool
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct StatsResponse {
  pub stats: DashboardStats
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskListResponse {
  #[serde(default)]
  pub tasks: Vec<TaskDto>,
  #[serde(default)]
  pub meta:  PageMeta
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UsersResponse {
  #[serde(default)]
  pub users: Vec<UserDto>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct CommentsResponse {
  #[serde(default)]
  pub comments: Vec<CommentDto>
}

/// Body of `POST /api/tasks/{id}/comments`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CommentPayload {
  pub comment_text: String
}

/// Body of `POST /api/tasks` and `PUT /api/tasks/{id}`. Blank optional
/// fields travel as explicit `null` so an edit can clear them.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskPayload {
  pub title:       String,
  pub description: String,
  pub assigned_to: Option<UserId>,
  pub priority:    TaskPriority,
  pub status:      TaskStatus,
  pub start_date:  Option<String>,
  pub due_date:    Option<String>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StatusPayload {
  pub status: TaskStatus
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct UserCreate {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub role:     Role
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct UserUpdate {
  pub name:     String,
  pub email:    String,
  pub role:     Role,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub password: Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct LoginRequest {
  pub email:    String,
  pub password: String
}
