use taskdash_shared::{
  Role,
  TaskDto,
  TaskPayload,
  TaskPriority,
  TaskStatus,
  UserCreate,
  UserDto,
  UserId,
  UserUpdate
};

/// Raw field values of the add/edit task modal, as read from the inputs.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct TaskForm {
  pub title:       String,
  pub description: String,
  pub assigned_to: String,
  pub priority:    String,
  pub status:      String,
  pub start_date:  String,
  pub due_date:    String
}

impl TaskForm {
  /// State of a freshly opened add modal.
  pub fn blank() -> Self {
    Self {
      priority: TaskPriority::Medium
        .as_str()
        .to_string(),
      status: TaskStatus::Pending
        .as_str()
        .to_string(),
      ..Self::default()
    }
  }

  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      title:       task.title.clone(),
      description: task
        .description
        .clone()
        .unwrap_or_default(),
      assigned_to: task
        .assigned_to
        .map(|id| id.to_string())
        .unwrap_or_default(),
      priority:    task
        .priority
        .as_str()
        .to_string(),
      status:      task
        .status
        .as_str()
        .to_string(),
      start_date:  task
        .start_date
        .clone()
        .unwrap_or_default(),
      due_date:    task
        .due_date
        .clone()
        .unwrap_or_default()
    }
  }

  /// Blank selects and dates become `null`. Unknown priority or status
  /// labels fall back to the backend defaults; the backend owns
  /// validation.
  pub fn to_payload(&self) -> TaskPayload {
    TaskPayload {
      title:       self.title.clone(),
      description: self
        .description
        .clone(),
      assigned_to: self
        .assigned_to
        .trim()
        .parse::<UserId>()
        .ok(),
      priority:    TaskPriority::parse(
        &self.priority
      )
      .unwrap_or_default(),
      status:      TaskStatus::parse(
        &self.status
      )
      .unwrap_or_default(),
      start_date:  non_blank(
        &self.start_date
      ),
      due_date:    non_blank(
        &self.due_date
      )
    }
  }
}

/// Raw field values of the add/edit user modal.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct UserForm {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub role:     String
}

impl UserForm {
  pub fn blank() -> Self {
    Self {
      role: Role::Developer
        .as_str()
        .to_string(),
      ..Self::default()
    }
  }

  /// The password is never read back, so an edit starts blank.
  pub fn from_user(user: &UserDto) -> Self {
    Self {
      name:     user.name.clone(),
      email:    user.email.clone(),
      password: String::new(),
      role:     user
        .role
        .as_str()
        .to_string()
    }
  }

  fn role(&self) -> Role {
    Role::parse(&self.role)
      .unwrap_or_default()
  }

  pub fn to_create(&self) -> UserCreate {
    UserCreate {
      name:     self.name.trim().to_string(),
      email:    normalize_email(&self.email),
      password: self.password.clone(),
      role:     self.role()
    }
  }

  /// A blank password means "keep the current one" and is left out.
  pub fn to_update(&self) -> UserUpdate {
    UserUpdate {
      name:     self.name.trim().to_string(),
      email:    normalize_email(&self.email),
      role:     self.role(),
      password: if self.password.is_empty() {
        None
      } else {
        Some(self.password.clone())
      }
    }
  }
}

fn normalize_email(raw: &str) -> String {
  raw.trim().to_lowercase()
}

fn non_blank(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}
