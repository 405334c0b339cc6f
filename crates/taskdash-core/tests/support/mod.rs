//! In-memory stand-in for the REST backend plus a synchronous host that
//! executes controller effects against it.

#![allow(dead_code)]

use std::collections::{
  BTreeMap,
  VecDeque
};

use serde_json::{
  Value,
  json
};
use taskdash_core::api::{
  ApiRequest,
  HttpReply,
  Method
};
use taskdash_core::config::Settings;
use taskdash_core::{
  Dashboard,
  Effect,
  Msg,
  RequestKind
};
use taskdash_shared::{
  CommentDto,
  Role,
  TaskDto,
  TaskPayload,
  TaskPriority,
  TaskStatus,
  UserDto,
  UserUpdate
};

#[derive(Debug, Default)]
pub struct FakeApi {
  pub tasks:      BTreeMap<i64, TaskDto>,
  pub users:      BTreeMap<i64, UserDto>,
  pub passwords:  BTreeMap<i64, String>,
  pub comments:   Vec<CommentDto>,
  /// User the session cookie belongs to.
  pub acting_as:  i64,
  next_task_id:   i64,
  next_user_id:   i64,
  /// Paths (method + path) whose next call fails with a server message.
  pub reject:     BTreeMap<String, String>,
  /// Paths whose next call fails at the transport level.
  pub drop_next:  Vec<String>,
  pub seen:       Vec<ApiRequest>
}

impl FakeApi {
  pub fn seeded() -> Self {
    let mut api = FakeApi {
      acting_as: 1,
      next_task_id: 1,
      next_user_id: 1,
      ..FakeApi::default()
    };
    api.add_user("Admin", "admin@example.com", Role::Admin);
    api.add_user("Dev One", "dev1@example.com", Role::Developer);
    api.add_user("Dev Two", "dev2@example.com", Role::Developer);
    api
  }

  pub fn add_user(
    &mut self,
    name: &str,
    email: &str,
    role: Role
  ) -> i64 {
    let id = self.next_user_id;
    self.next_user_id += 1;
    self.users.insert(id, UserDto {
      id,
      name: name.to_string(),
      email: email.to_string(),
      role,
      created_at: Some(
        "2024-05-01T09:00:00".to_string()
      )
    });
    id
  }

  pub fn add_task(
    &mut self,
    title: &str,
    assigned_to: Option<i64>
  ) -> i64 {
    let payload = TaskPayload {
      title: title.to_string(),
      description: String::new(),
      assigned_to,
      priority: TaskPriority::Medium,
      status: TaskStatus::Pending,
      start_date: None,
      due_date: None
    };
    self.insert_task(payload)
  }

  fn insert_task(
    &mut self,
    payload: TaskPayload
  ) -> i64 {
    let id = self.next_task_id;
    self.next_task_id += 1;
    let task = self.task_from(id, payload);
    self.tasks.insert(id, task);
    id
  }

  fn task_from(
    &self,
    id: i64,
    payload: TaskPayload
  ) -> TaskDto {
    TaskDto {
      id,
      title: payload.title,
      description: Some(payload.description),
      assigned_to: payload.assigned_to,
      assigned_to_name: payload
        .assigned_to
        .and_then(|uid| self.users.get(&uid))
        .map(|u| u.name.clone()),
      priority: payload.priority,
      status: payload.status,
      start_date: payload.start_date,
      due_date: payload.due_date,
      is_overdue: false,
      created_by: Some(1),
      created_by_name: Some("Admin".to_string()),
      created_at: Some(format!(
        "2024-06-{:02}T10:00:00",
        (id % 28) + 1
      )),
      updated_at: None
    }
  }

  pub fn handle(
    &mut self,
    req: &ApiRequest
  ) -> Result<HttpReply, String> {
    self.seen.push(req.clone());
    let key = format!(
      "{} {}",
      req.method.as_str(),
      req.path
    );
    if let Some(pos) =
      self.drop_next.iter().position(|k| *k == key)
    {
      self.drop_next.remove(pos);
      return Err("connection reset".to_string());
    }
    if let Some(message) = self.reject.remove(&key) {
      return Ok(reply(
        400,
        json!({ "success": false, "message": message })
      ));
    }

    let segments: Vec<&str> = req
      .path
      .trim_start_matches('/')
      .split('/')
      .collect();
    let body: Value = req
      .body
      .as_deref()
      .map(|b| serde_json::from_str(b).expect("json body"))
      .unwrap_or(Value::Null);

    let response = match (req.method, segments.as_slice()) {
      | (Method::Get, ["api", "dashboard", "stats"]) => {
        self.stats()
      }
      | (Method::Get, ["api", "tasks"]) => self.list(req),
      | (Method::Post, ["api", "tasks"]) => {
        let payload: TaskPayload =
          serde_json::from_value(body).expect("task payload");
        if payload.title.trim().is_empty() {
          return Ok(reply(
            400,
            json!({ "success": false, "message": "Title is required" })
          ));
        }
        let id = self.insert_task(payload);
        (201, json!({ "success": true, "task": self.tasks[&id] }))
      }
      | (Method::Put, ["api", "tasks", id]) => {
        let id: i64 = id.parse().expect("task id");
        let payload: TaskPayload =
          serde_json::from_value(body).expect("task payload");
        if !self.tasks.contains_key(&id) {
          return Ok(not_found());
        }
        let task = self.task_from(id, payload);
        self.tasks.insert(id, task);
        (200, json!({ "success": true, "task": self.tasks[&id] }))
      }
      | (Method::Put, ["api", "tasks", id, "status"]) => {
        let id: i64 = id.parse().expect("task id");
        let status: TaskStatus =
          serde_json::from_value(body["status"].clone())
            .expect("status");
        match self.tasks.get_mut(&id) {
          | Some(task) => {
            task.status = status;
            (200, json!({ "success": true }))
          }
          | None => return Ok(not_found())
        }
      }
      | (Method::Delete, ["api", "tasks", id]) => {
        let id: i64 = id.parse().expect("task id");
        if self.tasks.remove(&id).is_none() {
          return Ok(not_found());
        }
        (200, json!({ "success": true, "message": "Task deleted successfully" }))
      }
      | (Method::Get, ["api", "tasks", id, "comments"]) => {
        let id: i64 = id.parse().expect("task id");
        if let Err(denied) = self.may_comment(id) {
          return Ok(denied);
        }
        let thread: Vec<&CommentDto> = self
          .comments
          .iter()
          .filter(|c| c.task_id == id)
          .collect();
        (200, json!({ "success": true, "comments": thread }))
      }
      | (Method::Post, ["api", "tasks", id, "comments"]) => {
        let id: i64 = id.parse().expect("task id");
        if let Err(denied) = self.may_comment(id) {
          return Ok(denied);
        }
        let text = body["comment_text"]
          .as_str()
          .unwrap_or_default()
          .trim()
          .to_string();
        if text.is_empty() {
          return Ok(reply(
            400,
            json!({ "success": false, "message": "Comment text is required" })
          ));
        }
        let comment = CommentDto {
          id: self.comments.len() as i64 + 1,
          task_id: id,
          user_id: Some(self.acting_as),
          user_name: self
            .users
            .get(&self.acting_as)
            .map(|u| u.name.clone()),
          comment_text: text,
          created_at: Some("2024-06-03T12:00:00".to_string())
        };
        self.comments.push(comment.clone());
        (201, json!({ "success": true, "comment": comment }))
      }
      | (Method::Get, ["api", "users"]) => {
        let users: Vec<&UserDto> =
          self.users.values().collect();
        (200, json!({ "success": true, "users": users }))
      }
      | (Method::Post, ["api", "users"]) => {
        let role = body["role"]
          .as_str()
          .and_then(Role::parse)
          .unwrap_or_default();
        let id = self.add_user(
          body["name"].as_str().unwrap_or_default(),
          body["email"].as_str().unwrap_or_default(),
          role
        );
        self.passwords.insert(
          id,
          body["password"]
            .as_str()
            .unwrap_or_default()
            .to_string()
        );
        (201, json!({ "success": true, "user": self.users[&id] }))
      }
      | (Method::Put, ["api", "users", id]) => {
        let id: i64 = id.parse().expect("user id");
        let update: UserUpdate =
          serde_json::from_value(body).expect("user update");
        let Some(user) = self.users.get_mut(&id) else {
          return Ok(not_found());
        };
        user.name = update.name;
        user.email = update.email;
        user.role = update.role;
        if let Some(password) = update.password {
          self.passwords.insert(id, password);
        }
        (200, json!({ "success": true }))
      }
      | (Method::Delete, ["api", "users", id]) => {
        let id: i64 = id.parse().expect("user id");
        if self.users.remove(&id).is_none() {
          return Ok(not_found());
        }
        (200, json!({ "success": true }))
      }
      | (Method::Get, ["api", "logout"]) => {
        (200, json!({ "success": true, "message": "Logged out successfully" }))
      }
      | _ => return Ok(not_found())
    };

    Ok(reply(response.0, response.1))
  }

  /// Admins see every thread; developers only those of their own tasks.
  fn may_comment(
    &self,
    task_id: i64
  ) -> Result<(), HttpReply> {
    let Some(task) = self.tasks.get(&task_id) else {
      return Err(not_found());
    };
    let admin = self
      .users
      .get(&self.acting_as)
      .is_some_and(|u| u.role.is_admin());
    if admin || task.assigned_to == Some(self.acting_as) {
      Ok(())
    } else {
      Err(reply(
        403,
        json!({ "success": false, "message": "Permission denied" })
      ))
    }
  }

  fn stats(&self) -> (u16, Value) {
    let count = |status: TaskStatus| {
      self
        .tasks
        .values()
        .filter(|t| t.status == status)
        .count()
    };
    (200, json!({
      "success": true,
      "stats": {
        "total_tasks": self.tasks.len(),
        "completed_tasks": count(TaskStatus::Completed),
        "pending_tasks": count(TaskStatus::Pending),
        "in_progress_tasks": count(TaskStatus::InProgress),
        "overdue_tasks": self.tasks.values().filter(|t| t.is_overdue).count()
      }
    }))
  }

  fn list(
    &self,
    req: &ApiRequest
  ) -> (u16, Value) {
    let page: u64 = req
      .query_value("page")
      .and_then(|v| v.parse().ok())
      .unwrap_or(1);
    let per_page: u64 = req
      .query_value("per_page")
      .and_then(|v| v.parse().ok())
      .unwrap_or(10)
      .clamp(1, 50);
    let desc =
      req.query_value("sort_dir") != Some("asc");

    let mut rows: Vec<&TaskDto> = self
      .tasks
      .values()
      .filter(|t| match req.query_value("assigned_to") {
        | None => true,
        | Some("unassigned") => t.assigned_to.is_none(),
        | Some(id) => t.assigned_to
          == id.parse::<i64>().ok()
      })
      .collect();
    if desc {
      rows.reverse();
    }

    let total = rows.len() as u64;
    let total_pages = total.div_ceil(per_page);
    let window: Vec<&TaskDto> = rows
      .into_iter()
      .skip(((page.max(1) - 1) * per_page) as usize)
      .take(per_page as usize)
      .collect();

    (200, json!({
      "success": true,
      "tasks": window,
      "meta": {
        "page": page,
        "per_page": per_page,
        "total_pages": total_pages,
        "total_items": total,
        "has_prev": page > 1,
        "has_next": page < total_pages
      }
    }))
  }
}

fn reply(
  status: u16,
  body: Value
) -> HttpReply {
  HttpReply::new(status, body.to_string())
}

fn not_found() -> HttpReply {
  reply(
    404,
    json!({ "success": false, "message": "Not found" })
  )
}

/// Runs effects to completion, one request at a time in issue order.
pub struct Harness {
  pub dash:       Dashboard,
  pub api:        FakeApi,
  pub alerts:     Vec<String>,
  pub prompts:    Vec<String>,
  pub navigated:  Vec<String>,
  pub issued:     Vec<RequestKind>,
  pub confirm:    bool
}

impl Harness {
  pub fn new(role: Role) -> Self {
    Self::with_settings(role, Settings::default())
  }

  pub fn with_settings(
    role: Role,
    settings: Settings
  ) -> Self {
    Self {
      dash: Dashboard::new(role, settings),
      api: FakeApi::seeded(),
      alerts: vec![],
      prompts: vec![],
      navigated: vec![],
      issued: vec![],
      confirm: true
    }
  }

  pub fn dispatch(&mut self, msg: Msg) {
    let mut inbox = VecDeque::from([msg]);
    while let Some(msg) = inbox.pop_front() {
      for effect in self.dash.handle(msg) {
        match effect {
          | Effect::Request {
            kind,
            request
          } => {
            self.issued.push(kind);
            let reply = self.api.handle(&request);
            inbox.push_back(Msg::Completed {
              kind,
              reply
            });
          }
          | Effect::Alert(text) => {
            self.alerts.push(text)
          }
          | Effect::Confirm {
            prompt,
            then
          } => {
            self.prompts.push(prompt);
            if self.confirm {
              inbox.push_back(then);
            }
          }
          | Effect::Navigate(to) => {
            self.navigated.push(to)
          }
        }
      }
    }
  }

  /// Clears recorded requests and alerts.
  pub fn reset_log(&mut self) {
    self.issued.clear();
    self.alerts.clear();
    self.prompts.clear();
  }

  pub fn task_ids(&self) -> Vec<i64> {
    self.dash.tasks().iter().map(|t| t.id).collect()
  }
}
