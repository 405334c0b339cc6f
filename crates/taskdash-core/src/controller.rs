//! The dashboard view-controller.
//!
//! [`Dashboard`] owns all UI state for one page load. It never performs
//! I/O: every UI action and every finished request arrives as a [`Msg`],
//! and the controller answers with [`Effect`]s for its host to carry out.
//! Responses are applied in arrival order, so a slow stale response can
//! still overwrite a newer one.

use taskdash_shared::{
  CommentDto,
  CommentPayload,
  CommentsResponse,
  DashboardStats,
  PageMeta,
  Role,
  StatsResponse,
  TaskDto,
  TaskId,
  TaskListResponse,
  TaskStatus,
  UserDto,
  UserId,
  UsersResponse
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::api::{
  self,
  ApiError,
  ApiRequest,
  HttpReply
};
use crate::config::Settings;
use crate::forms::{
  TaskForm,
  UserForm
};
use crate::query::ListQuery;
use crate::render::{
  self,
  Renderer,
  SelectOption
};

pub const CONFIRM_DELETE_TASK: &str =
  "Are you sure you want to delete this \
   task?";
pub const CONFIRM_DELETE_USER: &str =
  "Are you sure you want to delete this \
   user? This action cannot be undone.";

/// Identifies an in-flight request so its completion can be routed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum RequestKind {
  Stats,
  Tasks,
  Developers,
  AllUsers,
  CreateTask,
  UpdateTask(TaskId),
  UpdateStatus(TaskId),
  DeleteTask(TaskId),
  CreateUser,
  UpdateUser(UserId),
  DeleteUser(UserId),
  Comments(TaskId),
  AddComment(TaskId),
  Logout
}

/// Every input the controller reacts to, keyed by UI action.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
  Init,
  SortFieldChanged(String),
  SortDirChanged(String),
  PageSizeChanged(String),
  AssigneeFilterChanged(String),
  ChangePage(i64),
  OpenAddTask,
  OpenEditTask(TaskId),
  OpenAddUser,
  OpenEditUser(UserId),
  CloseModal,
  SubmitNewTask(TaskForm),
  SubmitTaskEdit(TaskId, TaskForm),
  ChangeStatus(TaskId, String),
  RequestDeleteTask(TaskId),
  DeleteTask(TaskId),
  SubmitNewUser(UserForm),
  SubmitUserEdit(UserId, UserForm),
  RequestDeleteUser(UserId),
  DeleteUser(UserId),
  OpenComments(TaskId),
  SubmitComment(TaskId, String),
  Logout,
  /// A request finished. `Err` carries a transport failure description.
  Completed {
    kind:  RequestKind,
    reply: Result<HttpReply, String>
  }
}

impl Msg {
  /// Decodes a `data-action` attribute from rendered markup. `id` is the
  /// `data-id` (or `data-page`) attribute and `value` the control value.
  pub fn from_ui_action(
    action: &str,
    id: Option<&str>,
    value: Option<&str>
  ) -> Option<Msg> {
    let id = id.and_then(|raw| {
      raw.trim().parse::<i64>().ok()
    });
    match (action, id) {
      | ("edit-task", Some(id)) => {
        Some(Msg::OpenEditTask(id))
      }
      | ("delete-task", Some(id)) => {
        Some(Msg::RequestDeleteTask(id))
      }
      | ("task-status", Some(id)) => {
        value.map(|v| {
          Msg::ChangeStatus(
            id,
            v.to_string()
          )
        })
      }
      | ("edit-user", Some(id)) => {
        Some(Msg::OpenEditUser(id))
      }
      | ("delete-user", Some(id)) => {
        Some(Msg::RequestDeleteUser(id))
      }
      | ("comments", Some(id)) => {
        Some(Msg::OpenComments(id))
      }
      | ("page", Some(page)) => {
        Some(Msg::ChangePage(page))
      }
      | _ => None
    }
  }

  /// Short name for logs; forms may carry passwords and are never logged.
  pub fn label(&self) -> &'static str {
    match self {
      | Msg::Init => "init",
      | Msg::SortFieldChanged(_) => {
        "sort_field_changed"
      }
      | Msg::SortDirChanged(_) => {
        "sort_dir_changed"
      }
      | Msg::PageSizeChanged(_) => {
        "page_size_changed"
      }
      | Msg::AssigneeFilterChanged(_) => {
        "assignee_filter_changed"
      }
      | Msg::ChangePage(_) => "change_page",
      | Msg::OpenAddTask => "open_add_task",
      | Msg::OpenEditTask(_) => {
        "open_edit_task"
      }
      | Msg::OpenAddUser => "open_add_user",
      | Msg::OpenEditUser(_) => {
        "open_edit_user"
      }
      | Msg::CloseModal => "close_modal",
      | Msg::SubmitNewTask(_) => {
        "submit_new_task"
      }
      | Msg::SubmitTaskEdit(..) => {
        "submit_task_edit"
      }
      | Msg::ChangeStatus(..) => {
        "change_status"
      }
      | Msg::RequestDeleteTask(_) => {
        "request_delete_task"
      }
      | Msg::DeleteTask(_) => "delete_task",
      | Msg::SubmitNewUser(_) => {
        "submit_new_user"
      }
      | Msg::SubmitUserEdit(..) => {
        "submit_user_edit"
      }
      | Msg::RequestDeleteUser(_) => {
        "request_delete_user"
      }
      | Msg::DeleteUser(_) => "delete_user",
      | Msg::OpenComments(_) => {
        "open_comments"
      }
      | Msg::SubmitComment(..) => {
        "submit_comment"
      }
      | Msg::Logout => "logout",
      | Msg::Completed {
        ..
      } => "completed"
    }
  }
}

/// Instructions for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  Request {
    kind:    RequestKind,
    request: ApiRequest
  },
  Alert(String),
  /// Ask the user; dispatch `then` only on confirmation.
  Confirm {
    prompt: String,
    then:   Msg
  },
  Navigate(String)
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum Modal {
  AddTask(TaskForm),
  EditTask { id: TaskId, form: TaskForm },
  AddUser(UserForm),
  EditUser { id: UserId, form: UserForm },
  /// Comment thread of one task; the listing lives on the dashboard.
  Comments { id: TaskId, title: String }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub enum SubmitButton {
  CreateTask,
  UpdateTask,
  CreateUser,
  UpdateUser,
  AddComment
}

impl SubmitButton {
  pub fn label(
    self,
    busy: bool
  ) -> &'static str {
    match (self, busy) {
      | (SubmitButton::CreateTask, false) => {
        "Create Task"
      }
      | (SubmitButton::CreateUser, false) => {
        "Create User"
      }
      | (SubmitButton::AddComment, false) => {
        "Add Comment"
      }
      | (SubmitButton::AddComment, true) => {
        "Adding..."
      }
      | (
        SubmitButton::UpdateTask
        | SubmitButton::UpdateUser,
        false
      ) => "Update",
      | (
        SubmitButton::CreateTask
        | SubmitButton::CreateUser,
        true
      ) => "Creating...",
      | (
        SubmitButton::UpdateTask
        | SubmitButton::UpdateUser,
        true
      ) => "Updating..."
    }
  }
}

pub struct Dashboard {
  role:          Role,
  settings:      Settings,
  renderer:      Renderer,
  query:         ListQuery,
  tasks:         Vec<TaskDto>,
  meta:          PageMeta,
  stats:         Option<DashboardStats>,
  developers:    Vec<UserDto>,
  users:         Vec<UserDto>,
  comments:      Vec<CommentDto>,
  modal:         Option<Modal>,
  busy:          Vec<SubmitButton>,
  task_revision: u64,
  modal_epoch:   u64
}

impl Dashboard {
  pub fn new(
    role: Role,
    settings: Settings
  ) -> Self {
    info!(role = role.as_str(), "dashboard created");
    Self {
      role,
      renderer: Renderer::new(&settings),
      query: ListQuery::new(
        settings.page_size,
        settings.sort_field,
        settings.sort_dir
      ),
      settings,
      tasks: vec![],
      meta: PageMeta::default(),
      stats: None,
      developers: vec![],
      users: vec![],
      comments: vec![],
      modal: None,
      busy: vec![],
      task_revision: 0,
      modal_epoch: 0
    }
  }

  #[tracing::instrument(skip_all, fields(msg = msg.label()))]
  pub fn handle(
    &mut self,
    msg: Msg
  ) -> Vec<Effect> {
    debug!("handling message");
    match msg {
      | Msg::Init => self.init(),
      | Msg::SortFieldChanged(raw) => {
        self.query.set_sort_field(&raw);
        vec![self.load_tasks()]
      }
      | Msg::SortDirChanged(raw) => {
        self.query.set_sort_dir(&raw);
        vec![self.load_tasks()]
      }
      | Msg::PageSizeChanged(raw) => {
        self.query.set_page_size(&raw);
        vec![self.load_tasks()]
      }
      | Msg::AssigneeFilterChanged(raw) => {
        self.query.set_assignee(&raw);
        vec![self.load_tasks()]
      }
      | Msg::ChangePage(page) => {
        let total_pages = self.total_pages();
        if self.query.go_to(page, total_pages)
        {
          vec![self.load_tasks()]
        } else {
          vec![]
        }
      }
      | Msg::OpenAddTask => {
        if self.admin_only("open_add_task")
        {
          self.open(Modal::AddTask(
            TaskForm::blank()
          ));
        }
        vec![]
      }
      | Msg::OpenEditTask(id) => {
        self.open_edit_task(id);
        vec![]
      }
      | Msg::OpenAddUser => {
        if self.admin_only("open_add_user")
        {
          self.open(Modal::AddUser(
            UserForm::blank()
          ));
        }
        vec![]
      }
      | Msg::OpenEditUser(id) => {
        self.open_edit_user(id);
        vec![]
      }
      | Msg::CloseModal => {
        self.modal = None;
        self.comments.clear();
        vec![]
      }
      | Msg::SubmitNewTask(form) => self
        .submit(
          SubmitButton::CreateTask,
          RequestKind::CreateTask,
          ApiRequest::create_task(
            &form.to_payload()
          )
        ),
      | Msg::SubmitTaskEdit(id, form) => {
        self.submit(
          SubmitButton::UpdateTask,
          RequestKind::UpdateTask(id),
          ApiRequest::update_task(
            id,
            &form.to_payload()
          )
        )
      }
      | Msg::ChangeStatus(id, raw) => {
        self.change_status(id, &raw)
      }
      | Msg::RequestDeleteTask(id) => {
        if !self.admin_only("delete_task") {
          return vec![];
        }
        vec![Effect::Confirm {
          prompt: CONFIRM_DELETE_TASK
            .to_string(),
          then:   Msg::DeleteTask(id)
        }]
      }
      | Msg::DeleteTask(id) => {
        if !self.admin_only("delete_task") {
          return vec![];
        }
        vec![Effect::Request {
          kind:    RequestKind::DeleteTask(
            id
          ),
          request: ApiRequest::delete_task(
            id
          )
        }]
      }
      | Msg::SubmitNewUser(form) => self
        .submit(
          SubmitButton::CreateUser,
          RequestKind::CreateUser,
          ApiRequest::create_user(
            &form.to_create()
          )
        ),
      | Msg::SubmitUserEdit(id, form) => {
        self.submit(
          SubmitButton::UpdateUser,
          RequestKind::UpdateUser(id),
          ApiRequest::update_user(
            id,
            &form.to_update()
          )
        )
      }
      | Msg::RequestDeleteUser(id) => {
        if !self.admin_only("delete_user") {
          return vec![];
        }
        vec![Effect::Confirm {
          prompt: CONFIRM_DELETE_USER
            .to_string(),
          then:   Msg::DeleteUser(id)
        }]
      }
      | Msg::DeleteUser(id) => {
        if !self.admin_only("delete_user") {
          return vec![];
        }
        vec![Effect::Request {
          kind:    RequestKind::DeleteUser(
            id
          ),
          request: ApiRequest::delete_user(
            id
          )
        }]
      }
      | Msg::OpenComments(id) => {
        self.open_comments(id)
      }
      | Msg::SubmitComment(id, text) => {
        self.begin(
          SubmitButton::AddComment,
          RequestKind::AddComment(id),
          ApiRequest::add_comment(
            id,
            &CommentPayload {
              comment_text: text
            }
          )
        )
      }
      | Msg::Logout => {
        vec![Effect::Request {
          kind:    RequestKind::Logout,
          request: ApiRequest::logout()
        }]
      }
      | Msg::Completed {
        kind,
        reply
      } => self.complete(kind, reply)
    }
  }

  fn init(&mut self) -> Vec<Effect> {
    let mut effects = vec![
      self.load_stats(),
      self.load_tasks(),
    ];
    if self.role.is_admin() {
      effects.push(self.load_developers());
      effects.push(self.load_all_users());
    }
    effects
  }

  fn load_stats(&self) -> Effect {
    Effect::Request {
      kind:    RequestKind::Stats,
      request: ApiRequest::stats()
    }
  }

  fn load_tasks(&self) -> Effect {
    debug!(query = ?self.query, "loading tasks");
    Effect::Request {
      kind:    RequestKind::Tasks,
      request: ApiRequest::tasks(
        self.query.params(self.role)
      )
    }
  }

  fn load_developers(&self) -> Effect {
    Effect::Request {
      kind:    RequestKind::Developers,
      request: ApiRequest::users()
    }
  }

  fn load_all_users(&self) -> Effect {
    Effect::Request {
      kind:    RequestKind::AllUsers,
      request: ApiRequest::users()
    }
  }

  fn admin_only(
    &self,
    action: &str
  ) -> bool {
    if !self.role.is_admin() {
      warn!(
        action,
        "ignoring admin-only action"
      );
    }
    self.role.is_admin()
  }

  fn open(&mut self, modal: Modal) {
    self.modal_epoch += 1;
    self.modal = Some(modal);
  }

  fn open_edit_task(&mut self, id: TaskId) {
    if !self.admin_only("edit_task") {
      return;
    }
    let Some(task) =
      self.tasks.iter().find(|t| t.id == id)
    else {
      debug!(id, "edit requested for task not on this page");
      return;
    };
    let form = TaskForm::from_task(task);
    self.open(Modal::EditTask { id, form });
  }

  fn open_edit_user(&mut self, id: UserId) {
    if !self.admin_only("edit_user") {
      return;
    }
    let Some(user) =
      self.users.iter().find(|u| u.id == id)
    else {
      debug!(id, "edit requested for unknown user");
      return;
    };
    let form = UserForm::from_user(user);
    self.open(Modal::EditUser { id, form });
  }

  fn submit(
    &mut self,
    button: SubmitButton,
    kind: RequestKind,
    request: Result<ApiRequest, ApiError>
  ) -> Vec<Effect> {
    if !self.admin_only("submit") {
      return vec![];
    }
    self.begin(button, kind, request)
  }

  /// Marks `button` busy and issues `request`, unless the button is
  /// already waiting on an earlier one.
  fn begin(
    &mut self,
    button: SubmitButton,
    kind: RequestKind,
    request: Result<ApiRequest, ApiError>
  ) -> Vec<Effect> {
    if self.is_busy(button) {
      debug!(?button, "submit ignored while request in flight");
      return vec![];
    }
    match request {
      | Ok(request) => {
        self.busy.push(button);
        vec![Effect::Request {
          kind,
          request
        }]
      }
      | Err(err) => {
        error!(error = %err, "failed to encode request");
        vec![Effect::Alert(
          err.user_message()
        )]
      }
    }
  }

  /// Open to both roles; the backend refuses developers who are not
  /// assigned to the task.
  fn open_comments(
    &mut self,
    id: TaskId
  ) -> Vec<Effect> {
    let title = self
      .tasks
      .iter()
      .find(|t| t.id == id)
      .map_or_else(
        || format!("Task #{id}"),
        |t| t.title.clone()
      );
    self.comments.clear();
    self.open(Modal::Comments { id, title });
    vec![self.load_comments(id)]
  }

  fn load_comments(
    &self,
    id: TaskId
  ) -> Effect {
    Effect::Request {
      kind:    RequestKind::Comments(id),
      request: ApiRequest::task_comments(id)
    }
  }

  fn comments_open_for(
    &self,
    id: TaskId
  ) -> bool {
    matches!(
      self.modal,
      Some(Modal::Comments { id: open, .. }) if open == id
    )
  }

  fn change_status(
    &mut self,
    id: TaskId,
    raw: &str
  ) -> Vec<Effect> {
    let Some(status) =
      TaskStatus::parse(raw)
    else {
      warn!(id, value = %raw, "unknown status selected");
      return vec![self.load_tasks()];
    };
    match ApiRequest::update_status(
      id, status
    ) {
      | Ok(request) => {
        vec![Effect::Request {
          kind: RequestKind::UpdateStatus(
            id
          ),
          request
        }]
      }
      | Err(err) => {
        error!(error = %err, "failed to encode status update");
        vec![
          Effect::Alert(
            err.user_message()
          ),
          self.load_tasks(),
        ]
      }
    }
  }

  fn release(
    &mut self,
    button: SubmitButton
  ) {
    self.busy.retain(|b| *b != button);
  }

  fn close_modal_if(
    &mut self,
    pred: impl Fn(&Modal) -> bool
  ) {
    if self.modal.as_ref().is_some_and(pred)
    {
      self.modal = None;
    }
  }

  fn load_failed(
    &self,
    kind: RequestKind,
    err: &ApiError
  ) -> Vec<Effect> {
    error!(?kind, error = %err, "load failed");
    if self.settings.alert_on_load_failure {
      vec![Effect::Alert(
        err.user_message()
      )]
    } else {
      vec![]
    }
  }

  fn after_task_write(
    &self,
    message: &str
  ) -> Vec<Effect> {
    vec![
      self.load_tasks(),
      self.load_stats(),
      Effect::Alert(message.to_string()),
    ]
  }

  fn after_user_write(
    &self,
    message: &str
  ) -> Vec<Effect> {
    vec![
      self.load_all_users(),
      self.load_developers(),
      self.load_stats(),
      Effect::Alert(message.to_string()),
    ]
  }

  fn complete(
    &mut self,
    kind: RequestKind,
    reply: Result<HttpReply, String>
  ) -> Vec<Effect> {
    let reply =
      reply.map_err(ApiError::Transport);
    match kind {
      | RequestKind::Stats => {
        match reply.and_then(|r| {
          api::decode::<StatsResponse>(&r)
        }) {
          | Ok(body) => {
            self.stats = Some(body.stats);
            vec![]
          }
          | Err(err) => {
            self.load_failed(kind, &err)
          }
        }
      }
      | RequestKind::Tasks => {
        match reply.and_then(|r| {
          api::decode::<TaskListResponse>(&r)
        }) {
          | Ok(body) => {
            self.apply_task_page(body);
            vec![]
          }
          | Err(err) => {
            self.load_failed(kind, &err)
          }
        }
      }
      | RequestKind::Developers => {
        match reply.and_then(|r| {
          api::decode::<UsersResponse>(&r)
        }) {
          | Ok(body) => {
            self.developers = body
              .users
              .into_iter()
              .filter(|u| {
                u.role == Role::Developer
              })
              .collect();
            vec![]
          }
          | Err(err) => {
            self.load_failed(kind, &err)
          }
        }
      }
      | RequestKind::AllUsers => {
        match reply.and_then(|r| {
          api::decode::<UsersResponse>(&r)
        }) {
          | Ok(body) => {
            self.users = body.users;
            vec![]
          }
          | Err(err) => {
            self.load_failed(kind, &err)
          }
        }
      }
      | RequestKind::CreateTask => {
        self.release(SubmitButton::CreateTask);
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!("task created");
            self.close_modal_if(|m| {
              matches!(m, Modal::AddTask(_))
            });
            self.after_task_write(
              "Task created successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::UpdateTask(id) => {
        self.release(SubmitButton::UpdateTask);
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "task updated");
            self.close_modal_if(|m| {
              matches!(m, Modal::EditTask { .. })
            });
            self.after_task_write(
              "Task updated successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::UpdateStatus(id) => {
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "task status updated");
            vec![
              self.load_tasks(),
              self.load_stats(),
            ]
          }
          | Err(err) => {
            // Reload so the select shows the stored status again.
            let mut effects =
              request_failed(kind, &err);
            effects.push(self.load_tasks());
            effects
          }
        }
      }
      | RequestKind::DeleteTask(id) => {
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "task deleted");
            self.after_task_write(
              "Task deleted successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::CreateUser => {
        self.release(SubmitButton::CreateUser);
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!("user created");
            self.close_modal_if(|m| {
              matches!(m, Modal::AddUser(_))
            });
            self.after_user_write(
              "User created successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::UpdateUser(id) => {
        self.release(SubmitButton::UpdateUser);
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "user updated");
            self.close_modal_if(|m| {
              matches!(m, Modal::EditUser { .. })
            });
            self.after_user_write(
              "User updated successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::DeleteUser(id) => {
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "user deleted");
            self.after_user_write(
              "User deleted successfully!"
            )
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::Comments(id) => {
        match reply.and_then(|r| {
          api::decode::<CommentsResponse>(&r)
        }) {
          | Ok(body) if self.comments_open_for(id) => {
            self.comments = body.comments;
            vec![]
          }
          | Ok(_) => {
            debug!(id, "comments arrived after their modal closed");
            vec![]
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::AddComment(id) => {
        self.release(SubmitButton::AddComment);
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => {
            info!(id, "comment added");
            let mut effects = vec![];
            if self.comments_open_for(id) {
              // New epoch clears the host's draft.
              self.modal_epoch += 1;
              effects.push(self.load_comments(id));
            }
            effects.push(Effect::Alert(
              "Comment added successfully!"
                .to_string()
            ));
            effects
          }
          | Err(err) => {
            request_failed(kind, &err)
          }
        }
      }
      | RequestKind::Logout => {
        match reply
          .and_then(|r| api::acknowledge(&r))
        {
          | Ok(()) => info!("logged out"),
          | Err(err) => {
            warn!(error = %err, "logout failed; leaving anyway")
          }
        }
        vec![Effect::Navigate(
          self.settings.login_path.clone()
        )]
      }
    }
  }

  fn apply_task_page(
    &mut self,
    body: TaskListResponse
  ) {
    self.query.adopt(&body.meta);
    self.meta = body.meta;
    self.tasks = body.tasks;
    self.task_revision += 1;
    debug!(
      rows = self.tasks.len(),
      page = self.query.page,
      total_pages = self.total_pages(),
      "task page applied"
    );
  }

  pub fn role(&self) -> Role {
    self.role
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn query(&self) -> &ListQuery {
    &self.query
  }

  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn meta(&self) -> &PageMeta {
    &self.meta
  }

  /// Server page count, never below one.
  pub fn total_pages(&self) -> u32 {
    self.meta.total_pages.max(1)
  }

  pub fn stats(
    &self
  ) -> Option<&DashboardStats> {
    self.stats.as_ref()
  }

  pub fn developers(&self) -> &[UserDto] {
    &self.developers
  }

  pub fn users(&self) -> &[UserDto] {
    &self.users
  }

  /// Comments of the task whose thread is open, oldest first.
  pub fn comments(&self) -> &[CommentDto] {
    &self.comments
  }

  pub fn modal(&self) -> Option<&Modal> {
    self.modal.as_ref()
  }

  /// Bumped whenever a modal opens; hosts key their form markup on it
  /// so reopened forms start from the prefilled values.
  pub fn modal_epoch(&self) -> u64 {
    self.modal_epoch
  }

  pub fn is_busy(
    &self,
    button: SubmitButton
  ) -> bool {
    self.busy.contains(&button)
  }

  pub fn render_task_table(&self) -> String {
    self.renderer.task_table(
      &self.tasks,
      self.role,
      self.task_revision
    )
  }

  pub fn render_pagination(&self) -> String {
    self.renderer.pagination(
      &self.meta,
      self.query.page,
      self.query.per_page
    )
  }

  pub fn render_users_table(&self) -> String {
    self.renderer.users_table(&self.users)
  }

  pub fn render_comments(&self) -> String {
    self.renderer.comment_list(&self.comments)
  }

  pub fn assignee_options(
    &self
  ) -> Vec<SelectOption> {
    render::assignee_filter_options(
      &self.developers
    )
  }

  pub fn developer_options(
    &self
  ) -> Vec<SelectOption> {
    render::developer_options(
      &self.developers
    )
  }

  /// Configured page sizes, plus the current size if the server
  /// settled on one outside the list.
  pub fn page_size_options(&self) -> Vec<u32> {
    let mut sizes =
      self.settings.page_sizes.clone();
    if !sizes.contains(&self.query.per_page)
    {
      sizes.push(self.query.per_page);
      sizes.sort_unstable();
    }
    sizes
  }
}

fn request_failed(
  kind: RequestKind,
  err: &ApiError
) -> Vec<Effect> {
  error!(?kind, error = %err, "request failed");
  vec![Effect::Alert(err.user_message())]
}
