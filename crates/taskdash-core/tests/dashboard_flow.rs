mod support;

use support::Harness;
use taskdash_core::api::{ApiRequest, HttpReply};
use taskdash_core::config::Settings;
use taskdash_core::forms::{TaskForm, UserForm};
use taskdash_core::{
  Effect,
  Modal,
  Msg,
  RequestKind,
  SubmitButton
};
use taskdash_shared::{Role, TaskPriority, TaskStatus};

fn request_of(effect: &Effect) -> &ApiRequest {
  match effect {
    | Effect::Request {
      request,
      ..
    } => request,
    | other => panic!("expected a request, got {other:?}")
  }
}

fn admin_with_tasks(count: usize) -> Harness {
  let mut h = Harness::new(Role::Admin);
  for n in 0..count {
    h.api.add_task(&format!("Task {n}"), None);
  }
  h.dispatch(Msg::Init);
  h.reset_log();
  h
}

#[test]
fn init_populates_every_region_for_admins() {
  let mut h = Harness::new(Role::Admin);
  h.api.add_task("Write report", Some(2));
  h.dispatch(Msg::Init);

  assert_eq!(h.dash.tasks().len(), 1);
  assert_eq!(h.dash.stats().map(|s| s.total_tasks), Some(1));
  assert_eq!(h.dash.users().len(), 3);
  assert_eq!(h.dash.developers().len(), 2);
  assert!(h.dash.developers().iter().all(|u| u.role == Role::Developer));
  assert!(h.dash.render_task_table().contains("Dev One"));
  assert!(h.alerts.is_empty());
}

#[test]
fn control_changes_reset_to_page_one_and_reload() {
  let mut h = admin_with_tasks(25);
  h.dispatch(Msg::ChangePage(3));
  assert_eq!(h.dash.query().page, 3);
  assert_eq!(h.dash.tasks().len(), 5);

  for msg in [
    Msg::SortFieldChanged("due_date".to_string()),
    Msg::SortDirChanged("asc".to_string()),
    Msg::PageSizeChanged("20".to_string()),
    Msg::AssigneeFilterChanged("unassigned".to_string()),
  ] {
    h.dispatch(Msg::ChangePage(2));
    assert_eq!(h.dash.query().page, 2);

    h.reset_log();
    h.dispatch(msg);
    assert_eq!(h.dash.query().page, 1);
    assert_eq!(h.issued, vec![RequestKind::Tasks]);
    let last = h.api.seen.last().expect("request issued");
    assert_eq!(last.query_value("page"), Some("1"));
  }
}

#[test]
fn page_navigation_outside_range_is_a_no_op() {
  let mut h = admin_with_tasks(25);
  assert_eq!(h.dash.total_pages(), 3);

  h.dispatch(Msg::ChangePage(0));
  h.dispatch(Msg::ChangePage(4));
  h.dispatch(Msg::ChangePage(-1));
  assert!(h.issued.is_empty());
  assert_eq!(h.dash.query().page, 1);

  h.dispatch(Msg::ChangePage(3));
  assert_eq!(h.issued, vec![RequestKind::Tasks]);
  assert_eq!(h.dash.meta().page, 3);
  assert!(h.dash.render_pagination().contains("Page 3 of 3"));
}

#[test]
fn pager_markup_round_trips_through_ui_actions() {
  let mut h = admin_with_tasks(12);
  let html = h.dash.render_pagination();
  assert!(html.contains(r#"data-action="page" data-page="2""#));

  let msg = Msg::from_ui_action("page", Some("2"), None).expect("page action");
  h.dispatch(msg);
  assert_eq!(h.dash.query().page, 2);
  assert_eq!(h.dash.tasks().len(), 2);
}

#[test]
fn task_mutations_refetch_tasks_and_stats() {
  let mut h = admin_with_tasks(2);
  let id = h.dash.tasks()[0].id;

  h.dispatch(Msg::OpenAddTask);
  h.dispatch(Msg::SubmitNewTask(TaskForm {
    title: "New".to_string(),
    ..TaskForm::blank()
  }));
  assert_eq!(
    h.issued,
    vec![RequestKind::CreateTask, RequestKind::Tasks, RequestKind::Stats]
  );
  assert_eq!(h.alerts, vec!["Task created successfully!".to_string()]);
  assert!(h.dash.modal().is_none());
  assert!(!h.dash.is_busy(SubmitButton::CreateTask));

  h.reset_log();
  h.dispatch(Msg::OpenEditTask(id));
  let Some(Modal::EditTask { form, .. }) = h.dash.modal().cloned() else {
    panic!("edit modal should be open");
  };
  h.dispatch(Msg::SubmitTaskEdit(
    id,
    TaskForm {
      priority: "High".to_string(),
      ..form
    },
  ));
  assert_eq!(
    h.issued,
    vec![RequestKind::UpdateTask(id), RequestKind::Tasks, RequestKind::Stats]
  );
  assert_eq!(h.alerts, vec!["Task updated successfully!".to_string()]);

  h.reset_log();
  h.dispatch(Msg::ChangeStatus(id, "Completed".to_string()));
  assert_eq!(
    h.issued,
    vec![RequestKind::UpdateStatus(id), RequestKind::Tasks, RequestKind::Stats]
  );
  assert!(h.alerts.is_empty());
  assert_eq!(h.dash.stats().map(|s| s.completed_tasks), Some(1));

  h.reset_log();
  h.dispatch(Msg::RequestDeleteTask(id));
  assert_eq!(
    h.prompts,
    vec!["Are you sure you want to delete this task?".to_string()]
  );
  assert_eq!(
    h.issued,
    vec![RequestKind::DeleteTask(id), RequestKind::Tasks, RequestKind::Stats]
  );
  assert!(!h.task_ids().contains(&id));
}

#[test]
fn declined_confirmation_issues_nothing() {
  let mut h = admin_with_tasks(1);
  h.confirm = false;
  let id = h.dash.tasks()[0].id;

  h.dispatch(Msg::RequestDeleteTask(id));
  assert_eq!(h.prompts.len(), 1);
  assert!(h.issued.is_empty());
  assert!(h.api.tasks.contains_key(&id));
}

#[test]
fn failed_status_update_alerts_and_reloads() {
  let mut h = admin_with_tasks(1);
  let id = h.dash.tasks()[0].id;
  h.api
    .reject
    .insert(format!("PUT /api/tasks/{id}/status"), "Permission denied".to_string());

  h.dispatch(Msg::ChangeStatus(id, "Completed".to_string()));
  assert_eq!(h.alerts, vec!["Error: Permission denied".to_string()]);
  assert_eq!(h.issued, vec![RequestKind::UpdateStatus(id), RequestKind::Tasks]);
  assert_eq!(h.dash.tasks()[0].status, TaskStatus::Pending);
}

#[test]
fn reload_with_identical_rows_still_changes_markup() {
  let mut h = admin_with_tasks(1);
  let before = h.dash.render_task_table();
  let id = h.dash.tasks()[0].id;
  h.api
    .reject
    .insert(format!("PUT /api/tasks/{id}/status"), "nope".to_string());

  h.dispatch(Msg::ChangeStatus(id, "On Hold".to_string()));
  assert_ne!(before, h.dash.render_task_table());
}

#[test]
fn transport_failure_shows_generic_prompt_and_keeps_modal() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::OpenAddTask);
  h.api.drop_next.push("POST /api/tasks".to_string());

  h.dispatch(Msg::SubmitNewTask(TaskForm {
    title: "Lost".to_string(),
    ..TaskForm::blank()
  }));
  assert_eq!(
    h.alerts,
    vec!["An error occurred. Please try again.".to_string()]
  );
  assert!(matches!(h.dash.modal(), Some(Modal::AddTask(_))));
  assert!(!h.dash.is_busy(SubmitButton::CreateTask));
  assert_eq!(h.issued, vec![RequestKind::CreateTask]);
}

#[test]
fn server_validation_message_is_surfaced() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::SubmitNewTask(TaskForm::blank()));
  assert_eq!(h.alerts, vec!["Error: Title is required".to_string()]);
}

#[test]
fn background_load_failures_are_quiet_by_default() {
  let mut h = admin_with_tasks(3);
  h.api.drop_next.push("GET /api/tasks".to_string());
  h.dispatch(Msg::SortDirChanged("asc".to_string()));
  assert!(h.alerts.is_empty());
  assert_eq!(h.dash.tasks().len(), 3);

  let mut loud = Harness::with_settings(
    Role::Admin,
    Settings {
      alert_on_load_failure: true,
      ..Settings::default()
    },
  );
  loud.api.drop_next.push("GET /api/dashboard/stats".to_string());
  loud.dispatch(Msg::Init);
  assert_eq!(loud.alerts.len(), 1);
}

#[test]
fn user_mutations_refetch_both_user_lists() {
  let mut h = admin_with_tasks(0);

  h.dispatch(Msg::OpenAddUser);
  h.dispatch(Msg::SubmitNewUser(UserForm {
    name: " New Dev ".to_string(),
    email: "NEW@Example.com".to_string(),
    password: "hunter22".to_string(),
    role: "developer".to_string(),
  }));
  assert_eq!(
    h.issued,
    vec![
      RequestKind::CreateUser,
      RequestKind::AllUsers,
      RequestKind::Developers,
      RequestKind::Stats
    ]
  );
  assert_eq!(h.alerts, vec!["User created successfully!".to_string()]);
  assert_eq!(h.dash.developers().len(), 3);
  let created = h
    .dash
    .users()
    .iter()
    .find(|u| u.email == "new@example.com")
    .expect("created user listed")
    .clone();
  assert_eq!(created.name, "New Dev");

  h.reset_log();
  h.dispatch(Msg::RequestDeleteUser(created.id));
  assert_eq!(
    h.prompts,
    vec!["Are you sure you want to delete this user? This action cannot be undone.".to_string()]
  );
  assert_eq!(
    h.issued,
    vec![
      RequestKind::DeleteUser(created.id),
      RequestKind::AllUsers,
      RequestKind::Developers,
      RequestKind::Stats
    ]
  );
  assert_eq!(h.dash.developers().len(), 2);
  assert!(h.dash.assignee_options().iter().all(|o| o.label != "New Dev"));
}

#[test]
fn editing_user_with_blank_password_omits_the_key() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::OpenEditUser(2));
  let Some(Modal::EditUser { id, form }) = h.dash.modal().cloned() else {
    panic!("edit user modal should be open");
  };
  assert!(form.password.is_empty());

  h.dispatch(Msg::SubmitUserEdit(
    id,
    UserForm {
      name: "Dev Renamed".to_string(),
      ..form
    },
  ));
  let sent = h
    .api
    .seen
    .iter()
    .find(|r| r.path == "/api/users/2")
    .and_then(|r| r.body.clone())
    .expect("update body");
  let body: serde_json::Value = serde_json::from_str(&sent).expect("json");
  assert!(body.get("password").is_none());
  assert_eq!(body["name"], "Dev Renamed");
  assert_eq!(h.alerts, vec!["User updated successfully!".to_string()]);
  assert!(h.dash.render_users_table().contains("Dev Renamed"));
}

#[test]
fn developers_never_send_the_assignee_filter() {
  let mut h = Harness::new(Role::Developer);
  h.dispatch(Msg::Init);
  assert_eq!(h.issued, vec![RequestKind::Stats, RequestKind::Tasks]);

  h.reset_log();
  h.dispatch(Msg::AssigneeFilterChanged("2".to_string()));
  let last = h.api.seen.last().expect("tasks request");
  assert_eq!(last.query_value("assigned_to"), None);
  assert!(!h.dash.render_task_table().contains("Actions"));
}

#[test]
fn logout_navigates_even_when_it_fails() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::Logout);
  assert_eq!(h.navigated, vec!["/login".to_string()]);

  let mut h = admin_with_tasks(0);
  h.api.drop_next.push("GET /api/logout".to_string());
  h.dispatch(Msg::Logout);
  assert_eq!(h.navigated, vec!["/login".to_string()]);
  assert!(h.alerts.is_empty());
}

#[test]
fn stale_responses_overwrite_in_arrival_order() {
  let mut h = admin_with_tasks(15);
  let first = h.dash.handle(Msg::ChangePage(2));
  let second = h.dash.handle(Msg::ChangePage(1));
  let page_two = h.api.handle(request_of(&first[0]));
  let page_one = h.api.handle(request_of(&second[0]));

  h.dash.handle(Msg::Completed {
    kind:  RequestKind::Tasks,
    reply: page_one
  });
  h.dash.handle(Msg::Completed {
    kind:  RequestKind::Tasks,
    reply: page_two
  });
  assert_eq!(h.dash.meta().page, 2);
}

#[test]
fn create_then_delete_round_trip() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::SubmitNewTask(TaskForm {
    title: "Round trip".to_string(),
    description: "end to end".to_string(),
    assigned_to: "2".to_string(),
    priority: "High".to_string(),
    status: "Pending".to_string(),
    start_date: String::new(),
    due_date: "2030-01-15".to_string(),
  }));

  let task = h
    .dash
    .tasks()
    .iter()
    .find(|t| t.title == "Round trip")
    .expect("created task on page 1")
    .clone();
  assert_eq!(h.dash.query().page, 1);
  assert_eq!(task.status, TaskStatus::Pending);
  assert_eq!(task.assigned_to, Some(2));
  assert_eq!(task.description.as_deref(), Some("end to end"));
  assert_eq!(task.due_date.as_deref(), Some("2030-01-15"));

  h.dispatch(Msg::RequestDeleteTask(task.id));
  assert!(!h.task_ids().contains(&task.id));
}

#[test]
fn script_titles_stay_inert_end_to_end() {
  let mut h = admin_with_tasks(0);
  h.dispatch(Msg::SubmitNewTask(TaskForm {
    title: "<script>alert(1)</script>".to_string(),
    ..TaskForm::blank()
  }));
  let html = h.dash.render_task_table();
  assert!(!html.contains("<script>"));
  assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn page_with_an_unknown_priority_still_renders_every_row() {
  let mut h = admin_with_tasks(0);
  let body = r#"{
    "success": true,
    "tasks": [
      {"id": 1, "title": "Known", "priority": "High", "status": "Pending"},
      {"id": 2, "title": "Odd", "priority": "Urgent", "status": "Blocked"}
    ],
    "meta": {"page": 1, "per_page": 10, "total_pages": 1, "total_items": 2,
             "has_prev": false, "has_next": false}
  }"#;

  let effects = h.dash.handle(Msg::Completed {
    kind:  RequestKind::Tasks,
    reply: Ok(HttpReply::new(200, body))
  });
  assert!(effects.is_empty());
  assert_eq!(h.dash.tasks().len(), 2);
  assert_eq!(h.dash.tasks()[1].priority, TaskPriority::Other);

  let html = h.dash.render_task_table();
  assert_eq!(html.matches("data-action=\"edit-task\"").count(), 2);
  assert!(html.contains("Odd"));
}

#[test]
fn comments_load_and_post_within_the_open_thread() {
  let mut h = admin_with_tasks(2);
  let id = h.task_ids()[0];
  let title = h.dash.tasks()[0].title.clone();

  h.dispatch(Msg::OpenComments(id));
  assert_eq!(
    h.dash.modal(),
    Some(&Modal::Comments { id, title })
  );
  assert!(h.dash.render_comments().contains("No comments yet"));

  let epoch = h.dash.modal_epoch();
  h.reset_log();
  h.dispatch(Msg::SubmitComment(id, "  Looks <good>  ".to_string()));
  assert_eq!(
    h.issued,
    vec![RequestKind::AddComment(id), RequestKind::Comments(id)]
  );
  assert_eq!(h.alerts, vec!["Comment added successfully!".to_string()]);
  assert_eq!(h.dash.comments().len(), 1);
  assert_eq!(h.dash.comments()[0].comment_text, "Looks <good>");
  assert!(h.dash.modal_epoch() > epoch);
  assert!(!h.dash.is_busy(SubmitButton::AddComment));

  let html = h.dash.render_comments();
  assert!(html.contains("Looks &lt;good&gt;"));
  assert!(html.contains(">Admin</span>"));
}

#[test]
fn blank_comment_is_refused_by_the_server() {
  let mut h = admin_with_tasks(1);
  let id = h.task_ids()[0];
  h.dispatch(Msg::OpenComments(id));
  h.reset_log();

  h.dispatch(Msg::SubmitComment(id, "   ".to_string()));
  assert_eq!(h.alerts, vec!["Error: Comment text is required".to_string()]);
  assert_eq!(h.issued, vec![RequestKind::AddComment(id)]);
  assert!(matches!(h.dash.modal(), Some(Modal::Comments { .. })));
}

#[test]
fn developers_only_see_threads_of_their_own_tasks() {
  let mut h = Harness::new(Role::Developer);
  h.api.acting_as = 2;
  let mine = h.api.add_task("Mine", Some(2));
  let theirs = h.api.add_task("Theirs", Some(3));
  h.dispatch(Msg::Init);
  h.reset_log();

  h.dispatch(Msg::SubmitComment(mine, "started".to_string()));
  h.dispatch(Msg::OpenComments(mine));
  assert_eq!(h.dash.comments().len(), 1);
  assert_eq!(h.dash.comments()[0].user_name.as_deref(), Some("Dev One"));

  h.reset_log();
  h.dispatch(Msg::OpenComments(theirs));
  assert_eq!(h.alerts, vec!["Error: Permission denied".to_string()]);
  assert!(h.dash.comments().is_empty());
}
