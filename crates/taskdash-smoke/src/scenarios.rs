use anyhow::{
  bail,
  ensure
};
use taskdash_core::Msg;
use taskdash_core::forms::TaskForm;
use taskdash_shared::{
  CommentDto,
  DashboardStats,
  PageMeta,
  TaskDto,
  TaskPriority,
  TaskStatus
};
use tracing::info;

use crate::cli::{
  CommentView,
  TaskView
};
use crate::driver::Driver;

const ROUNDTRIP_DESCRIPTION: &str =
  "created by taskdash-smoke";

/// Creates a Pending task, checks it on page 1 of the newest-first list,
/// deletes it and checks it is gone.
#[tracing::instrument(skip_all)]
pub async fn roundtrip(
  driver: &mut Driver
) -> anyhow::Result<()> {
  ensure!(
    driver.dashboard().role().is_admin(),
    "roundtrip needs an admin account"
  );

  driver.dispatch(Msg::Init).await;
  driver
    .dispatch(Msg::SortFieldChanged(
      "created_at".to_string()
    ))
    .await;
  driver
    .dispatch(Msg::SortDirChanged(
      "desc".to_string()
    ))
    .await;
  fail_on_alerts(driver)?;

  let title = format!(
    "smoke roundtrip {}",
    chrono::Utc::now().format("%Y%m%d%H%M%S")
  );
  let form = TaskForm {
    title: title.clone(),
    description: ROUNDTRIP_DESCRIPTION
      .to_string(),
    status: TaskStatus::Pending
      .as_str()
      .to_string(),
    ..TaskForm::blank()
  };
  driver
    .dispatch(Msg::SubmitNewTask(form))
    .await;
  expect_alert(
    driver,
    "Task created successfully!"
  )?;

  let Some(task) = driver
    .dashboard()
    .tasks()
    .iter()
    .find(|t| t.title == title)
    .cloned()
  else {
    bail!(
      "created task {title:?} missing from \
       page {}",
      driver.dashboard().query().page
    );
  };
  ensure!(
    driver.dashboard().query().page == 1,
    "task list left page 1"
  );
  check_created(&task)?;
  info!(id = task.id, "created task found on page 1");

  driver
    .dispatch(Msg::RequestDeleteTask(task.id))
    .await;
  expect_alert(
    driver,
    "Task deleted successfully!"
  )?;
  ensure!(
    driver
      .dashboard()
      .tasks()
      .iter()
      .all(|t| t.id != task.id),
    "task #{} still listed after delete",
    task.id
  );

  println!(
    "roundtrip ok: task #{} created and \
     deleted",
    task.id
  );
  Ok(())
}

#[tracing::instrument(skip(driver))]
pub async fn tasks(
  driver: &mut Driver,
  view: &TaskView
) -> anyhow::Result<()> {
  driver.dispatch(Msg::Init).await;
  if let Some(raw) = &view.sort_by {
    driver
      .dispatch(Msg::SortFieldChanged(
        raw.clone()
      ))
      .await;
  }
  if let Some(raw) = &view.sort_dir {
    driver
      .dispatch(Msg::SortDirChanged(
        raw.clone()
      ))
      .await;
  }
  if let Some(raw) = &view.per_page {
    driver
      .dispatch(Msg::PageSizeChanged(
        raw.clone()
      ))
      .await;
  }
  if let Some(raw) = &view.assignee {
    driver
      .dispatch(Msg::AssigneeFilterChanged(
        raw.clone()
      ))
      .await;
  }
  if view.page != 1 {
    driver
      .dispatch(Msg::ChangePage(view.page))
      .await;
  }
  fail_on_alerts(driver)?;
  ensure_page_loaded(driver.dashboard().meta())?;

  let dash = driver.dashboard();
  println!("{}", page_summary(dash.meta()));
  for task in dash.tasks() {
    println!("{}", task_line(task));
  }
  Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn stats(
  driver: &mut Driver
) -> anyhow::Result<()> {
  driver.dispatch(Msg::Init).await;
  fail_on_alerts(driver)?;
  let Some(stats) = driver.dashboard().stats()
  else {
    bail!("dashboard stats did not load");
  };
  print!("{}", stats_report(stats));
  Ok(())
}

/// Opens one task's thread, posts `--add` into it when given, and prints
/// the thread oldest first.
#[tracing::instrument(skip(driver))]
pub async fn comments(
  driver: &mut Driver,
  view: &CommentView
) -> anyhow::Result<()> {
  driver
    .dispatch(Msg::OpenComments(view.task))
    .await;
  fail_on_alerts(driver)?;

  if let Some(text) = &view.add {
    driver
      .dispatch(Msg::SubmitComment(
        view.task,
        text.clone()
      ))
      .await;
    expect_alert(
      driver,
      "Comment added successfully!"
    )?;
  }

  let thread = driver.dashboard().comments();
  if thread.is_empty() {
    println!(
      "task #{} has no comments",
      view.task
    );
  }
  for comment in thread {
    println!("{}", comment_line(comment));
  }
  Ok(())
}

fn expect_alert(
  driver: &mut Driver,
  wanted: &str
) -> anyhow::Result<()> {
  check_alerts(&driver.take_alerts(), wanted)
}

/// A write must report `wanted` and nothing else; a second alert means
/// one of the follow-up reloads failed.
fn check_alerts(
  alerts: &[String],
  wanted: &str
) -> anyhow::Result<()> {
  ensure!(
    alerts == [wanted],
    "expected {wanted:?}, got alerts \
     {alerts:?}"
  );
  Ok(())
}

/// The server numbers pages from 1, so page 0 means no task page ever
/// arrived.
fn ensure_page_loaded(
  meta: &PageMeta
) -> anyhow::Result<()> {
  ensure!(
    meta.page > 0,
    "task list never loaded"
  );
  Ok(())
}

fn fail_on_alerts(
  driver: &mut Driver
) -> anyhow::Result<()> {
  let alerts = driver.take_alerts();
  ensure!(
    alerts.is_empty(),
    "dashboard reported: {}",
    alerts.join("; ")
  );
  Ok(())
}

fn check_created(
  task: &TaskDto
) -> anyhow::Result<()> {
  ensure!(
    task.status == TaskStatus::Pending,
    "status is {}",
    task.status.as_str()
  );
  ensure!(
    task.priority == TaskPriority::Medium,
    "priority is {}",
    task.priority.as_str()
  );
  ensure!(
    task.description.as_deref()
      == Some(ROUNDTRIP_DESCRIPTION),
    "description is {:?}",
    task.description
  );
  ensure!(
    task.assigned_to.is_none(),
    "task unexpectedly assigned"
  );
  Ok(())
}

fn page_summary(meta: &PageMeta) -> String {
  format!(
    "page {} of {} ({} tasks, {} per page)",
    meta.page,
    meta.total_pages.max(1),
    meta.total_items,
    meta.per_page
  )
}

fn task_line(task: &TaskDto) -> String {
  let assignee = task
    .assigned_to_name
    .as_deref()
    .unwrap_or("Unassigned");
  let due = task
    .due_date
    .as_deref()
    .map(|d| format!(" due {d}"))
    .unwrap_or_default();
  let overdue = if task.is_overdue {
    " OVERDUE"
  } else {
    ""
  };
  format!(
    "#{:<5} {:<12} {:<7} {} [{}]{}{}",
    task.id,
    task.status.as_str(),
    task.priority.as_str(),
    task.title,
    assignee,
    due,
    overdue
  )
}

fn comment_line(
  comment: &CommentDto
) -> String {
  format!(
    "{} {}: {}",
    comment
      .created_at
      .as_deref()
      .unwrap_or("-"),
    comment
      .user_name
      .as_deref()
      .unwrap_or("Unknown"),
    comment.comment_text
  )
}

fn stats_report(
  stats: &DashboardStats
) -> String {
  format!(
    "total:       {}\ncompleted:   \
     {}\npending:     {}\nin progress: \
     {}\noverdue:     {}\n",
    stats.total_tasks,
    stats.completed_tasks,
    stats.pending_tasks,
    stats.in_progress_tasks,
    stats.overdue_tasks
  )
}
