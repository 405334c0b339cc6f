use chrono::NaiveDate;
use taskdash_shared::{
    CommentDto, PageMeta, Role, TaskDto, TaskPriority, TaskStatus, UserDto,
};

use crate::config::Settings;

/// Turns controller state into HTML fragments. Every interpolated text
/// field goes through [`escape_html`].
#[derive(Debug, Clone)]
pub struct Renderer {
    description_budget: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            description_budget: settings.description_budget,
        }
    }

    /// Whole task table. `revision` changes on every successful load so
    /// hosts replace the markup even when the rows are identical.
    #[tracing::instrument(skip(self, tasks), fields(rows = tasks.len()))]
    pub fn task_table(&self, tasks: &[TaskDto], role: Role, revision: u64) -> String {
        let mut out = String::with_capacity(512 + tasks.len() * 1024);
        out.push_str(&format!(
            r#"<table class="min-w-full divide-y divide-gray-200" data-revision="{revision}"><thead class="bg-gray-50"><tr>"#
        ));
        let mut headers = vec![
            "ID",
            "Title",
            "Description",
            "Assigned To",
            "Priority",
            "Status",
            "Start Date",
            "Due Date",
        ];
        if role.is_admin() {
            headers.push("Actions");
        }
        for header in &headers {
            out.push_str(&format!(
                r#"<th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{header}</th>"#
            ));
        }
        out.push_str(r#"</tr></thead><tbody class="bg-white divide-y divide-gray-200">"#);

        if tasks.is_empty() {
            out.push_str(&format!(
                r#"<tr><td colspan="{}" class="px-6 py-4 text-center text-gray-500">No tasks found</td></tr>"#,
                headers.len()
            ));
        } else {
            for task in tasks {
                self.task_row(&mut out, task, role);
            }
        }

        out.push_str("</tbody></table>");
        out
    }

    fn task_row(&self, out: &mut String, task: &TaskDto, role: Role) {
        let row_class = if task.is_overdue { "bg-red-50" } else { "" };
        let due_class = if task.is_overdue {
            "text-red-600 font-semibold"
        } else {
            ""
        };

        out.push_str(&format!(
            r#"<tr class="{row_class}"><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">#{0}</td><td class="px-6 py-4 text-sm text-gray-900"><div>{1}</div><button type="button" data-action="comments" data-id="{0}" class="text-xs text-blue-600 hover:text-blue-900">Comments</button></td>"#,
            task.id,
            escape_html(&task.title)
        ));

        let description = task.description.as_deref().unwrap_or_default();
        match truncate_chars(description, self.description_budget) {
            Some(short) => {
                out.push_str(&format!(
                    r#"<td class="px-6 py-4 text-sm text-gray-600 max-w-xs" title="{}"><div class="truncate">{}</div></td>"#,
                    escape_html(description),
                    escape_html(&short)
                ));
            }
            None => {
                let shown = if description.is_empty() { "-" } else { description };
                out.push_str(&format!(
                    r#"<td class="px-6 py-4 text-sm text-gray-600 max-w-xs">{}</td>"#,
                    escape_html(shown)
                ));
            }
        }

        let assignee = task.assigned_to_name.as_deref().unwrap_or("Unassigned");
        out.push_str(&format!(
            r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm">{}</td>"#,
            escape_html(assignee),
            priority_badge(task.priority)
        ));

        out.push_str(&format!(
            r#"<td class="px-6 py-4 whitespace-nowrap text-sm"><select data-action="task-status" data-id="{}" class="px-2 py-1 rounded text-xs font-medium {}">"#,
            task.id,
            status_class(task.status)
        ));
        for status in TaskStatus::ALL {
            let selected = if status == task.status { " selected" } else { "" };
            out.push_str(&format!(
                r#"<option value="{0}"{selected}>{0}</option>"#,
                status.as_str()
            ));
        }
        out.push_str("</select></td>");

        out.push_str(&format!(
            r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm {due_class}">{}</td>"#,
            optional_date(task.start_date.as_deref()),
            optional_date(task.due_date.as_deref())
        ));

        if role.is_admin() {
            out.push_str(&format!(
                r#"<td class="px-6 py-4 whitespace-nowrap text-sm font-medium"><button type="button" data-action="edit-task" data-id="{0}" class="text-blue-600 hover:text-blue-900 mr-3">Edit</button><button type="button" data-action="delete-task" data-id="{0}" class="text-red-600 hover:text-red-900">Delete</button></td>"#,
                task.id
            ));
        }

        out.push_str("</tr>");
    }

    /// Pager below the task table; empty when everything fits on one page.
    pub fn pagination(&self, meta: &PageMeta, page: u32, per_page: u32) -> String {
        let total_pages = meta.total_pages.max(1);
        if meta.total_pages <= 1 {
            return String::new();
        }

        let total = meta.total_items;
        let start = if total == 0 {
            0
        } else {
            u64::from(page.saturating_sub(1)) * u64::from(per_page) + 1
        };
        let end = (u64::from(page) * u64::from(per_page)).min(total);

        let mut out = String::with_capacity(1024);
        out.push_str(&format!(
            r#"<div class="text-sm text-gray-600">Showing <span class="font-semibold">{start}</span> to <span class="font-semibold">{end}</span> of <span class="font-semibold">{total}</span> tasks</div><div class="flex items-center gap-3">"#
        ));
        pager_button(&mut out, "Previous", meta.has_prev, page.saturating_sub(1));
        out.push_str(&format!(
            r#"<span class="text-sm text-gray-600">Page {page} of {total_pages}</span>"#
        ));
        pager_button(&mut out, "Next", meta.has_next, page.saturating_add(1));
        out.push_str("</div>");
        out
    }

    pub fn users_table(&self, users: &[UserDto]) -> String {
        let mut out = String::with_capacity(512 + users.len() * 512);
        out.push_str(r#"<table class="min-w-full divide-y divide-gray-200"><thead class="bg-gray-50"><tr>"#);
        for header in ["ID", "Name", "Email", "Role", "Created", "Actions"] {
            out.push_str(&format!(
                r#"<th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{header}</th>"#
            ));
        }
        out.push_str(r#"</tr></thead><tbody class="bg-white divide-y divide-gray-200">"#);

        if users.is_empty() {
            out.push_str(
                r#"<tr><td colspan="6" class="px-6 py-4 text-center text-gray-500">No users found</td></tr>"#,
            );
        }

        for user in users {
            let role_badge = match user.role {
                Role::Admin => {
                    r#"<span class="px-2 py-1 rounded-full text-xs font-medium bg-purple-100 text-purple-800">Admin</span>"#
                }
                Role::Developer => {
                    r#"<span class="px-2 py-1 rounded-full text-xs font-medium bg-blue-100 text-blue-800">Developer</span>"#
                }
            };
            out.push_str(&format!(
                r#"<tr><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">#{0}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">{1}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{2}</td><td class="px-6 py-4 whitespace-nowrap text-sm">{3}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{4}</td><td class="px-6 py-4 whitespace-nowrap text-sm font-medium"><button type="button" data-action="edit-user" data-id="{0}" class="text-blue-600 hover:text-blue-900 mr-3">Edit</button><button type="button" data-action="delete-user" data-id="{0}" class="text-red-600 hover:text-red-900">Delete</button></td></tr>"#,
                user.id,
                escape_html(&user.name),
                escape_html(&user.email),
                role_badge,
                optional_date(user.created_at.as_deref())
            ));
        }

        out.push_str("</tbody></table>");
        out
    }

    /// Comment thread body for the comments modal.
    pub fn comment_list(&self, comments: &[CommentDto]) -> String {
        if comments.is_empty() {
            return r#"<p class="text-sm text-gray-500">No comments yet</p>"#.to_string();
        }
        let mut out = String::with_capacity(comments.len() * 256);
        out.push_str(r#"<ul class="space-y-3">"#);
        for comment in comments {
            let author = comment.user_name.as_deref().unwrap_or("Unknown");
            out.push_str(&format!(
                r#"<li class="border-b pb-2"><div class="text-xs text-gray-500"><span class="font-semibold text-gray-700">{}</span> {}</div><p class="text-sm text-gray-800 whitespace-pre-wrap">{}</p></li>"#,
                escape_html(author),
                optional_date(comment.created_at.as_deref()),
                escape_html(&comment.comment_text)
            ));
        }
        out.push_str("</ul>");
        out
    }
}

fn pager_button(out: &mut String, label: &str, enabled: bool, target: u32) {
    if enabled {
        out.push_str(&format!(
            r#"<button type="button" data-action="page" data-page="{target}" class="px-4 py-2 rounded-lg border text-sm text-gray-700 hover:bg-gray-100">{label}</button>"#
        ));
    } else {
        out.push_str(&format!(
            r#"<button type="button" disabled class="px-4 py-2 rounded-lg border text-sm text-gray-400 cursor-not-allowed">{label}</button>"#
        ));
    }
}

/// Options for the task list's assignee filter.
pub fn assignee_filter_options(developers: &[UserDto]) -> Vec<SelectOption> {
    let mut options = vec![
        SelectOption::new("all", "All Developers"),
        SelectOption::new("unassigned", "Unassigned"),
    ];
    options.extend(
        developers
            .iter()
            .map(|user| SelectOption::new(user.id.to_string(), user.name.clone())),
    );
    options
}

/// Options for the assignment dropdowns of the task modals.
pub fn developer_options(developers: &[UserDto]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("", "Select Developer")];
    options.extend(
        developers
            .iter()
            .map(|user| SelectOption::new(user.id.to_string(), user.name.clone())),
    );
    options
}

pub fn priority_badge(priority: TaskPriority) -> String {
    let colors = match priority {
        TaskPriority::Low => "bg-green-100 text-green-800",
        TaskPriority::Medium => "bg-yellow-100 text-yellow-800",
        TaskPriority::High => "bg-red-100 text-red-800",
        TaskPriority::Other => "bg-gray-100 text-gray-800",
    };
    format!(
        r#"<span class="px-2 py-1 rounded-full text-xs font-medium {colors}">{}</span>"#,
        priority.as_str()
    )
}

pub fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "bg-gray-100 text-gray-800",
        TaskStatus::InProgress => "bg-blue-100 text-blue-800",
        TaskStatus::Completed => "bg-green-100 text-green-800",
        TaskStatus::OnHold => "bg-yellow-100 text-yellow-800",
        TaskStatus::Other => "bg-gray-100 text-gray-800",
    }
}

/// Escapes text for both element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// `Some(shortened)` when `text` exceeds `budget` characters.
pub fn truncate_chars(text: &str, budget: usize) -> Option<String> {
    if text.chars().count() <= budget {
        return None;
    }
    let mut short: String = text.chars().take(budget).collect();
    short.push_str("...");
    Some(short)
}

/// `2025-01-05` or `2025-01-05T10:00:00` becomes `Jan 5, 2025`.
/// Anything unparseable is shown as-is.
pub fn format_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => escape_html(raw),
    }
}

fn optional_date(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => format_date(value),
        _ => "-".to_string(),
    }
}
