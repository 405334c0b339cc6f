use taskdash_shared::{
  PageMeta,
  Role,
  UserId
};
use tracing::{
  debug,
  warn
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum SortField {
  CreatedAt,
  DueDate,
  Status
}

impl SortField {
  pub const ALL: [SortField; 3] = [
    SortField::CreatedAt,
    SortField::DueDate,
    SortField::Status
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | SortField::CreatedAt => {
        "created_at"
      }
      | SortField::DueDate => "due_date",
      | SortField::Status => "status"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | SortField::CreatedAt => {
        "Created"
      }
      | SortField::DueDate => "Due Date",
      | SortField::Status => "Status"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|f| f.as_str() == value.trim())
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum SortDir {
  Asc,
  Desc
}

impl SortDir {
  pub fn as_str(self) -> &'static str {
    match self {
      | SortDir::Asc => "asc",
      | SortDir::Desc => "desc"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | SortDir::Asc => "Ascending",
      | SortDir::Desc => "Descending"
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
      | "asc" => Some(SortDir::Asc),
      | "desc" => Some(SortDir::Desc),
      | _ => None
    }
  }
}

/// Which tasks the list is narrowed to. Only admins can narrow; the
/// backend already scopes developers to their own tasks.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AssigneeFilter {
  All,
  Unassigned,
  User(UserId)
}

impl AssigneeFilter {
  pub fn parse(
    value: &str
  ) -> Option<Self> {
    match value.trim() {
      | "" | "all" => {
        Some(AssigneeFilter::All)
      }
      | "unassigned" => {
        Some(AssigneeFilter::Unassigned)
      }
      | other => other
        .parse::<UserId>()
        .ok()
        .map(AssigneeFilter::User)
    }
  }

  pub fn as_value(self) -> String {
    match self {
      | AssigneeFilter::All => {
        "all".to_string()
      }
      | AssigneeFilter::Unassigned => {
        "unassigned".to_string()
      }
      | AssigneeFilter::User(id) => {
        id.to_string()
      }
    }
  }
}

/// Client-side pagination, sort and filter cursor for the task list.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ListQuery {
  pub page:     u32,
  pub per_page: u32,
  pub sort_by:  SortField,
  pub sort_dir: SortDir,
  pub assignee: AssigneeFilter
}

impl Default for ListQuery {
  fn default() -> Self {
    Self {
      page:     1,
      per_page: DEFAULT_PAGE_SIZE,
      sort_by:  SortField::CreatedAt,
      sort_dir: SortDir::Desc,
      assignee: AssigneeFilter::All
    }
  }
}

impl ListQuery {
  pub fn new(
    per_page: u32,
    sort_by: SortField,
    sort_dir: SortDir
  ) -> Self {
    Self {
      page: 1,
      per_page: per_page.max(1),
      sort_by,
      sort_dir,
      assignee: AssigneeFilter::All
    }
  }

  pub fn set_sort_field(
    &mut self,
    raw: &str
  ) {
    match SortField::parse(raw) {
      | Some(field) => {
        self.sort_by = field
      }
      | None => {
        warn!(value = %raw, "unknown sort field; keeping current")
      }
    }
    self.page = 1;
  }

  pub fn set_sort_dir(
    &mut self,
    raw: &str
  ) {
    match SortDir::parse(raw) {
      | Some(dir) => self.sort_dir = dir,
      | None => {
        warn!(value = %raw, "unknown sort direction; keeping current")
      }
    }
    self.page = 1;
  }

  /// Non-numeric or zero sizes fall back to the default size.
  pub fn set_page_size(
    &mut self,
    raw: &str
  ) {
    self.per_page = raw
      .trim()
      .parse::<u32>()
      .ok()
      .filter(|size| *size > 0)
      .unwrap_or(DEFAULT_PAGE_SIZE);
    self.page = 1;
  }

  pub fn set_assignee(
    &mut self,
    raw: &str
  ) {
    self.assignee =
      AssigneeFilter::parse(raw)
        .unwrap_or_else(|| {
          warn!(value = %raw, "unknown assignee filter; showing all");
          AssigneeFilter::All
        });
    self.page = 1;
  }

  /// Moves to `page` when it lies in `[1, total_pages]`. Returns whether
  /// the cursor moved.
  pub fn go_to(
    &mut self,
    page: i64,
    total_pages: u32
  ) -> bool {
    if page < 1
      || page > i64::from(total_pages)
    {
      debug!(
        page,
        total_pages,
        "page request out of range"
      );
      return false;
    }
    self.page = page as u32;
    true
  }

  /// Takes the page and size the server actually served.
  pub fn adopt(
    &mut self,
    meta: &PageMeta
  ) {
    if meta.page > 0 {
      self.page = meta.page;
    }
    if meta.per_page > 0 {
      self.per_page = meta.per_page;
    }
  }

  pub fn params(
    &self,
    role: Role
  ) -> Vec<(&'static str, String)> {
    let mut params = vec![
      ("page", self.page.to_string()),
      (
        "per_page",
        self.per_page.to_string()
      ),
      (
        "sort_by",
        self.sort_by.as_str().to_string()
      ),
      (
        "sort_dir",
        self
          .sort_dir
          .as_str()
          .to_string()
      ),
    ];
    if role.is_admin()
      && self.assignee
        != AssigneeFilter::All
    {
      params.push((
        "assigned_to",
        self.assignee.as_value()
      ));
    }
    params
  }
}
