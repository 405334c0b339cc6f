use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace
};

use crate::query::{
  DEFAULT_PAGE_SIZE,
  SortDir,
  SortField
};

pub const DEFAULT_DESCRIPTION_BUDGET:
  usize = 100;

/// Raw `key = value` settings. Later sources win: defaults, then files
/// or inline blocks in load order, then explicit overrides.
#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      ("api.base", ""),
      ("login.path", "/login"),
      ("page.size", "10"),
      ("page.sizes", "5,10,20,50"),
      ("sort.field", "created_at"),
      ("sort.dir", "desc"),
      ("description.truncate", "100"),
      ("alerts.load_failures", "off")
    ] {
      map.insert(
        key.to_string(),
        value.to_string()
      );
    }

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument]
  pub fn load(
    path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();
    if let Some(path) = path {
      info!(config = %path.display(), "loading config file");
      cfg.load_file(path)?;
    }
    Ok(cfg)
  }

  #[tracing::instrument(skip(self))]
  pub fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    self.parse_str(
      &text,
      &path.display().to_string()
    )?;
    self
      .loaded_files
      .push(path.to_path_buf());
    Ok(())
  }

  /// Parses `key = value` lines; blank lines and `#` comments are skipped.
  pub fn parse_str(
    &mut self,
    text: &str,
    origin: &str
  ) -> anyhow::Result<()> {
    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let line = raw_line
        .split_once('#')
        .map_or(raw_line, |(before, _)| {
          before
        })
        .trim();
      if line.is_empty() {
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {origin}:{}: {}",
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }
    Ok(())
  }

  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  fn get_number<T>(
    &self,
    key: &str,
    fallback: T
  ) -> anyhow::Result<T>
  where
    T: std::str::FromStr
  {
    match self.map.get(key) {
      | None => Ok(fallback),
      | Some(raw) => {
        raw.trim().parse::<T>().map_err(
          |_| {
            anyhow!(
              "invalid number for \
               {key}: {raw}"
            )
          }
        )
      }
    }
  }

  /// Typed view used by the controller.
  pub fn settings(
    &self
  ) -> anyhow::Result<Settings> {
    let sort_field = self
      .get("sort.field")
      .map(|raw| {
        SortField::parse(&raw).ok_or_else(
          || {
            anyhow!(
              "invalid sort.field: {raw}"
            )
          }
        )
      })
      .transpose()?
      .unwrap_or(SortField::CreatedAt);

    let sort_dir = self
      .get("sort.dir")
      .map(|raw| {
        SortDir::parse(&raw).ok_or_else(
          || {
            anyhow!(
              "invalid sort.dir: {raw}"
            )
          }
        )
      })
      .transpose()?
      .unwrap_or(SortDir::Desc);

    let page_sizes = self
      .get("page.sizes")
      .unwrap_or_default()
      .split(',')
      .filter(|part| !part.trim().is_empty())
      .map(|part| {
        part
          .trim()
          .parse::<u32>()
          .ok()
          .filter(|size| *size > 0)
          .ok_or_else(|| {
            anyhow!(
              "invalid page.sizes entry: \
               {part}"
            )
          })
      })
      .collect::<anyhow::Result<Vec<_>>>(
      )?;

    let page_size = self.get_number(
      "page.size",
      DEFAULT_PAGE_SIZE
    )?;
    if page_size == 0 {
      return Err(anyhow!(
        "page.size must be positive"
      ));
    }

    Ok(Settings {
      api_base: self
        .get("api.base")
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_string(),
      login_path: self
        .get("login.path")
        .unwrap_or_else(|| {
          "/login".to_string()
        }),
      page_size,
      page_sizes,
      sort_field,
      sort_dir,
      description_budget: self
        .get_number(
          "description.truncate",
          DEFAULT_DESCRIPTION_BUDGET
        )?,
      alert_on_load_failure: self
        .get_bool(
          "alerts.load_failures"
        )
        .unwrap_or(false)
    })
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Settings {
  pub api_base:              String,
  pub login_path:            String,
  pub page_size:             u32,
  pub page_sizes:            Vec<u32>,
  pub sort_field:            SortField,
  pub sort_dir:              SortDir,
  pub description_budget:    usize,
  pub alert_on_load_failure: bool
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      api_base:              String::new(),
      login_path:            "/login"
        .to_string(),
      page_size:             DEFAULT_PAGE_SIZE,
      page_sizes:            vec![
        5, 10, 20, 50,
      ],
      sort_field:            SortField::CreatedAt,
      sort_dir:              SortDir::Desc,
      description_budget:
        DEFAULT_DESCRIPTION_BUDGET,
      alert_on_load_failure: false
    }
  }
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}
