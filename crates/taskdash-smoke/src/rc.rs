//! Locates the driver's config file.

use std::path::{
  Path,
  PathBuf
};

use tracing::debug;

pub const RC_FILE: &str = ".taskdashrc";

/// `--config` wins, then `$TASKDASHRC` (`/dev/null` disables the file),
/// then `~/.taskdashrc` when it exists.
pub fn resolve_config_path(
  override_path: Option<&Path>,
  env_value: Option<String>,
  home: Option<PathBuf>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Some(env_value) = env_value {
    if env_value == "/dev/null" {
      debug!("config file disabled by TASKDASHRC");
      return None;
    }
    return Some(PathBuf::from(env_value));
  }

  let candidate = home?.join(RC_FILE);
  if candidate.exists() {
    Some(candidate)
  } else {
    debug!(
      candidate = %candidate.display(),
      "no config file; using defaults"
    );
    None
  }
}
