pub mod cli;
pub mod driver;
pub mod rc;
pub mod scenarios;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use taskdash_core::config::Config;
use tracing::info;

use crate::cli::{
  Cli,
  Command
};
use crate::driver::Driver;

pub async fn run(
  args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli = Cli::try_parse_from(args)?;
  cli::install_logging(cli.verbose, cli.quiet)?;

  let path = rc::resolve_config_path(
    cli.config.as_deref(),
    std::env::var("TASKDASHRC").ok(),
    dirs::home_dir()
  );
  let mut cfg =
    Config::load(path.as_deref())?;
  cfg.apply_overrides(
    cli.overrides.iter().cloned()
  );
  let settings = cfg.settings()?;

  let email = cli
    .email
    .clone()
    .or_else(|| cfg.get("smoke.email"))
    .context(
      "no login email; pass --email or \
       set smoke.email"
    )?;
  let password = cli
    .password
    .clone()
    .or_else(|| cfg.get("smoke.password"))
    .context(
      "no login password; pass \
       --password or set smoke.password"
    )?;

  let mut driver = Driver::login(
    &cli.server,
    settings,
    &email,
    &password
  )
  .await?;
  info!(
    role = driver.dashboard().role().as_str(),
    "logged in"
  );

  match cli.command {
    | Command::Roundtrip => {
      scenarios::roundtrip(&mut driver)
        .await
    }
    | Command::Tasks(view) => {
      scenarios::tasks(&mut driver, &view)
        .await
    }
    | Command::Stats => {
      scenarios::stats(&mut driver).await
    }
    | Command::Comments(view) => {
      scenarios::comments(&mut driver, &view)
        .await
    }
  }
}
