//! Startup inputs the server embeds in the page: the viewer's role on the
//! mount element and optional config lines in an inline script block.

use taskdash_core::config::{
  Config,
  Settings
};
use taskdash_shared::Role;
use web_sys::Element;

use crate::app::AppProps;

const CONFIG_SCRIPT_ID: &str =
  "taskdash-config";

pub fn read(mount: &Element) -> AppProps {
  let role = mount
    .get_attribute("data-role")
    .as_deref()
    .and_then(Role::parse)
    .unwrap_or_else(|| {
      tracing::warn!(
        "mount element has no usable \
         data-role; assuming developer"
      );
      Role::Developer
    });

  AppProps {
    role,
    settings: settings(mount)
  }
}

fn settings(mount: &Element) -> Settings {
  let mut cfg = Config::default();
  let inline = mount
    .owner_document()
    .and_then(|document| {
      document.get_element_by_id(
        CONFIG_SCRIPT_ID
      )
    })
    .and_then(|script| {
      script.text_content()
    });

  if let Some(text) = inline
    && let Err(err) = cfg.parse_str(
      &text,
      CONFIG_SCRIPT_ID
    )
  {
    tracing::error!(
      error = %err,
      "ignoring embedded config"
    );
    return Settings::default();
  }

  cfg.settings().unwrap_or_else(|err| {
    tracing::error!(
      error = %err,
      "invalid embedded config; \
       using defaults"
    );
    Settings::default()
  })
}
