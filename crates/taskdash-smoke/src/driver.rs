//! Headless host for the dashboard controller: requests go out over
//! `reqwest` with a cookie jar and every confirmation is accepted.

use std::collections::VecDeque;

use anyhow::{
  Context,
  anyhow
};
use reqwest::header::{
  ACCEPT,
  CONTENT_TYPE
};
use serde::Deserialize;
use taskdash_core::api::{
  self,
  ApiRequest,
  HttpReply,
  Method
};
use taskdash_core::config::Settings;
use taskdash_core::{
  Dashboard,
  Effect,
  Msg
};
use taskdash_shared::{
  LoginRequest,
  UserDto
};
use tracing::{
  debug,
  info
};

#[derive(Debug, Deserialize)]
struct LoginReply {
  user: UserDto
}

pub struct Driver {
  dash:          Dashboard,
  http:          reqwest::Client,
  base:          String,
  alerts:        Vec<String>,
  pub navigated: Option<String>
}

impl Driver {
  /// Signs in and builds a controller for the account's role.
  #[tracing::instrument(skip(settings, password))]
  pub async fn login(
    server: &str,
    settings: Settings,
    email: &str,
    password: &str
  ) -> anyhow::Result<Self> {
    let http = reqwest::Client::builder()
      .cookie_store(true)
      .build()
      .context("failed to build HTTP client")?;
    let base = format!(
      "{}{}",
      server.trim_end_matches('/'),
      settings.api_base
    );

    let request =
      ApiRequest::login(&LoginRequest {
        email:    email.to_string(),
        password: password.to_string()
      })?;
    let reply = send(&http, &base, &request)
      .await
      .map_err(|err| {
        anyhow!("login request failed: {err}")
      })?;
    let body: LoginReply =
      api::decode(&reply)
        .context("login rejected")?;

    Ok(Self {
      dash: Dashboard::new(
        body.user.role,
        headless_settings(settings)
      ),
      http,
      base,
      alerts: vec![],
      navigated: None
    })
  }

  pub fn dashboard(&self) -> &Dashboard {
    &self.dash
  }

  /// Returns and clears the alerts shown since the last call.
  pub fn take_alerts(
    &mut self
  ) -> Vec<String> {
    std::mem::take(&mut self.alerts)
  }

  /// Runs `msg` and every effect it leads to, one request at a time.
  pub async fn dispatch(
    &mut self,
    msg: Msg
  ) {
    let mut inbox = VecDeque::from([msg]);
    while let Some(msg) = inbox.pop_front() {
      for effect in self.dash.handle(msg) {
        match effect {
          | Effect::Request {
            kind,
            request
          } => {
            let reply = send(
              &self.http,
              &self.base,
              &request
            )
            .await;
            inbox.push_back(Msg::Completed {
              kind,
              reply
            });
          }
          | Effect::Alert(text) => {
            info!(%text, "alert");
            self.alerts.push(text);
          }
          | Effect::Confirm {
            prompt,
            then
          } => {
            debug!(%prompt, "auto-confirming");
            inbox.push_back(then);
          }
          | Effect::Navigate(to) => {
            info!(%to, "navigation requested");
            self.navigated = Some(to);
          }
        }
      }
    }
  }
}

/// Nobody watches the console here, so failed background loads must
/// surface as alerts for the scenarios to see them.
fn headless_settings(
  settings: Settings
) -> Settings {
  Settings {
    alert_on_load_failure: true,
    ..settings
  }
}

/// Any HTTP status is a reply; only connection and body-read failures
/// are errors.
async fn send(
  http: &reqwest::Client,
  base: &str,
  request: &ApiRequest
) -> Result<HttpReply, String> {
  let url = request.url(base);
  let method = match request.method {
    | Method::Get => reqwest::Method::GET,
    | Method::Post => reqwest::Method::POST,
    | Method::Put => reqwest::Method::PUT,
    | Method::Delete => {
      reqwest::Method::DELETE
    }
  };
  debug!(%method, %url, "sending request");

  let mut builder = http
    .request(method, &url)
    .header(ACCEPT, "application/json");
  if let Some(body) = &request.body {
    builder = builder
      .header(CONTENT_TYPE, "application/json")
      .body(body.clone());
  }

  let response = builder
    .send()
    .await
    .map_err(|e| e.to_string())?;
  let status = response.status().as_u16();
  let body = response
    .text()
    .await
    .map_err(|e| e.to_string())?;
  debug!(status, bytes = body.len(), "received reply");
  Ok(HttpReply::new(status, body))
}

#[cfg(test)]
mod tests {
  use taskdash_shared::Role;

  use super::*;

  #[test]
  fn headless_settings_alert_on_load_failures()
  {
    let settings = Settings {
      page_size: 25,
      ..Settings::default()
    };
    let tuned = headless_settings(settings);
    assert!(tuned.alert_on_load_failure);
    assert_eq!(tuned.page_size, 25);
  }

  #[test]
  fn failed_task_load_reaches_the_alert_list()
  {
    let mut dash = Dashboard::new(
      Role::Developer,
      headless_settings(Settings::default())
    );
    let effects = dash.handle(Msg::Completed {
      kind:  taskdash_core::RequestKind::Tasks,
      reply: Err("connection refused".to_string())
    });
    assert!(matches!(
      effects.as_slice(),
      [Effect::Alert(_)]
    ));
    assert_eq!(dash.meta().page, 0);
  }
}
