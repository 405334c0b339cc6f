//! Descriptions of the REST calls the dashboard makes and decoding of the
//! `{ "success": bool, "message": ... }` envelope. Nothing here performs
//! I/O; hosts turn an [`ApiRequest`] into a real HTTP call and hand the
//! result back as an [`HttpReply`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdash_shared::{
  CommentPayload,
  LoginRequest,
  StatusPayload,
  TaskId,
  TaskPayload,
  TaskStatus,
  UserCreate,
  UserId,
  UserUpdate
};
use thiserror::Error;
use url::form_urlencoded;

pub const GENERIC_FAILURE: &str =
  "An error occurred. Please try again.";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE"
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ApiRequest {
  pub method: Method,
  pub path:   String,
  pub query:  Vec<(String, String)>,
  /// JSON body, already serialized.
  pub body:   Option<String>
}

impl ApiRequest {
  fn new(
    method: Method,
    path: impl Into<String>
  ) -> Self {
    Self {
      method,
      path: path.into(),
      query: vec![],
      body: None
    }
  }

  fn with_json<T: Serialize>(
    mut self,
    body: &T
  ) -> Result<Self, ApiError> {
    self.body =
      Some(serde_json::to_string(body)?);
    Ok(self)
  }

  pub fn stats() -> Self {
    Self::new(
      Method::Get,
      "/api/dashboard/stats"
    )
  }

  pub fn tasks<K: Into<String>>(
    params: Vec<(K, String)>
  ) -> Self {
    let mut req =
      Self::new(Method::Get, "/api/tasks");
    req.query = params
      .into_iter()
      .map(|(k, v)| (k.into(), v))
      .collect();
    req
  }

  pub fn create_task(
    payload: &TaskPayload
  ) -> Result<Self, ApiError> {
    Self::new(Method::Post, "/api/tasks")
      .with_json(payload)
  }

  pub fn update_task(
    id: TaskId,
    payload: &TaskPayload
  ) -> Result<Self, ApiError> {
    Self::new(
      Method::Put,
      format!("/api/tasks/{id}")
    )
    .with_json(payload)
  }

  pub fn update_status(
    id: TaskId,
    status: TaskStatus
  ) -> Result<Self, ApiError> {
    Self::new(
      Method::Put,
      format!("/api/tasks/{id}/status")
    )
    .with_json(&StatusPayload { status })
  }

  pub fn delete_task(id: TaskId) -> Self {
    Self::new(
      Method::Delete,
      format!("/api/tasks/{id}")
    )
  }

  pub fn task_comments(id: TaskId) -> Self {
    Self::new(
      Method::Get,
      format!("/api/tasks/{id}/comments")
    )
  }

  pub fn add_comment(
    id: TaskId,
    payload: &CommentPayload
  ) -> Result<Self, ApiError> {
    Self::new(
      Method::Post,
      format!("/api/tasks/{id}/comments")
    )
    .with_json(payload)
  }

  pub fn users() -> Self {
    Self::new(Method::Get, "/api/users")
  }

  pub fn create_user(
    payload: &UserCreate
  ) -> Result<Self, ApiError> {
    Self::new(Method::Post, "/api/users")
      .with_json(payload)
  }

  pub fn update_user(
    id: UserId,
    payload: &UserUpdate
  ) -> Result<Self, ApiError> {
    Self::new(
      Method::Put,
      format!("/api/users/{id}")
    )
    .with_json(payload)
  }

  pub fn delete_user(id: UserId) -> Self {
    Self::new(
      Method::Delete,
      format!("/api/users/{id}")
    )
  }

  pub fn logout() -> Self {
    Self::new(Method::Get, "/api/logout")
  }

  pub fn login(
    credentials: &LoginRequest
  ) -> Result<Self, ApiError> {
    Self::new(Method::Post, "/login")
      .with_json(credentials)
  }

  /// Path plus encoded query string, prefixed with `base`.
  pub fn url(&self, base: &str) -> String {
    let mut url = format!(
      "{}{}",
      base.trim_end_matches('/'),
      self.path
    );
    if !self.query.is_empty() {
      let encoded =
        form_urlencoded::Serializer::new(
          String::new()
        )
        .extend_pairs(self.query.iter())
        .finish();
      url.push('?');
      url.push_str(&encoded);
    }
    url
  }

  pub fn query_value(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .query
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

/// What came back from the wire, before envelope decoding.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct HttpReply {
  pub status: u16,
  pub body:   String
}

impl HttpReply {
  pub fn new(
    status: u16,
    body: impl Into<String>
  ) -> Self {
    Self {
      status,
      body: body.into()
    }
  }
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("network error: {0}")]
  Transport(String),
  #[error("unreadable response (HTTP {status}): {reason}")]
  Decode { status: u16, reason: String },
  #[error("request rejected (HTTP {status}): {message}")]
  Rejected { status: u16, message: String },
  #[error(transparent)]
  Encode(#[from] serde_json::Error)
}

impl ApiError {
  /// Text for the blocking alert shown to the user.
  pub fn user_message(&self) -> String {
    match self {
      | ApiError::Rejected {
        message,
        ..
      } => format!("Error: {message}"),
      | _ => GENERIC_FAILURE.to_string()
    }
  }
}

/// Unwraps the success envelope and deserializes the remaining fields.
pub fn decode<T: DeserializeOwned>(
  reply: &HttpReply
) -> Result<T, ApiError> {
  let value: Value =
    serde_json::from_str(&reply.body)
      .map_err(|err| ApiError::Decode {
        status: reply.status,
        reason: err.to_string()
      })?;

  let success = value
    .get("success")
    .and_then(Value::as_bool)
    .unwrap_or(false);
  if !success {
    let message = value
      .get("message")
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or_else(|| {
        format!(
          "request failed with status {}",
          reply.status
        )
      });
    return Err(ApiError::Rejected {
      status: reply.status,
      message
    });
  }

  serde_json::from_value(value).map_err(
    |err| ApiError::Decode {
      status: reply.status,
      reason: err.to_string()
    }
  )
}

/// Envelope check for calls whose payload the dashboard ignores.
pub fn acknowledge(
  reply: &HttpReply
) -> Result<(), ApiError> {
  decode::<serde::de::IgnoredAny>(reply)
    .map(|_| ())
}
