use gloo::net::http::{
  Request,
  RequestBuilder
};
use taskdash_core::api::{
  ApiRequest,
  HttpReply,
  Method
};

/// Performs one request with `fetch`. Any status code counts as a reply;
/// only network and body-read failures are errors.
pub async fn send(
  base: &str,
  request: &ApiRequest
) -> Result<HttpReply, String> {
  let url = request.url(base);
  tracing::debug!(
    method = request.method.as_str(),
    %url,
    "sending request"
  );

  let builder = builder(
    request.method,
    &url
  )
  .header("Accept", "application/json");
  let outgoing = match &request.body {
    | Some(body) => builder
      .header(
        "Content-Type",
        "application/json"
      )
      .body(body.clone()),
    | None => builder.build()
  }
  .map_err(|e| {
    format!("failed to build request: {e}")
  })?;

  let response = outgoing
    .send()
    .await
    .map_err(|e| format!("fetch error: {e}"))?;
  let status = response.status();
  let body = response
    .text()
    .await
    .map_err(|e| {
      format!("failed to read body: {e}")
    })?;

  tracing::debug!(
    status,
    bytes = body.len(),
    "received reply"
  );
  Ok(HttpReply::new(status, body))
}

fn builder(
  method: Method,
  url: &str
) -> RequestBuilder {
  match method {
    | Method::Get => Request::get(url),
    | Method::Post => Request::post(url),
    | Method::Put => Request::put(url),
    | Method::Delete => {
      Request::delete(url)
    }
  }
}
