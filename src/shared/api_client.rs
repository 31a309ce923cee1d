use reqwest::{header, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use super::error::RequestError;

/// JSON-over-HTTP access to the dashboard API. Every call is a single round
/// trip; failures are logged here and handed back to the caller.
#[derive(Clone, Debug)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url: String = base_url.into();
    Self {
      http: reqwest::Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }

  pub async fn get<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    path: &str,
    bearer: Option<&str>,
  ) -> Result<T, RequestError> {
    let mut request = self
      .http
      .get(self.url(path))
      .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
      request = request.bearer_auth(token);
    }
    self.send(operation, request).await
  }

  pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    operation: &'static str,
    path: &str,
    body: &B,
  ) -> Result<T, RequestError> {
    // `json` sets the content type.
    let request = self.http.post(self.url(path)).json(body);
    self.send(operation, request).await
  }

  async fn send<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    request: RequestBuilder,
  ) -> Result<T, RequestError> {
    execute(operation, request).await.inspect_err(|error| {
      tracing::error!(
        operation,
        status = error.status.map(|status| status.as_u16()),
        cause = %error.cause,
        "Erro na requisição"
      );
    })
  }
}

async fn execute<T: DeserializeOwned>(
  operation: &'static str,
  request: RequestBuilder,
) -> Result<T, RequestError> {
  let response = request
    .send()
    .await
    .map_err(|error| RequestError::transport(operation, error))?;

  let status = response.status();
  if !status.is_success() {
    return Err(RequestError::status(operation, status));
  }

  response
    .json::<T>()
    .await
    .map_err(|error| RequestError::transport(operation, error))
}

#[cfg(test)]
mod tests {
  use actix_web::{http, web, HttpRequest, HttpResponse};
  use reqwest::StatusCode;
  use serde_json::{json, Value};

  use super::*;
  use crate::helpers::tests::spawn_api;

  #[actix_web::test]
  async fn test_get_json_successful() {
    let base_url = spawn_api(|config| {
      config.route(
        "/api/ping",
        web::get().to(|| async { HttpResponse::Ok().json(json!({"ok": true})) }),
      );
    })
    .await;

    let client = ApiClient::new(format!("{}/", base_url));
    let body: Value = client.get("ping", "/ping", None).await.unwrap();

    assert_eq!(body, json!({"ok": true}));
  }

  #[actix_web::test]
  async fn test_non_success_status_is_request_error() {
    let base_url = spawn_api(|config| {
      config.route(
        "/api/ping",
        web::get().to(|| async {
          HttpResponse::BadRequest().json(json!({"detail": "nope"}))
        }),
      );
    })
    .await;

    let client = ApiClient::new(base_url);
    let error = client
      .get::<Value>("ping", "/ping", None)
      .await
      .unwrap_err();

    assert_eq!(error.operation, "ping");
    assert_eq!(error.status, Some(StatusCode::BAD_REQUEST));
    assert!(!error.cause.contains("nope"));
  }

  #[actix_web::test]
  async fn test_transport_failure_has_no_status() {
    // Nothing listens on port 9 locally.
    let client = ApiClient::new("http://127.0.0.1:9/api");
    let error = client
      .get::<Value>("ping", "/ping", None)
      .await
      .unwrap_err();

    assert_eq!(error.status, None);
  }

  #[actix_web::test]
  async fn test_post_sends_single_content_type() {
    let base_url = spawn_api(|config| {
      config.route(
        "/api/echo",
        web::post().to(|request: HttpRequest| async move {
          let content_types: Vec<String> = request
            .headers()
            .get_all(http::header::CONTENT_TYPE)
            .filter_map(|value| value.to_str().ok())
            .map(String::from)
            .collect();
          HttpResponse::Ok().json(json!({ "content_types": content_types }))
        }),
      );
    })
    .await;

    let client = ApiClient::new(base_url);
    let body: Value = client
      .post("echo", "/echo", &json!({ "nome": "Ana" }))
      .await
      .unwrap();

    assert_eq!(body, json!({ "content_types": ["application/json"] }));
  }
}
