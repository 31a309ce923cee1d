use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// A field rejected by local validation, keyed by its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
  pub field: String,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

/// Any failure of a round trip to the API. The response body is never parsed.
#[derive(Debug, Error)]
#[error("{operation} failed: {cause}")]
pub struct RequestError {
  pub operation: &'static str,
  pub status: Option<StatusCode>,
  pub cause: String,
}

impl RequestError {
  pub fn status(operation: &'static str, status: StatusCode) -> Self {
    Self {
      operation,
      status: Some(status),
      cause: format!("unexpected status {}", status),
    }
  }

  pub fn transport(operation: &'static str, error: reqwest::Error) -> Self {
    Self {
      operation,
      status: error.status(),
      cause: error.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Token storage error: {0}")]
  Io(#[from] io::Error),

  #[error("Token serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Token store lock poisoned")]
  Poisoned,
}

#[derive(Debug, Error)]
pub enum DashboardError {
  #[error("Validation failed for {}", field_list(.0))]
  Validation(Vec<ValidationError>),

  #[error(transparent)]
  Request(#[from] RequestError),

  #[error(transparent)]
  Session(#[from] SessionError),

  #[error("Operation not allowed while {0}")]
  InvalidState(&'static str),
}

fn field_list(errors: &[ValidationError]) -> String {
  errors
    .iter()
    .map(|error| error.field.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Flattens derive-generated errors into one message per field, ordered by
/// field name.
pub fn collect_validation_errors(
  errors: &validator::ValidationErrors,
) -> Vec<ValidationError> {
  let mut collected: Vec<ValidationError> = errors
    .field_errors()
    .into_iter()
    .filter_map(|(field, field_errors)| {
      field_errors.first().map(|error| {
        let message = error
          .message
          .as_ref()
          .map(|message| message.to_string())
          .unwrap_or_else(|| error.code.to_string());
        ValidationError::new(field.to_string(), message)
      })
    })
    .collect();
  collected.sort_by(|a, b| a.field.cmp(&b.field));
  collected
}

impl From<validator::ValidationErrors> for DashboardError {
  fn from(errors: validator::ValidationErrors) -> Self {
    DashboardError::Validation(collect_validation_errors(&errors))
  }
}
