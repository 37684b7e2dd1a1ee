use axum::{
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};

use crate::domains::relay::model::ErrorResponse;
use crate::email::EmailServiceError;

/// Request-level failure. Client errors render as plain text, server errors
/// as the JSON `{"status":"error","message":...}` envelope.
#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNAUTHORIZED, message)
  }

  pub fn method_not_allowed(message: impl Into<String>) -> Self {
    Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    if self.status_code.is_server_error() {
      return (self.status_code, Json(ErrorResponse::new(self.message))).into_response();
    }

    let mut response = (self.status_code, self.message).into_response();
    if self.status_code == StatusCode::METHOD_NOT_ALLOWED {
      response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
    }
    response
  }
}

impl From<serde_json::Error> for AppError {
  fn from(error: serde_json::Error) -> Self {
    tracing::warn!("Failed to decode request body: {}", error);
    AppError::bad_request("Invalid request body")
  }
}

impl From<EmailServiceError> for AppError {
  fn from(error: EmailServiceError) -> Self {
    AppError::internal_server_error(format!("Failed to send email: {}", error))
  }
}
