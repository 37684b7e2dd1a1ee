use std::time::Instant;

use axum::{
  body::Bytes,
  extract::State,
  http::{header::USER_AGENT, HeaderMap},
  response::Json as JsonResponse,
  routing::{post, Router},
};
use tracing::Instrument;
use uuid::Uuid;

use super::model::{EmailRequest, SendResponse};
use crate::{
  middleware::auth::authorize,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn relay_routes() -> Router<SharedAppState> {
  Router::new().route("/send", post(send_email_handler).fallback(method_not_allowed_handler))
}

async fn method_not_allowed_handler() -> AppError {
  AppError::method_not_allowed("Only POST is supported")
}

pub async fn send_email_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<JsonResponse<SendResponse>, AppError> {
  let span = tracing::info_span!("send_email", request_id = %Uuid::new_v4());
  relay_email(state, headers, body).instrument(span).await
}

/// Authenticates, decodes and dispatches one email. The body is only
/// inspected once the token has been accepted.
async fn relay_email(
  state: SharedAppState,
  headers: HeaderMap,
  body: Bytes,
) -> Result<JsonResponse<SendResponse>, AppError> {
  let started = Instant::now();

  if let Err(err) = authorize(&headers, state.webhook_token()) {
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok()).unwrap_or("-");
    tracing::warn!(user_agent, "Unauthorized send attempt");
    return Err(err);
  }

  let request = EmailRequest::decode(&body)?;
  let recipients = request.recipient_count();

  if let Err(e) = state.send_email(&request).await {
    tracing::error!(subject = %request.subject, to = ?request.to, "Failed to send email: {}", e);
    return Err(e.into());
  }

  let duration_ms = started.elapsed().as_millis() as u64;
  tracing::info!(
    subject = %request.subject,
    to = ?request.to,
    recipients,
    duration_ms,
    "Email sent"
  );

  Ok(JsonResponse(SendResponse::success(duration_ms, recipients)))
}
