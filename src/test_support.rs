use std::sync::Arc;

use axum::{
  body::{Body, Bytes},
  http::{HeaderMap, Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;

use crate::{
  app::create_app,
  config::Config,
  domains::relay::service::EmailService,
  email::{Mailer, SmtpConfig},
  state::SharedAppState,
};

pub const TEST_TOKEN: &str = "test-webhook-token";

pub fn test_config() -> Config {
  Config {
    port: "8080".to_string(),
    webhook_token: TEST_TOKEN.to_string(),
    smtp: SmtpConfig {
      host: "localhost".to_string(),
      port: 1025,
      username: "test".to_string(),
      password: "test".to_string(),
    },
    email_from: "noreply@test.com".parse().expect("parse sender"),
  }
}

pub fn app_with_mailer<M: Mailer + 'static>(mailer: M) -> Router {
  let config = test_config();
  let email_service = EmailService::new(config.email_from.clone(), Arc::new(mailer));
  create_app(SharedAppState::new(config, email_service))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let headers = response.headers().clone();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, headers, body)
}

pub async fn post_raw(app: Router, uri: &str, token: Option<&str>, body: &str) -> (StatusCode, Bytes) {
  let mut builder = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/json");
  if let Some(token) = token {
    builder = builder.header("authorization", token);
  }
  let request = builder.body(Body::from(body.to_string())).expect("build request");

  let (status, _, body) = call(app, request).await;
  (status, body)
}

pub async fn send<T: Serialize>(app: Router, token: Option<&str>, payload: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_string(payload).expect("serialize request body");
  post_raw(app, "/send", token, &body).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
  let request = Request::builder()
    .method("GET")
    .uri(uri)
    .body(Body::empty())
    .expect("build request");
  call(app, request).await
}
