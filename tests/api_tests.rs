use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use async_trait::async_trait;
use axum::{
  body::Body,
  http::{self, Request, StatusCode},
  Router,
};
use lettre::Message;
use mail_relay_webhook::{
  app::create_app,
  config::Config,
  domains::relay::{
    model::{ErrorResponse, HealthResponse, SendResponse},
    service::EmailService,
  },
  email::{EmailServiceError, Mailer, SmtpMailer},
  state::SharedAppState,
};
use serde_json::json;
use tower::ServiceExt; // for `app.oneshot()`

const TOKEN: &str = "integration-token";

#[derive(Default)]
struct CountingMailer {
  deliveries: AtomicUsize,
}

#[async_trait]
impl Mailer for CountingMailer {
  async fn deliver(&self, _message: Message) -> Result<(), EmailServiceError> {
    self.deliveries.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

fn config(smtp_host: &str, smtp_port: u16) -> Config {
  let vars = [
    ("WEBHOOK_TOKEN", TOKEN.to_string()),
    ("SMTP_HOST", smtp_host.to_string()),
    ("SMTP_PORT", smtp_port.to_string()),
    ("SMTP_USER", "relay".to_string()),
    ("SMTP_PASS", "secret".to_string()),
    ("EMAIL_FROM", "noreply@example.com".to_string()),
  ];
  Config::from_lookup(|key| {
    vars
      .iter()
      .find(|(name, _)| *name == key)
      .map(|(_, value)| value.clone())
  })
  .unwrap()
}

fn app_with(mailer: Arc<dyn Mailer>) -> Router {
  let config = config("smtp.example.com", 587);
  let email_service = EmailService::new(config.email_from.clone(), mailer);
  create_app(SharedAppState::new(config, email_service))
}

fn send_request(token: Option<&str>, body: String) -> Request<Body> {
  let mut builder = Request::builder().method(http::Method::POST).uri("/send");
  if let Some(token) = token {
    builder = builder.header(http::header::AUTHORIZATION, token);
  }
  builder.body(Body::from(body)).unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
  axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap()
    .to_vec()
}

#[tokio::test]
async fn health_test() {
  let app = app_with(Arc::new(CountingMailer::default()));

  let response = app
    .oneshot(
      Request::builder()
        .method(http::Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);

  let health: HealthResponse = serde_json::from_slice(&read_body(response).await).unwrap();
  assert_eq!(health.status, "ok");
  assert_eq!(health.version, "1.0.0");
}

#[tokio::test]
async fn send_example_request_succeeds() {
  let mailer = Arc::new(CountingMailer::default());
  let app = app_with(mailer.clone());

  let body = json!({"to": ["a@x.com"], "subject": "Hi", "body": "hello"}).to_string();
  let response = app
    .oneshot(send_request(Some(&format!("Bearer {}", TOKEN)), body))
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);

  let sent: SendResponse = serde_json::from_slice(&read_body(response).await).unwrap();
  assert_eq!(sent.status, "success");
  assert_eq!(sent.metadata.recipients, 1);
  assert_eq!(mailer.deliveries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_requests_never_reach_the_relay() {
  let mailer = Arc::new(CountingMailer::default());
  let valid = json!({"to": ["a@x.com"], "subject": "Hi", "body": "hello"}).to_string();

  let cases = [
    (None, valid.clone(), StatusCode::UNAUTHORIZED),
    (Some("Bearer wrong"), valid.clone(), StatusCode::UNAUTHORIZED),
    (Some(TOKEN), "{\"to\": [".to_string(), StatusCode::BAD_REQUEST),
    (Some(TOKEN), json!({"to": []}).to_string(), StatusCode::INTERNAL_SERVER_ERROR),
  ];

  for (token, body, expected) in cases {
    let response = app_with(mailer.clone())
      .oneshot(send_request(token, body))
      .await
      .unwrap();
    assert_eq!(response.status(), expected);
  }

  assert_eq!(mailer.deliveries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_relay_yields_error_envelope() {
  // Nothing listens on port 1 of the loopback interface.
  let config = config("localhost", 1);
  let mailer = SmtpMailer::new(config.smtp.clone()).unwrap();
  let email_service = EmailService::new(config.email_from.clone(), Arc::new(mailer));
  let app = create_app(SharedAppState::new(config, email_service));

  let body = json!({"to": ["a@x.com"], "subject": "Hi", "body": "hello"}).to_string();
  let response = app.oneshot(send_request(Some(TOKEN), body)).await.unwrap();

  assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

  let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
  assert_eq!(error.status, "error");
  assert!(error.message.starts_with("Failed to send email: SMTP delivery failed"));
}

#[tokio::test]
async fn put_on_send_is_method_not_allowed() {
  let app = app_with(Arc::new(CountingMailer::default()));

  let response = app
    .oneshot(
      Request::builder()
        .method(http::Method::PUT)
        .uri("/send")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
