use std::sync::Arc;

use crate::{
  config::Config,
  domains::relay::{model::EmailRequest, service::EmailService},
  email::EmailServiceError,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn webhook_token(&self) -> &str;
  fn send_email(
    &self,
    req: &EmailRequest,
  ) -> impl std::future::Future<Output = Result<(), EmailServiceError>> + Send;
}

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct SharedAppState {
  pub config: Arc<Config>,
  pub email_service: Arc<EmailService>,
}

impl SharedAppState {
  pub fn new(config: Config, email_service: EmailService) -> Self {
    Self {
      config: Arc::new(config),
      email_service: Arc::new(email_service),
    }
  }
}

impl AppState for SharedAppState {
  fn webhook_token(&self) -> &str {
    &self.config.webhook_token
  }

  async fn send_email(&self, req: &EmailRequest) -> Result<(), EmailServiceError> {
    self.email_service.send_email(req).await
  }
}
