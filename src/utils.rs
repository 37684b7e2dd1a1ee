use std::sync::Arc;

use crate::{
  config::Config,
  domains::relay::service::EmailService,
  email::{EmailServiceError, SmtpMailer},
};

pub mod error;

pub fn init_email_service(config: &Config) -> Result<EmailService, EmailServiceError> {
  let mailer = SmtpMailer::new(config.smtp.clone())?;
  Ok(EmailService::new(config.email_from.clone(), Arc::new(mailer)))
}
