use async_trait::async_trait;
use lettre::{transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::email::types::{EmailServiceError, SmtpConfig};

const IMPLICIT_TLS_PORT: u16 = 465;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn deliver(&self, message: Message) -> Result<(), EmailServiceError>;
}

/// Dial-and-send SMTP client. Built without a connection pool, so each
/// delivery opens, authenticates, sends and closes its own connection.
pub struct SmtpMailer {
  smtp_config: SmtpConfig,
  transporter: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
  pub fn new(smtp_config: SmtpConfig) -> Result<Self, EmailServiceError> {
    let creds = Credentials::new(smtp_config.username.clone(), smtp_config.password.clone());

    let builder = if smtp_config.host == "localhost" || smtp_config.host == "mailhog" {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp_config.host)
    } else if smtp_config.port == IMPLICIT_TLS_PORT {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_config.host)?
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_config.host)?
    };

    let transporter = builder.credentials(creds).port(smtp_config.port).build();

    Ok(SmtpMailer {
      smtp_config,
      transporter,
    })
  }
}

#[async_trait]
impl Mailer for SmtpMailer {
  async fn deliver(&self, message: Message) -> Result<(), EmailServiceError> {
    tracing::debug!(
      "Dialing SMTP relay {}:{}",
      self.smtp_config.host,
      self.smtp_config.port
    );
    self.transporter.send(message).await?;
    Ok(())
  }
}
