use std::{error::Error, fmt};

#[derive(Clone)]
pub struct SmtpConfig {
  pub host: String,
  pub port: u16,
  pub username: String,
  pub password: String,
}

impl fmt::Debug for SmtpConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SmtpConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

#[derive(Debug)]
pub enum EmailServiceError {
  MissingRecipients,
  InvalidAddress(String),
  InvalidHeader(String),
  Build(String),
  Transport(String),
}

impl Error for EmailServiceError {}

impl fmt::Display for EmailServiceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EmailServiceError::MissingRecipients => write!(f, "recipients empty: at least one 'to' address is required"),
      EmailServiceError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
      EmailServiceError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
      EmailServiceError::Build(msg) => write!(f, "Failed to build message: {}", msg),
      EmailServiceError::Transport(msg) => write!(f, "SMTP delivery failed: {}", msg),
    }
  }
}

impl From<lettre::error::Error> for EmailServiceError {
  fn from(err: lettre::error::Error) -> Self {
    EmailServiceError::Build(err.to_string())
  }
}

impl From<lettre::transport::smtp::Error> for EmailServiceError {
  fn from(err: lettre::transport::smtp::Error) -> Self {
    EmailServiceError::Transport(err.to_string())
  }
}
