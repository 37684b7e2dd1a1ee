use std::{env, error::Error, fmt};

use lettre::message::Mailbox;

use crate::email::SmtpConfig;

pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug)]
pub enum ConfigError {
  MissingVar(&'static str),
  InvalidSender(String),
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
      ConfigError::InvalidSender(msg) => write!(f, "EMAIL_FROM is not a valid mailbox: {}", msg),
    }
  }
}

/// Process-wide settings, loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
  pub port: String,
  pub webhook_token: String,
  pub smtp: SmtpConfig,
  pub email_from: Mailbox,
}

impl Config {
  /// Reads the process environment. `.env` must already be loaded by the caller.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
    let required = |key: &'static str| var(key).ok_or(ConfigError::MissingVar(key));

    let port = var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
    let webhook_token = required("WEBHOOK_TOKEN")?;

    let smtp_port = match var("SMTP_PORT") {
      None => DEFAULT_SMTP_PORT,
      Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(
          "SMTP_PORT value '{}' is not a valid port, using default {}",
          raw,
          DEFAULT_SMTP_PORT
        );
        DEFAULT_SMTP_PORT
      }),
    };

    let smtp = SmtpConfig {
      host: required("SMTP_HOST")?,
      port: smtp_port,
      username: required("SMTP_USER")?,
      password: required("SMTP_PASS")?,
    };

    let email_from = required("EMAIL_FROM")?
      .parse::<Mailbox>()
      .map_err(|e| ConfigError::InvalidSender(e.to_string()))?;

    Ok(Config {
      port,
      webhook_token,
      smtp,
      email_from,
    })
  }
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("port", &self.port)
      .field("webhook_token", &"<redacted>")
      .field("smtp", &self.smtp)
      .field("email_from", &self.email_from.to_string())
      .finish()
  }
}
