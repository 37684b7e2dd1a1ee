use std::sync::Arc;

use lettre::{
  message::{
    header::{ContentType, HeaderName, HeaderValue},
    Mailbox, MessageBuilder,
  },
  Message,
};

use super::model::EmailRequest;
use crate::email::{EmailServiceError, Mailer};

const RESERVED_HEADERS: [&str; 4] = ["From", "To", "Cc", "Bcc"];

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailServiceError> {
  address
    .parse()
    .map_err(|e| EmailServiceError::InvalidAddress(format!("'{}': {}", address, e)))
}

fn is_reserved_header(name: &str) -> bool {
  RESERVED_HEADERS
    .iter()
    .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Builds the outgoing message for a decoded request.
///
/// The sender is always `from`. Attachments and metadata are not carried over.
pub fn compose_message(from: &Mailbox, request: &EmailRequest) -> Result<Message, EmailServiceError> {
  if request.to.is_empty() {
    return Err(EmailServiceError::MissingRecipients);
  }

  let mut builder: MessageBuilder = Message::builder().from(from.clone());
  for address in &request.to {
    builder = builder.to(parse_mailbox(address)?);
  }
  for address in &request.cc {
    builder = builder.cc(parse_mailbox(address)?);
  }
  for address in &request.bcc {
    builder = builder.bcc(parse_mailbox(address)?);
  }

  let content_type = if request.is_html {
    ContentType::TEXT_HTML
  } else {
    ContentType::TEXT_PLAIN
  };

  let mut message = builder
    .subject(request.subject.as_str())
    .header(content_type)
    .body(request.body.clone())?;

  for (name, value) in &request.headers {
    if is_reserved_header(name) {
      tracing::warn!("Ignoring custom '{}' header, address headers cannot be overridden", name);
      continue;
    }
    if value.contains(['\r', '\n']) {
      return Err(EmailServiceError::InvalidHeader(format!(
        "value of '{}' contains a line break",
        name
      )));
    }
    let header_name = HeaderName::new_from_ascii(name.clone())
      .map_err(|_| EmailServiceError::InvalidHeader(format!("'{}' is not a valid header name", name)))?;
    message
      .headers_mut()
      .insert_raw(HeaderValue::new(header_name, value.clone()));
  }

  if !request.attachments.is_empty() {
    tracing::debug!(
      "Request carried {} attachment(s); attachments are not forwarded",
      request.attachments.len()
    );
  }

  Ok(message)
}

pub struct EmailService {
  from: Mailbox,
  mailer: Arc<dyn Mailer>,
}

impl EmailService {
  pub fn new(from: Mailbox, mailer: Arc<dyn Mailer>) -> Self {
    Self { from, mailer }
  }

  pub async fn send_email(&self, request: &EmailRequest) -> Result<(), EmailServiceError> {
    let message = compose_message(&self.from, request)?;
    self.mailer.deliver(message).await
  }
}
