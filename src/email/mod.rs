//! Outbound SMTP transport
//!
//! Delivery goes through the [`Mailer`] trait so request handling never
//! depends on a live relay. [`SmtpMailer`] is the lettre-backed implementation.

mod service;
mod types;

pub use service::{Mailer, SmtpMailer};
pub use types::{EmailServiceError, SmtpConfig};

#[cfg(test)]
pub use service::MockMailer;
