use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EmailRequest {
  #[serde(default, deserialize_with = "null_as_default")]
  pub to: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
  pub cc: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
  pub bcc: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub subject: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub body: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub is_html: bool,
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "BTreeMap::is_empty")]
  pub headers: BTreeMap<String, String>,
  /// Accepted for wire compatibility; never attached to the outgoing message.
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
  pub attachments: Vec<Attachment>,
  /// Accepted for wire compatibility; never read.
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "HashMap::is_empty")]
  pub metadata: HashMap<String, serde_json::Value>,
}

/// Explicit `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmailRequest {
  /// Decodes the first JSON value in `body`; anything after it is ignored.
  pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    Self::deserialize(&mut deserializer)
  }

  pub fn recipient_count(&self) -> usize {
    self.to.len() + self.cc.len() + self.bcc.len()
  }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Attachment {
  pub filename: String,
  /// Base64 encoded file content.
  pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendMetadata {
  pub duration_ms: u64,
  pub recipients: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendResponse {
  pub status: String,
  pub message: String,
  pub metadata: SendMetadata,
}

impl SendResponse {
  pub fn success(duration_ms: u64, recipients: usize) -> Self {
    SendResponse {
      status: "success".to_string(),
      message: "Email sent".to_string(),
      metadata: SendMetadata {
        duration_ms,
        recipients,
      },
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
  pub status: String,
  pub message: String,
}

impl ErrorResponse {
  pub fn new(message: impl Into<String>) -> Self {
    ErrorResponse {
      status: "error".to_string(),
      message: message.into(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub version: String,
}

impl Default for HealthResponse {
  fn default() -> Self {
    HealthResponse {
      status: "ok".to_string(),
      version: SERVICE_VERSION.to_string(),
    }
  }
}
