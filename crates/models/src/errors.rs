use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// One rejected input field, shaped like `{"type", "loc", "msg", "input"}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<String>,
    pub msg: String,
    /// The offending value; absent when there is nothing to echo back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<JsonValue>,
}

impl FieldViolation {
    pub fn new(kind: &'static str, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            kind,
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<JsonValue>) -> Self {
        self.input = Some(input.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldViolation>),
}
