use crate::domain::response::IncomingPayload;
use crate::error::{HppError, Result};
use serde_json::Value;
use std::io::Read;

/// Encodings a callback body can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadFormat {
    /// `application/x-www-form-urlencoded`, as posted by the processor.
    #[default]
    Form,
    /// A flat JSON object of string values, as forwarded by some hosts.
    Json,
}

/// Reads a callback payload from any `Read` source (a file, stdin, a request
/// body).
///
/// Keys are kept exactly as received.
pub struct PayloadReader<R: Read> {
    source: R,
}

impl<R: Read> PayloadReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self, format: PayloadFormat) -> Result<IncomingPayload> {
        match format {
            PayloadFormat::Form => self.read_form(),
            PayloadFormat::Json => self.read_json(),
        }
    }

    /// Decodes a form-urlencoded body. Repeated keys keep the last value.
    pub fn read_form(mut self) -> Result<IncomingPayload> {
        let mut body = Vec::new();
        self.source.read_to_end(&mut body)?;
        Ok(url::form_urlencoded::parse(body.trim_ascii())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect())
    }

    /// Decodes a JSON object whose values are all strings.
    pub fn read_json(self) -> Result<IncomingPayload> {
        let value: Value = serde_json::from_reader(self.source)
            .map_err(|e| HppError::Payload(format!("invalid JSON: {e}")))?;
        let Value::Object(object) = value else {
            return Err(HppError::Payload(
                "expected a JSON object of string values".to_string(),
            ));
        };

        let mut payload = IncomingPayload::new();
        for (key, value) in object {
            match value {
                Value::String(value) => payload.insert(key, value),
                other => {
                    return Err(HppError::Payload(format!(
                        "field {key} must be a string, got {other}"
                    )));
                }
            }
        }
        Ok(payload)
    }
}
