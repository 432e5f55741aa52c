use crate::domain::merchant::SigningConfig;
use crate::domain::response::{IncomingPayload, ValidatedResult};
use crate::domain::scheme::{SignatureScheme, canonical_message};
use crate::domain::secret::Secret;
use crate::error::{HppError, Result};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Checks the signature on the processor's callback payload.
///
/// Verification is a single pure check. A failure is final for that payload and
/// is always reported to the caller.
#[derive(Debug, Clone)]
pub struct ResponseVerifier {
    secret: Secret,
    scheme: SignatureScheme,
}

impl ResponseVerifier {
    /// Creates a verifier for the configured secret and scheme.
    ///
    /// Only the secret is needed to verify; an empty one is a
    /// [`HppError::Config`].
    pub fn new(config: &SigningConfig) -> Result<Self> {
        if config.secret().is_empty() {
            return Err(HppError::Config(
                "incomplete configuration, missing secret".to_string(),
            ));
        }
        Ok(Self {
            secret: config.secret().clone(),
            scheme: config.scheme(),
        })
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Verifies `payload` and returns its fields with lower-cased keys.
    ///
    /// Required fields are checked in canonical order and the first missing
    /// one is reported as [`HppError::MissingField`] before anything is hashed.
    /// A wrong signature yields [`HppError::SignatureMismatch`].
    pub fn verify(&self, payload: &IncomingPayload) -> Result<ValidatedResult> {
        let mut values = Vec::with_capacity(self.scheme.response_fields().len());
        for field in self.scheme.response_fields() {
            match payload.get(field) {
                Some(value) => values.push(value),
                None => return Err(HppError::MissingField(field.to_string())),
            }
        }

        // The signature field is last in the list.
        let received = values.pop().unwrap_or_default();
        let message = canonical_message(&values);
        let expected = self.scheme.sign(&message, &self.secret);

        let matches: bool = expected.as_str().as_bytes().ct_eq(received.as_bytes()).into();
        if !matches {
            warn!(
                order_id = payload.get("ORDER_ID").unwrap_or_default(),
                scheme = %self.scheme,
                "callback signature mismatch"
            );
            return Err(HppError::SignatureMismatch {
                expected: expected.to_string(),
                received: received.to_string(),
            });
        }

        let result = ValidatedResult::from_payload(payload);
        debug!(order_id = result.order_id(), result = result.result(), "callback verified");
        Ok(result)
    }
}
