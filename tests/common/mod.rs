#![allow(dead_code)]

use hpp_signer::domain::scheme::canonical_message;
use hpp_signer::infrastructure::fixed::{FixedClock, FixedOrderIds};
use hpp_signer::{IncomingPayload, RequestSigner, Secret, SignatureScheme, SigningConfig};

pub const MERCHANT_ID: &str = "1234abcd";
pub const ACCOUNT: &str = "asdf1234";
pub const SECRET: &str = "zbcd4321";
pub const TIMESTAMP: &str = "20240101120000";
pub const ORDER_ID: &str = "20240101120000-ab12";

/// SHA1HASH of EUR 20.00 signed at `TIMESTAMP` for `ORDER_ID`.
pub const GOLDEN_REQUEST_SHA1: &str = "635d2953d66980b202c4bc3a178f61a8fbcea663";
/// SHA1HASH of the authorised callback built by `callback_fields`.
pub const GOLDEN_CALLBACK_SHA1: &str = "6b7295cea28ad33230c9cdca573e266c2160f2be";

pub fn config() -> SigningConfig {
    SigningConfig::new(MERCHANT_ID, SECRET)
        .with_account(ACCOUNT)
        .with_response_url("http://localhost/handle")
}

pub fn fixed_signer(config: SigningConfig) -> RequestSigner {
    RequestSigner::with_sources(
        config,
        Box::new(FixedClock::parse(TIMESTAMP).unwrap()),
        Box::new(FixedOrderIds::new("ab12")),
    )
    .unwrap()
}

/// Unsigned callback fields for an authorised payment of `ORDER_ID`.
pub fn callback_fields() -> Vec<(&'static str, String)> {
    vec![
        ("TIMESTAMP", "20240101120100".to_string()),
        ("MERCHANT_ID", MERCHANT_ID.to_string()),
        ("ORDER_ID", ORDER_ID.to_string()),
        ("RESULT", "00".to_string()),
        ("MESSAGE", "[ test system ] Authorised".to_string()),
        ("PASREF", "14610544313177922".to_string()),
        ("AUTHCODE", "12345".to_string()),
    ]
}

/// Signs `fields` the way the processor does and returns the full payload.
pub fn processor_payload(
    scheme: SignatureScheme,
    fields: &[(&str, String)],
    secret: &str,
) -> IncomingPayload {
    let mut payload: IncomingPayload = fields.iter().map(|(k, v)| (*k, v.clone())).collect();
    let values: Vec<&str> = scheme
        .signed_response_fields()
        .iter()
        .map(|name| {
            fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        })
        .collect();
    let signature = scheme.sign(&canonical_message(&values), &Secret::new(secret));
    payload.insert(scheme.signature_field().to_uppercase(), signature.as_str());
    payload
}
