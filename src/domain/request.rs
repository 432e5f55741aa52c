use crate::domain::amount::Amount;
use crate::domain::scheme::{Signature, SignatureScheme};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// `strftime` pattern of the 14-digit request timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Field names owned by the protocol. Caller-supplied extras with one of these
/// names are dropped.
pub const RESERVED_FIELDS: [&str; 10] = [
    "merchant_id",
    "account",
    "order_id",
    "amount",
    "currency",
    "timestamp",
    "sha1hash",
    "md5hash",
    "auto_settle_flag",
    "response_url",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Caller input for a single payment attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SignRequest {
    pub currency: String,
    pub amount: Amount,
    /// Extra values the processor echoes back in its callback. Never signed.
    pub extra_fields: BTreeMap<String, String>,
    /// Overrides the generated `<timestamp>-<hex>` order id.
    pub order_id: Option<String>,
}

impl SignRequest {
    pub fn new(currency: impl Into<String>, amount: Amount) -> Self {
        Self {
            currency: currency.into(),
            amount,
            extra_fields: BTreeMap::new(),
            order_id: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(name.into(), value.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

/// A signed field set ready to be posted to the hosted payment page.
///
/// Protocol fields are kept apart from the caller's extras; the two are only
/// merged by [`OutgoingRequest::fields`]. There are no setters: once signed the
/// request cannot be changed.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub(crate) merchant_id: String,
    pub(crate) account: String,
    pub(crate) order_id: String,
    pub(crate) amount: String,
    pub(crate) currency: String,
    pub(crate) timestamp: String,
    pub(crate) scheme: SignatureScheme,
    pub(crate) signature: Signature,
    pub(crate) auto_settle: bool,
    pub(crate) response_url: Option<String>,
    pub(crate) endpoint_url: String,
    pub(crate) extra_fields: BTreeMap<String, String>,
}

impl OutgoingRequest {
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Amount in minor units.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn auto_settle_flag(&self) -> &'static str {
        if self.auto_settle { "1" } else { "0" }
    }

    pub fn response_url(&self) -> Option<&str> {
        self.response_url.as_deref()
    }

    /// Where the rendered form must be posted.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn extra_fields(&self) -> &BTreeMap<String, String> {
        &self.extra_fields
    }

    /// All fields as `(WIRE_NAME, value)` pairs: protocol fields first in
    /// their wire order, then extras sorted by name.
    pub fn fields(&self) -> Vec<(String, &str)> {
        let mut fields = vec![
            ("MERCHANT_ID".to_string(), self.merchant_id.as_str()),
            ("ACCOUNT".to_string(), self.account.as_str()),
            ("ORDER_ID".to_string(), self.order_id.as_str()),
            ("AMOUNT".to_string(), self.amount.as_str()),
            ("CURRENCY".to_string(), self.currency.as_str()),
            ("TIMESTAMP".to_string(), self.timestamp.as_str()),
            (
                self.scheme.signature_field().to_ascii_uppercase(),
                self.signature.as_str(),
            ),
            ("AUTO_SETTLE_FLAG".to_string(), self.auto_settle_flag()),
        ];
        if let Some(url) = &self.response_url {
            fields.push(("RESPONSE_URL".to_string(), url.as_str()));
        }
        fields.extend(
            self.extra_fields
                .iter()
                .map(|(name, value)| (name.to_ascii_uppercase(), value.as_str())),
        );
        fields
    }

    /// Looks a field up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(wire_name, _)| wire_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

impl Serialize for OutgoingRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, value) in fields {
            map.serialize_entry(&name, value)?;
        }
        map.end()
    }
}
