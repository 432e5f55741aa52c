use crate::domain::scheme::SignatureScheme;
use crate::domain::secret::Secret;
use crate::error::HppError;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT_URL: &str = "https://hpp.sandbox.realexpayments.com/pay";

/// Merchant identity and shared secret used to sign requests and verify
/// callbacks.
///
/// Built once by the host (see [`crate::config`]) and read-only afterwards.
/// It holds no interior mutability, so a single instance can be shared across
/// threads.
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    merchant_id: String,
    #[serde(default)]
    account: Option<String>,
    secret: Secret,
    #[serde(default = "default_endpoint_url")]
    endpoint_url: String,
    #[serde(default)]
    response_url: Option<String>,
    #[serde(default)]
    scheme: SignatureScheme,
    #[serde(default = "default_auto_settle")]
    auto_settle: bool,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_auto_settle() -> bool {
    true
}

impl SigningConfig {
    pub fn new(merchant_id: impl Into<String>, secret: impl Into<Secret>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            account: None,
            secret: secret.into(),
            endpoint_url: default_endpoint_url(),
            response_url: None,
            scheme: SignatureScheme::default(),
            auto_settle: default_auto_settle(),
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    pub fn with_response_url(mut self, url: impl Into<String>) -> Self {
        self.response_url = Some(url.into());
        self
    }

    pub fn with_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_auto_settle(mut self, auto_settle: bool) -> Self {
        self.auto_settle = auto_settle;
        self
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn response_url(&self) -> Option<&str> {
        self.response_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn auto_settle(&self) -> bool {
        self.auto_settle
    }

    /// Checks that merchant id, account and secret are all present.
    ///
    /// Required before any request can be signed.
    pub fn validate(&self) -> Result<(), HppError> {
        let mut missing = Vec::new();
        if self.merchant_id.trim().is_empty() {
            missing.push("merchant_id");
        }
        if self.account().is_none_or(|account| account.trim().is_empty()) {
            missing.push("account");
        }
        if self.secret.is_empty() {
            missing.push("secret");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(HppError::Config(format!(
                "incomplete configuration, missing {}",
                missing.join(", ")
            )))
        }
    }
}
