use crate::domain::merchant::SigningConfig;
use crate::domain::ports::{ClockBox, OrderIdSourceBox};
use crate::domain::request::{OutgoingRequest, SignRequest, TIMESTAMP_FORMAT, is_reserved};
use crate::domain::scheme::canonical_message;
use crate::error::{HppError, Result};
use crate::infrastructure::system::{SystemClock, UuidOrderIds};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds signed field sets for the hosted payment page.
///
/// `RequestSigner` owns the merchant configuration together with the clock and
/// order-id source it stamps requests with. Signing is a pure computation on top
/// of one clock read and, when no order id is supplied, one random draw.
pub struct RequestSigner {
    config: SigningConfig,
    clock: ClockBox,
    order_ids: OrderIdSourceBox,
}

impl RequestSigner {
    /// Creates a signer using the UTC wall clock and random order ids.
    ///
    /// Fails with [`HppError::Config`] when the merchant id, account or secret
    /// is missing.
    pub fn new(config: SigningConfig) -> Result<Self> {
        Self::with_sources(config, Box::new(SystemClock), Box::new(UuidOrderIds))
    }

    /// Creates a signer with explicit time and order-id sources.
    ///
    /// # Arguments
    ///
    /// * `config` - The merchant configuration.
    /// * `clock` - Where request timestamps come from.
    /// * `order_ids` - Where the random part of generated order ids comes from.
    pub fn with_sources(
        config: SigningConfig,
        clock: ClockBox,
        order_ids: OrderIdSourceBox,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            order_ids,
        })
    }

    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    /// Signs one payment attempt.
    ///
    /// The canonical message is `timestamp.merchant_id.order_id.amount.currency`.
    /// Extra fields are attached to the result but never signed, and an extra
    /// that reuses a protocol field name is dropped.
    pub fn sign(&self, request: SignRequest) -> Result<OutgoingRequest> {
        let currency = request.currency.trim();
        if currency.is_empty() {
            return Err(HppError::Input("currency is required".to_string()));
        }

        let amount = request.amount.to_minor_units();
        let timestamp = self.clock.now().format(TIMESTAMP_FORMAT).to_string();
        let order_id = match request.order_id {
            Some(order_id) if order_id.trim().is_empty() => {
                return Err(HppError::Input("order id must not be empty".to_string()));
            }
            Some(order_id) => order_id,
            None => format!("{timestamp}-{}", self.order_ids.suffix()),
        };

        let merchant_id = self.config.merchant_id();
        let message = canonical_message(&[
            timestamp.as_str(),
            merchant_id,
            order_id.as_str(),
            amount.as_str(),
            currency,
        ]);
        let scheme = self.config.scheme();
        let signature = scheme.sign(&message, self.config.secret());

        let mut extra_fields = BTreeMap::new();
        for (name, value) in request.extra_fields {
            let name = name.trim().to_lowercase();
            if name.is_empty() || is_reserved(&name) {
                debug!(field = %name, "dropping extra field that collides with a protocol field");
                continue;
            }
            if extra_fields.contains_key(&name) {
                debug!(field = %name, "overwriting extra field given more than once");
            }
            extra_fields.insert(name, value);
        }

        debug!(order_id = %order_id, %scheme, "signed payment request");

        Ok(OutgoingRequest {
            merchant_id: merchant_id.to_string(),
            account: self.config.account().unwrap_or_default().to_string(),
            order_id,
            amount,
            currency: currency.to_string(),
            timestamp,
            scheme,
            signature,
            auto_settle: self.config.auto_settle(),
            response_url: self.config.response_url().map(str::to_string),
            endpoint_url: self.config.endpoint_url().to_string(),
            extra_fields,
        })
    }
}
