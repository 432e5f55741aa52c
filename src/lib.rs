//! Signing and verification for hosted payment page (HPP) redirects.
//!
//! A merchant backend signs the fields it posts to the processor's hosted page
//! with [`RequestSigner`], and checks the processor's signed callback with
//! [`ResponseVerifier`]. Both use the same two-stage hash: the canonical
//! message is hashed, then the hex digest is hashed again together with the
//! shared secret.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::signer::RequestSigner;
pub use application::verifier::ResponseVerifier;
pub use domain::amount::Amount;
pub use domain::merchant::SigningConfig;
pub use domain::request::{OutgoingRequest, SignRequest};
pub use domain::response::{IncomingPayload, ValidatedResult};
pub use domain::scheme::{Signature, SignatureScheme};
pub use domain::secret::Secret;
pub use error::{HppError, Result};
