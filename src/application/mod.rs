//! Application layer: signing outgoing requests and verifying callbacks.
//!
//! `RequestSigner` and `ResponseVerifier` share one implementation of the
//! two-stage hash, parameterized by [`crate::domain::scheme::SignatureScheme`].

pub mod signer;
pub mod verifier;
