//! Protocol types: amounts, merchant configuration, signature schemes and the
//! request/response field sets.

pub mod amount;
pub mod merchant;
pub mod ports;
pub mod request;
pub mod response;
pub mod scheme;
pub mod secret;
