//! Edges of the crate: parsing callback bodies and rendering HTML forms.
//!
//! Neither touches the signing rules; they only move field sets in and out.

pub mod callback;
pub mod html;
