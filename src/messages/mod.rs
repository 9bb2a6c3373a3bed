//! Localized message lookup.
//!
//! Validators never hard-code their error strings; they ask a
//! [`MessageProvider`] for the text behind a [`MessageKey`]. Custom per-rule
//! messages take precedence over whatever the provider returns.

mod catalog;
mod provider;

pub use catalog::MessageCatalog;
pub use provider::{DefaultMessages, MessageKey, MessageProvider, interpolate};
