//! # field-validator
//!
//! Validation for interactive text fields, independent of any UI toolkit.
//!
//! ## Overview
//!
//! Each field is bound to a [`Validator`](core::Validator) that reads the
//! field's text, checks it against a rule, and reports the outcome through the
//! field's error display and an optional observer. The host UI layer plugs in
//! through a few small traits:
//! - [`FieldAdapter`](field::FieldAdapter): read text, subscribe to edits and
//!   focus loss, show an error
//! - [`ContainerNode`](field::ContainerNode): walk up to a decorating container
//!   that can show the error instead
//! - [`MessageProvider`](messages::MessageProvider): localized default messages
//!
//! ## Quick Start
//!
//! ```rust
//! use field_validator::prelude::*;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<()> {
//! let email = Rc::new(MemoryField::new("email"));
//! let validator = Validator::builder(email.clone(), Rule::email())
//!     .required(true)
//!     .validate_on_keystroke(true)
//!     .build()?;
//!
//! email.type_text("someone@");
//! assert_eq!(email.error().as_deref(), Some("Email address is invalid"));
//!
//! email.type_text("someone@example.com");
//! assert_eq!(email.error(), None);
//! assert!(validator.validate());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Rules**: email, phone and password (length plus character classes)
//! - **Triggers**: validate on every keystroke, on focus loss, or on demand
//! - **Required fields**: blank text fails before the rule runs
//! - **Container display**: show errors on an enclosing decorator
//! - **Confirm password**: [`JointValidator`](core::JointValidator) checks two
//!   fields for equality and re-checks as either one changes
//! - **Settings files**: options and message catalogs from YAML, TOML or JSON
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! field-validator = { version = "0.1", features = ["toml"] }
//! ```
//!
//! `yaml` and `json` are enabled by default; `all-formats` enables all three.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod field;
pub mod messages;
pub mod notify;
pub mod rules;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        JointValidator, ValidationState, Validator, ValidatorBuilder, ValidatorOption,
        ValidatorOptions,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::field::{ErrorDisplay, FieldAdapter, MemoryContainer, MemoryField, MemoryNode};
    pub use crate::messages::{DefaultMessages, MessageCatalog, MessageKey, MessageProvider};
    pub use crate::notify::ValidateObserver;
    pub use crate::rules::{EmailRule, PasswordRule, PhoneRule, Rule};
}
