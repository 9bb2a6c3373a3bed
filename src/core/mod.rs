//! Core validation types.

mod builder;
mod display;
mod joint;
mod options;
mod validator;

pub use builder::ValidatorBuilder;
pub use joint::JointValidator;
pub use options::{ValidatorOption, ValidatorOptions};
pub use validator::{ValidationState, Validator};
