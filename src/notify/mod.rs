//! Notification plumbing.
//!
//! Observers receive validation outcomes; subscriptions tie a validator's
//! trigger handlers to the lifetime of the validator.

pub mod observer;
pub mod subscription;

pub use observer::ValidateObserver;
pub use subscription::Subscription;
