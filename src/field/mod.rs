//! Field capabilities consumed from the host UI layer.
//!
//! The validator core never talks to widgets directly. It reads text,
//! subscribes to edit and focus events, and shows errors through the traits in
//! this module.

mod adapter;
mod memory;

pub use adapter::{
    ContainerNode, ErrorDisplay, FieldAdapter, FocusLostHandler, SubscriptionId,
    TextChangedHandler,
};
pub use memory::{MemoryContainer, MemoryField, MemoryNode};

pub(crate) use adapter::find_error_container;
