//! Capabilities a host UI layer provides for one text field.

use std::fmt;
use std::rc::Rc;

/// Handler invoked with the field's new text after every edit.
pub type TextChangedHandler = Rc<dyn Fn(&str)>;

/// Handler invoked when the field loses focus.
pub type FocusLostHandler = Rc<dyn Fn()>;

/// Identifies one handler registration on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw registration number handed out by a host.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw registration number.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that can show a single error string.
///
/// Implemented by fields themselves and by decorating containers that render
/// the error on the field's behalf.
pub trait ErrorDisplay {
    /// The error string currently shown, if any.
    fn error(&self) -> Option<String>;

    /// Show `error`, or clear the display when `None`.
    fn set_error(&self, error: Option<&str>);
}

/// One step of a field's containment chain.
pub trait ContainerNode {
    /// The error display this node offers to descendants, if it can host errors.
    fn error_container(&self) -> Option<Rc<dyn ErrorDisplay>>;

    /// The enclosing node, or `None` at the root.
    fn ancestor(&self) -> Option<Rc<dyn ContainerNode>>;
}

/// Adapter binding a validator to one host text field.
///
/// All methods take `&self`; widgets mutate through their own interior state.
/// Handlers may call back into the adapter (`text`, `set_error`) while being
/// dispatched, so implementations must not hold internal borrows across a
/// handler call.
pub trait FieldAdapter: ErrorDisplay {
    /// Human-readable name for this field (for logging/debugging).
    fn name(&self) -> String;

    /// Current text of the field.
    fn text(&self) -> String;

    /// Register a handler for text edits.
    fn subscribe_text_changed(&self, handler: TextChangedHandler) -> SubscriptionId;

    /// Register a handler for focus loss.
    fn subscribe_focus_lost(&self, handler: FocusLostHandler) -> SubscriptionId;

    /// Remove a registration.
    ///
    /// Must be a silent no-op when `id` is unknown or already removed.
    fn unsubscribe(&self, id: SubscriptionId);

    /// The field's direct parent in the containment chain.
    fn ancestor(&self) -> Option<Rc<dyn ContainerNode>>;
}

/// Walk the field's containment chain and return the first error container.
pub(crate) fn find_error_container(field: &dyn FieldAdapter) -> Option<Rc<dyn ErrorDisplay>> {
    let mut node = field.ancestor();
    while let Some(current) = node {
        if let Some(container) = current.error_container() {
            return Some(container);
        }
        node = current.ancestor();
    }
    None
}
