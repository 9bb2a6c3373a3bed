//! In-memory field host.
//!
//! A headless implementation of the field capabilities. Useful for tests,
//! server-side form checks, and terminal front ends that drive validation by
//! feeding text and focus events directly.

use super::{
    ContainerNode, ErrorDisplay, FieldAdapter, FocusLostHandler, SubscriptionId,
    TextChangedHandler,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A text field held entirely in memory.
///
/// # Examples
///
/// ```rust
/// use field_validator::field::{FieldAdapter, MemoryField};
/// use std::rc::Rc;
///
/// let field = Rc::new(MemoryField::new("email"));
/// field.type_text("someone@example.com");
/// assert_eq!(field.text(), "someone@example.com");
/// ```
pub struct MemoryField {
    name: String,
    text: RefCell<String>,
    error: RefCell<Option<String>>,
    text_handlers: RefCell<Vec<(SubscriptionId, TextChangedHandler)>>,
    focus_handlers: RefCell<Vec<(SubscriptionId, FocusLostHandler)>>,
    next_id: Cell<u64>,
    ancestor: Option<Rc<dyn ContainerNode>>,
}

impl MemoryField {
    /// Create an empty field with the given name and no ancestors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: RefCell::new(String::new()),
            error: RefCell::new(None),
            text_handlers: RefCell::new(Vec::new()),
            focus_handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            ancestor: None,
        }
    }

    /// Set the initial text without firing events.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        *self.text.borrow_mut() = text.into();
        self
    }

    /// Place the field inside a containment chain.
    pub fn with_ancestor(mut self, ancestor: Rc<dyn ContainerNode>) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    /// Replace the text without firing events (programmatic update).
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Replace the text as a user edit and notify text-changed handlers.
    pub fn type_text(&self, text: impl Into<String>) {
        let text = text.into();
        *self.text.borrow_mut() = text.clone();

        // Snapshot so handlers can (un)subscribe while being dispatched.
        let handlers: Vec<TextChangedHandler> = self
            .text_handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(&text);
        }
    }

    /// Simulate the field losing focus and notify focus-lost handlers.
    pub fn blur(&self) {
        let handlers: Vec<FocusLostHandler> = self
            .focus_handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Number of registered text-changed handlers.
    pub fn text_subscriber_count(&self) -> usize {
        self.text_handlers.borrow().len()
    }

    /// Number of registered focus-lost handlers.
    pub fn focus_subscriber_count(&self) -> usize {
        self.focus_handlers.borrow().len()
    }

    fn next_subscription_id(&self) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        SubscriptionId::new(id)
    }
}

impl ErrorDisplay for MemoryField {
    fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    fn set_error(&self, error: Option<&str>) {
        *self.error.borrow_mut() = error.map(str::to_string);
    }
}

impl FieldAdapter for MemoryField {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn subscribe_text_changed(&self, handler: TextChangedHandler) -> SubscriptionId {
        let id = self.next_subscription_id();
        self.text_handlers.borrow_mut().push((id, handler));
        id
    }

    fn subscribe_focus_lost(&self, handler: FocusLostHandler) -> SubscriptionId {
        let id = self.next_subscription_id();
        self.focus_handlers.borrow_mut().push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.text_handlers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
        self.focus_handlers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
    }

    fn ancestor(&self) -> Option<Rc<dyn ContainerNode>> {
        self.ancestor.clone()
    }
}

/// A decorating container that renders an error for the fields inside it.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    error: RefCell<Option<String>>,
}

impl MemoryContainer {
    /// Create a container showing no error.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorDisplay for MemoryContainer {
    fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    fn set_error(&self, error: Option<&str>) {
        *self.error.borrow_mut() = error.map(str::to_string);
    }
}

/// A node in the containment chain, optionally carrying an error container.
#[derive(Default)]
pub struct MemoryNode {
    container: Option<Rc<MemoryContainer>>,
    ancestor: Option<Rc<dyn ContainerNode>>,
}

impl MemoryNode {
    /// Create a plain root node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Let this node host errors through `container`.
    pub fn with_container(mut self, container: Rc<MemoryContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// Nest this node inside `ancestor`.
    pub fn with_ancestor(mut self, ancestor: Rc<dyn ContainerNode>) -> Self {
        self.ancestor = Some(ancestor);
        self
    }
}

impl ContainerNode for MemoryNode {
    fn error_container(&self) -> Option<Rc<dyn ErrorDisplay>> {
        self.container
            .as_ref()
            .map(|container| Rc::clone(container) as Rc<dyn ErrorDisplay>)
    }

    fn ancestor(&self) -> Option<Rc<dyn ContainerNode>> {
        self.ancestor.clone()
    }
}
