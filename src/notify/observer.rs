//! Validation outcome observers.

use std::fmt;
use std::rc::Rc;

type SuccessCallback = Rc<dyn Fn()>;
type ErrorCallback = Rc<dyn Fn(&str)>;

/// Callbacks told about every validation pass.
///
/// Success and error are independent slots; an empty slot is a no-op. A
/// confirm-password join, for example, fills only the success slot.
///
/// # Examples
///
/// ```rust
/// use field_validator::notify::ValidateObserver;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let last = Rc::new(RefCell::new(None));
/// let sink = Rc::clone(&last);
/// let observer = ValidateObserver::new()
///     .on_error(move |message| *sink.borrow_mut() = Some(message.to_string()));
///
/// observer.notify_error("Required field");
/// observer.notify_success();
/// assert_eq!(last.borrow().as_deref(), Some("Required field"));
/// ```
#[derive(Clone, Default)]
pub struct ValidateObserver {
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl ValidateObserver {
    /// Create an observer with both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the success slot.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_success = Some(Rc::new(callback));
        self
    }

    /// Fill the error slot.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        self.on_error = Some(Rc::new(callback));
        self
    }

    /// Invoke the success slot, if filled.
    pub fn notify_success(&self) {
        if let Some(callback) = &self.on_success {
            callback();
        }
    }

    /// Invoke the error slot, if filled.
    pub fn notify_error(&self, message: &str) {
        if let Some(callback) = &self.on_error {
            callback(message);
        }
    }

    /// Whether the success slot is filled.
    pub fn has_success(&self) -> bool {
        self.on_success.is_some()
    }

    /// Whether the error slot is filled.
    pub fn has_error(&self) -> bool {
        self.on_error.is_some()
    }
}

impl fmt::Debug for ValidateObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateObserver")
            .field("on_success", &self.has_success())
            .field("on_error", &self.has_error())
            .finish()
    }
}
