//! Drop guards for field event registrations.

use crate::field::{FieldAdapter, SubscriptionId};
use std::rc::{Rc, Weak};

/// Handle for a field event registration that can be dropped to unsubscribe.
///
/// When the handle is dropped the registration is removed from the field. If
/// the field is already gone, dropping does nothing.
pub struct Subscription {
    id: SubscriptionId,
    field: Weak<dyn FieldAdapter>,
}

impl Subscription {
    /// Take ownership of registration `id` on `field`.
    pub fn new(field: &Rc<dyn FieldAdapter>, id: SubscriptionId) -> Self {
        Self {
            id,
            field: Rc::downgrade(field),
        }
    }

    /// The registration id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(field) = self.field.upgrade() {
            field.unsubscribe(self.id);
        }
    }
}
