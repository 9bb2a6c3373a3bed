//! The single place a validator's error string is shown.

use crate::field::{ErrorDisplay, FieldAdapter};
use std::rc::Rc;

/// Where a validator currently shows its errors.
///
/// Exactly one target is active per validator: the field itself or a
/// container resolved from the field's ancestors.
#[derive(Clone)]
pub(crate) enum ErrorTarget {
    Field,
    Container(Rc<dyn ErrorDisplay>),
}

impl ErrorTarget {
    pub(crate) fn show(&self, field: &dyn FieldAdapter, error: Option<&str>) {
        match self {
            ErrorTarget::Field => field.set_error(error),
            ErrorTarget::Container(container) => container.set_error(error),
        }
    }

    pub(crate) fn current(&self, field: &dyn FieldAdapter) -> Option<String> {
        match self {
            ErrorTarget::Field => field.error(),
            ErrorTarget::Container(container) => container.error(),
        }
    }

    pub(crate) fn is_container(&self) -> bool {
        matches!(self, ErrorTarget::Container(_))
    }
}

/// Move a visible error from one display to another.
///
/// Reads the old display, clears it, then shows the string on the new one.
/// Nothing happens when the old display is empty.
pub(crate) fn transfer<F, T>(from: &F, to: &T)
where
    F: ErrorDisplay + ?Sized,
    T: ErrorDisplay + ?Sized,
{
    let Some(error) = from.error().filter(|error| !error.is_empty()) else {
        return;
    };
    from.set_error(None);
    to.set_error(Some(&error));
}
