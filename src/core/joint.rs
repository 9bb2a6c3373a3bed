//! Joint validation of two fields that must hold the same text.

use crate::core::Validator;
use crate::error::Result;
use crate::field::FieldAdapter;
use crate::messages::MessageKey;
use crate::notify::ValidateObserver;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Two validators whose texts must also be equal (password and confirmation).
///
/// The joint installs itself as the observer of both validators, replacing
/// any observer they had. Whenever either one passes on its own, the two
/// texts are compared again, so a mismatch shows up while the user is still
/// typing. Individual failures are left to the validator that reported them.
///
/// # Examples
///
/// ```rust
/// use field_validator::prelude::*;
/// use std::rc::Rc;
///
/// let password = Rc::new(MemoryField::new("password"));
/// let confirm = Rc::new(MemoryField::new("confirm"));
///
/// let rule = PasswordRule::new().min_length(6).require_digit(None);
/// let joint = JointValidator::confirming(
///     Validator::new(password.clone(), rule),
///     confirm.clone(),
/// )?;
///
/// password.set_text("secret1");
/// confirm.set_text("secret2");
/// assert!(!joint.validate());
/// assert_eq!(confirm.error().as_deref(), Some("Passwords do not match"));
///
/// confirm.set_text("secret1");
/// assert!(joint.validate());
/// assert_eq!(password.error(), None);
/// # Ok::<(), ConfigError>(())
/// ```
pub struct JointValidator {
    inner: Rc<JointInner>,
}

struct JointInner {
    first: Validator,
    second: Validator,
    mismatch_message: RefCell<Option<String>>,
}

impl JointValidator {
    /// Join two configured validators.
    pub fn new(first: Validator, second: Validator) -> Self {
        let inner = Rc::new(JointInner {
            first,
            second,
            mismatch_message: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let observer = ValidateObserver::new().on_success(move || {
            if let Some(inner) = weak.upgrade() {
                inner.recheck();
            }
        });
        inner.first.set_observer(Some(observer.clone()));
        inner.second.set_observer(Some(observer));

        Self { inner }
    }

    /// Copy `password` onto `confirm_field` and join the two.
    ///
    /// # Errors
    ///
    /// Fails if `password` displays errors in a container and the confirm
    /// field has none.
    pub fn confirming(password: Validator, confirm_field: Rc<dyn FieldAdapter>) -> Result<Self> {
        let confirm = password.clone_for(confirm_field)?;
        Ok(Self::new(password, confirm))
    }

    /// Validate both fields and then their equality.
    ///
    /// Both validators always run, so each shows its own error. When both
    /// pass, unequal texts put the mismatch message on both fields; equal
    /// texts clear both.
    pub fn validate(&self) -> bool {
        let first_ok = self.inner.first.validate();
        let second_ok = self.inner.second.validate();
        if !(first_ok && second_ok) {
            return false;
        }

        if self.inner.first.text() == self.inner.second.text() {
            self.inner.show(None);
            true
        } else {
            self.inner.show(Some(&self.inner.mismatch_message()));
            tracing::debug!(
                first = %self.inner.first.field().name(),
                second = %self.inner.second.field().name(),
                "joint validation failed: texts differ"
            );
            false
        }
    }

    /// Override the mismatch message; `None` restores the provider default.
    pub fn set_mismatch_message(&self, message: Option<&str>) {
        *self.inner.mismatch_message.borrow_mut() = message.map(str::to_string);
    }

    /// The message shown when the texts differ.
    pub fn mismatch_message(&self) -> String {
        self.inner.mismatch_message()
    }

    /// The first validator (e.g. password).
    pub fn first(&self) -> &Validator {
        &self.inner.first
    }

    /// The second validator (e.g. confirmation).
    pub fn second(&self) -> &Validator {
        &self.inner.second
    }

    /// Detach the joint and hand back both validators without observers.
    pub fn into_parts(self) -> (Validator, Validator) {
        let first = self.inner.first.handle();
        let second = self.inner.second.handle();
        first.set_observer(None);
        second.set_observer(None);
        (first, second)
    }
}

impl JointInner {
    fn mismatch_message(&self) -> String {
        match self.mismatch_message.borrow().as_deref() {
            Some(message) => message.to_string(),
            None => self
                .first
                .messages()
                .lookup(MessageKey::PasswordsDoNotMatch, &[]),
        }
    }

    fn show(&self, error: Option<&str>) {
        for validator in [&self.first, &self.second] {
            if validator.shows_errors() {
                validator.set_error(error);
            }
        }
    }

    fn recheck(&self) {
        let first = self.first.text();
        let second = self.second.text();
        if first.is_empty() || second.is_empty() {
            return;
        }

        if first == second {
            self.show(None);
        } else {
            self.show(Some(&self.mismatch_message()));
        }
    }
}

impl fmt::Debug for JointValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JointValidator")
            .field("first", &self.inner.first)
            .field("second", &self.inner.second)
            .field("mismatch_message", &self.inner.mismatch_message.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ErrorDisplay, MemoryField};
    use crate::rules::PasswordRule;

    fn pair(rule: PasswordRule) -> (Rc<MemoryField>, Rc<MemoryField>, JointValidator) {
        let password = Rc::new(MemoryField::new("password"));
        let confirm = Rc::new(MemoryField::new("confirm"));
        let joint =
            JointValidator::confirming(Validator::new(password.clone(), rule), confirm.clone())
                .unwrap();
        (password, confirm, joint)
    }

    #[test]
    fn test_equal_texts_pass_and_clear() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        password.set_text("Abc123!");
        confirm.set_text("Abc123!");
        password.set_error(Some("stale"));
        confirm.set_error(Some("stale"));

        assert!(joint.validate());
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error(), None);
    }

    #[test]
    fn test_unequal_texts_fail_on_both() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        password.set_text("Abc123!");
        confirm.set_text("Abc124!");

        assert!(!joint.validate());
        assert_eq!(password.error().as_deref(), Some("Passwords do not match"));
        assert_eq!(confirm.error().as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_inner_failure_keeps_inner_message() {
        let (password, confirm, joint) = pair(PasswordRule::new().require_digit(Some("digit")));
        password.set_text("Abc123!");
        confirm.set_text("nodigit");

        assert!(!joint.validate());
        assert_eq!(confirm.error().as_deref(), Some("digit"));
    }

    #[test]
    fn test_both_inner_validators_run() {
        let (password, confirm, joint) = pair(PasswordRule::new().min_length(4));
        password.set_text("ab");
        confirm.set_text("cd");

        assert!(!joint.validate());
        assert!(password.error().is_some());
        assert!(confirm.error().is_some());
    }

    #[test]
    fn test_custom_mismatch_message() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        joint.set_mismatch_message(Some("Try again"));
        password.set_text("one");
        confirm.set_text("two");

        assert!(!joint.validate());
        assert_eq!(password.error().as_deref(), Some("Try again"));

        joint.set_mismatch_message(None);
        assert_eq!(joint.mismatch_message(), "Passwords do not match");
    }

    #[test]
    fn test_reactive_recheck_on_keystroke() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        joint.first().set_validate_on_keystroke(true);
        joint.second().set_validate_on_keystroke(true);

        password.type_text("Abc123!");
        confirm.type_text("Abc123!");
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error(), None);

        confirm.type_text("Abc124!");
        assert_eq!(password.error().as_deref(), Some("Passwords do not match"));
        assert_eq!(confirm.error().as_deref(), Some("Passwords do not match"));

        password.type_text("Abc124!");
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error(), None);
    }

    #[test]
    fn test_recheck_waits_for_both_texts() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        joint.first().set_validate_on_keystroke(true);

        password.type_text("Abc123!");
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error(), None);
    }

    #[test]
    fn test_hidden_errors_are_not_overridden() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        joint.second().set_show_errors(false);
        password.set_text("one");
        confirm.set_text("two");

        assert!(!joint.validate());
        assert_eq!(password.error().as_deref(), Some("Passwords do not match"));
        assert_eq!(confirm.error(), None);
    }

    #[test]
    fn test_into_parts_detaches() {
        let (password, confirm, joint) = pair(PasswordRule::new());
        let (first, second) = joint.into_parts();
        first.set_validate_on_keystroke(true);

        confirm.set_text("other");
        password.type_text("Abc123!");
        assert_eq!(password.error(), None);
        assert_eq!(confirm.error(), None);
        assert_eq!(second.text(), "other");
    }
}
