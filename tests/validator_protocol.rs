//! Integration tests for the shared validation protocol.

use field_validator::prelude::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn layout_with_container() -> (Rc<MemoryContainer>, Rc<MemoryNode>) {
    let container = Rc::new(MemoryContainer::new());
    let node = Rc::new(MemoryNode::new().with_container(container.clone()));
    (container, node)
}

#[test]
fn test_email_form_flow() {
    let email = Rc::new(MemoryField::new("email"));
    let log = Rc::new(RefCell::new(Vec::new()));

    let errors = Rc::clone(&log);
    let _validator = Validator::builder(email.clone(), Rule::email())
        .required(true)
        .validate_on_keystroke(true)
        .observer(ValidateObserver::new().on_error(move |message| {
            errors.borrow_mut().push(message.to_string());
        }))
        .build()
        .unwrap();

    email.type_text("a");
    email.type_text("a@");
    email.type_text("a@b.co");
    email.type_text("");

    assert_eq!(
        *log.borrow(),
        vec![
            "Email address is invalid".to_string(),
            "Email address is invalid".to_string(),
            "Required field".to_string(),
        ]
    );
    assert_eq!(email.error().as_deref(), Some("Required field"));
}

#[test]
fn test_phone_single_digit_is_permitted() {
    let phone = Rc::new(MemoryField::new("phone"));
    let validator = Validator::builder(phone.clone(), Rule::phone())
        .validate_on_keystroke(true)
        .build()
        .unwrap();

    phone.type_text("5");
    assert_eq!(phone.error(), None);

    phone.type_text("5a");
    assert_eq!(phone.error().as_deref(), Some("Phone number is invalid"));

    phone.type_text("555-0100");
    assert_eq!(phone.error(), None);
    assert_eq!(validator.state(), Some(ValidationState::Valid));
}

#[test]
fn test_required_password_skips_min_length() {
    let field = Rc::new(MemoryField::new("password"));
    let validator = Validator::builder(field.clone(), PasswordRule::new().min_length(8))
        .required(true)
        .build()
        .unwrap();

    assert!(validator.validate_text("short"));
    assert!(!validator.validate_text(""));

    validator.set_required(false, None);
    assert!(!validator.validate_text("short"));
    assert_eq!(
        field.error().as_deref(),
        Some("Password must contain at least 8 characters")
    );
}

#[test]
fn test_container_display_round_trip() {
    let (container, layout) = layout_with_container();
    let row = Rc::new(MemoryNode::new().with_ancestor(layout));
    let field = Rc::new(MemoryField::new("email").with_ancestor(row));
    let validator = Validator::new(field.clone(), Rule::email());

    validator.set_container_display(true).unwrap();
    field.set_text("bad");
    field.blur();
    assert_eq!(container.error().as_deref(), Some("Email address is invalid"));
    assert_eq!(field.error(), None);

    validator.set_show_errors(false);
    assert_eq!(container.error(), None);
    assert_eq!(validator.state(), Some(ValidationState::Invalid));
}

#[test]
fn test_container_fault_leaves_target_unchanged() {
    let field = Rc::new(MemoryField::new("email").with_ancestor(Rc::new(MemoryNode::new())));
    let validator = Validator::new(field.clone(), Rule::email());
    field.set_text("bad");
    validator.validate();

    let result = validator.set_container_display(true);
    assert!(matches!(result, Err(ConfigError::NoContainerFound { .. })));

    validator.validate();
    assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
    assert!(!validator.uses_container_display());
}

#[test]
fn test_runtime_toggles_by_key() {
    let (_container, layout) = layout_with_container();
    let field = Rc::new(MemoryField::new("email").with_ancestor(layout));
    let validator = Validator::new(field.clone(), Rule::email());

    for (key, enabled) in [
        ("validate_on_keystroke", true),
        ("required", true),
        ("use_container_display", true),
        ("validate_on_focus_loss", false),
    ] {
        let option: ValidatorOption = key.parse().unwrap();
        validator.toggle(option, enabled).unwrap();
    }

    let options = validator.options();
    assert!(options.validate_on_keystroke);
    assert!(options.required);
    assert!(options.use_container_display);
    assert!(!options.validate_on_focus_loss);

    assert!(matches!(
        "validate_on_scroll".parse::<ValidatorOption>(),
        Err(ConfigError::UnknownOption(_))
    ));
}

proptest! {
    #[test]
    fn prop_optional_empty_always_passes(show in any::<bool>(), keystroke in any::<bool>()) {
        let field = Rc::new(MemoryField::new("email"));
        let validator = Validator::builder(field.clone(), Rule::email())
            .show_errors(show)
            .validate_on_keystroke(keystroke)
            .build()
            .unwrap();
        field.set_error(Some("stale"));

        prop_assert!(validator.validate());
        if show {
            prop_assert_eq!(field.error(), None);
        }
    }

    #[test]
    fn prop_required_blank_always_fails(
        blank in "[ \t]{0,8}",
        min_length in 0usize..12,
        upper in any::<bool>(),
    ) {
        let field = Rc::new(MemoryField::new("password"));
        let mut rule = PasswordRule::new().min_length(min_length);
        rule.set_upper_case(upper, None);
        let validator = Validator::builder(field.clone(), rule)
            .required_with_message("needed")
            .build()
            .unwrap();

        prop_assert!(!validator.validate_text(&blank));
        prop_assert_eq!(field.error(), Some("needed".to_string()));
    }

    #[test]
    fn prop_validate_is_idempotent(text in "\\PC{0,24}") {
        let field = Rc::new(MemoryField::new("email").with_text(text));
        let validator = Validator::new(field.clone(), Rule::email());

        let first = validator.validate();
        let first_error = field.error();
        let second = validator.validate();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_error, field.error());
    }
}
