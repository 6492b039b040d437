//! End-to-end form flows through the public facade.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use vuiless::prelude::*;
use vuiless::CallbackSet;

fn signup_form() -> (FormState, SharedField<String>, SharedField<String>) {
    let email: SharedField<String> = Field::new("email", String::new())
        .rules(RuleBuilder::new().required().email().into_rules())
        .shared();
    let nickname: SharedField<String> = Field::new("nickname", String::new())
        .rule(min(2))
        .rule(max(8))
        .shared();

    let mut form: FormState = FormState::new(FormOptions::default(), FormData::new());
    form.register("email", email.clone());
    form.register("nickname", nickname.clone());
    (form, email, nickname)
}

#[test]
fn submit_collects_first_failure_per_field() {
    let (mut form, _email, _nickname) = signup_form();

    let outcome = form.submit();
    assert!(outcome.first_submit);
    assert!(!outcome.valid);
    assert_eq!(
        outcome.errors,
        vec![
            (FieldId::from("email"), "Required".to_string()),
            (FieldId::from("nickname"), "Min length 2".to_string()),
        ]
    );
    assert_eq!(form.insights().error_count(), 2);
}

#[test]
fn fixing_values_clears_insights() {
    let (mut form, email, nickname) = signup_form();
    form.submit();

    email.borrow_mut().set_value("ada@example.com".into());
    nickname.borrow_mut().set_value("ada".into());

    let outcome = form.submit();
    assert!(!outcome.first_submit);
    assert!(outcome.valid);
    assert!(form.is_valid());
    assert!(form.first_submit_happened());
}

#[test]
fn field_errors_follow_validation() {
    let (mut form, email, _nickname) = signup_form();
    email.borrow_mut().set_value("not-an-email".into());

    let result = form.validate_field("email");
    assert_eq!(
        result.and_then(|r| r.error_message()).as_deref(),
        Some("Incorrect email address")
    );
    assert_eq!(email.borrow().error(), Some("Incorrect email address"));

    assert!(form.clear_errors("email"));
    assert_eq!(email.borrow().error(), None);
    assert_eq!(form.insights().error("email"), None);
    assert_eq!(email.borrow().value(), "not-an-email");
}

#[test]
fn reset_restores_initial_values() {
    let (mut form, email, nickname) = signup_form();
    email.borrow_mut().set_value("x".into());
    nickname.borrow_mut().set_value("toolongname".into());
    assert!(form.touch("email"));
    assert!(!form.touch("ghost"));
    assert!(email.borrow().is_touched());
    form.submit();

    form.reset();
    assert_eq!(email.borrow().value(), "");
    assert!(!email.borrow().is_touched());
    assert!(!nickname.borrow().is_dirty());
    assert!(!form.insights().is_touched("email"));
    assert!(form.is_valid());
    assert_eq!(form.registry().len(), 2);
}

#[test]
fn cross_field_rule_reads_form_data_and_context() {
    let first: SharedField<String> = Field::new("firstName", String::new())
        .rule(first_or_last_name::<String, FormData, FormContext>)
        .shared();

    let data = FormData::new().with("firstName", "").with("lastName", "");
    let context = FormContext::new().with_flag("nameIsRequired", true);
    let mut form: FormState = FormState::new(FormOptions::default(), data).with_context(context);
    form.register("firstName", first);

    assert!(!form.validate_all());
    assert_eq!(
        form.insights().error("firstName"),
        Some("Please enter first name or last name")
    );

    form.form_data_mut().set("lastName", "Lovelace");
    assert!(form.validate_all());

    form.form_data_mut().set("lastName", "");
    form.set_form_context(Some(FormContext::new().with_flag("nameIsRequired", false)));
    assert!(form.validate_all());

    form.set_form_context(None);
    assert!(form.validate_all());
}

#[test]
fn re_registration_replaces_callbacks() {
    let first_calls = Rc::new(Cell::new(0));
    let second_calls = Rc::new(Cell::new(0));

    let mut form: FormState = FormState::default();
    form.register("email", {
        let calls = Rc::clone(&first_calls);
        CallbackSet::new(move |_: &FormData, _: Option<&FormContext>| {
            calls.set(calls.get() + 1);
            ValidationResult::Valid
        })
    });
    form.register("email", {
        let calls = Rc::clone(&second_calls);
        CallbackSet::new(move |_: &FormData, _: Option<&FormContext>| {
            calls.set(calls.get() + 1);
            ValidationResult::message("Taken")
        })
    });

    assert_eq!(form.registry().len(), 1);
    assert_eq!(form.insights().error("email"), None);
    form.validate_field("email");
    assert_eq!(first_calls.get(), 0);
    assert_eq!(second_calls.get(), 1);
    assert_eq!(form.insights().error("email"), Some("Taken"));

    form.unregister("email");
    form.unregister("email");
    form.unregister("never-registered");
    assert!(form.registry().is_empty());
    assert_eq!(form.insights().error("email"), None);
}

#[test]
fn trigger_is_fixed_at_creation() {
    let form: FormState = FormState::new(
        FormOptions::new().first_validation(ValidationTrigger::OnSubmit),
        FormData::new(),
    );
    assert_eq!(form.first_validation(), ValidationTrigger::OnSubmit);
    assert_eq!(
        FormState::<FormData, FormContext>::default().first_validation(),
        ValidationTrigger::OnChange
    );
}
