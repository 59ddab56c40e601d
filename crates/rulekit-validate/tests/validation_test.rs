use indexmap::IndexMap;
use rulekit_validate::prelude::*;
use rulekit_validate::{ErrorRecord, ParsedRule};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn messages(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(field, message)| (field.to_string(), message.to_string()))
        .collect()
}

#[test]
fn test_validate_reports_every_failing_field() {
    init_tracing();
    let mut validation = Validation::new();
    assert!(validation.validate(&json!({})).unwrap());
    assert!(validation.errors().is_empty());

    validation.set_rules([("name", "minLength:5"), ("email", "email")]);
    assert!(!validation.validate(&json!({})).unwrap());
    assert_eq!(
        validation.errors(),
        messages(&[
            ("name", "The name field requires 5 or more characters in length."),
            ("email", "The email field requires a valid email address."),
        ])
    );
}

#[test]
fn test_validate_only_skips_absent_fields() {
    let mut validation = Validation::new();
    validation.set_rules([("name", "minLength:5"), ("email", "email")]);

    assert!(validation.validate_only(&json!({})).unwrap());
    assert!(validation.errors().is_empty());

    assert!(!validation
        .validate_only(&json!({ "name": "foo", "email": "email" }))
        .unwrap());
    assert_eq!(validation.report().len(), 2);

    assert!(!validation.validate_only(&json!({ "name": "foo" })).unwrap());
    assert_eq!(validation.report().fields().collect::<Vec<_>>(), vec!["name"]);
}

#[test]
fn test_validate_only_resolves_nested_paths() {
    let mut validation = Validation::new();
    validation.set_rule("user[email]", "email");

    assert!(validation.validate_only(&json!({ "user": {} })).unwrap());
    assert!(!validation
        .validate_only(&json!({ "user": { "email": "x" } }))
        .unwrap());
}

#[test]
fn test_unknown_rule_is_fatal() {
    init_tracing();
    let mut validation = Validation::new();
    validation.set_rule("name", "foo");

    let error = validation.validate(&json!({})).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Validation rule 'foo' not found on field 'name'"
    );
    assert!(validation.errors().is_empty());
}

#[test]
fn test_optional_passes_absent_fields() {
    let mut validation = Validation::new();
    validation
        .set_rule("email", "email")
        .set_rule("other", "email")
        .set_rule("name", "optional|minLength:5");

    let passed = validation
        .validate(&json!({ "email": "user@domain.tld", "other": "other@domain.tld" }))
        .unwrap();
    assert!(passed);
    assert_eq!(validation.error("email"), None);
    assert_eq!(validation.error("other"), None);
    assert_eq!(validation.error("name"), None);
}

#[test]
fn test_optional_as_last_rule() {
    let mut validation = Validation::new();
    validation
        .set_rule("email", "email|optional")
        .set_rule("name", "minLength:5|optional");

    assert!(!validation.validate(&json!({ "name": "Jon" })).unwrap());
    assert_eq!(validation.error("email"), None);
    assert_eq!(
        validation.error("name").unwrap(),
        "The name field requires 5 or more characters in length."
    );
}

#[test]
fn test_equals_field_uses_labels() {
    let mut validation = Validation::new();
    validation
        .set_rule("password", "minLength:5")
        .set_rule("confirmPassword", "equals:password")
        .set_labels([("password", "Password"), ("confirmPassword", "Confirm Password")]);

    let passed = validation
        .validate(&json!({ "password": "123", "confirmPassword": "" }))
        .unwrap();
    assert!(!passed);
    assert_eq!(
        validation.error("confirmPassword").unwrap(),
        "The Confirm Password field must be equals the Password field."
    );
    assert_eq!(
        validation.report().error("confirmPassword"),
        Some(&ErrorRecord::new("equals", ["Password"]))
    );
}

#[test]
fn test_equals_field_without_labels() {
    let mut validation = Validation::new();
    validation
        .set_rule("password", "minLength:5")
        .set_rule("confirmPassword", "equals:password");

    validation
        .validate(&json!({ "password": "123", "confirmPassword": "" }))
        .unwrap();
    assert_eq!(
        validation.error("confirmPassword").unwrap(),
        "The confirmPassword field must be equals the password field."
    );
}

#[test]
fn test_labels_in_messages() {
    let mut validation = Validation::new();
    validation.set_rule("email", "email");
    validation.validate(&json!({})).unwrap();
    assert_eq!(
        validation.error("email").unwrap(),
        "The email field requires a valid email address."
    );

    validation.set_label("email", "E-mail");
    assert_eq!(
        validation.errors(),
        messages(&[("email", "The E-mail field requires a valid email address.")])
    );
    assert_eq!(validation.error("unknown"), None);
}

#[test]
fn test_custom_messages() {
    let mut validation = Validation::new();
    validation.set_rule("name", "minLength:5");
    validation.validate(&json!({})).unwrap();
    assert_eq!(
        validation.error("name").unwrap(),
        "The name field requires 5 or more characters in length."
    );

    validation.set_message("name", "minLength", "Field {field} too short.");
    assert_eq!(validation.error("name").unwrap(), "Field name too short.");

    validation
        .set_message(
            "name",
            "minLength",
            "Field {field} too short. Min length is {args} chars.",
        )
        .set_label("name", "Nombre");
    validation.validate(&json!({})).unwrap();
    assert_eq!(
        validation.error("name").unwrap(),
        "Field Nombre too short. Min length is 5 chars."
    );
}

#[test]
fn test_set_messages_replaces_table() {
    let mut validation = Validation::new();
    validation
        .set_message("name", "minLength", "Field {field} is too short.")
        .set_message("name", "latin", "Field {field} must have only latin chars.")
        .set_message("country[city]", "in", "Not available in the selected city.");

    assert_eq!(validation.messages().len(), 2);
    assert_eq!(
        validation.message("country[city]", "in"),
        Some("Not available in the selected city.")
    );

    validation.set_messages([("name", [("minLength", "Nome muito curto!")])]);
    assert_eq!(validation.messages().len(), 1);
    assert_eq!(validation.message("name", "latin"), None);
    assert_eq!(validation.message("name", "minLength"), Some("Nome muito curto!"));
}

#[test]
fn test_set_rule_and_rule_list() {
    let mut validation = Validation::new();
    validation.set_rule("foo", "foo:a|bar");
    validation.set_rule_list("bar", ["foo:a", "bar"]);
    validation.set_rule_list("baz", [r"b|a|\z:s", "x"]);

    let rules = validation.rules();
    assert_eq!(rules["foo"], rules["bar"]);
    assert_eq!(
        rules["baz"],
        vec![
            ParsedRule::new("b|a|\\z", ["s"]),
            ParsedRule::named("x")
        ]
    );
}

#[test]
fn test_set_error_with_unknown_message_key() {
    let mut validation = Validation::new();
    assert_eq!(validation.error("foo"), None);
    validation.set_error("foo", "test", ["a", "b"]);
    assert_eq!(validation.error("foo").unwrap(), "validation.test");
}

#[test]
fn test_check_is_detached_from_engine_state() {
    let mut validation = Validation::new();
    validation.set_rule("name", "required|minLength:3");

    let report = validation.check(&json!({ "name": "ab" })).unwrap();
    assert!(!report.passed());
    assert!(validation.report().is_empty());
    assert_eq!(
        validation.messages_for(&report),
        messages(&[("name", "The name field requires 3 or more characters in length.")])
    );

    let report = validation.check_only(&json!({})).unwrap();
    assert!(report.passed());
}

#[test]
fn test_shared_engine_across_threads() {
    let mut validation = Validation::new();
    validation.set_rule("n", "int|greater:0");
    let validation = std::sync::Arc::new(validation);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validation = validation.clone();
            std::thread::spawn(move || {
                validation
                    .check(&json!({ "n": i }))
                    .map(|report| report.passed())
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, true, true, true]);
}

#[test]
fn test_ruleset_describes_configuration() {
    let mut validation = Validation::new();
    validation
        .set_rule("name", "required|in:a\\,b,c")
        .set_rule("email", "optional|email")
        .set_label("email", "E-mail")
        .set_message("email", "email", "Bad {field}");

    let ruleset = validation.ruleset();
    assert_eq!(ruleset.len(), 2);

    assert_eq!(ruleset[0].field, "name");
    assert_eq!(ruleset[0].label, None);
    assert_eq!(ruleset[0].rules[1].rule, "in:a\\,b,c");
    assert_eq!(
        ruleset[0].rules[1].message,
        "The name field does not have an allowed value."
    );

    assert_eq!(ruleset[1].rules[0].message, "The E-mail field is optional.");
    assert_eq!(ruleset[1].rules[1].message, "Bad E-mail");
}

#[test]
fn test_builder_specs_validate() {
    let mut validation = Validation::new();
    validation
        .set_rule("code", Rules::new().required().regex("^(A|B)-\\d+$"))
        .set_rule("tags", Rules::new().in_list(&["x,y", "z"]));

    assert!(validation
        .validate(&json!({ "code": "A-12", "tags": "x,y" }))
        .unwrap());
    assert!(!validation
        .validate(&json!({ "code": "C-12", "tags": "x" }))
        .unwrap());
    assert_eq!(validation.report().len(), 2);
}

#[test]
fn test_is_rule_available() {
    let validation = Validation::new();
    assert!(validation.is_rule_available("alpha"));
    assert!(validation.is_rule_available("json"));
    assert!(validation.is_rule_available("optional"));
    assert!(!validation.is_rule_available("foo"));
}
