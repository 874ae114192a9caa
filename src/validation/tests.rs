//! Unit tests for field validation

use super::*;

#[test]
fn test_required_text_blank() {
    let mut errors = ValidationErrors::default();
    errors.required_text("name", "   ", 10);
    assert_eq!(errors.get("name"), Some(&[BLANK.to_string()][..]));
}

#[test]
fn test_required_text_too_long() {
    let mut errors = ValidationErrors::default();
    errors.required_text("name", "abcdefghijk", 10);
    let messages = errors.get("name").unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("no more than 10 characters"));
}

#[test]
fn test_max_length_counts_characters_not_bytes() {
    let mut errors = ValidationErrors::default();
    // Five characters, ten bytes
    errors.required_text("name", "ÇÇÇÇÇ", 5);
    assert!(errors.is_empty());
}

#[test]
fn test_optional_text_absent_is_fine() {
    let mut errors = ValidationErrors::default();
    errors.optional_text("first_name", None, 1);
    assert!(errors.is_empty());
}

#[test]
fn test_amount_upper_bound() {
    let mut errors = ValidationErrors::default();
    errors.amount("price", MAX_AMOUNT);
    assert!(errors.is_empty());

    errors.amount("price", MAX_AMOUNT + 1);
    assert!(errors.get("price").is_some());
}

#[test]
fn test_email_rules() {
    let mut errors = ValidationErrors::default();
    errors.email("email", "", 255);
    errors.email("other", "not-an-email", 255);
    assert_eq!(errors.get("email"), Some(&[BLANK.to_string()][..]));
    assert_eq!(
        errors.get("other"),
        Some(&["Enter a valid email address.".to_string()][..])
    );

    let mut ok = ValidationErrors::default();
    ok.email("email", "test@test.com", 255);
    assert!(ok.is_empty());
}

#[test]
fn test_choice() {
    let choices = vec!["MENTAL".to_string(), "PHYSICAL".to_string()];
    let mut errors = ValidationErrors::default();
    errors.choice("category", "MENTAL", &choices);
    assert!(errors.is_empty());

    errors.choice("category", "mental", &choices);
    assert_eq!(
        errors.get("category"),
        Some(&["\"mental\" is not a valid choice.".to_string()][..])
    );
}

#[test]
fn test_errors_collect_multiple_fields() {
    let mut errors = ValidationErrors::default();
    errors.add("name", "first");
    errors.add("name", "second");
    errors.add("division", "third");

    let fields: Vec<&str> = errors.fields().collect();
    assert_eq!(fields, vec!["division", "name"]);
    assert_eq!(errors.get("name").unwrap().len(), 2);

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json["division"][0], "third");
    assert_eq!(json["name"][1], "second");
}

#[test]
fn test_into_result() {
    assert!(ValidationErrors::default().into_result().is_ok());

    let mut errors = ValidationErrors::default();
    errors.add("name", BLANK);
    match errors.into_result() {
        Err(ManagerError::Validation(e)) => assert!(e.get("name").is_some()),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_display_lists_fields() {
    let mut errors = ValidationErrors::default();
    errors.add("email", "Enter a valid email address.");
    assert_eq!(errors.to_string(), "email: Enter a valid email address.");
}

#[test]
fn test_normalize_email_lowercases_domain_only() {
    assert_eq!(normalize_email("John.Doe@Example.COM"), "John.Doe@example.com");
    assert_eq!(normalize_email("  a@B.c "), "a@b.c");
    assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
}

#[test]
fn test_messages() {
    assert_eq!(invalid_pk(7), "Invalid pk \"7\" - object does not exist.");
    assert_eq!(
        already_exists("country", "name"),
        "country with this name already exists."
    );
}

#[test]
fn test_replace_keeps_one_message() {
    let mut errors = ValidationErrors::default();
    errors.add("name", BLANK);
    errors.add("name", "other");
    errors.replace("name", REQUIRED);
    assert_eq!(errors.get("name"), Some(&[REQUIRED.to_string()][..]));
}

#[test]
fn test_draft_reports_absent_and_invalid_fields_together() {
    use crate::storage::NewTeam;
    use serde_json::json;

    let Value::Object(fields) = json!({ "name": "", "league": null }) else {
        unreachable!()
    };
    match NewTeam::from_fields(fields, &Settings::default()) {
        Err(ManagerError::Validation(errors)) => {
            assert_eq!(errors.get("name"), Some(&[BLANK.to_string()][..]));
            assert_eq!(errors.get("league"), Some(&[NULL.to_string()][..]));
            assert_eq!(
                errors.get("starting_manager_salary"),
                Some(&[REQUIRED.to_string()][..])
            );
        }
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_draft_with_every_field_deserializes() {
    use crate::storage::NewTeam;
    use serde_json::json;

    let Value::Object(fields) = json!({
        "name": "Wolves",
        "league": 3,
        "starting_manager_salary": 10,
    }) else {
        unreachable!()
    };
    let team = NewTeam::from_fields(fields, &Settings::default()).unwrap();
    assert_eq!(team.name, "Wolves");
    assert!(team.existing);
}

#[test]
fn test_draft_type_mismatch_is_malformed() {
    use crate::storage::NewCountry;
    use serde_json::json;

    let Value::Object(fields) = json!({ "name": 5 }) else {
        unreachable!()
    };
    assert!(matches!(
        NewCountry::from_fields(fields, &Settings::default()),
        Err(ManagerError::MalformedBody { .. })
    ));
}
