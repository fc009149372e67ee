//! Tests for user identifiers, emails, and document serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 1", UserValidationError::InvalidId)]
#[case("1\n", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn random_ids_are_distinct() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("")]
#[case("   ")]
fn email_accepts_any_string(#[case] raw: &str) {
    let user: User = serde_json::from_value(json!({ "email": raw })).expect("any email");
    assert_eq!(user.email().as_ref(), raw);
}

#[rstest]
fn email_is_kept_byte_for_byte() {
    let email = EmailAddress::new(" Ada@X.com");
    assert_eq!(email.as_ref(), " Ada@X.com");
    assert_ne!(email, EmailAddress::new("ada@x.com"));
}

#[rstest]
#[case("id")]
#[case("email")]
fn attributes_reject_reserved_keys(#[case] key: &str) {
    let mut attributes = UserAttributes::new();
    attributes.insert(key.to_owned(), json!("x"));

    let err = User::from_email("a@x.com")
        .with_attributes(attributes)
        .expect_err("reserved key");
    assert_eq!(
        err,
        UserValidationError::ReservedAttribute {
            key: key.to_owned()
        }
    );
}

#[rstest]
fn deserialises_flattened_document() {
    let user: User = serde_json::from_value(json!({
        "id": "1",
        "email": "a@x.com",
        "name": "Ada",
        "age": 36
    }))
    .expect("valid document");

    assert_eq!(user.id().map(AsRef::as_ref), Some("1"));
    assert_eq!(user.email().as_ref(), "a@x.com");
    assert_eq!(user.attributes().len(), 2);
    assert_eq!(user.attributes()["age"], 36);
}

#[rstest]
fn serialises_without_id_before_first_save() {
    let user = User::from_email("a@x.com");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({ "email": "a@x.com" }));
}

#[rstest]
fn serialises_attributes_next_to_reserved_fields() {
    let mut attributes = UserAttributes::new();
    attributes.insert("name".to_owned(), json!("Ada"));
    let user = User::from_email("a@x.com")
        .with_attributes(attributes)
        .expect("valid user")
        .with_id(UserId::new("1").expect("valid id"));

    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({ "id": "1", "email": "a@x.com", "name": "Ada" }));
}

#[rstest]
#[case(json!({ "name": "Ada" }))]
#[case(json!({ "id": " 1", "email": "a@x.com" }))]
#[case(json!({ "email": 7 }))]
fn deserialisation_rejects_invalid_documents(#[case] value: serde_json::Value) {
    assert!(serde_json::from_value::<User>(value).is_err());
}

#[rstest]
#[case(json!({ "id": "", "email": "a@x.com" }))]
#[case(json!({ "email": "a@x.com" }))]
fn empty_or_missing_id_means_unsaved(#[case] value: serde_json::Value) {
    let user: User = serde_json::from_value(value).expect("valid document");
    assert!(user.id().is_none());
}

#[rstest]
fn assign_id_overwrites_existing_identifier() {
    let mut user = User::from_email("a@x.com")
        .with_id(UserId::new("old").expect("valid id"));
    user.assign_id(UserId::new("new").expect("valid id"));
    assert_eq!(user.id().map(AsRef::as_ref), Some("new"));
}
