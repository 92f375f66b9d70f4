//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper rejects before any persistence call happens, attaching a
//! `{"field", "code"}` details object so clients can tell which input
//! failed.

use serde_json::json;

use crate::domain::{EmailAddress, Error, PersonName, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    MalformedEmail,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::MalformedEmail => "malformed_email",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_error_with_value(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must not be empty"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn malformed_email_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error_with_value(
        field,
        format!("{name} must be a valid email address"),
        ErrorCode::MalformedEmail,
        value,
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error_with_value(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        value,
    )
}

pub(crate) fn parse_person_name(value: String, field: FieldName) -> Result<PersonName, Error> {
    PersonName::new(value).map_err(|_| missing_field_error(field))
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value.clone()).map_err(|err| match err {
        UserValidationError::EmptyEmail => missing_field_error(field),
        _ => malformed_email_error(field, &value),
    })
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::parse(value).map_err(|_| invalid_uuid_error(field, value))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the field-tagged error helpers.

    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    const EMAIL: FieldName = FieldName::new("email");

    fn details(error: &Error) -> Value {
        error.details().cloned().expect("details present")
    }

    #[rstest]
    fn blank_name_reports_missing_field() {
        let error = parse_person_name("   ".to_owned(), FieldName::new("firstName"))
            .expect_err("blank name rejected");

        assert_eq!(error.message(), "firstName must not be empty");
        let details = details(&error);
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("firstName")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("missing_field")
        );
    }

    #[rstest]
    fn blank_email_reports_missing_field() {
        let error = parse_email(String::new(), EMAIL).expect_err("blank email rejected");
        assert_eq!(
            details(&error).get("code").and_then(Value::as_str),
            Some("missing_field")
        );
    }

    #[rstest]
    fn malformed_email_reports_code_and_value() {
        let error =
            parse_email("not-an-email".to_owned(), EMAIL).expect_err("malformed email rejected");

        assert_eq!(error.message(), "email must be a valid email address");
        let details = details(&error);
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("malformed_email")
        );
        assert_eq!(
            details.get("value").and_then(Value::as_str),
            Some("not-an-email")
        );
    }

    #[rstest]
    fn malformed_uuid_reports_code_and_value() {
        let error = parse_user_id("nope", FieldName::new("id")).expect_err("malformed id rejected");

        let details = details(&error);
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_uuid")
        );
        assert_eq!(details.get("value").and_then(Value::as_str), Some("nope"));
    }

    #[rstest]
    fn valid_inputs_pass_through() {
        assert!(parse_person_name("Ada".to_owned(), FieldName::new("firstName")).is_ok());
        assert!(parse_email("ada@example.com".to_owned(), EMAIL).is_ok());
        assert!(parse_user_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", FieldName::new("id")).is_ok());
    }
}
