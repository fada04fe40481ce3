//! Synchronous input validation for account flows.
//!
//! Rules are independent and checked in a fixed precedence; the first
//! violated rule wins and later rules are not evaluated.

use crate::domain::auth_service::RegisterInput;
use crate::domain::field_error::FieldError;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 3;
/// Usernames of this length or shorter are rejected.
pub const USERNAME_MIN_EXCLUSIVE: usize = 2;

/// Validate a registration payload.
///
/// Precedence: e-mail shape, username length, username characters, password
/// length. Returns the first violated rule as a [`FieldError`], or `None`
/// when all rules pass.
pub fn validate_register(input: &RegisterInput) -> Option<FieldError> {
    if !input.email.contains('@') {
        return Some(FieldError::new("email", "invalid email"));
    }

    if input.username.chars().count() <= USERNAME_MIN_EXCLUSIVE {
        return Some(FieldError::new(
            "username",
            "username requires at least 2 characters",
        ));
    }

    if input.username.contains('@') {
        return Some(FieldError::new("username", "cannot include an @"));
    }

    validate_password(&input.password, "password")
}

/// Validate the replacement password supplied to the change-password flow.
pub fn validate_new_password(new_password: &str) -> Option<FieldError> {
    validate_password(new_password, "newPassword")
}

fn validate_password(password: &str, field: &'static str) -> Option<FieldError> {
    if password.chars().count() < PASSWORD_MIN {
        return Some(FieldError::new(
            field,
            "password requires at least 3 characters",
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn input(username: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[rstest]
    #[case(input("ada", "ada@example.com", "pw123"))]
    #[case(input("bob", "b@b", "pw1"))]
    fn accepts_valid_input(#[case] valid: RegisterInput) {
        assert_eq!(validate_register(&valid), None);
    }

    #[rstest]
    #[case(input("ada", "not-an-email", "pw123"), "email", "invalid email")]
    #[case(
        input("ab", "a@b.com", "pw12"),
        "username",
        "username requires at least 2 characters"
    )]
    #[case(input("a@b", "a@b.com", "pw12"), "username", "cannot include an @")]
    #[case(
        input("ada", "a@b.com", "pw"),
        "password",
        "password requires at least 3 characters"
    )]
    fn rejects_first_violated_rule(
        #[case] invalid: RegisterInput,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let err = validate_register(&invalid).expect("rule violation");
        assert_eq!(err.field, field);
        assert_eq!(err.message, message);
    }

    #[test]
    fn email_rule_shadows_later_violations() {
        // Everything is wrong here; the e-mail rule is declared first and wins.
        let err = validate_register(&input("a@", "nope", "x")).expect("rule violation");
        assert_eq!(err.field, "email");
    }

    #[test]
    fn two_character_username_is_rejected() {
        // Boundary from the account flows: "ab" has length 2 and fails.
        let err = validate_register(&input("ab", "a@b.com", "pw12")).expect("rule violation");
        assert_eq!(err.message, "username requires at least 2 characters");
    }

    #[rstest]
    #[case("pw", Some("newPassword"))]
    #[case("", Some("newPassword"))]
    #[case("pw1", None)]
    fn new_password_length_gate(#[case] password: &str, #[case] expected_field: Option<&str>) {
        let result = validate_new_password(password);
        assert_eq!(result.map(|e| e.field), expected_field.map(str::to_owned));
    }
}
