//! Property-based tests for account input validation

use kanban_users::shared::validation::{
    validate_display_name, validate_email, validate_password, DISPLAY_NAME_LEN, MIN_PASSWORD_LEN,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_well_formed_emails_accepted(
        local in "[a-z0-9._+]{1,20}",
        domain in "[a-z0-9]{1,15}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(validate_email(&email).is_ok(), "{} rejected", email);
    }

    #[test]
    fn test_emails_without_at_rejected(email in "[a-z0-9.]{0,30}") {
        prop_assert!(validate_email(&email).is_err());
    }

    #[test]
    fn test_emails_with_whitespace_rejected(
        local in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
    ) {
        let email = format!("{} x@{}.com", local, domain);
        prop_assert!(validate_email(&email).is_err());
    }

    #[test]
    fn test_short_passwords_rejected(password in "[a-zA-Z0-9]{1,7}") {
        prop_assert!(password.chars().count() < MIN_PASSWORD_LEN);
        prop_assert!(validate_password(&password).is_err());
    }

    #[test]
    fn test_long_enough_passwords_accepted(password in "[a-zA-Z0-9!@#]{8,72}") {
        prop_assert!(validate_password(&password).is_ok());
    }

    #[test]
    fn test_display_name_length_bound(name in "[a-zA-Z]{0,30}") {
        let len = name.chars().count();
        prop_assert_eq!(validate_display_name(&name).is_ok(), DISPLAY_NAME_LEN.contains(&len));
    }
}
