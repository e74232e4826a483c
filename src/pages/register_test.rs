use super::*;

#[test]
fn validate_register_input_trims_name_and_email() {
    let profile = validate_register_input(" Ben ", " ben@example.com ", "secret1").unwrap();
    assert_eq!(profile.name, "Ben");
    assert_eq!(profile.email, "ben@example.com");
    assert_eq!(profile.password, "secret1");
    assert!(profile.role.is_none());
}

#[test]
fn validate_register_input_requires_every_field() {
    assert_eq!(
        validate_register_input("", "ben@example.com", "secret1").err(),
        Some("Fill in your name, email, and password.")
    );
    assert_eq!(validate_register_input("Ben", "  ", "secret1").err(), Some("Fill in your name, email, and password."));
}

#[test]
fn validate_register_input_rejects_short_password() {
    assert_eq!(
        validate_register_input("Ben", "ben@example.com", "12345").err(),
        Some("Password must be at least 6 characters.")
    );
}
