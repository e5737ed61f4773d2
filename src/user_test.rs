use super::*;

#[test]
fn users_compare_by_value() {
    let a = User::new("user@example.com", "Demo User");
    let b = User::new("user@example.com".to_owned(), "Demo User".to_owned());
    assert_eq!(a, b);
    assert_ne!(a, User::new("user@example.com", "Admin"));
}

#[test]
fn user_serializes_with_snake_case_fields() {
    let user = User::new("admin@example.com", "Admin");
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["email"], "admin@example.com");
    assert_eq!(json["display_name"], "Admin");
}
