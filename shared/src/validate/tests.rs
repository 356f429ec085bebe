use super::*;

// =========================================================
// 单字段校验测试
// =========================================================

#[test]
fn test_age_bounds_are_inclusive() {
    assert!(check_age(Some(1)).is_none());
    assert!(check_age(Some(120)).is_none());

    assert!(check_age(Some(0)).is_some());
    assert!(check_age(Some(121)).is_some());
}

#[test]
fn test_unparseable_age_is_rejected() {
    let err = check_age(None).unwrap();

    assert_eq!(err.field, "age");
}

#[test]
fn test_email_syntax() {
    assert!(check_email("ann@example.com").is_none());
    assert!(check_email("  ann@example.com  ").is_none());

    assert!(check_email("").is_some());
    assert!(check_email("ann").is_some());
    assert!(check_email("ann@").is_some());
    assert!(check_email("@example.com").is_some());
    assert!(check_email("ann@nodot").is_some());
    assert!(check_email("ann@.com").is_some());
}

#[test]
fn test_blank_name_and_course_are_rejected() {
    assert!(check_name("   ").is_some());
    assert!(check_course("").is_some());

    assert!(check_name("Ann").is_none());
    assert!(check_course("Math").is_none());
}

#[test]
fn test_password_minimum_length() {
    assert!(check_password("12345").is_some());
    assert!(check_password("123456").is_none());
}

// =========================================================
// 表单级校验测试
// =========================================================

#[test]
fn test_password_mismatch_blocks_registration() {
    let errors = validate_registration("Ann", "ann@example.com", "secret1", "secret2");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "confirm_password");
}

#[test]
fn test_valid_registration_passes() {
    let errors = validate_registration("Ann", "ann@example.com", "secret1", "secret1");

    assert!(errors.is_empty());
}

#[test]
fn test_empty_student_form_reports_every_field() {
    let errors = validate_student("", "", "", None);

    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "course", "age"]);
}

#[test]
fn test_valid_student_form_passes() {
    let errors = validate_student("Ann", "ann@example.com", "Math", Some(20));

    assert!(errors.is_empty());
}
