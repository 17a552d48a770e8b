//! Unit tests for authentication module

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_token};
use crate::auth::model::{Claims, LoginRequest, RegisterRequest};
use crate::models::{User, UserInfo};

#[test]
fn test_generate_and_validate_access_token() {
    let token =
        generate_access_token("42", "testdriver", "driver").expect("Failed to generate token");

    let claims = validate_token(&token).expect("Failed to validate token");

    assert_eq!(claims.sub, "42");
    assert_eq!(claims.username, "testdriver");
    assert_eq!(claims.role, "driver");
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_and_validate_refresh_token() {
    let token =
        generate_refresh_token("7", "admin", "admin").expect("Failed to generate refresh token");

    let claims = validate_token(&token).expect("Failed to validate token");

    assert_eq!(claims.sub, "7");
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_token_contains_correct_claims() {
    let token = generate_access_token("1", "admin", "admin").expect("Failed to generate token");

    let claims = validate_token(&token).expect("Failed to validate token");

    assert!(!claims.sub.is_empty());
    assert!(!claims.username.is_empty());
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_invalid_token_returns_error() {
    let result = validate_token("invalid.token.here");
    assert!(result.is_err());
}

#[test]
fn test_user_to_user_info_drops_password() {
    let user = User {
        id: 3,
        username: "driver1".to_string(),
        password: "$2b$12$hash".to_string(),
        role: "driver".to_string(),
        status: "pending".to_string(),
        is_approved: false,
        full_name: Some("Test Driver".to_string()),
        id_number: Some("1234567890".to_string()),
        license_number: None,
        id_document_url: None,
        license_document_url: None,
        profile_image_url: None,
        created_at: chrono::Utc::now(),
    };

    let info: UserInfo = user.clone().into();
    assert_eq!(info.id, user.id);
    assert_eq!(info.username, user.username);
    assert_eq!(info.status, "pending");

    let json = serde_json::to_string(&info).expect("Failed to serialize");
    assert!(!json.contains("password"));
    assert!(json.contains("fullName"));
}

#[test]
fn test_claims_clone() {
    let claims = Claims {
        sub: "test-id".to_string(),
        username: "testuser".to_string(),
        role: "driver".to_string(),
        exp: 12345,
        iat: 12340,
        token_type: "access".to_string(),
    };

    let cloned = claims.clone();

    assert_eq!(claims.sub, cloned.sub);
    assert_eq!(claims.role, cloned.role);
    assert_eq!(claims.token_type, cloned.token_type);
}

#[test]
fn test_login_request_deserialize() {
    let json = r#"{"username": "admin", "password": "admin123"}"#;
    let request: LoginRequest = serde_json::from_str(json).expect("Failed to deserialize");

    assert_eq!(request.username, "admin");
    assert_eq!(request.password, "admin123");
}

#[test]
fn test_register_request_defaults_missing_fields() {
    // Missing fields deserialize as empty strings so the handler can report
    // them through validation instead of a serde 400 with no detail.
    let json = r#"{"username": "driver1"}"#;
    let request: RegisterRequest = serde_json::from_str(json).expect("Failed to deserialize");

    assert_eq!(request.username, "driver1");
    assert!(request.password.is_empty());
    assert!(request.full_name.is_empty());
}
