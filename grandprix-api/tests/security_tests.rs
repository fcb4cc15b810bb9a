use grandprix_api::security::{
    create_access_token, hash_password, validate_token, verify_password, JwtConfig,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[test]
fn test_token_round_trip() {
    let config = JwtConfig::new("test-secret".to_string());
    let user_id = Uuid::new_v4();

    let token = create_access_token(&config, &user_id).unwrap();
    let claims = validate_token(&config, &token).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let config = JwtConfig::new("test-secret".to_string());
    let other = JwtConfig::new("different-secret".to_string());
    let token = create_access_token(&config, &Uuid::new_v4()).unwrap();

    assert!(validate_token(&other, &token).is_err());
}

#[test]
fn test_expired_token_rejected() {
    let mut config = JwtConfig::new("test-secret".to_string());
    config.token_expiry_seconds = -3600;
    let token = create_access_token(&config, &Uuid::new_v4()).unwrap();

    assert!(validate_token(&config, &token).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let config = JwtConfig::new("test-secret".to_string());
    assert!(validate_token(&config, "not.a.token").is_err());
}

#[test]
fn test_password_hash_round_trip() {
    let hashed = hash_password("hunter22");

    assert!(verify_password("hunter22", &hashed));
    assert!(!verify_password("hunter23", &hashed));
}

#[test]
fn test_password_hashes_are_salted() {
    let first = hash_password("same-password");
    let second = hash_password("same-password");

    assert_ne!(first, second);
    assert!(verify_password("same-password", &first));
    assert!(verify_password("same-password", &second));
}

#[test]
fn test_verify_rejects_malformed_stored_hash() {
    assert!(!verify_password("anything", "no-separator"));
    assert!(!verify_password("anything", "nothex:abcd"));
}
