//! Authentication tests
//!
//! Tests for credential validation, role handling, password hashing and
//! token round trips:
//! - email and password validation accept/reject the same inputs everywhere
//! - roles parse from their wire strings and default to operator
//! - bcrypt verification round-trips and rejects wrong passwords
//! - JWT claims survive encode/decode and expiry is enforced

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use shared::models::UserRole;
use shared::types::Language;
use shared::validation::{validate_email, validate_password};

/// Mirror of the claims carried by access tokens
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    exp: i64,
    iat: i64,
}

fn claims_expiring_in(seconds: i64) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: uuid::Uuid::new_v4().to_string(),
        email: "operador@planta.mx".to_string(),
        role: "operator".to_string(),
        exp: now + seconds,
        iat: now,
    }
}

// ============================================================================
// Unit Tests: Credential Validation
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails_accepted() {
        assert!(validate_email("operador@planta.mx").is_ok());
        assert!(validate_email("admin@agua-sanate.com.mx").is_ok());
    }

    #[test]
    fn test_invalid_emails_rejected() {
        assert!(validate_email("").is_err());
        assert!(validate_email("sin-arroba.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("").is_err());
    }
}

// ============================================================================
// Unit Tests: Roles and Language
// ============================================================================

#[cfg(test)]
mod role_tests {
    use super::*;

    #[test]
    fn test_role_wire_strings_round_trip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("operator"), Some(UserRole::Operator));
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Operator.as_str(), "operator");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserRole::parse("ADMIN"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn test_default_role_is_operator() {
        assert_eq!(UserRole::default(), UserRole::Operator);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Spanish.code(), "es");
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::default(), Language::Spanish);
    }
}

// ============================================================================
// Unit Tests: Password Hashing
// ============================================================================

#[cfg(test)]
mod password_tests {
    // Minimum cost keeps the test fast; production uses DEFAULT_COST
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_verifies_original_password() {
        let hash = bcrypt::hash("contraseña-segura", TEST_COST).unwrap();

        assert!(hash.starts_with("$2"));
        assert!(bcrypt::verify("contraseña-segura", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = bcrypt::hash("contraseña-segura", TEST_COST).unwrap();
        assert!(!bcrypt::verify("otra-contraseña", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = bcrypt::hash("contraseña-segura", TEST_COST).unwrap();
        let second = bcrypt::hash("contraseña-segura", TEST_COST).unwrap();
        assert_ne!(first, second);
    }
}

// ============================================================================
// Unit Tests: Token Round Trips
// ============================================================================

#[cfg(test)]
mod token_tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn test_claims_survive_encode_decode() {
        let claims = claims_expiring_in(3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims, claims);
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = claims_expiring_in(-3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let err = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET),
            &Validation::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode(
            &Header::default(),
            &claims_expiring_in(3600),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"otro-secreto"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    const SECRET: &[u8] = b"property-secret";

    fn email_strategy() -> impl Strategy<Value = String> {
        "[a-z]{3,10}@[a-z]{3,8}\\.(com|mx|org)"
    }

    fn password_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9!@#$%]{8,20}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Well-formed emails always validate
        #[test]
        fn prop_generated_emails_valid(email in email_strategy()) {
            prop_assert!(validate_email(&email).is_ok());
        }

        /// Passwords of eight or more characters always validate
        #[test]
        fn prop_generated_passwords_valid(password in password_strategy()) {
            prop_assert!(validate_password(&password).is_ok());
        }

        /// Short passwords never validate
        #[test]
        fn prop_short_passwords_rejected(password in "[a-zA-Z0-9]{0,7}") {
            prop_assert!(validate_password(&password).is_err());
        }

        /// Role parsing only accepts the two wire strings
        #[test]
        fn prop_role_parse_is_strict(s in "[a-zA-Z]{0,12}") {
            let parsed = UserRole::parse(&s);
            if s == "admin" || s == "operator" {
                prop_assert!(parsed.is_some());
            } else {
                prop_assert!(parsed.is_none());
            }
        }

        /// Tokens always decode with the secret that signed them
        #[test]
        fn prop_token_round_trip(seconds in 60i64..=86400i64) {
            let claims = claims_expiring_in(seconds);
            let token = encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(SECRET),
            )
            .unwrap();

            let decoded = decode::<Claims>(
                &token,
                &DecodingKey::from_secret(SECRET),
                &Validation::default(),
            )
            .unwrap();

            prop_assert_eq!(decoded.claims, claims);
        }
    }
}
