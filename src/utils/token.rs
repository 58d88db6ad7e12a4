// src/utils/token.rs

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed salt separating reset tokens from every other value signed with the
/// session secret.
pub const RESET_SALT: &str = "recuperar-contrasena-salt";

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    /// Email of the account being recovered.
    sub: String,
    /// Issue time as Unix timestamp.
    iat: i64,
}

fn signing_key(secret: &str, salt: &str) -> Vec<u8> {
    format!("{salt}.{secret}").into_bytes()
}

/// Issues a password-reset token for `email`, valid from now.
pub fn generate_reset_token(email: &str, secret: &str) -> Result<String, AppError> {
    generate_reset_token_at(email, secret, RESET_SALT, Utc::now().timestamp())
}

pub fn generate_reset_token_at(
    email: &str,
    secret: &str,
    salt: &str,
    issued_at: i64,
) -> Result<String, AppError> {
    let claims = ResetClaims {
        sub: email.to_owned(),
        iat: issued_at,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&signing_key(secret, salt)),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Returns the embedded email when the signature is valid and the token is
/// at most `max_age_secs` old. Tampered, foreign and expired tokens all
/// yield `None`.
pub fn verify_reset_token(token: &str, secret: &str, max_age_secs: i64) -> Option<String> {
    verify_reset_token_at(token, secret, RESET_SALT, max_age_secs, Utc::now().timestamp())
}

pub fn verify_reset_token_at(
    token: &str,
    secret: &str,
    salt: &str,
    max_age_secs: i64,
    now: i64,
) -> Option<String> {
    // Age is checked below against `iat`, not through an `exp` claim.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(&signing_key(secret, salt)),
        &validation,
    )
    .ok()?;

    let age = now - data.claims.iat;
    if age < 0 || age > max_age_secs {
        return None;
    }

    Some(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const ISSUED: i64 = 1_700_000_000;

    #[test]
    fn accepted_within_max_age() {
        let token = generate_reset_token_at("ana@example.com", SECRET, RESET_SALT, ISSUED).unwrap();

        assert_eq!(
            verify_reset_token_at(&token, SECRET, RESET_SALT, 3600, ISSUED).as_deref(),
            Some("ana@example.com")
        );
        assert_eq!(
            verify_reset_token_at(&token, SECRET, RESET_SALT, 3600, ISSUED + 3600).as_deref(),
            Some("ana@example.com")
        );
    }

    #[test]
    fn rejected_after_max_age() {
        let token = generate_reset_token_at("ana@example.com", SECRET, RESET_SALT, ISSUED).unwrap();
        assert_eq!(
            verify_reset_token_at(&token, SECRET, RESET_SALT, 3600, ISSUED + 3601),
            None
        );
    }

    #[test]
    fn rejected_with_other_secret_or_salt() {
        let token = generate_reset_token_at("ana@example.com", SECRET, RESET_SALT, ISSUED).unwrap();

        assert_eq!(
            verify_reset_token_at(&token, "other-secret", RESET_SALT, 3600, ISSUED),
            None
        );
        assert_eq!(
            verify_reset_token_at(&token, SECRET, "other-salt", 3600, ISSUED),
            None
        );
    }

    #[test]
    fn rejected_when_tampered() {
        let token = generate_reset_token_at("ana@example.com", SECRET, RESET_SALT, ISSUED).unwrap();
        let mut chars: Vec<char> = token.chars().collect();
        let idx = chars.len() - 5;
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert_eq!(verify_reset_token_at(&tampered, SECRET, RESET_SALT, 3600, ISSUED), None);
        assert_eq!(verify_reset_token_at("garbage", SECRET, RESET_SALT, 3600, ISSUED), None);
    }

    #[test]
    fn current_clock_round_trip() {
        let token = generate_reset_token("luis@example.com", SECRET).unwrap();
        assert_eq!(
            verify_reset_token(&token, SECRET, 3600).as_deref(),
            Some("luis@example.com")
        );
    }
}
