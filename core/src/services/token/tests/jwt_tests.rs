//! Unit tests for the access token codec

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{JwtCodec, TokenServiceConfig};

const KEY: &str = "test-signing-key-with-at-least-32-bytes";

fn codec() -> JwtCodec {
    JwtCodec::new(&TokenServiceConfig::new(KEY))
}

fn expired_claims(email: &str) -> Claims {
    let mut claims = Claims::new_access_token(
        email,
        Role::User,
        "botgarden",
        "botgarden-api",
        Duration::minutes(60),
    );
    claims.iat = (Utc::now() - Duration::hours(2)).timestamp();
    claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
    claims
}

#[test]
fn test_issue_and_decode() {
    let codec = codec();
    let token = codec.issue("curator@garden.org", Role::Admin).unwrap();

    let claims = codec.decode(&token).unwrap();
    assert_eq!(claims.name, "curator@garden.org");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.iss, "botgarden");
    assert_eq!(claims.aud, "botgarden-api");
    assert_eq!(codec.access_token_expires_in(), 3600);
}

#[test]
fn test_expired_token_only_accepted_for_refresh() {
    let codec = codec();
    let token = codec.encode(&expired_claims("a@x.com")).unwrap();

    assert!(matches!(
        codec.decode(&token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
    assert_eq!(codec.decode_allow_expired(&token).unwrap().name, "a@x.com");
}

#[test]
fn test_foreign_key_rejected() {
    let other = JwtCodec::new(&TokenServiceConfig::new("another-signing-key-of-sufficient-size"));
    let token = other.issue("a@x.com", Role::User).unwrap();

    assert!(matches!(
        codec().decode_allow_expired(&token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_tampered_payload_rejected() {
    let codec = codec();
    let token = codec.issue("a@x.com", Role::User).unwrap();
    let forged = codec.issue("admin@x.com", Role::Admin).unwrap();

    // Payload of one token under the signature of another
    let original: Vec<&str> = token.split('.').collect();
    let other: Vec<&str> = forged.split('.').collect();
    let spliced = format!("{}.{}.{}", original[0], other[1], original[2]);

    assert!(matches!(
        codec.decode(&spliced),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_other_algorithm_rejected() {
    let claims = Claims::new_access_token(
        "a@x.com",
        Role::User,
        "botgarden",
        "botgarden-api",
        Duration::minutes(5),
    );
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(KEY.as_bytes()),
    )
    .unwrap();

    assert!(matches!(
        codec().decode_allow_expired(&token),
        Err(DomainError::Token(TokenError::InvalidAlgorithm))
    ));
}

#[test]
fn test_wrong_audience_rejected() {
    let config = TokenServiceConfig {
        audience: "someone-else".to_string(),
        ..TokenServiceConfig::new(KEY)
    };
    let token = JwtCodec::new(&config).issue("a@x.com", Role::User).unwrap();

    assert!(matches!(
        codec().decode(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
}

#[test]
fn test_wrong_issuer_rejected() {
    let config = TokenServiceConfig {
        issuer: "another-garden".to_string(),
        ..TokenServiceConfig::new(KEY)
    };
    let token = JwtCodec::new(&config).issue("a@x.com", Role::User).unwrap();

    assert!(matches!(
        codec().decode(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
    assert!(matches!(
        codec().decode_allow_expired(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
}

#[test]
fn test_blank_identity_claim_rejected() {
    let codec = codec();
    let token = codec.issue("   ", Role::User).unwrap();

    assert!(matches!(
        codec.decode(&token),
        Err(DomainError::Token(TokenError::MissingClaim { .. }))
    ));
}

#[test]
fn test_garbage_rejected() {
    assert!(matches!(
        codec().decode("not-a-jwt"),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}
