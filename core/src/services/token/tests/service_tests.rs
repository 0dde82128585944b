//! Unit tests for token issuance and refresh rotation

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{Role, StoredRefreshToken, User};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::token::{JwtCodec, TokenService, TokenServiceConfig};

const KEY: &str = "test-signing-key-with-at-least-32-bytes";

async fn setup() -> (TokenService<MockUserRepository>, Arc<MockUserRepository>, User) {
    let repo = Arc::new(MockUserRepository::new());
    let user = repo
        .create(User::new("curator@garden.org", "hash".to_string(), Role::User))
        .await
        .unwrap();
    let service = TokenService::new(Arc::clone(&repo), &TokenServiceConfig::new(KEY)).unwrap();
    (service, repo, user)
}

#[tokio::test]
async fn test_issue_tokens_stores_hash_only() {
    let (service, repo, user) = setup().await;

    let pair = service.issue_tokens(&user).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    let stored_token = stored.refresh_token.unwrap();
    assert_ne!(stored_token.hash, pair.refresh_token);
    assert!(stored_token.expires_at > Utc::now() + Duration::days(6));
    assert_eq!(pair.access_expires_in, 3600);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 3600);
}

#[tokio::test]
async fn test_refresh_rotates_once() {
    let (service, _repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();

    let rotated = service
        .refresh_tokens(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);
    assert_ne!(rotated.access_token, pair.access_token);

    let reuse = service
        .refresh_tokens(&pair.access_token, &pair.refresh_token)
        .await;
    assert!(matches!(
        reuse,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    service
        .refresh_tokens(&rotated.access_token, &rotated.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_accepts_expired_access_token() {
    let (service, _repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();

    let codec = JwtCodec::new(&TokenServiceConfig::new(KEY));
    let mut claims = Claims::new_access_token(
        &user.email,
        user.role,
        "botgarden",
        "botgarden-api",
        Duration::minutes(60),
    );
    claims.exp = (Utc::now() - Duration::minutes(5)).timestamp();
    let expired = codec.encode(&claims).unwrap();

    assert!(service
        .refresh_tokens(&expired, &pair.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_expired_stored_token_rejected() {
    let (service, repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();
    repo.force_refresh_expiry(user.id, Utc::now()).await;

    let result = service
        .refresh_tokens(&pair.access_token, &pair.refresh_token)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenExpired))
    ));
}

#[tokio::test]
async fn test_bad_signature_rejected_with_valid_refresh_token() {
    let (service, _repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();

    let other = JwtCodec::new(&TokenServiceConfig::new("a-completely-different-signing-key!!"));
    let forged = other.issue(&user.email, user.role).unwrap();

    let result = service.refresh_tokens(&forged, &pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[tokio::test]
async fn test_refresh_without_stored_token() {
    let (service, _repo, user) = setup().await;
    let access = service.codec().issue(&user.email, user.role).unwrap();

    let result = service.refresh_tokens(&access, "anything").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenMissing))
    ));
}

#[tokio::test]
async fn test_refresh_for_unknown_account() {
    let (service, _repo, _user) = setup().await;
    let access = service.codec().issue("ghost@garden.org", Role::User).unwrap();

    let result = service.refresh_tokens(&access, "anything").await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    let (service, _repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();

    let (a, b) = tokio::join!(
        service.refresh_tokens(&pair.access_token, &pair.refresh_token),
        service.refresh_tokens(&pair.access_token, &pair.refresh_token),
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    assert!(a.is_err() || b.is_err());
}

/// Repository where another session rotates the stored token right after
/// every read
struct InterleavedRotation {
    inner: MockUserRepository,
}

#[async_trait]
impl UserRepository for InterleavedRotation {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = self.inner.find_by_email(email).await?;
        if let Some(user) = &user {
            let competing = StoredRefreshToken::new(
                "rotated-by-another-request".to_string(),
                Utc::now() + Duration::days(7),
            );
            self.inner.set_refresh_token(user.id, &competing).await?;
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &StoredRefreshToken,
    ) -> Result<(), DomainError> {
        self.inner.set_refresh_token(user_id, token).await
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        expected_hash: &str,
        token: &StoredRefreshToken,
    ) -> Result<bool, DomainError> {
        self.inner
            .rotate_refresh_token(user_id, expected_hash, token)
            .await
    }
}

#[tokio::test]
async fn test_refresh_loses_race_after_read() {
    let repo = Arc::new(InterleavedRotation {
        inner: MockUserRepository::new(),
    });
    let user = repo
        .create(User::new("curator@garden.org", "hash".to_string(), Role::User))
        .await
        .unwrap();
    let service = TokenService::new(Arc::clone(&repo), &TokenServiceConfig::new(KEY)).unwrap();
    let pair = service.issue_tokens(&user).await.unwrap();

    let result = service
        .refresh_tokens(&pair.access_token, &pair.refresh_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenRotated))
    ));

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(
        stored.refresh_token.map(|t| t.hash).as_deref(),
        Some("rotated-by-another-request")
    );
}

#[tokio::test]
async fn test_issue_tokens_for_missing_account() {
    let (service, repo, _user) = setup().await;
    let ghost = User::new("ghost@garden.org", "hash".to_string(), Role::User);

    let result = service.issue_tokens(&ghost).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
    assert!(repo.find_by_id(ghost.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_verify_access_token() {
    let (service, _repo, user) = setup().await;
    let pair = service.issue_tokens(&user).await.unwrap();

    let claims = service.verify_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.name, user.email);
}
