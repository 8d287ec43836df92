//! Session lifecycle coordination: sign-up, sign-in, refresh, logout.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{TokenPair, TokenType};
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::credential::CredentialStore;
use crate::services::auth::account_lock::AccountLockGuard;
use crate::services::auth::email::{mask_email, validate_email};
use crate::services::token::{TokenIssuer, TokenVerifier};
use crate::stores::blacklist::TokenBlacklist;
use crate::stores::kv::KeyValueStore;
use crate::stores::refresh::RefreshTokenStore;
use sv_shared::config::auth::AuthConfig;

/// Result of a sign-up or sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Credentials accepted, tokens issued
    Authenticated(TokenPair),
    /// Credentials accepted but the email is not verified yet; no tokens
    /// are issued on this branch
    VerificationPending,
}

/// Coordinates the full session lifecycle against the shared store
///
/// Runs only in the issuing service, which is the one process configured
/// with the signing key. No in-process locking: every cross-instance
/// invariant rests on the store's per-key atomicity.
pub struct AuthService<S: KeyValueStore, C: CredentialStore> {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    refresh_store: RefreshTokenStore<S>,
    blacklist: TokenBlacklist<S>,
    lock_guard: AccountLockGuard<S>,
    credentials: Arc<C>,
    config: AuthConfig,
}

impl<S: KeyValueStore, C: CredentialStore> AuthService<S, C> {
    pub fn new(
        issuer: TokenIssuer,
        verifier: TokenVerifier,
        store: Arc<S>,
        credentials: Arc<C>,
        config: AuthConfig,
    ) -> Self {
        let lock_guard = AccountLockGuard::new(Arc::clone(&store), config.lockout.clone());
        Self {
            issuer,
            verifier,
            refresh_store: RefreshTokenStore::new(Arc::clone(&store)),
            blacklist: TokenBlacklist::new(store),
            lock_guard,
            credentials,
            config,
        }
    }

    /// Register a new account and, unless verification is pending, sign it in
    pub async fn signup(&self, email: &str, password: &str) -> Result<SessionOutcome, DomainError> {
        validate_email(email)?;
        if password.len() < self.config.min_password_length {
            return Err(DomainError::Validation(ValidationError::PasswordTooShort {
                minimum: self.config.min_password_length,
            }));
        }

        let account = self.credentials.create_account(email, password).await?;
        info!(email = %mask_email(email), "Account created");

        if self.config.require_email_verification && !account.email_verified {
            return Ok(SessionOutcome::VerificationPending);
        }

        let pair = self.issue_tokens(account.id, &account.email).await?;
        Ok(SessionOutcome::Authenticated(pair))
    }

    /// Authenticate with email and password
    ///
    /// Lock check comes before the credential comparison, so a locked
    /// account is rejected even with the correct password. Failures
    /// collapse to `InvalidCredentials` without revealing which factor
    /// failed.
    pub async fn signin(&self, email: &str, password: &str) -> Result<SessionOutcome, DomainError> {
        let account = match self.credentials.find_by_email(email).await? {
            Some(account) => account,
            None => {
                info!(email = %mask_email(email), "Sign-in rejected: unknown account");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if let Some(retry_after) = self.lock_guard.lock_status(account.id).await? {
            warn!(user_id = %account.id, "Sign-in rejected: account locked");
            return Err(DomainError::Auth(AuthError::AccountLocked {
                retry_after_seconds: retry_after,
            }));
        }

        if !self.credentials.verify_password(account.id, password).await? {
            self.lock_guard.increment_failed_attempts(account.id).await?;
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Both the lock check and the credential check have passed
        self.lock_guard.reset_failed_attempts(account.id).await?;

        if self.config.require_email_verification && !account.email_verified {
            return Ok(SessionOutcome::VerificationPending);
        }

        let pair = self.issue_tokens(account.id, &account.email).await?;
        info!(user_id = %account.id, "Sign-in succeeded");
        Ok(SessionOutcome::Authenticated(pair))
    }

    /// Exchange a refresh token for a new pair
    ///
    /// Single-use rotation: the old record is consumed atomically before
    /// the new pair is issued, so a crash between the two steps costs the
    /// user a re-authentication instead of leaving two live tokens.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.verifier.verify(refresh_token).map_err(|e| match e {
            DomainError::Token(TokenError::TokenExpired) => {
                DomainError::Token(TokenError::RefreshTokenExpired)
            }
            other => other,
        })?;

        if claims.token_type != TokenType::Refresh {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        if !self.refresh_store.take(user_id, refresh_token).await? {
            // Signature-valid and unexpired, yet absent from the registry:
            // this token was already rotated or revoked
            warn!(user_id = %user_id, "Refresh token replay detected");
            return Err(DomainError::Token(TokenError::ReplayDetected));
        }

        let pair = self.issue_tokens(user_id, &claims.email).await?;
        info!(user_id = %user_id, "Refresh token rotated");
        Ok(pair)
    }

    /// Revoke the current access token and every refresh token for the user
    ///
    /// Blacklisting is best-effort: the access token dies within its
    /// 15-minute window regardless. Refresh revocation is the load-bearing
    /// part and its failures propagate.
    pub async fn logout(&self, access_token: &str, user_id: Uuid) -> Result<(), DomainError> {
        match self.verifier.remaining_lifetime(access_token) {
            Ok(remaining) => {
                if let Err(e) = self.blacklist.add(access_token, remaining).await {
                    warn!(user_id = %user_id, error = %e, "Blacklisting failed during logout");
                }
            }
            Err(_) => {
                warn!(user_id = %user_id, "Undecodable access token at logout, skipping blacklist");
            }
        }

        let revoked = self.refresh_store.revoke_all(user_id).await?;
        info!(user_id = %user_id, revoked, "Logout complete");
        Ok(())
    }

    /// Mint a new pair and register the refresh token
    pub async fn issue_tokens(&self, user_id: Uuid, email: &str) -> Result<TokenPair, DomainError> {
        let pair = self.issuer.generate_pair(user_id, email)?;
        self.refresh_store
            .store(
                user_id,
                &pair.refresh_token,
                self.issuer.refresh_token_expiry().max(0) as u64,
            )
            .await?;
        Ok(pair)
    }

    /// Verify an access token against signature, expiry, and the blacklist
    pub async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<crate::domain::entities::token::Claims, DomainError> {
        let claims = self.verifier.verify(access_token)?;

        if claims.token_type != TokenType::Access {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        if self.blacklist.is_blacklisted(access_token).await {
            return Err(DomainError::Auth(AuthError::SessionExpired));
        }

        Ok(claims)
    }

    /// Whether the account is currently locked out
    pub async fn is_locked(&self, user_id: Uuid) -> Result<bool, DomainError> {
        self.lock_guard.is_locked(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::lockout::FailedLoginState;
    use crate::domain::entities::token::Claims;
    use crate::domain::entities::user::UserAccount;
    use crate::repositories::mock::MockCredentialStore;
    use crate::services::auth::account_lock::attempt_key;
    use crate::services::token::keys::{SigningKey, VerificationKey};
    use crate::services::token::test_keys::{TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};
    use crate::stores::memory::MemoryStore;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    struct Harness {
        service: Arc<AuthService<MemoryStore, MockCredentialStore>>,
        store: Arc<MemoryStore>,
        credentials: Arc<MockCredentialStore>,
    }

    fn harness_with_config(config: AuthConfig) -> Harness {
        let store = Arc::new(MemoryStore::new());
        let credentials = Arc::new(MockCredentialStore::new());
        let issuer =
            TokenIssuer::new(SigningKey::from_pem(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap());
        let verifier =
            TokenVerifier::new(VerificationKey::from_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).unwrap());
        let service = Arc::new(AuthService::new(
            issuer,
            verifier,
            Arc::clone(&store),
            Arc::clone(&credentials),
            config,
        ));
        Harness {
            service,
            store,
            credentials,
        }
    }

    fn harness() -> Harness {
        harness_with_config(AuthConfig::default())
    }

    async fn seeded_user(h: &Harness) -> UserAccount {
        let account = UserAccount::new(Uuid::new_v4(), "user@example.com");
        h.credentials.insert(account.clone(), "Passw0rd1").await;
        account
    }

    #[tokio::test]
    async fn test_signup_issues_token_pair() {
        let h = harness();

        let outcome = h.service.signup("a@x.com", "Passw0rd1").await.unwrap();
        let pair = match outcome {
            SessionOutcome::Authenticated(pair) => pair,
            other => panic!("expected tokens, got {:?}", other),
        };

        let claims = h.service.verify_access_token(&pair.access_token).await.unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(pair.access_expires_in, 900);
        assert_eq!(pair.refresh_expires_in, 604800);
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let h = harness();

        let err = h.service.signup("a@x.com", "short").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::PasswordTooShort { minimum: 8 })
        ));
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let h = harness();

        let err = h.service.signup("not-an-email", "Passw0rd1").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_account() {
        let h = harness();

        h.service.signup("a@x.com", "Passw0rd1").await.unwrap();
        let err = h.service.signup("a@x.com", "Passw0rd2").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_signup_defers_when_verification_required() {
        let mut config = AuthConfig::default();
        config.require_email_verification = true;
        let h = harness_with_config(config);

        let outcome = h.service.signup("a@x.com", "Passw0rd1").await.unwrap();
        assert_eq!(outcome, SessionOutcome::VerificationPending);
    }

    #[tokio::test]
    async fn test_signin_success_round_trip() {
        let h = harness();
        let account = seeded_user(&h).await;

        let outcome = h
            .service
            .signin("user@example.com", "Passw0rd1")
            .await
            .unwrap();
        let pair = match outcome {
            SessionOutcome::Authenticated(pair) => pair,
            other => panic!("expected tokens, got {:?}", other),
        };

        let claims = h.service.verify_access_token(&pair.access_token).await.unwrap();
        assert_eq!(claims.user_id().unwrap(), account.id);
        assert_eq!(claims.email, account.email);
    }

    #[tokio::test]
    async fn test_signin_rejects_bad_password_generically() {
        let h = harness();
        seeded_user(&h).await;

        let err = h
            .service
            .signin("user@example.com", "WrongPass1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_signin_rejects_unknown_account_generically() {
        let h = harness();

        let err = h
            .service
            .signin("nobody@example.com", "Passw0rd1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_lockout_after_five_failures_rejects_correct_password() {
        let h = harness();
        let account = seeded_user(&h).await;

        for _ in 0..5 {
            let err = h
                .service
                .signin("user@example.com", "WrongPass1")
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
        }

        assert!(h.service.is_locked(account.id).await.unwrap());

        // Sixth attempt with the correct password is still rejected
        let err = h
            .service
            .signin("user@example.com", "Passw0rd1")
            .await
            .unwrap_err();
        match err {
            DomainError::Auth(AuthError::AccountLocked { retry_after_seconds }) => {
                assert!(retry_after_seconds > 0 && retry_after_seconds <= 900);
            }
            other => panic!("expected locked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lock_expires_and_counter_resets_on_success() {
        let h = harness();
        let account = seeded_user(&h).await;

        // Five failures whose most recent one is outside the window
        let stale = FailedLoginState {
            failed_attempts: 5,
            last_failed_at: Utc::now() - Duration::seconds(901),
        };
        h.store
            .set_with_expiry(
                &attempt_key(account.id),
                &serde_json::to_string(&stale).unwrap(),
                900,
            )
            .await
            .unwrap();

        let outcome = h
            .service
            .signin("user@example.com", "Passw0rd1")
            .await
            .unwrap();
        assert!(matches!(outcome, SessionOutcome::Authenticated(_)));

        // Counter was reset, so the state entry is gone
        assert!(h
            .store
            .get(&attempt_key(account.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_refresh_is_single_use() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        let new_pair = h.service.refresh(&pair.refresh_token).await.unwrap();
        assert_ne!(new_pair.refresh_token, pair.refresh_token);

        let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::ReplayDetected)));

        // The rotated token works exactly once in turn
        h.service.refresh(&new_pair.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        let err = h.service.refresh(&pair.access_token).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Token(TokenError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_rejects_expired_refresh_token() {
        let h = harness();

        let mut claims = Claims::new_refresh_token(Uuid::new_v4(), "a@x.com");
        claims.iat = Utc::now().timestamp() - 700_000;
        claims.exp = Utc::now().timestamp() - 100;
        let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        let token = encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap();

        let err = h.service.refresh(&token).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Token(TokenError::RefreshTokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_refresh_fails_closed_when_store_unavailable() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        h.store.set_unavailable(true);

        let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_has_one_winner() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        let s1 = Arc::clone(&h.service);
        let s2 = Arc::clone(&h.service);
        let t1 = pair.refresh_token.clone();
        let t2 = pair.refresh_token.clone();

        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.refresh(&t1).await }),
            tokio::spawn(async move { s2.refresh(&t2).await }),
        );

        let outcomes = [r1.unwrap(), r2.unwrap()];
        let winners = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one concurrent refresh may win");
    }

    #[tokio::test]
    async fn test_logout_blacklists_and_revokes_refresh() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        h.service
            .verify_access_token(&pair.access_token)
            .await
            .unwrap();

        h.service.logout(&pair.access_token, account.id).await.unwrap();

        // Signature still decodes, but the combined check rejects it
        let err = h
            .service
            .verify_access_token(&pair.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::SessionExpired)));

        // Every outstanding refresh token is dead
        let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::ReplayDetected)));
    }

    #[tokio::test]
    async fn test_blacklist_ttl_never_exceeds_remaining_lifetime() {
        let h = harness();
        let account = seeded_user(&h).await;
        let verifier =
            TokenVerifier::new(VerificationKey::from_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).unwrap());

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        let remaining_before = verifier.remaining_lifetime(&pair.access_token).unwrap();
        h.service.logout(&pair.access_token, account.id).await.unwrap();

        let key = format!("blacklist:{}", pair.access_token);
        let ttl = h.store.ttl(&key).await.unwrap().unwrap();
        assert!(ttl > 0);
        assert!(ttl <= remaining_before);
    }

    #[tokio::test]
    async fn test_logout_survives_blacklist_ttl_of_expired_token() {
        let h = harness();
        let account = seeded_user(&h).await;

        let pair = h
            .service
            .issue_tokens(account.id, &account.email)
            .await
            .unwrap();

        // A garbage access token cannot be blacklisted, but the refresh
        // revocation still runs
        h.service.logout("garbage", account.id).await.unwrap();

        let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::ReplayDetected)));
    }

    #[tokio::test]
    async fn test_signup_then_logout_scenario() {
        let h = harness();

        let outcome = h.service.signup("a@x.com", "Passw0rd1").await.unwrap();
        let pair = match outcome {
            SessionOutcome::Authenticated(pair) => pair,
            other => panic!("expected tokens, got {:?}", other),
        };

        // Protected call succeeds while the session is live
        let claims = h.service.verify_access_token(&pair.access_token).await.unwrap();
        let user_id = claims.user_id().unwrap();

        h.service.logout(&pair.access_token, user_id).await.unwrap();

        assert!(h
            .service
            .verify_access_token(&pair.access_token)
            .await
            .is_err());
    }
}
