//! Login and registration orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use sn_model::{Account, Role};
use sn_storage::AccountProvider;
use sn_token::{SessionClaims, TokenService};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::{AuthError, AuthResult};
use crate::lockout::{Gate, LockoutGuard};
use crate::password::{PasswordPolicy, PasswordVerifier};

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// Signed session token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// The authenticated account.
    pub account: Account,
}

/// Sequences the lockout guard, password verifier, and token service
/// into the register/login/authenticate flows.
///
/// Concurrent logins against the same identity are serialized through a
/// per-identity mutex, so the read-evaluate-verify-write sequence of one
/// attempt never interleaves with another and the failure counter counts
/// every attempt exactly once.
pub struct AuthService<A> {
    accounts: Arc<A>,
    tokens: Arc<TokenService>,
    verifier: PasswordVerifier,
    policy: PasswordPolicy,
    guard: LockoutGuard,
    clock: Arc<dyn Clock>,
    // Verified against when the identity is unknown, so the response
    // time does not reveal whether the account exists.
    dummy_hash: String,
    // Entries live only while attempts against the identity are in
    // flight; the last holder evicts on release, keeping the map from
    // growing with every identity ever submitted.
    attempt_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    allow_self_admin: bool,
}

impl<A> std::fmt::Debug for AuthService<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("verifier", &self.verifier)
            .field("guard", &self.guard)
            .field("allow_self_admin", &self.allow_self_admin)
            .finish_non_exhaustive()
    }
}

impl<A: AccountProvider> AuthService<A> {
    /// Creates the service.
    ///
    /// `allow_self_admin` controls whether a registration request may
    /// grant itself the administrator role; when false the requested
    /// role is silently downgraded to [`Role::User`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if the timing-equalizer hash
    /// cannot be computed.
    pub fn new(
        accounts: Arc<A>,
        tokens: Arc<TokenService>,
        verifier: PasswordVerifier,
        guard: LockoutGuard,
        clock: Arc<dyn Clock>,
        allow_self_admin: bool,
    ) -> AuthResult<Self> {
        let dummy_hash = verifier.hash_blocking("timing-equalizer")?;
        Ok(Self {
            accounts,
            tokens,
            verifier,
            policy: PasswordPolicy,
            guard,
            clock,
            dummy_hash,
            attempt_locks: Mutex::new(HashMap::new()),
            allow_self_admin,
        })
    }

    /// Registers a new account.
    ///
    /// The email is normalized (trimmed, lower-cased) before any check.
    /// The password must satisfy the complexity policy and is stored
    /// only as a bcrypt hash.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] for a malformed email
    /// - [`AuthError::WeakPassword`] if the password fails the policy
    /// - [`AuthError::DuplicateIdentity`] if the email is taken
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        requested_admin: bool,
    ) -> AuthResult<Account> {
        let email = Account::normalize_email(email);
        validate_email(&email)?;
        self.policy.check(password)?;

        let role = if requested_admin && self.allow_self_admin {
            Role::Admin
        } else {
            Role::User
        };

        let hash = self.verifier.hash(password).await?;
        let account = Account::new(email, hash, role);

        match self.accounts.create(&account).await {
            Ok(()) => {
                tracing::info!(email = %account.email, role = %account.role, "account registered");
                Ok(account)
            }
            Err(e) if e.is_duplicate() => Err(AuthError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    /// Attempts a login and issues a session token on success.
    ///
    /// Evaluates the lockout gate before consulting the password, counts
    /// each failed verification, trips the lock at the failure threshold,
    /// and resets all lockout state on success.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UnknownIdentity`] if no such account exists
    /// - [`AuthError::LockedOut`] while a lock is active (including the
    ///   attempt that trips it)
    /// - [`AuthError::InvalidCredentials`] on a non-tripping mismatch,
    ///   carrying the updated failure count
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginSuccess> {
        let email = Account::normalize_email(email);

        let outcome = self.login_serialized(&email, password).await;
        self.release_attempt_lock(&email).await;
        outcome
    }

    async fn login_serialized(&self, email: &str, password: &str) -> AuthResult<LoginSuccess> {
        let identity_lock = self.attempt_lock(email).await;
        let _held = identity_lock.lock().await;

        let Some(mut account) = self.accounts.get_by_email(email).await? else {
            // Burn a verification anyway.
            let _ = self.verifier.verify(password, &self.dummy_hash).await?;
            return Err(AuthError::UnknownIdentity);
        };

        let now = self.clock.now();
        match self.guard.evaluate(&mut account, now) {
            Gate::Proceed => {}
            Gate::RejectLocked { retry_after } => {
                tracing::warn!(email = %account.email, "login attempt on locked account");
                return Err(AuthError::LockedOut {
                    retry_after_secs: ceil_seconds(retry_after),
                });
            }
        }

        if self.verifier.verify(password, &account.password_hash).await? {
            self.guard.record_success(&mut account);
            self.accounts.update_lockout(&account).await?;

            let token = self.tokens.issue(&account.email, account.role)?;
            tracing::info!(email = %account.email, "login succeeded");
            return Ok(LoginSuccess {
                token,
                expires_in: self.tokens.lifespan().num_seconds(),
                account,
            });
        }

        let tripped = self.guard.record_failure(&mut account, now);
        self.accounts.update_lockout(&account).await?;

        if tripped {
            tracing::warn!(
                email = %account.email,
                failed_attempts = account.failed_attempts,
                "account locked after repeated failures"
            );
            Err(AuthError::LockedOut {
                retry_after_secs: self.guard.policy().lock_duration.num_seconds(),
            })
        } else {
            tracing::info!(
                email = %account.email,
                failed_attempts = account.failed_attempts,
                "login failed"
            );
            Err(AuthError::InvalidCredentials {
                failed_attempts: account.failed_attempts,
            })
        }
    }

    /// Resolves a bearer token to its account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenInvalid`] for any unacceptable token,
    /// including a valid signature over an identity that no longer
    /// exists.
    pub async fn authenticate(&self, token: &str) -> AuthResult<Account> {
        let claims = self.tokens.validate(token)?;

        self.accounts
            .get_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::TokenInvalid)
    }

    /// Validates a token without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenInvalid`] for any unacceptable token.
    pub fn validate_token(&self, token: &str) -> AuthResult<SessionClaims> {
        Ok(self.tokens.validate(token)?)
    }

    async fn attempt_lock(&self, email: &str) -> Arc<Mutex<()>> {
        let mut locks = self.attempt_locks.lock().await;
        Arc::clone(
            locks
                .entry(email.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Drops the per-identity lock entry once no attempt holds it.
    ///
    /// A strong count of one means only the map's own reference
    /// remains; a concurrent attempt still holding a clone keeps the
    /// entry alive for its own release to evict.
    async fn release_attempt_lock(&self, email: &str) {
        let mut locks = self.attempt_locks.lock().await;
        if locks
            .get(email)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(email);
        }
    }
}

// Rounded up, so a lock with only a sub-second remainder never
// reports zero seconds while still rejecting.
fn ceil_seconds(duration: Duration) -> i64 {
    let secs = duration.num_seconds();
    if duration > Duration::seconds(secs) {
        secs + 1
    } else {
        secs
    }
}

fn validate_email(email: &str) -> AuthResult<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::Validation("email must contain '@'".to_string()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AuthError::Validation("email is malformed".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sn_storage::memory::MemoryAccountProvider;

    use crate::clock::ManualClock;
    use crate::lockout::LockoutPolicy;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const PASSWORD: &str = "GoodPassw0rd!";

    struct Fixture {
        service: AuthService<MemoryAccountProvider>,
        clock: Arc<ManualClock>,
        accounts: Arc<MemoryAccountProvider>,
    }

    fn fixture(allow_self_admin: bool) -> Fixture {
        let accounts = Arc::new(MemoryAccountProvider::new());
        let tokens = Arc::new(TokenService::new(SECRET, Duration::hours(1)).unwrap());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = AuthService::new(
            Arc::clone(&accounts),
            tokens,
            PasswordVerifier::new(4),
            LockoutGuard::new(LockoutPolicy::default()),
            Arc::clone(&clock) as Arc<dyn Clock>,
            allow_self_admin,
        )
        .unwrap();
        Fixture {
            service,
            clock,
            accounts,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let fx = fixture(false);

        let account = fx
            .service
            .register("Alice@Example.com", PASSWORD, false)
            .await
            .unwrap();
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.role, Role::User);

        let success = fx.service.login("alice@example.com", PASSWORD).await.unwrap();
        assert_eq!(success.expires_in, 3600);
        assert_eq!(success.account.email, "alice@example.com");
    }

    #[tokio::test]
    async fn register_rejects_weak_password_and_bad_email() {
        let fx = fixture(false);

        assert!(matches!(
            fx.service.register("a@b.com", "short1A", false).await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            fx.service.register("not-an-email", PASSWORD, false).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let fx = fixture(false);

        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();
        assert!(matches!(
            fx.service.register(" A@B.COM ", PASSWORD, false).await,
            Err(AuthError::DuplicateIdentity)
        ));
    }

    #[tokio::test]
    async fn admin_request_is_downgraded_unless_allowed() {
        let fx = fixture(false);
        let account = fx.service.register("a@b.com", PASSWORD, true).await.unwrap();
        assert_eq!(account.role, Role::User);

        let fx = fixture(true);
        let account = fx.service.register("a@b.com", PASSWORD, true).await.unwrap();
        assert_eq!(account.role, Role::Admin);
    }

    #[tokio::test]
    async fn unknown_identity_is_distinguished() {
        let fx = fixture(false);

        assert!(matches!(
            fx.service.login("ghost@b.com", PASSWORD).await,
            Err(AuthError::UnknownIdentity)
        ));
    }

    #[tokio::test]
    async fn failures_count_up_then_lock_trips() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();

        for expected in 1..=4 {
            match fx.service.login("a@b.com", "WrongPassw0rd!").await {
                Err(AuthError::InvalidCredentials { failed_attempts }) => {
                    assert_eq!(failed_attempts, expected);
                }
                other => panic!("expected invalid credentials, got {other:?}"),
            }
        }

        match fx.service.login("a@b.com", "WrongPassw0rd!").await {
            Err(AuthError::LockedOut { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 15 * 60);
            }
            other => panic!("expected lockout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lock_rejects_correct_password_until_window_elapses() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();

        for _ in 0..5 {
            let _ = fx.service.login("a@b.com", "WrongPassw0rd!").await;
        }

        // Correct password, still inside the window.
        fx.clock.advance(Duration::minutes(14));
        assert!(matches!(
            fx.service.login("a@b.com", PASSWORD).await,
            Err(AuthError::LockedOut { .. })
        ));

        // Past the window: unlocks and succeeds.
        fx.clock.advance(Duration::minutes(2));
        let success = fx.service.login("a@b.com", PASSWORD).await.unwrap();
        assert_eq!(success.account.failed_attempts, 0);

        let stored = fx
            .accounts
            .get_by_email("a@b.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.failed_attempts, 0);
        assert!(!stored.locked);
    }

    #[tokio::test]
    async fn success_resets_partial_failure_count() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();

        for _ in 0..3 {
            let _ = fx.service.login("a@b.com", "WrongPassw0rd!").await;
        }
        fx.service.login("a@b.com", PASSWORD).await.unwrap();

        let stored = fx
            .accounts
            .get_by_email("a@b.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.failed_attempts, 0);
    }

    #[tokio::test]
    async fn concurrent_failures_are_each_counted() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();
        let service = Arc::new(fx.service);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.login("a@b.com", "WrongPassw0rd!").await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_err());
        }

        let stored = fx
            .accounts
            .get_by_email("a@b.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.failed_attempts, 4);
    }

    #[tokio::test]
    async fn attempt_locks_are_evicted_after_each_attempt() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();

        // Unknown identities must not leave entries behind either.
        for i in 0..50 {
            let _ = fx.service.login(&format!("ghost{i}@b.com"), PASSWORD).await;
        }
        let _ = fx.service.login("a@b.com", "WrongPassw0rd!").await;
        fx.service.login("a@b.com", PASSWORD).await.unwrap();

        assert!(fx.service.attempt_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn sub_second_lock_remainder_rounds_up() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();

        for _ in 0..5 {
            let _ = fx.service.login("a@b.com", "WrongPassw0rd!").await;
        }

        // 500ms left on the lock: reported as one second, not zero.
        fx.clock
            .advance(Duration::minutes(15) - Duration::milliseconds(500));
        match fx.service.login("a@b.com", PASSWORD).await {
            Err(AuthError::LockedOut { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 1);
            }
            other => panic!("expected lockout, got {other:?}"),
        }
    }

    #[test]
    fn ceil_seconds_rounds_up_partial_seconds() {
        assert_eq!(ceil_seconds(Duration::milliseconds(1)), 1);
        assert_eq!(ceil_seconds(Duration::seconds(1)), 1);
        assert_eq!(ceil_seconds(Duration::milliseconds(1500)), 2);
        assert_eq!(ceil_seconds(Duration::zero()), 0);
    }

    #[tokio::test]
    async fn authenticate_resolves_token_to_account() {
        let fx = fixture(false);
        fx.service.register("a@b.com", PASSWORD, false).await.unwrap();
        let success = fx.service.login("a@b.com", PASSWORD).await.unwrap();

        let account = fx.service.authenticate(&success.token).await.unwrap();
        assert_eq!(account.email, "a@b.com");

        assert!(matches!(
            fx.service.authenticate("garbage").await,
            Err(AuthError::TokenInvalid)
        ));
    }
}
