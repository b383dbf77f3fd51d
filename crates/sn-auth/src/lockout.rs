//! Progressive lockout around login attempts.
//!
//! The guard is the only code that mutates an account's lockout columns
//! (`failed_attempts`, `locked`, `locked_at`). Callers persist the
//! mutated account after every attempt and must serialize concurrent
//! attempts against the same account.

use chrono::{DateTime, Duration, Utc};
use sn_model::Account;

/// Lockout policy parameters.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    /// Consecutive failures that trip the lock.
    pub max_failed_attempts: i32,
    /// How long a tripped lock holds before auto-expiring.
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lock_duration: Duration::minutes(15),
        }
    }
}

impl LockoutPolicy {
    /// Creates a policy with the given threshold and lock duration.
    #[must_use]
    pub const fn new(max_failed_attempts: i32, lock_duration: Duration) -> Self {
        Self {
            max_failed_attempts,
            lock_duration,
        }
    }
}

/// Outcome of evaluating an account before credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The attempt may proceed to credential verification.
    Proceed,
    /// The account is locked; credentials must not be consulted.
    RejectLocked {
        /// Time remaining until the lock auto-expires.
        retry_after: Duration,
    },
}

/// Evaluates and mutates an account's lockout state around each attempt.
#[derive(Debug, Clone, Default)]
pub struct LockoutGuard {
    policy: LockoutPolicy,
}

impl LockoutGuard {
    /// Creates a guard with the given policy.
    #[must_use]
    pub const fn new(policy: LockoutPolicy) -> Self {
        Self { policy }
    }

    /// Returns the guard's policy.
    #[must_use]
    pub const fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// Evaluates the account at the start of an attempt.
    ///
    /// A lock whose window has elapsed (`now >= locked_at +
    /// lock_duration`) is lifted here, before credentials are looked at.
    /// A still-active lock rejects the attempt without consulting the
    /// password verifier, so a locked caller learns nothing about
    /// whether the password would have matched.
    pub fn evaluate(&self, account: &mut Account, now: DateTime<Utc>) -> Gate {
        if !account.locked {
            return Gate::Proceed;
        }

        match account.locked_at {
            Some(locked_at) => {
                let expires_at = locked_at + self.policy.lock_duration;
                if now >= expires_at {
                    account.clear_lock();
                    Gate::Proceed
                } else {
                    Gate::RejectLocked {
                        retry_after: expires_at - now,
                    }
                }
            }
            // locked without locked_at violates the model invariant;
            // recover by lifting the lock.
            None => {
                account.clear_lock();
                Gate::Proceed
            }
        }
    }

    /// Records a failed credential check.
    ///
    /// Increments the failure counter; when the counter reaches the
    /// threshold, trips the lock and stamps `locked_at`. Returns whether
    /// the lock tripped on this attempt.
    pub fn record_failure(&self, account: &mut Account, now: DateTime<Utc>) -> bool {
        account.failed_attempts += 1;

        if account.failed_attempts >= self.policy.max_failed_attempts {
            account.locked = true;
            account.locked_at = Some(now);
            true
        } else {
            false
        }
    }

    /// Records a successful credential check, resetting all lockout
    /// state regardless of its prior value.
    pub fn record_success(&self, account: &mut Account) {
        account.clear_lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_model::Role;

    fn account() -> Account {
        Account::new("alice@example.com", "hash", Role::User)
    }

    #[test]
    fn unlocked_account_proceeds() {
        let guard = LockoutGuard::default();
        let mut account = account();

        assert_eq!(guard.evaluate(&mut account, Utc::now()), Gate::Proceed);
    }

    #[test]
    fn lock_trips_exactly_at_threshold() {
        let guard = LockoutGuard::default();
        let mut account = account();
        let now = Utc::now();

        for attempt in 1..5 {
            assert!(!guard.record_failure(&mut account, now));
            assert_eq!(account.failed_attempts, attempt);
            assert!(!account.locked);
        }

        assert!(guard.record_failure(&mut account, now));
        assert_eq!(account.failed_attempts, 5);
        assert!(account.locked);
        assert_eq!(account.locked_at, Some(now));
    }

    #[test]
    fn locked_account_rejects_within_window() {
        let guard = LockoutGuard::default();
        let mut account = account();
        let locked_at = Utc::now();

        for _ in 0..5 {
            guard.record_failure(&mut account, locked_at);
        }

        // One second before expiry: still rejected.
        let just_before = locked_at + Duration::minutes(15) - Duration::seconds(1);
        match guard.evaluate(&mut account, just_before) {
            Gate::RejectLocked { retry_after } => {
                assert_eq!(retry_after, Duration::seconds(1));
            }
            Gate::Proceed => panic!("expected rejection within the lock window"),
        }
    }

    #[test]
    fn lock_lifts_at_exact_expiry() {
        let guard = LockoutGuard::default();
        let mut account = account();
        let locked_at = Utc::now();

        for _ in 0..5 {
            guard.record_failure(&mut account, locked_at);
        }

        let at_expiry = locked_at + Duration::minutes(15);
        assert_eq!(guard.evaluate(&mut account, at_expiry), Gate::Proceed);
        assert_eq!(account.failed_attempts, 0);
        assert!(!account.locked);
        assert!(account.locked_at.is_none());
    }

    #[test]
    fn success_resets_any_counter_value() {
        let guard = LockoutGuard::default();
        let mut account = account();
        let now = Utc::now();

        for _ in 0..3 {
            guard.record_failure(&mut account, now);
        }
        assert_eq!(account.failed_attempts, 3);

        guard.record_success(&mut account);

        assert_eq!(account.failed_attempts, 0);
        assert!(!account.locked);
        assert!(account.locked_at.is_none());
    }

    #[test]
    fn invariant_violation_recovers_by_unlocking() {
        let guard = LockoutGuard::default();
        let mut account = account();
        account.locked = true;
        account.locked_at = None;

        assert_eq!(guard.evaluate(&mut account, Utc::now()), Gate::Proceed);
        assert!(!account.locked);
    }

    #[test]
    fn custom_threshold_is_honored() {
        let guard = LockoutGuard::new(LockoutPolicy::new(3, Duration::minutes(5)));
        let mut account = account();
        let now = Utc::now();

        assert!(!guard.record_failure(&mut account, now));
        assert!(!guard.record_failure(&mut account, now));
        assert!(guard.record_failure(&mut account, now));
        assert!(account.locked);
    }
}
