//! # sn-auth
//!
//! Authentication engine for the secure notes service.
//!
//! This crate implements the login state machine: credential
//! verification, progressive lockout after repeated failures, time-based
//! unlock, and orchestration of token issuance.
//!
//! ## Components
//!
//! - [`LockoutGuard`] - evaluates and mutates per-account lockout state
//!   around each attempt
//! - [`PasswordVerifier`] / [`PasswordPolicy`] - bcrypt hashing and the
//!   registration-time complexity predicate
//! - [`AuthService`] - sequences guard, verifier, and token service into
//!   the register/login/profile flows

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod clock;
pub mod error;
pub mod lockout;
pub mod password;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, AuthResult};
pub use lockout::{Gate, LockoutGuard, LockoutPolicy};
pub use password::{PasswordPolicy, PasswordVerifier};
pub use service::{AuthService, LoginSuccess};
