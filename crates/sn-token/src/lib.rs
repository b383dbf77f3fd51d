//! # sn-token
//!
//! Stateless session tokens for the secure notes service.
//!
//! Tokens are compact HS256-signed claim bundles carrying the subject
//! identity and role with a fixed expiry. Validation requires no
//! server-side lookup; a compromised signing key invalidates every
//! outstanding token, and rotation means re-issuing all sessions.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod service;

pub use claims::SessionClaims;
pub use error::{TokenError, TokenResult};
pub use service::{TokenService, MIN_KEY_BYTES};
