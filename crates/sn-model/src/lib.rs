//! # sn-model
//!
//! Domain models for the secure notes service.
//!
//! This crate defines the core entities shared by every layer:
//! accounts (with their lockout bookkeeping), roles, and notes.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod account;
pub mod note;

pub use account::{Account, Role};
pub use note::Note;
