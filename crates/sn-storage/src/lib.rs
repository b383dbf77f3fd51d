//! # sn-storage
//!
//! Storage abstraction for the secure notes service.
//!
//! This crate defines the provider traits implemented by concrete
//! backends, plus an in-memory backend used by tests and local
//! development.
//!
//! ## Provider Traits
//!
//! - [`AccountProvider`] - account records and their lockout columns
//! - [`NoteProvider`] - owner-filtered note records

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod account;
pub mod error;
pub mod memory;
pub mod note;

pub use account::AccountProvider;
pub use error::{StorageError, StorageResult};
pub use memory::{MemoryAccountProvider, MemoryNoteProvider};
pub use note::NoteProvider;
