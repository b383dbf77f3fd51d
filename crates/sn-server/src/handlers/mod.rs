//! HTTP request handlers.
//!
//! Handlers are generic over the storage providers; the router
//! instantiates them for the configured backend.

pub mod admin;
pub mod auth;
pub mod notes;
