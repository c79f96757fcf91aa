//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the credential exchange and `types` defines the shared wire
//! schema.

pub mod api;
pub mod types;
