//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is raw persistence, `auth` owns the derived authentication
//! state, and `login` drives the credential exchange that feeds both.

pub mod auth;
pub mod login;
pub mod session;
