//! Session-gate building blocks with no UI of their own.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser globals (`localStorage`, `Date.now()`) are reached only from
//! `storage` and `clock`; `token`, `errors` and the guard decisions in `auth`
//! are plain Rust and run natively in tests.

pub mod auth;
pub mod clock;
pub mod errors;
pub mod storage;
pub mod token;
