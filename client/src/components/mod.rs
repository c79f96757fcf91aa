//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components here are shared across routes; route-specific orchestration
//! lives in `pages`.

pub mod admin_shell;
pub mod error_fallback;
pub mod error_toasts;
pub mod fallback_redirect;
