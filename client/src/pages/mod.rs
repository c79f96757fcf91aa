//! Route-level screens.
//!
//! `page` names the admin sections, `admin` renders their bodies inside the
//! shell, and `login` is the only public screen.

pub mod admin;
pub mod login;
pub mod page;
