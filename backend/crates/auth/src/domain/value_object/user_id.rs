//! User ID
//!
//! Shared with other crates through the kernel so the auth gate can hand a
//! `Principal` to handlers that do not depend on this crate.

pub use kernel::id::UserId;
