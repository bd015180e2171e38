//! Per-request access policies.

pub mod checks;

pub use checks::{AccessPolicy, Action, Actor, Decision, PolicyCheck};
pub use checks::{admin_only_write, owner_or_staff};
