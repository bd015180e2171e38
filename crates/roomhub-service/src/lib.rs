//! # roomhub-service
//!
//! Business logic services for RoomHub. Each service composes the
//! repositories and access policies into the operations exposed by the
//! HTTP layer.

pub mod booking;
pub mod context;
pub mod room;
pub mod user;

pub use context::RequestContext;
