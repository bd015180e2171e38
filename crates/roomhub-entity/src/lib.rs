//! # roomhub-entity
//!
//! Domain entity models for RoomHub: users, rooms, and bookings, plus the
//! stay-interval type that carries the overlap and cost logic.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::{Booking, StayInterval};
pub use room::{Room, RoomType};
pub use user::{User, UserRole};
