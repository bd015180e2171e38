//! Booking domain entities.

pub mod interval;
pub mod model;

pub use interval::StayInterval;
pub use model::{Booking, NewBooking};
