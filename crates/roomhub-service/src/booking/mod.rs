//! Booking lifecycle services.

pub mod service;

pub use service::BookingService;
