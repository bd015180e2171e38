//! Room catalog services.

pub mod service;

pub use service::RoomService;
