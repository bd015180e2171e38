//! Concrete repository implementations.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::BookingRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
