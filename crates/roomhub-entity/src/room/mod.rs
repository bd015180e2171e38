//! Room domain entities.

pub mod model;
pub mod room_type;

pub use model::{CreateRoom, Room, UpdateRoom};
pub use room_type::RoomType;
