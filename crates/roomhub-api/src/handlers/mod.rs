//! HTTP request handlers.

pub mod auth;
pub mod booking;
pub mod health;
pub mod room;
pub mod user;
