pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::handle_websocket;
pub use hub::{ConnectionHub, Notifier};
