pub mod client;
mod message;
mod session;

pub use client::{ChatBackend, ChatError, HttpBackend};
pub use message::{ChatRequest, Message, Role};
pub use session::Session;
