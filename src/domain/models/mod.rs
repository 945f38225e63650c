mod action;
mod author;
mod chat;
mod effect;
mod event;
mod gateway;
mod image;
mod listing;
mod message;
mod refine;
mod session;
mod slash_commands;

pub use action::*;
pub use author::*;
pub use chat::*;
pub use effect::*;
pub use event::*;
pub use gateway::*;
pub use image::*;
pub use listing::*;
pub use message::*;
pub use refine::*;
pub use session::*;
pub use slash_commands::*;
