mod action;
mod author;
mod backend;
mod event;
mod history;
mod identity;
mod message;
mod report;
mod slash_commands;
mod stage;
mod textarea;
mod upload;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use event::*;
pub use history::*;
pub use identity::*;
pub use message::*;
pub use report::*;
pub use slash_commands::*;
pub use stage::*;
pub use textarea::*;
pub use upload::*;
