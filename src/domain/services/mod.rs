mod app_state;
pub mod events;
pub mod orchestrator;
mod scroll;
mod session;
mod stage_panel;
mod transcript;

pub use app_state::*;
pub use scroll::*;
pub use session::*;
pub use stage_panel::*;
pub use transcript::*;
