pub mod conversation;
pub mod history;

pub use conversation::{ConversationManager, TurnPhase};
pub use history::{ChatHistory, CONTEXT_WINDOW_TURNS};
