mod conversation;
mod engine;

pub use conversation::{Conversation, Message, MessageRole};
pub use engine::{ConversationEngine, QueryTicket};
