pub mod connection;
pub mod conversation;
pub mod endpoints;

pub use connection::{AssistantClient, AssistantError};
pub use conversation::{system_prompt, Conversation, Message, FALLBACK_MESSAGE, WELCOME_MESSAGE};
pub use endpoints::{AssistantRequest, AssistantResponse, ChatMessage, Role, DEFAULT_ENDPOINT};
