use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://toolkit.rork.com/text/llm/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct AssistantRequest<'a> {
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantResponse {
    pub completion: String,
}
