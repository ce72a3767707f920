use chrono::Utc;
use tracing::error;

use super::connection::AssistantClient;
use super::endpoints::{ChatMessage, Role};
use crate::preferences::UserPreferences;

pub const WELCOME_MESSAGE: &str =
    "Hi! I'm your meal planning assistant. How can I help with your meal planning or nutrition questions today?";
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            role,
            content: content.into(),
        }
    }
}

/// Holds `is_loading` up for the duration of a request and clears it when
/// dropped, including when the send future is cancelled mid-request.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Chat history for one session. Not persisted.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    is_loading: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, WELCOME_MESSAGE)],
            is_loading: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sends `text` and appends the reply, or the fallback message when the
    /// request fails. Returns the appended reply, or `None` when nothing was
    /// sent (blank input, or a request already in flight).
    pub async fn send(
        &mut self,
        client: &AssistantClient,
        preferences: &UserPreferences,
        text: &str,
    ) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() || self.is_loading {
            return None;
        }

        let user = Message::new(Role::User, text);
        let mut outgoing = Vec::with_capacity(self.messages.len() + 2);
        outgoing.push(ChatMessage::new(Role::System, system_prompt(preferences)));
        outgoing.extend(
            self.messages
                .iter()
                .filter(|m| m.role != Role::System)
                .map(|m| ChatMessage::new(m.role, m.content.clone())),
        );
        outgoing.push(ChatMessage::new(Role::User, text));
        self.messages.push(user);

        let loading = LoadingGuard::new(&mut self.is_loading);
        let reply = match client.send(&outgoing).await {
            Ok(completion) => completion,
            Err(e) => {
                error!("Assistant request failed: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        };
        drop(loading);

        self.messages.push(Message::new(Role::Assistant, reply));
        self.messages.last()
    }
}

pub fn system_prompt(preferences: &UserPreferences) -> String {
    let goal = preferences.goal.map_or("Not specified", |g| g.label());
    let restrictions = if preferences.dietary_restrictions.is_empty() {
        "None".to_string()
    } else {
        preferences.dietary_restrictions.join(", ")
    };
    let cooking_time = preferences.cooking_time.map_or("Not specified", |t| t.label());
    let flavors = if preferences.flavor_preferences.is_empty() {
        "No specific preferences".to_string()
    } else {
        preferences.flavor_preferences.join(", ")
    };

    format!(
        "You are a helpful nutrition and meal planning assistant. The user has the following preferences:\n\
         - Goal: {}\n\
         - Dietary restrictions: {}\n\
         - Cooking time preference: {}\n\
         - Flavor preferences: {}\n\n\
         Provide helpful, concise advice based on these preferences.",
        goal, restrictions, cooking_time, flavors
    )
}
