#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A role tagged message. Chat history only ever holds user and assistant
/// entries; system messages are built per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> ChatMessage {
        return ChatMessage {
            role: Role::System,
            content: content.to_string(),
        };
    }

    pub fn user(content: &str) -> ChatMessage {
        return ChatMessage {
            role: Role::User,
            content: content.to_string(),
        };
    }

    pub fn assistant(content: &str) -> ChatMessage {
        return ChatMessage {
            role: Role::Assistant,
            content: content.to_string(),
        };
    }
}
