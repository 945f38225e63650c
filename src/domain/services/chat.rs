#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use crate::domain::models::ChatMessage;
use crate::domain::models::Role;
use crate::domain::models::Session;

pub const SELLER_ASSISTANT_PERSONA: &str = "You are a helpful assistant for online sellers. Answer questions about item identification, listing creation, and selling tips.";

/// Grounds the conversation in the most specific context available: the
/// listing, then the image description, then a generic persona.
pub fn context_message(session: &Session) -> ChatMessage {
    if let Some(listing) = &session.listing_markdown {
        return ChatMessage::system(&format!(
            "Here is the current listing markdown table:\n\n{listing}\n\n"
        ));
    }

    if let Some(description) = &session.raw_description {
        return ChatMessage::system(&format!(
            "Here is the detailed image description:\n\n{description}\n\n"
        ));
    }

    return ChatMessage::system(SELLER_ASSISTANT_PERSONA);
}

/// The full request for the next assistant reply.
pub fn conversation(session: &Session) -> Vec<ChatMessage> {
    let mut messages = vec![context_message(session)];
    messages.extend(session.chat_history.iter().cloned());

    return messages;
}

/// Appends the user's text. Returns false for blank text, which is ignored.
pub fn push_user_message(history: &mut Vec<ChatMessage>, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    history.push(ChatMessage::user(text));
    return true;
}

/// Drops a trailing assistant reply so the user message before it can be
/// answered again. Returns false, leaving history untouched, when there is
/// no user message to resubmit.
pub fn prepare_regenerate(history: &mut Vec<ChatMessage>) -> bool {
    let mut end = history.len();
    if history.last().is_some_and(|e| return e.role == Role::Assistant) {
        end -= 1;
    }

    if end == 0 || history[end - 1].role != Role::User {
        return false;
    }

    history.truncate(end);
    return true;
}
