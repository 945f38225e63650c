#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;

use crate::domain::models::ChatMessage;
use crate::domain::models::RefineIntent;

/// The starting post for the selected items. No model is involved.
pub fn post_template(selected_items: &[String]) -> String {
    return format!(
        "Selling these items!\n\n{}\n\nDM for details and prices!",
        selected_items.join(", ")
    );
}

pub fn refine_prompt(intent: RefineIntent, post_text: &str) -> String {
    return format!("{}\n\n{post_text}", intent.instruction());
}

pub fn refine_messages(intent: RefineIntent, post_text: &str) -> Vec<ChatMessage> {
    return vec![ChatMessage::user(&refine_prompt(intent, post_text))];
}
