#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt;

use super::ChatMessage;
use super::ListingStyle;

pub const DEFAULT_LISTING_MODEL: &str = "mixtral-8x7b-32768";

/// Named stages of the listing workflow. The busy stages only exist while a
/// gateway call issued by the previous action is outstanding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum WorkflowState {
    Idle,
    ImageProcessing,
    ItemsReady,
    GeneratingListing,
    ListingReady,
    RefiningPost,
    Chatting,
}

impl WorkflowState {
    pub fn is_busy(&self) -> bool {
        return matches!(
            self,
            WorkflowState::ImageProcessing
                | WorkflowState::GeneratingListing
                | WorkflowState::RefiningPost
                | WorkflowState::Chatting
        );
    }
}

/// Shows the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars = secret.chars().collect::<Vec<char>>();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head = chars[..4].iter().collect::<String>();
    let tail = chars[chars.len() - 4..].iter().collect::<String>();
    return format!("{head}...{tail}");
}

/// Everything one person's run of the assistant knows. Background items are
/// never stored; they are always derived from `items` and the selection.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub api_key: String,
    pub vision_model: Option<String>,
    pub listing_model: String,
    listing_model_configured: bool,
    pub available_models: Vec<String>,
    pub listing_style: ListingStyle,
    pub raw_description: Option<String>,
    pub items: Vec<String>,
    selected_items: Vec<String>,
    pub listing_markdown: Option<String>,
    pub post_text: Option<String>,
    pub chat_history: Vec<ChatMessage>,
    state: WorkflowState,
}

impl Default for Session {
    fn default() -> Session {
        return Session::new("", None, None);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("Session")
            .field("api_key", &mask_secret(&self.api_key))
            .field("vision_model", &self.vision_model)
            .field("listing_model", &self.listing_model)
            .field("state", &self.state)
            .field("items", &self.items)
            .field("selected_items", &self.selected_items)
            .field("listing_markdown", &self.listing_markdown.is_some())
            .field("post_text", &self.post_text.is_some())
            .field("chat_history", &self.chat_history.len())
            .finish();
    }
}

impl Session {
    pub fn new(api_key: &str, vision_model: Option<&str>, listing_model: Option<&str>) -> Session {
        return Session {
            api_key: api_key.to_string(),
            vision_model: vision_model.map(|e| return e.to_string()),
            listing_model: listing_model
                .unwrap_or(DEFAULT_LISTING_MODEL)
                .to_string(),
            listing_model_configured: listing_model.is_some(),
            available_models: vec![],
            listing_style: ListingStyle::default(),
            raw_description: None,
            items: vec![],
            selected_items: vec![],
            listing_markdown: None,
            post_text: None,
            chat_history: vec![],
            state: WorkflowState::Idle,
        };
    }

    /// The listing model named by the user, if any. Discovery only replaces
    /// models nobody asked for.
    pub fn configured_listing_model(&self) -> Option<&str> {
        if self.listing_model_configured {
            return Some(self.listing_model.as_str());
        }

        return None;
    }

    pub fn state(&self) -> WorkflowState {
        return self.state;
    }

    pub fn enter(&mut self, state: WorkflowState) {
        tracing::debug!(from = %self.state, to = %state, "workflow state");
        self.state = state;
    }

    /// Leaves a busy stage for whichever resting stage the data supports.
    pub fn settle(&mut self) {
        if self.listing_markdown.is_some() && !self.items.is_empty() {
            self.enter(WorkflowState::ListingReady);
        } else if !self.items.is_empty() {
            self.enter(WorkflowState::ItemsReady);
        } else {
            self.enter(WorkflowState::Idle);
        }
    }

    pub fn masked_api_key(&self) -> Option<String> {
        if self.api_key.is_empty() {
            return None;
        }

        return Some(mask_secret(&self.api_key));
    }

    pub fn selected_items(&self) -> &[String] {
        return &self.selected_items;
    }

    pub fn background_items(&self) -> Vec<String> {
        return self
            .items
            .iter()
            .filter(|item| return !self.selected_items.contains(item))
            .cloned()
            .collect();
    }

    /// Keeps the given order, dropping duplicates and anything that is not
    /// one of the detected items.
    pub fn select_items(&mut self, selection: Vec<String>) {
        let mut selected: Vec<String> = vec![];
        for item in selection {
            if self.items.contains(&item) && !selected.contains(&item) {
                selected.push(item);
            }
        }

        self.selected_items = selected;
    }

    /// Installs a fresh item set from a new image. Everything derived from
    /// the previous items is dropped and all new items start selected.
    pub fn replace_items(&mut self, description: &str, items: Vec<String>) {
        self.raw_description = Some(description.to_string());
        self.selected_items = items.clone();
        self.items = items;
        self.listing_markdown = None;
        self.post_text = None;
    }

    pub fn clear_items(&mut self) {
        self.raw_description = None;
        self.items = vec![];
        self.selected_items = vec![];
        self.listing_markdown = None;
        self.post_text = None;
    }
}
