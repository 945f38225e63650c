#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;

use super::chat;
use super::item_parser;
use super::listings;
use super::markdown_table;
use super::model_discovery;
use super::posts;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatPurpose;
use crate::domain::models::Effect;
use crate::domain::models::GatewayError;
use crate::domain::models::GatewayReply;
use crate::domain::models::GatewayRequest;
use crate::domain::models::ImageUpload;
use crate::domain::models::ListingStyle;
use crate::domain::models::Message;
use crate::domain::models::RefineIntent;
use crate::domain::models::Session;
use crate::domain::models::WorkflowState;

pub const MISSING_API_KEY: &str =
    "No API key loaded. Set one with /key or the GROQ_API_KEY environment variable.";
pub const MISSING_VISION_MODEL: &str =
    "No vision-capable model is available. Please check your API key or Groq account.";
pub const UNUSABLE_DESCRIPTION: &str = "No items detected or an error occurred. Please try another image or check your model/API key.";
pub const NO_ITEMS_DETECTED: &str = "No items detected in the image. Please try another image.";

fn info(text: &str) -> Effect {
    return Effect::Notify(Message::new(Author::ListGenie, text));
}

fn error(text: &str) -> Effect {
    return Effect::Notify(Message::error(text));
}

fn model_text(text: &str) -> Effect {
    return Effect::Notify(Message::new(Author::Model, text));
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        return "None".to_string();
    }

    return items.join(", ");
}

pub fn selection_summary(session: &Session) -> String {
    return format!(
        "Selling: {}\nBackground/Not for sale: {}",
        join_or_none(session.selected_items()),
        join_or_none(&session.background_items())
    );
}

fn items_summary(session: &Session) -> String {
    let lines = session
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let n = idx + 1;
            return format!("- ({n}) {item}");
        })
        .collect::<Vec<String>>()
        .join("\n");

    return format!("Detected items:\n{lines}\n\nAll items are selected for sale. Use /select to choose which to sell, then /listing to draft the listing.");
}

fn api_key_notice(session: &Session) -> Effect {
    match session.masked_api_key() {
        Some(masked) => return info(&format!("API key loaded: {masked}")),
        None => return error(MISSING_API_KEY),
    }
}

fn style_label(style: &ListingStyle) -> String {
    match style {
        ListingStyle::Researched => return "researched".to_string(),
        ListingStyle::Quick => return "quick".to_string(),
        ListingStyle::Columns(columns) => return format!("columns: {}", columns.join(", ")),
    }
}

pub fn status_text(session: &Session) -> String {
    let lines = [
        format!("State: {}", session.state()),
        format!(
            "API key: {}",
            session
                .masked_api_key()
                .unwrap_or_else(|| return "not set".to_string())
        ),
        format!(
            "Vision model: {}",
            session.vision_model.as_deref().unwrap_or("none")
        ),
        format!("Listing model: {}", session.listing_model),
        format!("Listing style: {}", style_label(&session.listing_style)),
        format!(
            "Items: {} ({} selected)",
            session.items.len(),
            session.selected_items().len()
        ),
        selection_summary(session),
        format!(
            "Listing: {}",
            if session.listing_markdown.is_some() {
                "ready"
            } else {
                "none"
            }
        ),
        format!("Chat messages: {}", session.chat_history.len()),
    ];

    return lines.join("\n");
}

/// The listing workflow as a pure state machine. Every action produces the
/// next session and the effects the driver has to carry out; gateway
/// results come back in as `Action::GatewayReply`.
pub struct Workflow {}

impl Workflow {
    pub fn transition(mut session: Session, action: Action) -> (Session, Vec<Effect>) {
        if session.state().is_busy() && !matches!(action, Action::GatewayReply(_)) {
            let effects = vec![error(
                "Still waiting on the model. Please wait for it to finish.",
            )];
            return (session, effects);
        }

        let effects = match action {
            Action::SetApiKey(key) => Workflow::set_api_key(&mut session, &key),
            Action::ConfirmApiKey() => vec![api_key_notice(&session)],
            Action::DiscoverModels() => Workflow::discover_models(&session),
            Action::SetVisionModel(text) => Workflow::set_vision_model(&mut session, &text),
            Action::ProcessImage(upload) => Workflow::process_image(&mut session, upload),
            Action::SelectItems(indexes) => Workflow::select_items(&mut session, &indexes),
            Action::GenerateListing(style) => Workflow::generate_listing(&mut session, style),
            Action::CopyListing() => Workflow::copy_listing(&session),
            Action::ExportListing(path) => Workflow::export_listing(&session, path),
            Action::RefinePost(intent) => Workflow::refine_post(&mut session, intent),
            Action::SendChat(text) => Workflow::send_chat(&mut session, &text),
            Action::RegenerateChat() => Workflow::regenerate_chat(&mut session),
            Action::ClearChat() => Workflow::clear_chat(&mut session),
            Action::ShowStatus() => vec![info(&status_text(&session))],
            Action::GatewayReply(reply) => Workflow::receive(&mut session, reply),
        };

        return (session, effects);
    }

    fn set_api_key(session: &mut Session, key: &str) -> Vec<Effect> {
        let key = key.trim();
        if key.is_empty() {
            return vec![error("API key cannot be empty.")];
        }

        session.api_key = key.to_string();

        return vec![
            api_key_notice(session),
            Effect::Call(GatewayRequest::ListModels),
        ];
    }

    fn discover_models(session: &Session) -> Vec<Effect> {
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }

        return vec![Effect::Call(GatewayRequest::ListModels)];
    }

    fn set_vision_model(session: &mut Session, text: &str) -> Vec<Effect> {
        if session.available_models.is_empty() {
            return vec![error("No models loaded yet. Run /models first.")];
        }

        match model_discovery::resolve_vision_model(text, &session.available_models) {
            Some(model) => {
                let effects = vec![info(&format!("Vision model set to {model}"))];
                session.vision_model = Some(model);
                return effects;
            }
            None => {
                return vec![error(&format!(
                    "'{}' is not an available vision-capable model. Run /models to list them.",
                    text.trim()
                ))];
            }
        }
    }

    fn process_image(session: &mut Session, upload: ImageUpload) -> Vec<Effect> {
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }

        let model = match &session.vision_model {
            Some(model) => model.to_string(),
            None => return vec![error(MISSING_VISION_MODEL)],
        };

        tracing::debug!(
            file = upload.file_name.as_str(),
            model = model.as_str(),
            "process image"
        );
        session.enter(WorkflowState::ImageProcessing);

        return vec![Effect::Call(GatewayRequest::DescribeImage {
            image: upload.bytes,
            model,
        })];
    }

    fn select_items(session: &mut Session, indexes: &[usize]) -> Vec<Effect> {
        if session.items.is_empty() {
            return vec![error(
                "No items to select. Process an image with /image first.",
            )];
        }

        let selection = indexes
            .iter()
            .filter_map(|idx| return session.items.get(*idx).cloned())
            .collect::<Vec<String>>();
        session.select_items(selection);

        return vec![info(&selection_summary(session))];
    }

    fn generate_listing(session: &mut Session, style: Option<ListingStyle>) -> Vec<Effect> {
        if let Some(style) = style {
            session.listing_style = style;
        }

        if session.items.is_empty() {
            return vec![error(
                "No items detected yet. Process an image with /image first.",
            )];
        }
        if session.selected_items().is_empty() {
            return vec![error("Select at least one item to sell with /select.")];
        }
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }

        let messages = listings::listing_messages(
            &session.listing_style,
            session.raw_description.as_deref().unwrap_or_default(),
            session.selected_items(),
        );
        session.enter(WorkflowState::GeneratingListing);

        return vec![Effect::Call(GatewayRequest::Chat {
            purpose: ChatPurpose::Listing,
            messages,
            model: session.listing_model.to_string(),
        })];
    }

    fn copy_listing(session: &Session) -> Vec<Effect> {
        match &session.listing_markdown {
            Some(listing) => return vec![Effect::Copy(listing.to_string())],
            None => return vec![error("No listing yet. Generate one with /listing.")],
        }
    }

    fn export_listing(session: &Session, path: Option<std::path::PathBuf>) -> Vec<Effect> {
        let listing = match &session.listing_markdown {
            Some(listing) => listing,
            None => return vec![error("No listing yet. Generate one with /listing.")],
        };

        let csv = markdown_table::markdown_table_to_csv(listing);
        if csv.is_empty() {
            return vec![error(
                "The listing does not contain a table that can be exported. Try /listing again.",
            )];
        }

        return vec![Effect::Export { path, csv }];
    }

    fn refine_post(session: &mut Session, intent: RefineIntent) -> Vec<Effect> {
        let post = match &session.post_text {
            Some(post) => post.to_string(),
            None => return vec![error("No post yet. Generate a listing with /listing first.")],
        };
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }

        session.enter(WorkflowState::RefiningPost);

        return vec![Effect::Call(GatewayRequest::Chat {
            purpose: ChatPurpose::RefinePost(intent),
            messages: posts::refine_messages(intent, &post),
            model: session.listing_model.to_string(),
        })];
    }

    fn send_chat(session: &mut Session, text: &str) -> Vec<Effect> {
        if text.trim().is_empty() {
            return vec![];
        }
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }

        chat::push_user_message(&mut session.chat_history, text);
        return Workflow::ask_for_reply(session);
    }

    fn regenerate_chat(session: &mut Session) -> Vec<Effect> {
        if session.api_key.is_empty() {
            return vec![error(MISSING_API_KEY)];
        }
        if !chat::prepare_regenerate(&mut session.chat_history) {
            return vec![info("Nothing to regenerate yet. Send a chat message first.")];
        }

        return Workflow::ask_for_reply(session);
    }

    fn clear_chat(session: &mut Session) -> Vec<Effect> {
        session.chat_history.clear();
        return vec![info("Chat history cleared.")];
    }

    fn ask_for_reply(session: &mut Session) -> Vec<Effect> {
        let messages = chat::conversation(session);
        session.enter(WorkflowState::Chatting);

        return vec![Effect::Call(GatewayRequest::Chat {
            purpose: ChatPurpose::Conversation,
            messages,
            model: session.listing_model.to_string(),
        })];
    }

    fn receive(session: &mut Session, reply: GatewayReply) -> Vec<Effect> {
        let expected = match &reply {
            GatewayReply::Models(_) => None,
            GatewayReply::Description(_) => Some(WorkflowState::ImageProcessing),
            GatewayReply::Chat(ChatPurpose::Listing, _) => Some(WorkflowState::GeneratingListing),
            GatewayReply::Chat(ChatPurpose::RefinePost(_), _) => Some(WorkflowState::RefiningPost),
            GatewayReply::Chat(ChatPurpose::Conversation, _) => Some(WorkflowState::Chatting),
        };

        if let Some(expected) = expected {
            if session.state() != expected {
                tracing::warn!(
                    state = %session.state(),
                    expected = %expected,
                    "dropping gateway reply"
                );
                return vec![];
            }
        }

        let effects = match reply {
            GatewayReply::Models(res) => Workflow::receive_models(session, res),
            GatewayReply::Description(res) => Workflow::receive_description(session, res),
            GatewayReply::Chat(ChatPurpose::Listing, res) => {
                Workflow::receive_listing(session, res)
            }
            GatewayReply::Chat(ChatPurpose::RefinePost(_), res) => {
                Workflow::receive_post(session, res)
            }
            GatewayReply::Chat(ChatPurpose::Conversation, res) => {
                Workflow::receive_chat(session, res)
            }
        };

        if expected.is_some() {
            session.settle();
        }

        return effects;
    }

    fn receive_models(session: &mut Session, res: Result<Vec<String>, GatewayError>) -> Vec<Effect> {
        let models = match res {
            Ok(models) => models,
            Err(err) => {
                session.available_models = vec![];
                let mut effects = vec![error(&format!("Model fetch error: {err}"))];
                if session.vision_model.is_none() {
                    effects.push(error(MISSING_VISION_MODEL));
                }
                return effects;
            }
        };

        session.vision_model =
            model_discovery::pick_vision_model(session.vision_model.as_deref(), &models);
        session.listing_model =
            model_discovery::pick_listing_model(session.configured_listing_model(), &models);
        session.available_models = models;

        let mut effects = vec![info(&format!(
            "Available models:\n{}",
            model_discovery::format_model_list(&session.available_models)
        ))];

        match &session.vision_model {
            Some(vision_model) => effects.push(info(&format!(
                "Vision model: {vision_model}\nListing model: {}",
                session.listing_model
            ))),
            None => effects.push(error(MISSING_VISION_MODEL)),
        }

        return effects;
    }

    fn receive_description(session: &mut Session, res: Result<String, GatewayError>) -> Vec<Effect> {
        let description = match res {
            Ok(description) => description,
            Err(err) => {
                session.clear_items();
                return vec![error(&err.to_string()), error(UNUSABLE_DESCRIPTION)];
            }
        };

        if item_parser::is_unusable_description(&description) {
            session.clear_items();
            return vec![error(UNUSABLE_DESCRIPTION)];
        }

        let items = item_parser::parse_items(&description);
        if items.is_empty() {
            session.clear_items();
            return vec![error(NO_ITEMS_DETECTED)];
        }

        session.replace_items(&description, items);
        return vec![info(&items_summary(session))];
    }

    fn receive_listing(session: &mut Session, res: Result<String, GatewayError>) -> Vec<Effect> {
        let listing = match res {
            Ok(listing) => listing,
            Err(err) => return vec![error(&err.to_string())],
        };

        let post = posts::post_template(session.selected_items());
        session.listing_markdown = Some(listing.to_string());
        session.post_text = Some(post.to_string());

        return vec![
            model_text(&listing),
            info(&format!("Suggested post:\n\n{post}\n\nRefine it with /refine persuasive|urgent|concise. Save the table with /export or copy the listing with /copy.")),
        ];
    }

    fn receive_post(session: &mut Session, res: Result<String, GatewayError>) -> Vec<Effect> {
        match res {
            Ok(post) => {
                session.post_text = Some(post.to_string());
                return vec![model_text(&post)];
            }
            Err(err) => return vec![error(&err.to_string())],
        }
    }

    fn receive_chat(session: &mut Session, res: Result<String, GatewayError>) -> Vec<Effect> {
        match res {
            Ok(reply) => {
                session.chat_history.push(ChatMessage::assistant(&reply));
                return vec![model_text(&reply)];
            }
            Err(err) => {
                let text = err.to_string();
                session.chat_history.push(ChatMessage::assistant(&text));
                return vec![error(&text)];
            }
        }
    }
}
