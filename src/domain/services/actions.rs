#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::collections::VecDeque;
use std::mem;
use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use super::workflow::Workflow;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatPurpose;
use crate::domain::models::Effect;
use crate::domain::models::Event;
use crate::domain::models::GatewayReply;
use crate::domain::models::GatewayRequest;
use crate::domain::models::Message;
use crate::domain::models::Session;
use crate::infrastructure::gateways::GatewayManager;

pub const EXPORT_FILE_NAME: &str = "listing.csv";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /image (/i) [PATH] - Analyzes a JPG or PNG photo and lists the sellable items in it.
- /select (/s) [ITEM_NUMBERS?] - Chooses which detected items to sell. The rest are kept as background items. Without numbers an interactive picker opens.
- /listing (/l) [STYLE?] - Drafts a listing table for the selected items. STYLE is `researched` (default), `quick`, or a comma separated column list such as `Item, Title, Price`.
- /refine (/rf) [persuasive,urgent,concise] - Rewrites the suggested post.
- /export (/e) [PATH?] - Saves the listing table as CSV. Defaults to listing.csv in the export directory.
- /copy (/c) - Copies the listing to your clipboard.
- /regenerate /regen (/r) - Asks the model to answer your last chat message again.
- /clear - Clears the chat history.
- /status (/st) - Shows the API key, models, items and listing state.
- /key (/k) [API_KEY] - Loads a Groq API key for this session. It is never written to disk.
- /models /modellist (/ml) - Lists the models available to your API key.
- /vision (/v) [MODEL_NAME,MODEL_INDEX] - Sets the vision model. You can pass either the model name, or its index among the vision models.
- /quit /exit (/q) - Exit ListGenie.
- /help (/h) - Provides this help menu.

Anything else you type is sent to the model as a chat message, along with your listing or image description.

ITEM_NUMBERS can be set as follows:
- `1` - Selects the first item
- `1,3,5` - Selects items 1, 3, and 5.
- `2..4`- Selects an inclusive range of items between 2 and 4.
        "#;

    return text.trim().to_string();
}

fn waiting_text(request: &GatewayRequest) -> String {
    let text = match request {
        GatewayRequest::ListModels => "Fetching available models...",
        GatewayRequest::DescribeImage { .. } => "Processing the image with AI...",
        GatewayRequest::Chat { purpose, .. } => match purpose {
            ChatPurpose::Listing => "Generating listing details with LLM...",
            ChatPurpose::RefinePost(_) => "Rewriting your post...",
            ChatPurpose::Conversation => "Model is thinking...",
        },
    };

    return text.to_string();
}

fn copy_listing(text: &str, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = ClipboardService::set(text) {
        tx.send(Event::Notice(Message::error(&err.to_string())))?;
        return Ok(());
    }

    tx.send(Event::Notice(Message::new(
        Author::ListGenie,
        "Copied listing to clipboard.",
    )))?;

    return Ok(());
}

async fn write_csv(file_path: &path::Path, csv: &str) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(file_path, format!("{csv}\n")).await?;
    return Ok(());
}

/// Drives the workflow: owns the session, runs each action through
/// `Workflow::transition`, carries out the resulting effects and feeds
/// gateway replies back in until the action has fully settled.
pub struct ActionsService {
    session: Session,
    gateway_url: String,
    export_dir: path::PathBuf,
}

impl ActionsService {
    pub fn new(session: Session, gateway_url: &str, export_dir: &path::Path) -> ActionsService {
        return ActionsService {
            session,
            gateway_url: gateway_url.to_string(),
            export_dir: export_dir.to_path_buf(),
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    async fn call(&self, request: GatewayRequest) -> GatewayReply {
        let gateway = GatewayManager::get(&self.gateway_url, &self.session.api_key);

        match request {
            GatewayRequest::ListModels => {
                return GatewayReply::Models(gateway.list_models().await);
            }
            GatewayRequest::DescribeImage { image, model } => {
                return GatewayReply::Description(gateway.describe_image(&image, &model).await);
            }
            GatewayRequest::Chat {
                purpose,
                messages,
                model,
            } => {
                return GatewayReply::Chat(purpose, gateway.chat(&messages, &model).await);
            }
        }
    }

    async fn export(
        &self,
        file_path: Option<path::PathBuf>,
        csv: &str,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let file_path = file_path.unwrap_or_else(|| return self.export_dir.join(EXPORT_FILE_NAME));

        if let Err(err) = write_csv(&file_path, csv).await {
            tracing::error!(path = ?file_path, err = ?err, "export failed");
            tx.send(Event::Notice(Message::error(&format!(
                "Could not export the listing to {}: {err}",
                file_path.display()
            ))))?;
            return Ok(());
        }

        tx.send(Event::Notice(Message::new(
            Author::ListGenie,
            &format!("Exported listing to {}", file_path.display()),
        )))?;

        return Ok(());
    }

    /// Runs one action to completion. Gateway calls are awaited one at a
    /// time, so the session is never touched by two actions at once.
    pub async fn dispatch(&mut self, action: Action, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            let session = mem::take(&mut self.session);
            let (session, effects) = Workflow::transition(session, action);
            self.session = session;

            for effect in effects {
                match effect {
                    Effect::Notify(msg) => {
                        tx.send(Event::Notice(msg))?;
                    }
                    Effect::Call(request) => {
                        tx.send(Event::Waiting(waiting_text(&request)))?;
                        let reply = self.call(request).await;
                        queue.push_back(Action::GatewayReply(reply));
                    }
                    Effect::Export { path, csv } => {
                        self.export(path, &csv, tx).await?;
                    }
                    Effect::Copy(text) => {
                        copy_listing(&text, tx)?;
                    }
                }
            }
        }

        tx.send(Event::Ready(Box::new(self.session.clone())))?;
        return Ok(());
    }

    pub async fn start(
        mut self,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            self.dispatch(action, &tx).await?;
        }

        return Ok(());
    }
}
