use std::path;

use anyhow::bail;
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::MultiSelect;
use dialoguer::Password;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::sync::mpsc;
use tokio::task;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::ImageUpload;
use crate::domain::models::ListingStyle;
use crate::domain::models::Message;
use crate::domain::models::RefineIntent;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::services::actions::help_text;

fn print_message(msg: &Message) {
    let author = msg.author.to_string();
    if msg.is_error() {
        println!("{} {}\n", format!("{author}:").red().bold(), msg.text.red());
        return;
    }

    match msg.author {
        Author::Model => println!("{} {}\n", format!("{author}:").cyan().bold(), msg.text),
        _ => println!("{} {}\n", format!("{author}:").green().bold(), msg.text),
    }
}

fn print_error(text: &str) {
    print_message(&Message::error(text));
}

/// Prints everything the driver reports until it has finished the last
/// action, then returns the session it settled on.
async fn wait_until_ready(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<Session> {
    while let Some(event) = rx.recv().await {
        match event {
            Event::Notice(msg) => print_message(&msg),
            Event::Waiting(text) => println!("{}", text.dimmed()),
            Event::Ready(session) => return Ok(*session),
        }
    }

    bail!("The listing workflow stopped unexpectedly.");
}

async fn read_line() -> Result<String> {
    let prompt = Config::get(ConfigKey::Username);
    let line = task::spawn_blocking(move || {
        return Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
    })
    .await??;

    return Ok(line);
}

async fn read_api_key() -> Result<String> {
    let key = task::spawn_blocking(|| {
        return Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Groq API key")
            .interact();
    })
    .await??;

    return Ok(key);
}

async fn pick_items(session: &Session) -> Result<Vec<usize>> {
    let items = session.items.clone();
    let defaults = items
        .iter()
        .map(|e| return session.selected_items().contains(e))
        .collect::<Vec<bool>>();

    let picked = task::spawn_blocking(move || {
        return MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Which items are you selling? The rest are kept as background items.")
            .items(&items)
            .defaults(&defaults)
            .interact();
    })
    .await??;

    return Ok(picked);
}

/// Turns a slash command into a workflow action. Returns None when the
/// command was fully handled here.
async fn command_action(command: &SlashCommand, session: &Session) -> Result<Option<Action>> {
    if command.is_help() {
        println!("{}\n", help_text());
        return Ok(None);
    }

    if command.is_image() {
        let arg = command.arg_text();
        if arg.is_empty() {
            print_error("Pass the path to a JPG or PNG photo, e.g. /image ./desk.jpg");
            return Ok(None);
        }

        match ImageUpload::from_path(path::Path::new(&arg)).await {
            Ok(upload) => return Ok(Some(Action::ProcessImage(upload))),
            Err(err) => {
                print_error(&err.to_string());
                return Ok(None);
            }
        }
    }

    if command.is_select() {
        if session.items.is_empty() {
            print_error("No items to select. Process an image with /image first.");
            return Ok(None);
        }

        if command.arg_text().is_empty() {
            let picked = pick_items(session).await?;
            return Ok(Some(Action::SelectItems(picked)));
        }

        match command.indexes(session.items.len()) {
            Ok(indexes) => return Ok(Some(Action::SelectItems(indexes))),
            Err(err) => {
                print_error(&err.to_string());
                return Ok(None);
            }
        }
    }

    if command.is_listing() {
        let arg = command.arg_text();
        if arg.is_empty() {
            return Ok(Some(Action::GenerateListing(None)));
        }

        match ListingStyle::parse(&arg) {
            Some(style) => return Ok(Some(Action::GenerateListing(Some(style)))),
            None => {
                print_error(&format!("{arg} is not a listing style. Use researched, quick, or a comma separated column list such as 'Item, Title, Price'."));
                return Ok(None);
            }
        }
    }

    if command.is_refine() {
        match RefineIntent::parse(&command.arg_text()) {
            Some(intent) => return Ok(Some(Action::RefinePost(intent))),
            None => {
                print_error(&format!(
                    "Choose how to rewrite the post: /refine {}",
                    RefineIntent::VARIANTS.join("|").to_lowercase()
                ));
                return Ok(None);
            }
        }
    }

    if command.is_export() {
        let arg = command.arg_text();
        if arg.is_empty() {
            return Ok(Some(Action::ExportListing(None)));
        }
        return Ok(Some(Action::ExportListing(Some(path::PathBuf::from(arg)))));
    }

    if command.is_api_key() {
        let mut key = command.arg_text();
        if key.is_empty() {
            key = read_api_key().await?;
        }
        return Ok(Some(Action::SetApiKey(key)));
    }

    if command.is_vision_model_set() {
        return Ok(Some(Action::SetVisionModel(command.arg_text())));
    }

    if command.is_regenerate() {
        return Ok(Some(Action::RegenerateChat()));
    }
    if command.is_clear_chat() {
        return Ok(Some(Action::ClearChat()));
    }
    if command.is_copy() {
        return Ok(Some(Action::CopyListing()));
    }
    if command.is_status() {
        return Ok(Some(Action::ShowStatus()));
    }
    if command.is_model_list() {
        return Ok(Some(Action::DiscoverModels()));
    }

    return Ok(None);
}

async fn startup_actions() -> Vec<Action> {
    let mut actions = vec![Action::ConfirmApiKey()];
    if !Config::get(ConfigKey::ApiKey).is_empty() {
        actions.push(Action::DiscoverModels());
    }

    let image = Config::get(ConfigKey::Image);
    if !image.is_empty() {
        match ImageUpload::from_path(path::Path::new(&image)).await {
            Ok(upload) => actions.push(Action::ProcessImage(upload)),
            Err(err) => print_error(&err.to_string()),
        }
    }

    return actions;
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    println!(
        "{}\n{}\n",
        "ListGenie".bold().underline(),
        "Photograph your items, pick what to sell, and get a listing and post drafted for you. Type /help for commands."
            .dimmed()
    );

    let mut session = Session::default();
    for action in startup_actions().await {
        tx.send(action)?;
        session = wait_until_ready(&mut rx).await?;
    }

    loop {
        let line = read_line().await?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let action = match SlashCommand::parse(text) {
            Some(command) => {
                if command.is_quit() {
                    break;
                }
                command_action(&command, &session).await?
            }
            None => {
                if text.starts_with('/') {
                    print_error(&format!("Unknown command {text}. Type /help for commands."));
                    continue;
                }
                Some(Action::SendChat(text.to_string()))
            }
        };

        if let Some(action) = action {
            tx.send(action)?;
            session = wait_until_ready(&mut rx).await?;
        }
    }

    return Ok(());
}
