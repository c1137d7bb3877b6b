use std::sync::Arc;

use chat_widget::logging::init_logging;
use chat_widget::view::TerminalDocument;
use chat_widget::{ChatWidget, Document, Field, HttpChatApi, WidgetConfig, WidgetEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const HELP: &str = "Commands: /name <value>, /email <value>, /phone <value>, /submit, /help, /quit. Anything else is sent as a chat message.";

#[derive(Debug, PartialEq)]
enum Command {
    Field(Field, String),
    Submit,
    Help,
    Quit,
    Chat(String),
}

fn parse_command(line: &str) -> Command {
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, rest.to_string()),
        None => (line.trim_end(), String::new()),
    };
    match head {
        "/name" => Command::Field(Field::Name, rest),
        "/email" => Command::Field(Field::Email, rest),
        "/phone" => Command::Field(Field::Phone, rest),
        "/submit" => Command::Submit,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Chat(line.to_string()),
    }
}

/// Drops finished uploads and keeps the new one, if any, for draining at exit.
fn track_sync(pending: &mut Vec<JoinHandle<()>>, handle: Option<JoinHandle<()>>) {
    pending.retain(|task| !task.is_finished());
    pending.extend(handle);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging()?;

    let config = WidgetConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, sync_every = config.history_sync_every, "Using chat backend");

    let api = Arc::new(HttpChatApi::new(config.api_base_url.clone()));
    let mut widget = ChatWidget::new(TerminalDocument::new(std::io::stdout()), api, &config)?;

    println!("{}", HELP);

    let mut pending_syncs = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let event = match parse_command(&line) {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Submit => WidgetEvent::SubmitOnboarding,
            Command::Field(field, value) => {
                let input = widget.bindings().field(field).input;
                widget.document_mut().set_value(input, &value);
                WidgetEvent::FieldInput { field, value }
            }
            Command::Chat(text) => {
                let input = widget.bindings().chat_input;
                widget.document_mut().set_value(input, &text);
                WidgetEvent::ChatFormSubmit
            }
        };

        let outcome = widget.dispatch(event).await;
        track_sync(
            &mut pending_syncs,
            outcome.report.and_then(|report| report.history_sync),
        );
    }

    for handle in pending_syncs {
        if let Err(e) = handle.await {
            tracing::warn!("History sync task did not finish: {}", e);
        }
    }

    tracing::info!(session_id = %widget.state().session_id, "👋 Chat session closed");
    Ok(())
}
