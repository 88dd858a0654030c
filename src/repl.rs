//! Line-oriented terminal front-end over the [`Orchestrator`].
//!
//! Any line that is not a `:command` replaces the input text, exactly like
//! typing into the input box; detection follows after the debounce.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::catalog;
use crate::error::Result;
use crate::orchestrator::{Notification, NotificationKind, Orchestrator};
use crate::session::{Status, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(String),
    Target(String),
    Translate,
    Swap,
    Clear,
    Copy,
    Status,
    Languages,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Input(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "to" | "target" => Command::Target(arg.to_string()),
        "t" | "translate" => Command::Translate,
        "swap" => Command::Swap,
        "clear" => Command::Clear,
        "copy" => Command::Copy,
        "status" | "s" => Command::Status,
        "languages" | "langs" => Command::Languages,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

pub const HELP: &str = "\
Type text to set the input; its language is detected automatically.
  :to <code>     select the target language (see :languages)
  :translate     translate the input (:t)
  :swap          use the translation as input and reverse the direction
  :clear         clear the input
  :copy          copy the translation to the clipboard
  :status        show the current session (:s)
  :languages     list target languages
  :quit          leave (:q)";

/// Catalog grouped the way the target selector shows it
pub fn format_catalog() -> String {
    let mut out = String::from("Popular\n");
    for option in catalog::popular() {
        out.push_str(&format!("  {:<6} {}\n", option.code, option.label));
    }
    out.push_str("All Languages\n");
    for option in catalog::all() {
        out.push_str(&format!("  {:<6} {}\n", option.code, option.label));
    }
    out
}

pub fn format_status(state: &UiState) -> String {
    let detection = match state.status {
        Status::Detecting => "Detecting...".to_string(),
        _ if !state.detected_language_name.is_empty() => format!("Detected: {}", state.detected_language_name),
        _ if state.has_input() && state.status == Status::DetectionFailed => "Detection failed".to_string(),
        _ => "-".to_string(),
    };
    let target = catalog::find_by_code(&state.target_language_code)
        .map(|option| format!("{} ({})", option.label, option.code))
        .unwrap_or_else(|| "(none)".to_string());

    let mut out = format!(
        "Input:       {}\nLanguage:    {}\nTarget:      {}\nStatus:      {}\nTranslation: {}",
        state.input_text,
        detection,
        target,
        state.status.label(),
        state.output_text
    );
    if let Some(error) = &state.error {
        out.push_str(&format!("\nError:       {}", error));
    }
    out
}

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Info => "i",
        NotificationKind::Success => "+",
        NotificationKind::Destructive => "!",
    };
    format!(
        "[{}] {} {}: {}",
        notification.at.format("%H:%M:%S"),
        marker,
        notification.title,
        notification.description
    )
}

/// Run the session until `:quit` or end of input
pub async fn run(
    orchestrator: Orchestrator,
    mut notifications: mpsc::UnboundedReceiver<Notification>,
) -> Result<()> {
    println!("{}\n", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle(&orchestrator, parse_command(&line)).await {
                    break;
                }
            }
            Some(notification) = notifications.recv() => {
                println!("{}", format_notification(&notification));
            }
        }
    }

    Ok(())
}

/// Apply one command; returns false when the session should end
async fn handle(orchestrator: &Orchestrator, command: Command) -> bool {
    debug!("Command: {:?}", command);
    match command {
        Command::Input(text) => orchestrator.set_input(text),
        Command::Target(code) => match orchestrator.select_target(&code) {
            Ok(()) => println!("Target: {}", code),
            Err(e) => println!("{}", e),
        },
        Command::Translate => {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("Translating...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let result = orchestrator.translate().await;
            spinner.finish_and_clear();
            if result.is_ok() {
                println!("{}", orchestrator.snapshot().output_text);
            }
        }
        Command::Swap => {
            if !orchestrator.swap() {
                println!("Nothing to swap yet: translate something first.");
            }
        }
        Command::Clear => orchestrator.clear_input(),
        Command::Copy => match orchestrator.copy_output() {
            Ok(false) => println!("Nothing to copy."),
            Ok(true) | Err(_) => {}
        },
        Command::Status => println!("{}", format_status(&orchestrator.snapshot())),
        Command::Languages => print!("{}", format_catalog()),
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
        Command::Unknown(name) => println!("Unknown command ':{}', try :help", name),
    }
    true
}
