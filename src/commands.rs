//! Line commands understood by the terminal planner.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

pub const HELP: &str = "\
commands:
  add <text>          add a to-do to the selected day
  done <id>           toggle done
  del <id>            delete (asks first)
  edit <id>           start editing
  set <id> <text>     change the edit buffer
  save <id>           save the edit
  cancel <id>         discard the edit
  select <YYYY-MM-DD> select a day
  prev | next | today move through months
  clear-done          delete done items of the selected day
  clear-all           delete every item of the selected day
  summary             summarize the displayed month
  theme               toggle dark/light
  chat [message]      send a chat message, or toggle the chat panel
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Add(String),
    Toggle(i64),
    Delete(i64),
    Edit(i64),
    SetBuffer(i64, String),
    Save(i64),
    Cancel(i64),
    Select(NaiveDate),
    Previous,
    Next,
    Today,
    ClearDone,
    ClearAll,
    Summary,
    Theme,
    Chat(String),
    ToggleChat,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "add" => Command::Add(required_text(rest, "add")?),
        "done" => Command::Toggle(id(rest)?),
        "del" | "delete" => Command::Delete(id(rest)?),
        "edit" => Command::Edit(id(rest)?),
        "set" => {
            let (id_part, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::SetBuffer(id(id_part)?, text.trim().to_string())
        }
        "save" => Command::Save(id(rest)?),
        "cancel" => Command::Cancel(id(rest)?),
        "select" => Command::Select(
            NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .with_context(|| format!("Expected a date like 2024-06-15, got '{}'", rest))?,
        ),
        "prev" => Command::Previous,
        "next" => Command::Next,
        "today" => Command::Today,
        "clear-done" => Command::ClearDone,
        "clear-all" => Command::ClearAll,
        "summary" => Command::Summary,
        "theme" => Command::Theme,
        "chat" if rest.is_empty() => Command::ToggleChat,
        "chat" => Command::Chat(rest.to_string()),
        other => bail!("Unknown command '{}', try 'help'", other),
    };

    Ok(Some(command))
}

fn id(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Expected an item id, got '{}'", value))
}

fn required_text(value: &str, command: &str) -> Result<String> {
    if value.is_empty() {
        bail!("'{}' needs some text", command);
    }
    Ok(value.to_string())
}
