//! Interactive input: `:` commands drive the controls, every other line is typed text.

use fontpad_engine::EditorEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::terminal::TextSurface;

pub const HELP: &str = "\
Commands:
  :family <name>    select a font family
  :weight <key>     select a weight, e.g. 400 or 700italic
  :italic           toggle italic
  :clear            clear the text
  :reset            reset the editor
  :help             show this help
  :quit             save and exit
Any other line is appended to the text.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(EditorEvent),
    AppendText(String),
    ClearText,
    Help,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::AppendText(line.to_string());
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };
    match (name, arg) {
        ("family", family) if !family.is_empty() => Input::Event(EditorEvent::FamilyChanged(family.to_string())),
        ("weight", key) if !key.is_empty() => Input::Event(EditorEvent::WeightChanged(key.to_string())),
        ("italic", "") => Input::Event(EditorEvent::ItalicToggled),
        ("reset", "") => Input::Event(EditorEvent::Reset),
        ("quit" | "q", "") => Input::Event(EditorEvent::Shutdown),
        ("clear", "") => Input::ClearText,
        ("help" | "h" | "?", "") => Input::Help,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Reads stdin until EOF or `:quit` and forwards the resulting events.
pub async fn read_input(surface: TextSurface, events: mpsc::UnboundedSender<EditorEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                log::error!("Failed to read input: {err}");
                break;
            }
        };
        let event = match parse_line(&line) {
            Input::Event(event) => event,
            Input::AppendText(text) => {
                let mut surface = surface.lock();
                surface.push_str(&text);
                surface.push('\n');
                EditorEvent::TextEdited(surface.clone())
            }
            Input::ClearText => {
                surface.lock().clear();
                EditorEvent::TextEdited(String::new())
            }
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Unknown(line) => {
                println!("Unknown command: {line} (try :help)");
                continue;
            }
        };
        let quit = event == EditorEvent::Shutdown;
        if events.send(event).is_err() || quit {
            return;
        }
    }
    let _ = events.send(EditorEvent::Shutdown);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":family Fira Sans"), Input::Event(EditorEvent::FamilyChanged("Fira Sans".into())));
        assert_eq!(parse_line(":weight 700italic"), Input::Event(EditorEvent::WeightChanged("700italic".into())));
        assert_eq!(parse_line(":italic"), Input::Event(EditorEvent::ItalicToggled));
        assert_eq!(parse_line(":reset"), Input::Event(EditorEvent::Reset));
        assert_eq!(parse_line(":q"), Input::Event(EditorEvent::Shutdown));
        assert_eq!(parse_line(":clear"), Input::ClearText);
        assert_eq!(parse_line(":help"), Input::Help);
    }

    #[test]
    fn test_text_and_unknown() {
        assert_eq!(parse_line("Hello world"), Input::AppendText("Hello world".into()));
        assert_eq!(parse_line(""), Input::AppendText(String::new()));
        assert_eq!(parse_line(":family"), Input::Unknown(":family".into()));
        assert_eq!(parse_line(":bold"), Input::Unknown(":bold".into()));
    }
}
