//! Console command parsing.

use std::path::PathBuf;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: submit as a query.
    Ask(String),
    /// `/note`: prompt for text to ingest.
    Note,
    /// `/pdf [path]`: upload a PDF, prompting for the path if absent.
    Pdf(Option<PathBuf>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
Type a question and press Enter to ask The Vault.
  /note         add a text note to The Vault's memory
  /pdf [path]   upload a PDF document
  /help         show this help
  /quit         exit";

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "note" => Command::Note,
        "pdf" if arg.is_empty() => Command::Pdf(None),
        "pdf" => Command::Pdf(Some(PathBuf::from(arg))),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_query_kept_as_typed() {
        assert_eq!(
            parse("  What is X?"),
            Command::Ask("  What is X?".to_string())
        );
    }

    #[test]
    fn blank_lines_are_empty() {
        assert_eq!(parse(""), Command::Empty);
        assert_eq!(parse("   \t"), Command::Empty);
    }

    #[test]
    fn note_and_help_and_quit() {
        assert_eq!(parse("/note"), Command::Note);
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/?"), Command::Help);
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/exit"), Command::Quit);
    }

    #[test]
    fn pdf_with_and_without_path() {
        assert_eq!(parse("/pdf"), Command::Pdf(None));
        assert_eq!(
            parse("/pdf  docs/My Paper.pdf "),
            Command::Pdf(Some(PathBuf::from("docs/My Paper.pdf")))
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse("/clear"), Command::Unknown("clear".to_string()));
    }
}
