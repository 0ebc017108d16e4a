//! Line input and the console versions of the session's input capabilities.

use std::io::{self, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use vault_core::{has_pdf_extension, FilePicker, NotePrompt};

pub const NOTE_PROMPT: &str = "Paste text to add to The Vault's memory:";
pub const PDF_PROMPT: &str = "Path to PDF:";

/// Async line reader over stdin or any buffered source.
pub struct LineInput<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next line without its terminator. `None` at end of input.
    pub async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                None
            }
        }
    }

    /// Print `label` and read the answer.
    pub async fn ask(&mut self, label: &str) -> Option<String> {
        print!("{label} ");
        let _ = io::stdout().flush();
        self.next_line().await
    }
}

/// Reads one line of note text. An empty line cancels.
pub struct ConsoleNotePrompt<'a, R> {
    input: &'a mut LineInput<R>,
}

impl<'a, R> ConsoleNotePrompt<'a, R> {
    pub fn new(input: &'a mut LineInput<R>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> NotePrompt for ConsoleNotePrompt<'_, R> {
    async fn prompt_note(&mut self) -> Option<String> {
        let text = self.input.ask(NOTE_PROMPT).await?;
        (!text.is_empty()).then_some(text)
    }
}

/// Takes a path given on the command line, or asks for one.
pub struct ConsoleFilePicker<'a, R> {
    input: &'a mut LineInput<R>,
    preset: Option<PathBuf>,
}

impl<'a, R> ConsoleFilePicker<'a, R> {
    pub fn new(input: &'a mut LineInput<R>, preset: Option<PathBuf>) -> Self {
        Self { input, preset }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FilePicker for ConsoleFilePicker<'_, R> {
    async fn pick_pdf(&mut self) -> Option<PathBuf> {
        let path = match self.preset.take() {
            Some(path) => path,
            None => {
                let answer = self.input.ask(PDF_PROMPT).await?;
                let answer = answer.trim();
                if answer.is_empty() {
                    return None;
                }
                PathBuf::from(answer)
            }
        };

        if has_pdf_extension(&path) {
            Some(path)
        } else {
            println!("Only .pdf files can be uploaded.");
            None
        }
    }
}
