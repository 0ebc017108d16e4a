//! Input capabilities the session asks the environment for.
//!
//! The session never reads the terminal or the filesystem picker itself;
//! a front end injects these so the same session runs under a console,
//! a dialog, or a test.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Asks the user for note text to ingest.
#[async_trait]
pub trait NotePrompt: Send {
    /// `None` or an empty string means the user cancelled.
    async fn prompt_note(&mut self) -> Option<String>;
}

/// Lets the user choose one PDF file.
#[async_trait]
pub trait FilePicker: Send {
    /// `None` means nothing was selected.
    async fn pick_pdf(&mut self) -> Option<PathBuf>;
}

/// The picker's file filter: `.pdf`, any case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_matches_any_case() {
        assert!(has_pdf_extension(Path::new("paper.pdf")));
        assert!(has_pdf_extension(Path::new("/tmp/SCAN.PDF")));
    }

    #[test]
    fn other_files_are_filtered_out() {
        assert!(!has_pdf_extension(Path::new("notes.txt")));
        assert!(!has_pdf_extension(Path::new("pdf")));
        assert!(!has_pdf_extension(Path::new("archive.pdf.zip")));
    }
}
