use anyhow::{Context, Result};
use arboard::Clipboard;

/// Read the current text contents of the system clipboard.
pub fn read_text() -> Result<String> {
    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;

    clipboard
        .get_text()
        .context("Failed to read text from clipboard")
}
