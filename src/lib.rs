use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

pub mod clipboard;
pub mod scan;
pub mod strip;

use crate::strip::remove_comments;

/// Configuration passed from the CLI layer (main.rs) into the core logic.
#[derive(Debug)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub paste: bool,
}

pub fn run_with_config(cfg: Config) -> Result<()> {
    let text = read_input(&cfg)?;

    let stripped =
        remove_comments(&text).context("Failed to remove comments from source")?;

    print!("{stripped}");

    // Ensure the output ends with a newline even if the printer left none
    // (comment-only input prints as the empty string).
    if !stripped.ends_with('\n') {
        println!();
    }

    log::debug!("comment removal completed");

    Ok(())
}

/// Pick the input source the user asked for and read it whole.
fn read_input(cfg: &Config) -> Result<String> {
    if let Some(path) = &cfg.file {
        log::debug!("reading source from file {}", path.display());
        return read_source_file(path);
    }

    if cfg.paste {
        log::debug!("reading source from clipboard");
        return clipboard::read_text();
    }

    // The CLI arg group makes this unreachable; kept as a guard for
    // library callers.
    bail!("No input method specified");
}

/// Read a whole file as text. Malformed UTF-8 byte sequences are replaced
/// rather than rejected; genuinely non-source bytes fail at the parser.
pub fn read_source_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
