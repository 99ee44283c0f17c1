use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use decomment::{Config, run_with_config};

/// decomment - strip comments from Rust source.
///
/// Parses the input as Rust, drops every comment (doc comments included)
/// and prints the code back canonically formatted. Bare snippets of
/// statements are accepted as well as complete files.
#[derive(Parser, Debug)]
#[command(
    name = "decomment",
    author,
    version,
    about = "Strip comments from Rust source by parsing and re-printing it",
    long_about = r#"Strip comments from Rust source by parsing it and printing it back
without them.

The input may be a complete source file or a bare snippet of statements;
snippets are parsed through a temporary placeholder that never shows up in
the output. Doc comments are removed like any other comment, and the
result comes out canonically formatted.

Typical usage:
  decomment --file src/lib.rs
  decomment --paste
"#,
    group(ArgGroup::new("input").required(true).args(["file", "paste"]))
)]
struct Args {
    /// File path to read source text from.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read source text from the system clipboard.
    #[arg(short = 'p', long = "paste")]
    paste: bool,

    /// Enable debug logging level.
    #[arg(long = "debug")]
    debug: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let cfg = Config {
        file: args.file,
        paste: args.paste,
    };

    run_with_config(cfg)
}
