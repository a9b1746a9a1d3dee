//! # Prompt Demo
//!
//! Reads lines with word completion until an empty line is entered:
//! - Type a prefix to see up to 15 suggestions after the input
//! - Tab / Down accepts the next suggestion, Up the previous one
//! - Space commits the word, Backspace edits (and reopens) words
//! - Every submitted word is added to the vocabulary
//!
//! The vocabulary comes from the file given as the first argument, or a
//! built-in fruit list.  Set `WORDCOMP_LOG=<path>` to write diagnostics
//! (filtered by `RUST_LOG`, default `debug`).
//!
//! Run with: `cargo run --example prompt [-- words.txt]`

use std::fs::OpenOptions;
use std::path::Path;

use wordcomp::{vocab, WordCompleter};

const BUILTIN: &str = "apple apricot avocado banana blackberry blueberry cherry \
    citrus coconut cranberry date durian elderberry fig grape grapefruit guava \
    kiwi lemon lime lychee mango melon nectarine orange papaya peach pear \
    persimmon pineapple plum pomegranate quince raspberry strawberry tangerine";

fn log_to_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(&directives)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    tracing::info!(log_file = %path.display(), log_filter = %directives, "tracing enabled");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = std::env::var_os("WORDCOMP_LOG") {
        log_to_file(Path::new(&path))?;
    }

    let words = match std::env::args_os().nth(1) {
        Some(path) => vocab::words_from_file(path)?,
        None => vocab::words_from_text(BUILTIN),
    };
    let mut completer = WordCompleter::new(&words);
    println!("{} words loaded; submit an empty line to quit.", completer.index().len());

    loop {
        let line = completer.prompt_interactive("> ")?;
        if line.is_empty() {
            break;
        }
        println!("you typed: {line}");
        completer.add_words(line.split_whitespace());
    }
    Ok(())
}
