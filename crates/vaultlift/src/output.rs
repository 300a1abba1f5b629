//! Styled terminal output
//!
//! Progress and results go to stdout; warnings and errors go to stderr.

use console::{style, Style};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::time::Duration;

const KEY_WIDTH: usize = 20;

pub fn success(msg: impl Display) {
    println!("{} {}", style("✓").green().bold(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

pub fn warning(msg: impl Display) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

pub fn info(msg: impl Display) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

pub fn header(msg: impl Display) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print an aligned key-value pair
pub fn kv(key: &str, value: impl Display) {
    let key = format!("{:<width$}", format!("{}:", key), width = KEY_WIDTH);
    println!("  {} {}", style(key).dim(), value);
}

/// Print a failure counter, red when non-zero
pub fn failures(key: &str, count: usize) {
    let style = if count > 0 {
        Style::new().red().bold()
    } else {
        Style::new()
    };
    kv(key, style.apply_to(count));
}

/// Spinner on stderr; indicatif hides it when stderr is not a terminal
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
