//! Terminal counterparts of the console's toasts and table rows.

use admin_client::error::AdminClientError;
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub fn success(message: impl Display) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn info(message: impl Display) {
    println!("{} {}", "•".blue(), message);
}

pub fn error(message: impl Display) {
    eprintln!("{} {}", "✗".red().bold(), message.to_string().red());
}

pub fn heading(title: &str) {
    println!("{}", title.bold());
}

pub fn field(label: &str, value: impl Display) {
    println!("   {:<12} {}", format!("{}:", label).dimmed(), value);
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Asks a yes/no question on stdin. Anything but `y`/`yes` declines,
/// including a closed stdin.
pub fn confirm(prompt: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{} {} [y/N] ", "?".yellow().bold(), prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Converts a client error into the text a toast would show.
pub trait OrToast<T> {
    fn or_toast(self, fallback: &str) -> anyhow::Result<T>;
}

impl<T> OrToast<T> for Result<T, AdminClientError> {
    fn or_toast(self, fallback: &str) -> anyhow::Result<T> {
        self.map_err(|e| {
            tracing::debug!("Command failed: {}", e);
            anyhow::anyhow!(e.toast_message(fallback))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("короткий", 20), "короткий");
        assert_eq!(truncate("привет мир", 6), "привет...");
    }

    #[test]
    fn toast_uses_server_message() {
        let result: Result<(), _> = Err(AdminClientError::from_status(
            409,
            Some("Title already taken".into()),
        ));
        let err = result.or_toast("Failed to create post").unwrap_err();
        assert_eq!(err.to_string(), "Title already taken");
    }

    #[test]
    fn assume_yes_skips_prompt() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
