//! Terminal output shared by all commands.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;

/// Longest overview printed in listings
pub const OVERVIEW_LIMIT: usize = 150;

/// How command results are rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json, quiet }
    }

    /// Pretty-print `data` as JSON on stdout
    pub fn json<T: Serialize>(&self, data: &T) -> Result<()> {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, data)?;
        writeln!(stdout)?;
        Ok(())
    }

    /// Print an informational line unless `--quiet` was given
    pub fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// Print a section heading followed by a blank line
    pub fn heading(&self, title: impl AsRef<str>) {
        println!("{}\n", title.as_ref().bold());
    }

    /// Print a block of formatted text as is
    pub fn block(&self, text: &str) {
        print!("{}", text);
    }
}

/// First four characters of an ISO date, or "" when too short
pub fn year(date: &str) -> &str {
    date.get(..4).unwrap_or_default()
}

/// Shorten `text` to at most `max` characters, ending in "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Render an API timestamp as "YYYY-MM-DD HH:MM" (UTC)
pub fn format_datetime(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.naive_utc().format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.chars().take(16).collect::<String>().replace('T', " "),
    }
}

/// Render an API timestamp as "YYYY-MM-DD"
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().to_string();
    }
    match raw.get(..10).map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d")) {
        Some(Ok(date)) => date.to_string(),
        _ => raw.to_string(),
    }
}

/// Comma-separated list of non-empty names
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year() {
        assert_eq!(year("1999-03-30"), "1999");
        assert_eq!(year("199"), "");
        assert_eq!(year(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 150), "short");

        let long = "a".repeat(200);
        let cut = truncate(&long, OVERVIEW_LIMIT);
        assert_eq!(cut.chars().count(), 150);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..147], &long[..147]);
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "é".repeat(10);
        assert_eq!(truncate(&text, 5), "éé...");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-01-15T10:30:00.000Z"), "2024-01-15 10:30");
        assert_eq!(format_datetime("2024-01-15T12:30:00+02:00"), "2024-01-15 10:30");
        assert_eq!(format_datetime("2024-01-15 10:30:45"), "2024-01-15 10:30");
        assert_eq!(format_datetime("soon"), "soon");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15T10:30:00.000Z"), "2024-01-15");
        assert_eq!(format_date("2024-01-15 10:30:45"), "2024-01-15");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(["Drama", "", "Crime"]), "Drama, Crime");
        assert_eq!(join_names(Vec::<&str>::new()), "");
    }
}
