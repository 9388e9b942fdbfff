//! Plain-text rendering of notes for the terminal.

use chrono::{DateTime, Local, TimeZone};
use jotter_core::{palette, Note};
use std::fmt::Write;

const PREVIEW_CHARS: usize = 80;

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max: usize) -> String {
    let single_line: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

pub fn format_timestamp_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format("%b %-d, %Y %H:%M").to_string(),
        None => format!("@{millis}"),
    }
}

fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(millis, &Local)
}

fn color_label(color: &str) -> String {
    match palette::name_of(color) {
        Some(name) => name.to_string(),
        None => color.to_string(),
    }
}

/// One list entry: marker, title, id, preview and dates.
pub fn render_card(note: &Note) -> String {
    let marker = if note.important { "*" } else { " " };
    let title = if note.title.is_empty() { "(untitled)" } else { note.title.as_str() };

    let mut out = format!("{marker} {title}  [{}]\n", note.id);
    if !note.content.is_empty() {
        let _ = writeln!(out, "    {}", truncate_text(&note.content, PREVIEW_CHARS));
    }
    let _ = write!(out, "    Created: {}", format_timestamp(note.created_at));
    if note.updated_at != note.created_at {
        let _ = write!(out, " • Updated: {}", format_timestamp(note.updated_at));
    }
    out
}

/// Full note, including all fields.
pub fn render_note(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", note.title);
    let _ = writeln!(out, "id: {}", note.id);
    let _ = writeln!(
        out,
        "color: {}  important: {}  zoom: {}%",
        color_label(&note.color),
        if note.important { "yes" } else { "no" },
        note.font_zoom
    );
    let _ = writeln!(out, "created: {}", format_timestamp(note.created_at));
    let _ = writeln!(out, "updated: {}", format_timestamp(note.updated_at));
    let _ = writeln!(out);
    out.push_str(&note.content);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(important: bool, title: &str, content: &str, updated_at: i64) -> Note {
        Note {
            id: "n-1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            color: "#bfdbfe".to_string(),
            important,
            font_zoom: 110,
            created_at: 0,
            updated_at,
        }
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("line one\nline two", 40), "line one line two");
        assert_eq!(truncate_text("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_format_timestamp_utc() {
        assert_eq!(format_timestamp_in(0, &Utc), "Jan 1, 1970 00:00");
        assert_eq!(format_timestamp_in(i64::MAX, &Utc), format!("@{}", i64::MAX));
    }

    #[test]
    fn test_card_marks_important_and_hides_equal_update() {
        let card = render_card(&note(true, "Todo", "", 0));
        assert!(card.starts_with("* Todo  [n-1]"));
        assert!(!card.contains("Updated"));

        let card = render_card(&note(false, "", "body", 60_000));
        assert!(card.starts_with("  (untitled)"));
        assert!(card.contains("    body\n"));
        assert!(card.contains("Updated"));
    }

    #[test]
    fn test_render_note_uses_palette_name() {
        let text = render_note(&note(false, "T", "the body", 0));
        assert!(text.contains("color: Blue"));
        assert!(text.contains("zoom: 110%"));
        assert!(text.ends_with("the body"));
    }
}
