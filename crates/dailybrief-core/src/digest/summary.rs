use std::sync::OnceLock;

use regex::Regex;

use crate::feed::{collapse_whitespace, html_to_text};

/// Matches the gap after a sentence-ending punctuation run
fn sentence_gap() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[.!?]["'”’)]*\s+"#).unwrap())
}

/// Build a tight summary snippet from raw feed HTML: strip markup, then
/// keep whole sentences up to `max_chars`. When not even the first
/// sentence fits, truncate on a char boundary with an ellipsis. Returns
/// `None` when nothing usable remains.
pub fn summary_snippet(raw: &str, max_chars: usize) -> Option<String> {
    if max_chars == 0 {
        return None;
    }

    let text = collapse_whitespace(&html_to_text(raw));
    if text.is_empty() {
        return None;
    }

    if text.chars().count() <= max_chars {
        return Some(text);
    }

    // Longest prefix of whole sentences that fits
    let mut end = 0;
    for gap in sentence_gap().find_iter(&text) {
        let sentence_end = text[..gap.end()].trim_end().len();
        if text[..sentence_end].chars().count() > max_chars {
            break;
        }
        end = sentence_end;
    }

    if end > 0 {
        return Some(text[..end].to_string());
    }

    Some(format!("{}…", truncate_chars(&text, max_chars)))
}

/// Cut a string after at most `max_len` characters, on a char boundary
fn truncate_chars(text: &str, max_len: usize) -> &str {
    let mut end = 0;
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count == max_len {
            break;
        }
        end = idx + ch.len_utf8();
    }
    &text[..end]
}
