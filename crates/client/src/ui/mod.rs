//! Terminal renderings. Every function returns a `String` so callers
//! decide where it goes.

pub mod bug_card;
pub mod bug_filters;
pub mod bug_form;
pub mod bug_list;
pub mod dashboard;
pub mod projects;

/// Shorten `text` to at most `max_chars` characters, ending in `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
