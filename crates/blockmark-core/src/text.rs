/// Line the extraction backend places between pages of the display text.
pub const PAGE_BREAK_MARKER: &str = "---";

/// Split display text into pages on lines consisting only of the break marker.
///
/// Each page is trimmed. Empty text yields no pages.
pub fn split_pages(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut pages = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == PAGE_BREAK_MARKER {
            pages.push(current.join("\n").trim().to_string());
            current.clear();
        } else {
            current.push(line);
        }
    }
    pages.push(current.join("\n").trim().to_string());

    pages
}

/// Shorten `text` to at most `max` chars for one-line display.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}
