use unicode_width::UnicodeWidthChar;

/// Truncates `s` to at most `max_width` terminal columns, ending with `...`
/// when anything was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Largest useful scroll offset for `content_height` rows in `visible_height`.
pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height.saturating_sub(visible_height) as u16
}
