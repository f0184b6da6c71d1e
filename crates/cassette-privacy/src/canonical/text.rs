/// Trim, drop empties, and cap at `max_chars` characters.
pub fn clean_text(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => trimmed[..cut].trim_end(),
        None => trimmed,
    };
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
