use url::Url;

/// Reduce a route or URL to its path. Query strings and fragments never
/// survive; a missing leading slash is added.
pub fn canonicalize_route(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let path = match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() => url.path().to_string(),
        _ if has_scheme_prefix(trimmed) => {
            strip_query_and_fragment(after_authority(trimmed)).to_string()
        }
        _ => strip_query_and_fragment(trimmed).to_string(),
    };

    let path = path.trim();
    if path.is_empty() {
        return Some("/".to_string());
    }
    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

fn strip_query_and_fragment(input: &str) -> &str {
    let end = input.find(['?', '#']).unwrap_or(input.len());
    &input[..end]
}

/// `scheme://` at the very start. Paths always start with `/`, so a
/// canonical route never matches.
fn has_scheme_prefix(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Manual fallback for absolute URLs the parser rejects.
fn after_authority(input: &str) -> &str {
    let rest = input
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(input);
    match rest.find(['/', '?', '#']) {
        Some(idx) if rest[idx..].starts_with('/') => &rest[idx..],
        _ => "/",
    }
}
