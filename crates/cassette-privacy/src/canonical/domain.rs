use url::{Host, Url};

/// Reduce a domain or URL to its lowercase hostname. Invalid input yields
/// `None` so the field is omitted.
pub fn canonicalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let host = match Url::parse(&candidate) {
        Ok(url) => url.host_str().map(str::to_string),
        Err(_) => host_from_url(trimmed),
    }?;
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    is_valid_hostname(&host).then_some(host)
}

/// Manual hostname extraction: drop scheme, credentials, port, and path.
/// The result goes through the same host normalization the URL parser
/// applies, so it is stable under re-parsing.
pub fn host_from_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let rest = raw.split_once("://").map(|(_, rest)| rest).unwrap_or(raw);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return None;
    }
    let host = Host::parse(host).ok()?.to_string();
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    is_valid_hostname(&host).then_some(host)
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 253
        && host.chars().any(|c| c.is_ascii_alphanumeric())
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && !host.starts_with(['.', '-'])
}
