//! Forbidden key patterns.
//!
//! A key matching any of these is dropped regardless of the allow-list.
//! Each pattern keeps a literal fragment so a pattern that fails to compile
//! still blocks the obvious spelling.

use regex::Regex;
use std::sync::LazyLock;

/// A compiled forbidden-key pattern.
pub struct ForbiddenPattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub fragment: &'static str,
}

impl ForbiddenPattern {
    pub fn matches(&self, key: &str) -> bool {
        match self.regex.as_ref() {
            Some(re) => re.is_match(key),
            None => key.to_ascii_lowercase().contains(self.fragment),
        }
    }
}

macro_rules! forbidden_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Free-text content ──────────────────────────────────────────────────────
forbidden_pattern!(RE_DESCRIPTION, r"(?i)desc(ription)?");
forbidden_pattern!(RE_TITLE, r"(?i)title");
forbidden_pattern!(RE_TEXT, r"(?i)text");
forbidden_pattern!(RE_COMMENT, r"(?i)comment");
forbidden_pattern!(RE_MESSAGE, r"(?i)message");
forbidden_pattern!(RE_BIO, r"(?i)(^|_)bio($|_)");
forbidden_pattern!(RE_CAPTION, r"(?i)caption");
forbidden_pattern!(RE_NOTE, r"(?i)note");
forbidden_pattern!(RE_BODY, r"(?i)body");
forbidden_pattern!(RE_CONTENT, r"(?i)content");

// ── Search input ───────────────────────────────────────────────────────────
forbidden_pattern!(RE_QUERY, r"(?i)query");
forbidden_pattern!(RE_SEARCH, r"(?i)search");

// ── Identity / contact ─────────────────────────────────────────────────────
forbidden_pattern!(RE_NAME, r"(?i)name");
forbidden_pattern!(RE_EMAIL, r"(?i)e[-_]?mail");
forbidden_pattern!(RE_PHONE, r"(?i)phone");
forbidden_pattern!(RE_ADDRESS, r"(?i)address");

// ── Locations that embed user input ────────────────────────────────────────
forbidden_pattern!(RE_URL, r"(?i)url");
forbidden_pattern!(RE_URI, r"(?i)(^|_)uri($|_)");
forbidden_pattern!(RE_HREF, r"(?i)href");

// ── Credentials ────────────────────────────────────────────────────────────
forbidden_pattern!(RE_PASSWORD, r"(?i)pass(word|wd)");
forbidden_pattern!(RE_SECRET, r"(?i)secret");
forbidden_pattern!(RE_TOKEN, r"(?i)token");

/// Return all forbidden patterns.
pub fn all_patterns() -> Vec<ForbiddenPattern> {
    vec![
        ForbiddenPattern { name: "description", regex: &RE_DESCRIPTION, fragment: "desc" },
        ForbiddenPattern { name: "title", regex: &RE_TITLE, fragment: "title" },
        ForbiddenPattern { name: "text", regex: &RE_TEXT, fragment: "text" },
        ForbiddenPattern { name: "comment", regex: &RE_COMMENT, fragment: "comment" },
        ForbiddenPattern { name: "message", regex: &RE_MESSAGE, fragment: "message" },
        ForbiddenPattern { name: "bio", regex: &RE_BIO, fragment: "bio" },
        ForbiddenPattern { name: "caption", regex: &RE_CAPTION, fragment: "caption" },
        ForbiddenPattern { name: "note", regex: &RE_NOTE, fragment: "note" },
        ForbiddenPattern { name: "body", regex: &RE_BODY, fragment: "body" },
        ForbiddenPattern { name: "content", regex: &RE_CONTENT, fragment: "content" },
        ForbiddenPattern { name: "query", regex: &RE_QUERY, fragment: "query" },
        ForbiddenPattern { name: "search", regex: &RE_SEARCH, fragment: "search" },
        ForbiddenPattern { name: "name", regex: &RE_NAME, fragment: "name" },
        ForbiddenPattern { name: "email", regex: &RE_EMAIL, fragment: "mail" },
        ForbiddenPattern { name: "phone", regex: &RE_PHONE, fragment: "phone" },
        ForbiddenPattern { name: "address", regex: &RE_ADDRESS, fragment: "address" },
        ForbiddenPattern { name: "url", regex: &RE_URL, fragment: "url" },
        ForbiddenPattern { name: "uri", regex: &RE_URI, fragment: "uri" },
        ForbiddenPattern { name: "href", regex: &RE_HREF, fragment: "href" },
        ForbiddenPattern { name: "password", regex: &RE_PASSWORD, fragment: "pass" },
        ForbiddenPattern { name: "secret", regex: &RE_SECRET, fragment: "secret" },
        ForbiddenPattern { name: "token", regex: &RE_TOKEN, fragment: "token" },
    ]
}

/// Name of the first forbidden pattern matching `key`, if any.
pub fn forbidden_match(key: &str) -> Option<&'static str> {
    all_patterns()
        .into_iter()
        .find(|pat| pat.matches(key))
        .map(|pat| pat.name)
}

pub fn is_forbidden_key(key: &str) -> bool {
    forbidden_match(key).is_some()
}
