//! Value canonicalizers.

mod domain;
mod element_type;
mod platform;
mod route;
mod text;

pub use domain::{canonicalize_domain, host_from_url};
pub use element_type::{canonicalize_element_type, ElementType};
pub use platform::{canonicalize_platform, Platform};
pub use route::canonicalize_route;
pub use text::clean_text;

/// Lowercase and keep ASCII alphanumerics only.
pub(crate) fn fold(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
