//! Account-type canonicalization.
//!
//! Upstream records carry the account type as either a numeric code or a
//! free-form label. [`AccountType::from_value`] is the single boundary where
//! that gets normalized; nothing downstream sees the raw form.

use serde::{Deserialize, Serialize};

use super::PropertyValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Standard,
    Verified,
    CassetteTeam,
    #[default]
    Unknown,
}

impl AccountType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Standard,
            1 => Self::Verified,
            2 => Self::CassetteTeam,
            _ => Self::Unknown,
        }
    }

    /// Case- and separator-insensitive label match. Numeric labels are
    /// treated as codes.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        let folded: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "standard" | "user" | "regular" => Self::Standard,
            "verified" => Self::Verified,
            "cassetteteam" | "team" | "internal" | "staff" => Self::CassetteTeam,
            _ => Self::Unknown,
        }
    }

    pub fn from_value(value: &PropertyValue) -> Self {
        match value {
            PropertyValue::Integer(code) => Self::from_code(*code),
            PropertyValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                Self::from_code(*n as i64)
            }
            PropertyValue::Text(label) => Self::from_label(label),
            _ => Self::Unknown,
        }
    }

    /// Canonical wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Verified => "verified",
            Self::CassetteTeam => "cassette_team",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_internal(self) -> bool {
        self == Self::CassetteTeam
    }
}

impl From<&PropertyValue> for AccountType {
    fn from(value: &PropertyValue) -> Self {
        Self::from_value(value)
    }
}

/// Whether a raw account-type value denotes a Cassette team member.
pub fn is_internal_account(raw: Option<&PropertyValue>) -> bool {
    raw.map(AccountType::from_value)
        .is_some_and(AccountType::is_internal)
}
