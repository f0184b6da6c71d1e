use serde::{Deserialize, Serialize};

use super::Properties;

/// A named event and its properties, before identity is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    pub properties: Properties,
}

impl EventEnvelope {
    pub fn new(event: impl Into<String>, properties: Properties) -> Self {
        Self {
            event: event.into(),
            properties,
        }
    }
}

/// Event names the pipeline emits on its own.
pub mod event_names {
    pub const PAGEVIEW: &str = "$pageview";
    pub const PAGE_LEAVE: &str = "page_leave";
    pub const CREATE_ALIAS: &str = "$create_alias";
    pub const IDENTIFY: &str = "$identify";
}

/// Lifecycle status derived by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Submitted,
    Failed,
    Succeeded,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Failed => "failed",
            Self::Succeeded => "succeeded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "failed" => Some(Self::Failed),
            "succeeded" => Some(Self::Succeeded),
            _ => None,
        }
    }
}

/// Why a `page_leave` was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveReason {
    RouteChange,
    Unload,
}

impl LeaveReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RouteChange => "route_change",
            Self::Unload => "unload",
        }
    }
}
