//! Event Normalizer: derives `status`, `success`, and `core_action`
//! from the event name.

use cassette_core::models::{AccountType, EventStatus, Properties, PropertyValue};

pub const SUBMITTED_SUFFIX: &str = "_submitted";
pub const FAILED_SUFFIX: &str = "_failed";

/// Events that always mean the user's intent succeeded.
pub const CANONICAL_SUCCESS_EVENTS: &[&str] = &[
    "link_converted",
    "playlist_converted",
    "playlist_created",
    "post_created",
    "post_shared",
    "signup_completed",
    "profile_completed",
];

/// Successful events counted as core product actions.
pub const CORE_ACTION_EVENTS: &[&str] = &[
    "link_converted",
    "playlist_converted",
    "playlist_created",
    "post_created",
    "post_shared",
];

const STATUS: &str = "status";
const SUCCESS: &str = "success";
const CORE_ACTION: &str = "core_action";

pub fn is_canonical_success(event: &str) -> bool {
    CANONICAL_SUCCESS_EVENTS.contains(&event)
}

pub fn is_core_action(event: &str) -> bool {
    CORE_ACTION_EVENTS.contains(&event)
}

/// Status implied by the event name alone.
pub fn derived_status(event: &str) -> Option<EventStatus> {
    if event.ends_with(SUBMITTED_SUFFIX) {
        Some(EventStatus::Submitted)
    } else if event.ends_with(FAILED_SUFFIX) {
        Some(EventStatus::Failed)
    } else if is_canonical_success(event) {
        Some(EventStatus::Succeeded)
    } else {
        None
    }
}

/// Set `status` and `success` from the event name. Names with no derived
/// status leave the caller's values untouched.
pub fn normalize_status(event: &str, mut properties: Properties) -> Properties {
    if let Some(status) = derived_status(event) {
        properties.insert(STATUS.into(), PropertyValue::from(status.as_str()));
        properties.insert(
            SUCCESS.into(),
            PropertyValue::Bool(status == EventStatus::Succeeded),
        );
    }
    properties
}

/// [`normalize_status`], then mark core actions. A caller cannot
/// self-assert `core_action`: a truthy value on anything but a
/// successful core action is forced to `false`.
pub fn with_core_action(event: &str, properties: Properties) -> Properties {
    let mut properties = normalize_status(event, properties);

    let succeeded = properties.get(SUCCESS).and_then(PropertyValue::as_bool) == Some(true)
        || properties.get(STATUS).and_then(PropertyValue::as_str)
            == Some(EventStatus::Succeeded.as_str());

    if is_core_action(event) && succeeded {
        properties.insert(CORE_ACTION.into(), PropertyValue::Bool(true));
    } else if properties
        .get(CORE_ACTION)
        .is_some_and(PropertyValue::is_truthy)
    {
        properties.insert(CORE_ACTION.into(), PropertyValue::Bool(false));
    }
    properties
}

/// Replace a raw `account_type` (code or label) with its canonical label.
pub fn canonicalize_account_type(properties: &mut Properties) {
    if let Some(raw) = properties.get_mut("account_type").filter(|v| !v.is_null()) {
        *raw = PropertyValue::from(AccountType::from_value(raw).as_str());
    }
}
