//! Span helpers for the pipeline entry points.

/// Span around one client capture.
#[macro_export]
macro_rules! capture_span {
    ($event:expr) => {
        tracing::debug_span!("cassette.capture", event = %$event)
    };
}

/// Span around an identify call. Never records the user id.
#[macro_export]
macro_rules! identify_span {
    () => {
        tracing::debug_span!("cassette.identify")
    };
}

/// Span around one pageview transition.
#[macro_export]
macro_rules! pageview_span {
    ($route:expr) => {
        tracing::debug_span!("cassette.pageview", route = %$route)
    };
}

/// Span around a server mirror round trip.
#[macro_export]
macro_rules! server_capture_span {
    ($event:expr) => {
        tracing::debug_span!("cassette.server_capture", event = %$event)
    };
}

