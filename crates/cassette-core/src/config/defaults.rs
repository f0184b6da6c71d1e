// Single source of truth for all default values.

// --- Collector ---
pub const DEFAULT_COLLECTOR_HOST: &str = "https://us.i.posthog.com";

// --- Environment ---
pub const DEFAULT_ALLOW_IN_DEV: bool = false;

// --- Privacy ---
pub const DEFAULT_MAX_STRING_LEN: usize = 200;

// --- Session ---
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

// --- Transport ---
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BEACON_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 500;
pub const DEFAULT_MAX_IN_FLIGHT_FETCHES: usize = 16;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
