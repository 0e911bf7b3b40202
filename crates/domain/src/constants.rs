//! Application constants
//!
//! Centralized location for the user-visible notification texts and the
//! default timings of the roster client.

// Feedback lifetimes
pub const DEFAULT_ERROR_TTL_MS: u64 = 5_000;
pub const DEFAULT_HIGHLIGHT_TTL_MS: u64 = 5_000;
pub const DEFAULT_WARNING_TTL_MS: u64 = 10_000;

// Remote service defaults
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 1;

// Generation defaults
pub const DEFAULT_PEOPLE_PER_DAY: u32 = 2;

// User-visible messages
pub const MSG_LOAD_USERS_FAILED: &str =
    "Could not reach the roster service. Make sure the server is running.";
pub const MSG_LOAD_UNAVAILABILITY_FAILED: &str = "Could not load days off for this month.";
pub const MSG_ADD_UNAVAILABILITY_FAILED: &str = "Could not add the day off.";
pub const MSG_ADD_UNAVAILABILITY_NETWORK: &str = "Network error while adding the day off.";
pub const MSG_DELETE_UNAVAILABILITY_FAILED: &str = "Could not delete the day off.";
pub const MSG_CHANGE_ASSIGNMENT_FAILED: &str = "Could not update the assignment.";
pub const MSG_GENERATE_FAILED: &str =
    "Schedule generation failed. Check the parameters and staff availability.";
