//! Exit codes for the secpol CLI.
//! Part of the public contract; init scripts branch on these.

pub const SUCCESS: i32 = 0;
/// The policy was rejected: unreadable or malformed file, schema error,
/// unresolvable path, or unsupported feature.
pub const POLICY_INVALID: i32 = 1;
/// Unexpected internal failure.
pub const INTERNAL_ERROR: i32 = 2;
