/// Exit codes for CI/automation.
///
/// A failed run exits with the failing step's own status instead of a fixed code.
pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 2;
pub const RUNTIME_ERROR: i32 = 4;
