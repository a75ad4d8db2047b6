//! Numeric status ids returned by activation and assignment checks
//!
//! Callers that only care about success compare against [`GOOD`].

/// Check passed
pub const GOOD: i32 = 0;

/// Role may not be activated on this day of the week
pub const ACTV_FAILED_DAY: i32 = 2050;

/// Role activation outside of its begin/end date range
pub const ACTV_FAILED_DATE: i32 = 2051;

/// Role activation outside of its begin/end time of day
pub const ACTV_FAILED_TIME: i32 = 2052;

/// Session idle longer than the role's timeout
pub const ACTV_FAILED_TIMEOUT: i32 = 2053;

/// Role is inside a lockout period
pub const ACTV_FAILED_LOCK: i32 = 2054;

/// Role removed for dynamic separation of duty
pub const ACTV_FAILED_DSD: i32 = 2055;

/// Assignment rejected for static separation of duty
pub const SSD_VALIDATION_FAILED: i32 = 5088;
