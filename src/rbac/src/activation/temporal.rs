//! Temporal constraint validators
//!
//! Each validator checks one facet of a [`TemporalConstraint`] and answers
//! with a status id: [`GOOD`] or the facet's failure code.

use chrono::{Local, NaiveDateTime};
use fortress_core::status::{
    ACTV_FAILED_DATE, ACTV_FAILED_DAY, ACTV_FAILED_LOCK, ACTV_FAILED_TIME, ACTV_FAILED_TIMEOUT, GOOD,
};
use fortress_core::types::{Session, TemporalConstraint, WarningKind};

/// Check applied to a role's constraint during activation
pub trait ConstraintValidator: Send + Sync {
    /// Short name used in warnings and logs
    fn name(&self) -> &'static str;

    /// Warning category recorded when the check fails
    fn kind(&self) -> WarningKind;

    /// Returns [`GOOD`] or a failure status id
    fn validate(&self, session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32;
}

/// Begin/end date range
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl ConstraintValidator for DateValidator {
    fn name(&self) -> &'static str {
        "date"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::Date
    }

    fn validate(&self, _session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32 {
        if constraint.date_allowed(at) {
            GOOD
        } else {
            ACTV_FAILED_DATE
        }
    }
}

/// Lockout window
#[derive(Debug, Clone, Copy, Default)]
pub struct LockDateValidator;

impl ConstraintValidator for LockDateValidator {
    fn name(&self) -> &'static str {
        "lockdate"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::LockDate
    }

    fn validate(&self, _session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32 {
        if constraint.locked_out(at) {
            ACTV_FAILED_LOCK
        } else {
            GOOD
        }
    }
}

/// Time-of-day window
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTimeValidator;

impl ConstraintValidator for ClockTimeValidator {
    fn name(&self) -> &'static str {
        "time"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::Time
    }

    fn validate(&self, _session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32 {
        if constraint.time_allowed(at) {
            GOOD
        } else {
            ACTV_FAILED_TIME
        }
    }
}

/// Allowed weekdays
#[derive(Debug, Clone, Copy, Default)]
pub struct DayValidator;

impl ConstraintValidator for DayValidator {
    fn name(&self) -> &'static str {
        "day"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::Day
    }

    fn validate(&self, _session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32 {
        if constraint.day_allowed(at) {
            GOOD
        } else {
            ACTV_FAILED_DAY
        }
    }
}

/// Idle timeout measured from the session's last access
///
/// `last_access` is compared in local time, the same clock `at` is read
/// from. A session that was never accessed cannot time out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutValidator;

impl ConstraintValidator for TimeoutValidator {
    fn name(&self) -> &'static str {
        "timeout"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::Timeout
    }

    fn validate(&self, session: &Session, constraint: &TemporalConstraint, at: NaiveDateTime) -> i32 {
        if constraint.timeout == 0 {
            return GOOD;
        }
        let Some(last_access) = session.last_access else {
            return GOOD;
        };

        let idle = at - last_access.with_timezone(&Local).naive_local();
        if idle.num_minutes() >= i64::from(constraint.timeout) {
            ACTV_FAILED_TIMEOUT
        } else {
            GOOD
        }
    }
}

/// Validators run on every constrained role, in order
pub fn default_validators() -> Vec<Box<dyn ConstraintValidator>> {
    vec![
        Box::new(DateValidator),
        Box::new(LockDateValidator),
        Box::new(ClockTimeValidator),
        Box::new(DayValidator),
        Box::new(TimeoutValidator),
    ]
}
