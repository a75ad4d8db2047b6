//! Session activation pipeline
//!
//! Activation turns a session's candidate roles into its active roles:
//!
//! 1. every role carrying a [`TemporalConstraint`](fortress_core::TemporalConstraint)
//!    runs through the temporal validators; the first failing check prunes
//!    the role and records a warning
//! 2. the surviving roles go through dynamic separation of duty
//!
//! The session is only written once both stages succeed.

pub mod temporal;

pub use temporal::{
    default_validators, ClockTimeValidator, ConstraintValidator, DateValidator, DayValidator,
    LockDateValidator, TimeoutValidator,
};

use crate::checker::SodChecker;
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use fortress_core::status::GOOD;
use fortress_core::types::{Session, UserRole, Warning};
use tracing::{debug, info, warn};

/// Runs temporal checks and DSD over a session
pub struct SessionActivator {
    checker: SodChecker,
    validators: Vec<Box<dyn ConstraintValidator>>,
}

impl SessionActivator {
    /// Create an activator with the default temporal validators
    pub fn new(checker: SodChecker) -> Self {
        Self {
            checker,
            validators: default_validators(),
        }
    }

    /// Append a validator to the temporal chain
    pub fn with_validator(mut self, validator: Box<dyn ConstraintValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Activate the session's roles as of the local clock
    pub fn activate_now(&self, session: &mut Session) -> Result<i32> {
        self.activate(session, Local::now().naive_local())
    }

    /// Activate the session's roles as of `at` (local wall-clock time)
    ///
    /// Returns [`GOOD`] when no role was pruned, otherwise the status id of
    /// the first warning recorded by this call.
    ///
    /// # Errors
    ///
    /// Errors from [`SodChecker::enforce_dsd`] propagate and leave the
    /// session exactly as it was, including roles the temporal stage would
    /// have pruned.
    pub fn activate(&self, session: &mut Session, at: NaiveDateTime) -> Result<i32> {
        let mut staged = session.clone();
        let first_new_warning = staged.warnings.len();

        if self.checker.config().temporal.enabled {
            let candidates = std::mem::take(&mut staged.roles);
            for role in candidates {
                match self.check_constraints(&staged, &role, at) {
                    None => staged.roles.push(role),
                    Some(warning) => {
                        warn!(tenant = %staged.tenant, "{}", warning.message);
                        staged.add_warning(warning);
                    }
                }
            }
        } else {
            debug!(tenant = %staged.tenant, "temporal checks disabled");
        }

        self.checker.enforce_dsd(&mut staged)?;

        let status = staged.warnings[first_new_warning..]
            .first()
            .map(|w| w.code)
            .unwrap_or(GOOD);

        info!(
            tenant = %staged.tenant,
            user_id = %staged.user_id,
            candidates = session.roles.len(),
            active = staged.roles.len(),
            warnings = staged.warnings.len() - first_new_warning,
            status,
            "session activated"
        );

        *session = staged;
        Ok(status)
    }

    /// First failing validator for `role`, as a warning
    fn check_constraints(&self, session: &Session, role: &UserRole, at: NaiveDateTime) -> Option<Warning> {
        let constraint = role.constraint.as_ref()?;
        if constraint.is_unconstrained() {
            return None;
        }

        self.validators.iter().find_map(|validator| {
            let rc = validator.validate(session, constraint, at);
            (rc != GOOD).then(|| {
                Warning::new(
                    rc,
                    validator.kind(),
                    role.name.clone(),
                    format!(
                        "validate userId [{}] role [{}] timestamp [{}] failed {} check rc [{}]",
                        role.user_id,
                        role.name,
                        at.format("%Y-%m-%d %H:%M"),
                        validator.name(),
                        rc
                    ),
                )
            })
        })
    }
}
