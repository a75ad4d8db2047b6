//! Static separation-of-duty tests

mod common;

use common::*;
use fortress_core::status::SSD_VALIDATION_FAILED;
use fortress_core::{SdSet, UserRole};
use fortress_rbac::{RbacError, SodChecker};
use std::sync::Arc;

fn bank_checker() -> SodChecker {
    checker(
        &[("Branch Manager", "Approver"), ("Approver", "Reviewer")],
        vec![
            SdSet::r#static("Loans", ["Teller", "Approver"], 2),
            SdSet::r#static("Audit", ["Auditor", "Reviewer", "Teller"], 3),
        ],
    )
}

#[test]
fn test_assignment_without_conflict() {
    bank_checker()
        .validate_ssd(&roles(&["Teller"]), &UserRole::new(USER, "Auditor"), TENANT)
        .unwrap();
}

#[test]
fn test_direct_conflict() {
    let err = bank_checker()
        .validate_ssd(&roles(&["Teller"]), &UserRole::new(USER, "Approver"), TENANT)
        .unwrap_err();

    assert_eq!(err.status_code(), Some(SSD_VALIDATION_FAILED));
    let RbacError::SsdViolation(conflict) = err else {
        panic!("expected SSD violation");
    };
    assert_eq!(conflict.user_id, USER);
    assert_eq!(conflict.role, "Approver");
    assert_eq!(conflict.set_name, "Loans");
    assert_eq!(conflict.cardinality, 2);
}

#[test]
fn test_conflict_through_inheritance() {
    let err = bank_checker()
        .validate_ssd(&roles(&["Teller"]), &UserRole::new(USER, "Branch Manager"), TENANT)
        .unwrap_err();

    let RbacError::SsdViolation(conflict) = err else {
        panic!("expected SSD violation");
    };
    assert_eq!(conflict.blamed_role, "Branch Manager");
    assert_eq!(conflict.inherited_from.as_deref(), Some("Approver"));
    assert!(conflict.to_string().contains("inherited via [Approver]"));
}

#[test]
fn test_higher_cardinality_counts_every_member() {
    let checker = bank_checker();

    // Auditor + Teller is below the Audit set's cardinality of 3
    checker
        .validate_ssd(&roles(&["Auditor"]), &UserRole::new(USER, "Teller"), TENANT)
        .unwrap();

    // Reviewer completes the triad
    let err = checker
        .validate_ssd(&roles(&["Auditor", "Teller"]), &UserRole::new(USER, "Reviewer"), TENANT)
        .unwrap_err();
    assert!(matches!(err, RbacError::SsdViolation(ref c) if c.set_name == "Audit"));
}

#[test]
fn test_reassignment_is_a_no_op() {
    bank_checker()
        .validate_ssd(&roles(&["Teller", "Approver"]), &UserRole::new(USER, "TELLER"), TENANT)
        .unwrap();
}

#[test]
fn test_lookup_failure_propagates() {
    init_tracing();
    let checker = SodChecker::new(
        hierarchy(&[]),
        Arc::new(UnavailableConflictSets),
    );

    let err = checker
        .validate_ssd(&roles(&["Teller"]), &UserRole::new(USER, "Approver"), TENANT)
        .unwrap_err();
    assert!(err.is_lookup_failure());
}
