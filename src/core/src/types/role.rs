//! Role name helpers
//!
//! Role names are unique per tenant and compared without regard to case.
//! Stored spelling is preserved; only comparisons fold.

use std::collections::BTreeSet;

/// Ordered set of role names
///
/// Ordered so that anything iterating it (ascendant walks, warning text) is
/// reproducible between runs.
pub type RoleSet = BTreeSet<String>;

/// Case-folded form of a role name, used as a lookup key
///
/// Folds one char at a time, so the result never depends on a letter's
/// position in the word (`str::to_lowercase` maps a final Σ to ς).
pub fn fold(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Compare two role names ignoring case
pub fn same_role(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Check whether `set` holds `name`, ignoring case
pub fn contains_role<'a, I>(set: I, name: &str) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    set.into_iter().any(|member| same_role(member, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_role_ignores_case() {
        assert!(same_role("Teller", "teller"));
        assert!(same_role("AUDITOR", "Auditor"));
        assert!(!same_role("Teller", "Tellers"));
    }

    #[test]
    fn test_contains_role() {
        let set: RoleSet = ["Manager".to_string(), "Teller".to_string()].into();
        assert!(contains_role(&set, "manager"));
        assert!(!contains_role(&set, "auditor"));
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Loan-Officer"), "loan-officer");
    }

    #[test]
    fn test_fold_agrees_with_same_role_for_final_sigma() {
        assert!(same_role("ΑΣ", "Ασ"));
        assert_eq!(fold("ΑΣ"), fold("Ασ"));
        assert_eq!(fold("ΑΣ"), "ασ");
    }
}
