//! Property tests for DSD pruning

mod common;

use common::*;
use fortress_core::SdSet;
use proptest::prelude::*;
use proptest::sample::subsequence;

const POOL: [&str; 8] = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7"];

/// R7 -> R5 -> R0, R6 -> R1
const EDGES: [(&str, &str); 3] = [("R5", "R0"), ("R6", "R1"), ("R7", "R5")];

fn candidate_list(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    subsequence(pool.to_vec(), 0..=pool.len()).prop_shuffle()
}

fn conflict_set(index: usize) -> impl Strategy<Value = SdSet> {
    (subsequence(POOL.to_vec(), 2..=5), 2u32..=4).prop_map(move |(members, cardinality)| {
        SdSet::dynamic(format!("Set{}", index), members, cardinality)
    })
}

fn conflict_sets() -> impl Strategy<Value = Vec<SdSet>> {
    (conflict_set(0), conflict_set(1), conflict_set(2)).prop_map(|(a, b, c)| vec![a, b, c])
}

fn from_pool(candidates: &[&'static str], prefix: char) -> Vec<&'static str> {
    candidates.iter().copied().filter(|c| c.starts_with(prefix)).collect()
}

proptest! {
    #[test]
    fn prop_short_lists_unchanged(name in prop::sample::select(POOL.to_vec()), sets in conflict_sets()) {
        let checker = checker(&EDGES, sets);

        let empty = checker.validate_dsd(Vec::new(), TENANT).unwrap();
        prop_assert!(empty.retained.is_empty());
        prop_assert!(empty.warnings.is_empty());

        let single = checker.validate_dsd(roles(&[name]), TENANT).unwrap();
        prop_assert_eq!(names(&single.retained), vec![name.to_string()]);
        prop_assert!(single.warnings.is_empty());
    }

    #[test]
    fn prop_nth_direct_match_onwards_removed(cardinality in 2u32..=5, extra in 0usize..=3) {
        let k = cardinality as usize + extra;
        let members: Vec<String> = (0..k).map(|i| format!("M{}", i)).collect();
        let checker = checker(&[], vec![SdSet::dynamic("Members", members.clone(), cardinality)]);

        let candidates: Vec<&str> = members.iter().map(String::as_str).collect();
        let report = checker.validate_dsd(roles(&candidates), TENANT).unwrap();

        let keep = cardinality as usize - 1;
        prop_assert_eq!(names(&report.retained), members[..keep].to_vec());
        prop_assert_eq!(names(&report.removed), members[keep..].to_vec());
        prop_assert_eq!(report.warnings.len(), k - keep);
    }

    #[test]
    fn prop_inherited_membership_counts(depth in 1usize..=6) {
        // L{depth} -> ... -> L1 -> B
        let mut edges: Vec<(String, String)> = vec![("L1".to_string(), "B".to_string())];
        for level in 2..=depth {
            edges.push((format!("L{}", level), format!("L{}", level - 1)));
        }
        let edges: Vec<(&str, &str)> = edges.iter().map(|(c, p)| (c.as_str(), p.as_str())).collect();
        let checker = checker(&edges, vec![SdSet::dynamic("BC", ["B", "C"], 2)]);

        let leaf = format!("L{}", depth);
        let report = checker.validate_dsd(roles(&["C", leaf.as_str()]), TENANT).unwrap();

        prop_assert_eq!(names(&report.retained), vec!["C".to_string()]);
        prop_assert_eq!(names(&report.removed), vec![leaf]);
        prop_assert_eq!(report.warnings[0].inherited_from.as_deref(), Some("B"));
    }

    #[test]
    fn prop_pruning_is_idempotent(candidates in candidate_list(&POOL), sets in conflict_sets()) {
        let checker = checker(&EDGES, sets);

        let first = checker.validate_dsd(roles(&candidates), TENANT).unwrap();
        let second = checker.validate_dsd(first.retained.clone(), TENANT).unwrap();

        prop_assert!(second.is_clean());
        prop_assert_eq!(names(&second.retained), names(&first.retained));
    }

    #[test]
    fn prop_retained_and_removed_partition_candidates(
        candidates in candidate_list(&POOL),
        sets in conflict_sets(),
    ) {
        let checker = checker(&EDGES, sets);
        let report = checker.validate_dsd(roles(&candidates), TENANT).unwrap();

        prop_assert_eq!(report.retained.len() + report.removed.len(), candidates.len());
        prop_assert_eq!(report.warnings.len(), report.removed.len());

        // Retained roles keep their relative candidate order
        let retained = names(&report.retained);
        let in_order: Vec<String> = candidates
            .iter()
            .map(|c| c.to_string())
            .filter(|c| retained.contains(c))
            .collect();
        prop_assert_eq!(retained, in_order);
    }

    #[test]
    fn prop_disjoint_sets_are_independent(
        candidates in candidate_list(&["A0", "A1", "A2", "A3", "B0", "B1", "B2", "B3"]),
        card_a in 2u32..=3,
        card_b in 2u32..=3,
    ) {
        let set_a = SdSet::dynamic("A", ["A0", "A1", "A2", "A3"], card_a);
        let set_b = SdSet::dynamic("B", ["B0", "B1", "B2", "B3"], card_b);

        let both = checker(&[], vec![set_a.clone(), set_b.clone()]);
        let only_a = checker(&[], vec![set_a]);
        let only_b = checker(&[], vec![set_b]);

        let combined = names(&both.validate_dsd(roles(&candidates), TENANT).unwrap().retained);
        let a = names(&only_a.validate_dsd(roles(&from_pool(&candidates, 'A')), TENANT).unwrap().retained);
        let b = names(&only_b.validate_dsd(roles(&from_pool(&candidates, 'B')), TENANT).unwrap().retained);

        let combined_a: Vec<String> = combined.iter().filter(|c| c.starts_with('A')).cloned().collect();
        let combined_b: Vec<String> = combined.iter().filter(|c| c.starts_with('B')).cloned().collect();
        prop_assert_eq!(combined_a, a);
        prop_assert_eq!(combined_b, b);
    }
}
