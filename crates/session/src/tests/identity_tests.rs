use std::collections::HashSet;

use super::*;

#[test]
fn base36_matches_known_values() {
    assert_eq!(base36(0), "0");
    assert_eq!(base36(35), "z");
    assert_eq!(base36(36), "10");
    assert_eq!(base36(u128::from(u64::MAX)), "3w5e11264sgsf");
}

#[test]
fn allocated_identities_are_prefixed_and_alphanumeric() {
    let id = allocate();
    let rest = id.as_str().strip_prefix('_').expect("prefix");
    assert!(!rest.is_empty());
    assert!(rest.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
}

#[test]
fn allocated_identities_do_not_repeat() {
    let ids: HashSet<_> = (0..10_000).map(|_| allocate()).collect();
    assert_eq!(ids.len(), 10_000);
}
