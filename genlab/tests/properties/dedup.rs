//! Dedup index properties over generated key/value lists.

use crate::{config, expect_pass};
use genlab::index::{last_wins, ukey};
use genlab::report::dupes_event;
use genlab::samples::{kv_pairs, Value};
use genlab::*;
use std::collections::HashSet;

type Pairs = Vec<(i64, Value)>;

/// Property: grouping keeps every value and exactly the input keys
pub fn test_total_values_match_input() {
    let prop = for_all_named(kv_pairs(), "pairs", |pairs: &Pairs| {
        let index = ukey(pairs);
        let grouped: usize = index.iter().map(|(_, values)| values.len()).sum();
        let keys: HashSet<i64> = index.keys().copied().collect();
        let expected: HashSet<i64> = pairs.iter().map(|(key, _)| *key).collect();
        grouped == pairs.len() && index.total_values() == pairs.len() && keys == expected
    });

    expect_pass("ukey keeps all values", prop.run(&config()));
}

/// Property: lost entries equal insertions under an already-seen key
pub fn test_duplicates_count_repeated_insertions() {
    let prop = for_all_named(kv_pairs(), "pairs", |pairs: &Pairs| {
        let mut seen = HashSet::new();
        let repeated = pairs.iter().filter(|(key, _)| !seen.insert(*key)).count();
        let index = ukey(pairs);
        pairs.len() - index.len() == repeated && index.duplicates() == repeated
    });

    expect_pass("duplicate count", prop.run(&config()));
}

/// Property: the index has as many keys as a map built from the same pairs
pub fn test_matches_hash_map_construction() {
    let prop = for_all_named(kv_pairs(), "pairs", |pairs: &Pairs| {
        ukey(pairs).len() == last_wins(pairs).len()
    });

    expect_pass("ukey matches HashMap", prop.run(&config()));
}

/// Property: every inserted key can be looked up again
pub fn test_every_key_resolves() {
    let prop = for_all_fallible(kv_pairs(), |pairs: &Pairs| {
        let index = ukey(pairs);
        let map = last_wins(pairs);
        for (key, _) in pairs {
            index.require(key)?;
            map.get(key).ok_or_else(|| GenlabError::MissingKey {
                key: key.to_string(),
            })?;
        }
        Ok::<(), GenlabError>(())
    });

    expect_pass("every key resolves", prop.run(&config()));
}

/// Duplicate counts are reported as bucketed events, one per trial
pub fn test_dupes_events_are_reported() {
    let prop = for_all(kv_pairs(), |_: &Pairs| true)
        .label(|pairs| dupes_event(pairs).unwrap_or_else(|error| error.to_string()));

    let result = prop.run_with_context(&config(), Some("dupes"), Some(module_path!()));
    match &result {
        TestResult::PassWithStatistics { statistics, .. } => {
            let reported: usize = statistics.events.values().sum();
            assert_eq!(reported, 100);
            assert!(statistics.events.keys().all(|label| label.starts_with("dupes: ")));
            assert!(statistics.event_count("dupes: 0-5") > 0);
            println!("{result}");
        }
        other => panic!("Expected dupes statistics, got: {other:?}"),
    }
}

pub fn test_concrete_scenario() {
    let pairs = [(1, "a"), (2, "b"), (1, "c")];
    let index = ukey(&pairs);
    assert_eq!(index.get(&1), Some(&["a", "c"][..]));
    assert_eq!(index.get(&2), Some(&["b"][..]));
    assert_eq!(index.len(), 2);
    assert_eq!(dupes_event(&pairs), Ok("dupes: 0-5".to_string()));
    println!("✓ Concrete ukey scenario passed");
}

/// A "no duplicate keys" claim fails and shrinks to two colliding pairs
pub fn test_no_duplicates_shrinks_to_pair() {
    let prop = for_all_named(kv_pairs(), "pairs", |pairs: &Pairs| {
        ukey(pairs).duplicates() == 0
    });

    match prop.run(&config()) {
        TestResult::Fail {
            counterexample,
            shrink_steps,
            ..
        } => {
            assert_eq!(counterexample.matches("Bool(false)").count(), 2);
            assert_eq!(counterexample.matches("), (").count(), 1);
            assert!(shrink_steps.iter().all(|step| step.variable_name.as_deref() == Some("pairs")));
            println!("✓ No-duplicates claim shrank to {counterexample}");
        }
        result => panic!("Expected duplicate keys to be found, got: {result:?}"),
    }
}
