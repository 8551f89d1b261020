//! Classification Gate Tests
//!
//! The five levels form a total order; `meets_level` is reflexive,
//! transitive, and monotonic, and `highest_of` picks the maximum.

use opsgate::access::{
    held_or_lowest, highest_of, meets_level, required_or_highest, ClassificationLevel,
};

use ClassificationLevel::{Cui, Secret, TopSecret, TopSecretSci, Unclassified};

#[test]
fn test_reflexivity() {
    for level in ClassificationLevel::ALL {
        assert!(meets_level(level, level), "{}", level);
    }
}

#[test]
fn test_extremes() {
    assert!(meets_level(TopSecretSci, Unclassified));
    assert!(!meets_level(Unclassified, TopSecretSci));
}

#[test]
fn test_meets_iff_not_below() {
    for (i, held) in ClassificationLevel::ALL.iter().enumerate() {
        for (j, required) in ClassificationLevel::ALL.iter().enumerate() {
            assert_eq!(meets_level(*held, *required), i >= j);
        }
    }
}

#[test]
fn test_highest_of_examples() {
    assert_eq!(highest_of(Vec::<ClassificationLevel>::new()), Unclassified);
    assert_eq!(highest_of([Secret, Cui, TopSecret]), TopSecret);
    assert_eq!(highest_of([Cui, Cui]), Cui);
}

#[test]
fn test_highest_of_is_met_by_nothing_lower() {
    let levels = [Cui, Secret, Unclassified];
    let top = highest_of(levels);

    for level in levels {
        assert!(meets_level(top, level));
    }
    assert!(!meets_level(Cui, top));
}

#[test]
fn test_untrusted_labels_fail_closed() {
    let held = held_or_lowest("SUPER_SECRET");
    let required = required_or_highest("SUPER_SECRET");

    assert_eq!(held, Unclassified);
    assert_eq!(required, TopSecretSci);

    // Unknown content is visible only to the highest clearance
    assert!(meets_level(TopSecretSci, required));
    assert!(!meets_level(TopSecret, required));
}
