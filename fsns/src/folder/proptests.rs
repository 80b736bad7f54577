//! Property-based tests for the column comparator.

use std::cmp::Ordering;

use super::compare::{compare_ids, Column};
use crate::pidl::{DosDateTime, IdList, OsAttributes, Segment};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = Segment> {
    // A small alphabet so that case-insensitive ties actually occur
    let name = "[aAbB.]{1,4}";
    prop_oneof![
        (name, 0u16..4).prop_map(|(n, a)| {
            Segment::folder(n, OsAttributes::from_bits_retain(a) | OsAttributes::DIRECTORY)
                .unwrap()
        }),
        (name, 0u64..4, 0u16..3, 0u16..4).prop_map(|(n, size, time, a)| {
            Segment::file(
                n,
                size,
                DosDateTime::from_raw(0x5A21, time),
                OsAttributes::from_bits_retain(a),
            )
            .unwrap()
        }),
    ]
}

fn list_strategy() -> impl Strategy<Value = IdList> {
    prop::collection::vec(segment_strategy(), 0..3).prop_map(IdList::from_segments)
}

fn column_strategy() -> impl Strategy<Value = usize> {
    0..Column::ALL.len()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // cmp(a, b) == reverse(cmp(b, a))
    #[test]
    fn comparison_is_antisymmetric(column in column_strategy(), a in list_strategy(), b in list_strategy()) {
        let ab = compare_ids(column, &a, &b).unwrap();
        let ba = compare_ids(column, &b, &a).unwrap();
        prop_assert_eq!(ab, ba.reverse());
    }

    // Equal only for identical identifiers
    #[test]
    fn equality_means_identity(column in column_strategy(), a in list_strategy(), b in list_strategy()) {
        let equal = compare_ids(column, &a, &b).unwrap() == Ordering::Equal;
        prop_assert_eq!(equal, a == b);
    }

    // a <= b and b <= c implies a <= c
    #[test]
    fn comparison_is_transitive(
        column in column_strategy(),
        a in list_strategy(),
        b in list_strategy(),
        c in list_strategy(),
    ) {
        let le = |x: &IdList, y: &IdList| compare_ids(column, x, y).unwrap() != Ordering::Greater;
        if le(&a, &b) && le(&b, &c) {
            prop_assert!(le(&a, &c));
        }
    }

    // Folders precede non-folders at the first level under every column
    #[test]
    fn folders_sort_first(column in column_strategy(), a in segment_strategy(), b in segment_strategy()) {
        prop_assume!(a.is_folder() && !b.is_folder());
        let ord = compare_ids(column, &IdList::single(a), &IdList::single(b)).unwrap();
        prop_assert_eq!(ord, Ordering::Less);
    }
}
