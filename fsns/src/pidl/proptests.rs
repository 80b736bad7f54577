//! Property-based tests for the identifier codec.

use super::{decode, encode, DosDateTime, IdList, OsAttributes, Segment};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.\\-äöü]{1,24}"
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        name_strategy().prop_map(|n| Segment::drive(n).unwrap()),
        (name_strategy(), any::<u16>()).prop_map(|(n, a)| {
            Segment::folder(n, OsAttributes::from_bits_retain(a)).unwrap()
        }),
        (name_strategy(), any::<u64>(), any::<u16>(), any::<u16>(), any::<u16>()).prop_map(
            |(n, size, date, time, a)| {
                Segment::file(
                    n,
                    size,
                    DosDateTime::from_raw(date, time),
                    OsAttributes::from_bits_retain(a),
                )
                .unwrap()
            }
        ),
    ]
}

fn list_strategy() -> impl Strategy<Value = IdList> {
    prop::collection::vec(segment_strategy(), 0..8).prop_map(IdList::from_segments)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // decode(encode(x)) == x
    #[test]
    fn codec_round_trip(list in list_strategy()) {
        let bytes = encode(&list);
        prop_assert_eq!(decode(&bytes).unwrap(), list);
    }

    // Decoding arbitrary bytes never panics
    #[test]
    fn decode_is_total(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }

    // Any strict prefix of an encoding is rejected
    #[test]
    fn truncation_is_rejected(list in list_strategy(), cut in 1usize..64) {
        let bytes = encode(&list);
        let cut = cut.min(bytes.len());
        prop_assert!(decode(&bytes[..bytes.len() - cut]).is_err());
    }
}
