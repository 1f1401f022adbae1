//! Property tests for hive storage codes.
//!
//! Validates:
//! - Every valid code decodes to a variant that encodes back to the same code
//! - Code 0 and everything above the last variant is rejected, never wrapped
//! - Persisted block state accepts exactly the valid range

use hivecraft_hives::{decode, encode, HiveState, HiveVariant, OutOfRangeError, StorageCode};
use proptest::prelude::*;

proptest! {
    /// Property: decode then encode is the identity on valid codes.
    #[test]
    fn valid_codes_round_trip(code in 1u32..=u32::from(StorageCode::MAX)) {
        let variant = decode(code).expect("valid code decodes");
        prop_assert_ne!(variant, HiveVariant::Swarm);
        let encoded = encode(variant).expect("lootable variant encodes");
        prop_assert_eq!(u32::from(encoded), code);
    }

    /// Property: codes past the last variant fail with the offending value.
    #[test]
    fn codes_past_the_end_are_rejected(code in (u32::from(StorageCode::MAX) + 1)..=u32::MAX) {
        prop_assert_eq!(decode(code), Err(OutOfRangeError { code }));
        prop_assert!(HiveState::from_raw(code).is_err());
    }

    /// Property: stored records load iff the code is in range.
    #[test]
    fn stored_records_validate_codes(code in 0u32..64) {
        let record = format!(r#"{{"code":{code}}}"#);
        let loaded = HiveState::load(&record);
        let valid = (1..=u32::from(StorageCode::MAX)).contains(&code);
        prop_assert_eq!(loaded.is_ok(), valid);
        if let Ok(state) = loaded {
            prop_assert_eq!(u32::from(state.code()), code);
        }
    }
}

#[test]
fn reserved_and_first_invalid_codes_fail() {
    let first_invalid = u32::from(StorageCode::MAX) + 1;
    assert_eq!(decode(0), Err(OutOfRangeError { code: 0 }));
    assert_eq!(
        decode(first_invalid),
        Err(OutOfRangeError {
            code: first_invalid
        })
    );
}

#[test]
fn lootable_variants_cover_the_code_space() {
    let codes: Vec<u8> = HiveVariant::LOOTABLE
        .into_iter()
        .filter_map(encode)
        .map(StorageCode::get)
        .collect();
    assert_eq!(codes, (1..=StorageCode::MAX).collect::<Vec<_>>());
}
