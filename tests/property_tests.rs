//! Property-based tests for sequence navigation.
//!
//! Members are distinct integers so positions are unambiguous.

use geoseq::ImageSequence;
use proptest::prelude::*;

fn filled(len: usize) -> ImageSequence<usize> {
    let sequence = ImageSequence::new();
    sequence.append_all(0..len);
    sequence
}

/// Strategy for a sequence length together with a valid position in it.
fn len_and_index() -> impl Strategy<Value = (usize, usize)> {
    (1usize..64).prop_flat_map(|len| (Just(len), 0..len))
}

/// Strategy for a sequence length together with two valid positions.
fn len_and_pair() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..64).prop_flat_map(|len| (Just(len), 0..len, 0..len))
}

// =============================================================================
// Navigation Property Tests
// =============================================================================

proptest! {
    /// next returns the member at i+1, or None exactly at the last index
    #[test]
    fn next_is_successor((len, i) in len_and_index()) {
        let sequence = filled(len);
        let next = sequence.next(&i).expect("member");
        if i == len - 1 {
            prop_assert_eq!(next, None);
        } else {
            prop_assert_eq!(next, Some(i + 1));
        }
    }

    /// previous returns the member at i-1, or None exactly at index 0
    #[test]
    fn previous_is_predecessor((len, i) in len_and_index()) {
        let sequence = filled(len);
        let previous = sequence.previous(&i).expect("member");
        if i == 0 {
            prop_assert_eq!(previous, None);
        } else {
            prop_assert_eq!(previous, Some(i - 1));
        }
    }

    /// distance is symmetric, zero on the diagonal, and equals the index gap
    #[test]
    fn distance_is_symmetric((len, a, b) in len_and_pair()) {
        let sequence = filled(len);
        let ab = sequence.distance(&a, &b).expect("members");
        let ba = sequence.distance(&b, &a).expect("members");
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(ab, a.abs_diff(b));
        prop_assert_eq!(sequence.distance(&a, &a).expect("member"), 0);
    }

    /// append_all on an empty sequence preserves the given order
    #[test]
    fn append_all_preserves_order(items in proptest::collection::vec(any::<u32>(), 0..64)) {
        let sequence = ImageSequence::new();
        sequence.append_all(items.clone());
        prop_assert_eq!(sequence.images(), items);
    }

    /// removed members are reported as not found by every query
    #[test]
    fn removed_member_is_not_found((len, i) in len_and_index()) {
        let sequence = filled(len);
        prop_assert!(sequence.remove(&i));
        prop_assert!(sequence.next(&i).unwrap_err().is_not_found());
        prop_assert!(sequence.previous(&i).unwrap_err().is_not_found());
        prop_assert!(sequence.distance(&i, &i).unwrap_err().is_not_found());
        prop_assert_eq!(sequence.len(), len - 1);
    }

    /// handles that were never appended are reported as not found
    #[test]
    fn stranger_is_not_found(len in 0usize..64) {
        let sequence = filled(len);
        let stranger = len + 1;
        prop_assert!(sequence.next(&stranger).unwrap_err().is_not_found());
        prop_assert!(sequence.previous(&stranger).unwrap_err().is_not_found());
    }
}
