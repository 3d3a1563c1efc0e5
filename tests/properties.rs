use block_bitset::{BitSet, block_count};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// A length together with indices that fit inside it.
fn sized_ones() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..300).prop_flat_map(|len| (Just(len), prop::collection::vec(0..len, 0..80)))
}

/// A length with a valid `start..end` range inside it.
fn sized_range() -> impl Strategy<Value = (usize, usize, usize)> {
    (0usize..300).prop_flat_map(|len| {
        (0..=len).prop_flat_map(move |start| (Just(len), Just(start), start..=len))
    })
}

fn build(len: usize, ones: &[usize]) -> BitSet {
    let mut set = BitSet::with_capacity(len);
    for &bit in ones {
        set.insert(bit).unwrap();
    }
    set
}

fn padding_is_clear(set: &BitSet) -> bool {
    let rem = set.len() % 32;
    match set.as_slice().last() {
        Some(&last) if rem != 0 => last >> rem == 0,
        _ => true,
    }
}

/// Drains `iter` taking from the back wherever `from_back` says so, then
/// returns the yielded indices in ascending order.
fn drain_interleaved(mut iter: impl DoubleEndedIterator<Item = usize>, from_back: &[bool]) -> Vec<usize> {
    let mut seen = Vec::new();
    for &back in from_back.iter().chain(core::iter::repeat(&false)) {
        let next = if back { iter.next_back() } else { iter.next() };
        match next {
            Some(bit) => seen.push(bit),
            None => break,
        }
    }
    seen.sort_unstable();
    seen
}

fn reversed(iter: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut forward: Vec<usize> = iter.collect();
    forward.reverse();
    forward
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_storage_matches_length((len, ones) in sized_ones(), grow_by in 0usize..100) {
        let mut set = build(len, &ones);
        prop_assert_eq!(set.block_len(), block_count(set.len()));
        prop_assert!(padding_is_clear(&set));

        set.grow(len + grow_by);
        prop_assert_eq!(set.len(), len + grow_by);
        prop_assert_eq!(set.block_len(), block_count(set.len()));

        let inverted = set.bit_not();
        prop_assert!(padding_is_clear(&inverted));
    }

    #[test]
    fn prop_ones_match_model((len, ones) in sized_ones()) {
        let set = build(len, &ones);
        let model: BTreeSet<usize> = ones.iter().copied().collect();

        prop_assert_eq!(set.ones().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(
            set.ones().rev().collect::<Vec<_>>(),
            model.iter().rev().copied().collect::<Vec<_>>()
        );
        for bit in 0..len {
            prop_assert_eq!(set.contains(bit), model.contains(&bit));
        }
    }

    #[test]
    fn prop_ones_and_zeroes_partition((len, ones) in sized_ones()) {
        let set = build(len, &ones);
        let set_bits: BTreeSet<usize> = set.ones().collect();
        let unset_bits: BTreeSet<usize> = set.zeroes().collect();

        prop_assert!(set_bits.is_disjoint(&unset_bits));
        prop_assert_eq!(set_bits.len() + unset_bits.len(), len);
        prop_assert_eq!(set.zeroes().rev().count(), unset_bits.len());
        prop_assert!(unset_bits.iter().all(|&bit| bit < len));
    }

    #[test]
    fn prop_interleaved_iteration_yields_each_bit_once(
        (len, ones) in sized_ones(),
        from_back in prop::collection::vec(any::<bool>(), 0..200),
    ) {
        let set = build(len, &ones);
        prop_assert_eq!(drain_interleaved(set.ones(), &from_back), set.ones().collect::<Vec<_>>());
        prop_assert_eq!(drain_interleaved(set.zeroes(), &from_back), set.zeroes().collect::<Vec<_>>());
    }

    #[test]
    fn prop_combinators_reverse_to_forward((a_len, a_ones) in sized_ones(), (b_len, b_ones) in sized_ones()) {
        let a = build(a_len, &a_ones);
        let b = build(b_len, &b_ones);

        prop_assert_eq!(reversed(a.union(&b)), a.union(&b).rev().collect::<Vec<_>>());
        prop_assert_eq!(reversed(a.intersection(&b)), a.intersection(&b).rev().collect::<Vec<_>>());
        prop_assert_eq!(reversed(a.difference(&b)), a.difference(&b).rev().collect::<Vec<_>>());
        prop_assert_eq!(
            reversed(a.symmetric_difference(&b)),
            a.symmetric_difference(&b).rev().collect::<Vec<_>>()
        );
        prop_assert_eq!(reversed(a.zeroes()), a.zeroes().rev().collect::<Vec<_>>());
    }

    #[test]
    fn prop_toggle_range_twice_is_identity((len, ones) in sized_ones(), a in 0usize..300, b in 0usize..300) {
        let original = build(len, &ones);
        let (start, end) = (a.min(b).min(len), a.max(b).min(len));
        let mut set = original.clone();
        set.toggle_range(start..end).unwrap();
        set.toggle_range(start..end).unwrap();
        prop_assert_eq!(set, original);
    }

    #[test]
    fn prop_range_ops_touch_only_the_range((len, start, end) in sized_range()) {
        let mut set = BitSet::with_capacity(len);
        set.insert_range(start..end).unwrap();
        prop_assert_eq!(set.ones().collect::<Vec<_>>(), (start..end).collect::<Vec<_>>());
        prop_assert_eq!(set.count_ones(..).unwrap(), end - start);
        prop_assert_eq!(set.count_zeroes(..).unwrap(), len - (end - start));
        prop_assert!(set.contains_all_in_range(start..end).unwrap());

        set.remove_range(start..end).unwrap();
        prop_assert!(set.is_clear());
    }

    #[test]
    fn prop_counts_agree_with_iterators((a_len, a_ones) in sized_ones(), (b_len, b_ones) in sized_ones()) {
        let a = build(a_len, &a_ones);
        let b = build(b_len, &b_ones);

        prop_assert_eq!(a.union_count(&b), a.union(&b).count());
        prop_assert_eq!(a.intersection_count(&b), a.intersection(&b).count());
        prop_assert_eq!(a.difference_count(&b), a.difference(&b).count());
        prop_assert_eq!(a.symmetric_difference_count(&b), a.symmetric_difference(&b).count());

        prop_assert_eq!((&a | &b).count_ones(..).unwrap(), a.union_count(&b));
        prop_assert_eq!((&a & &b).count_ones(..).unwrap(), a.intersection_count(&b));
        prop_assert_eq!((&a ^ &b).count_ones(..).unwrap(), a.symmetric_difference_count(&b));
    }

    #[test]
    fn prop_in_place_ops_match_iterators((a_len, a_ones) in sized_ones(), (b_len, b_ones) in sized_ones()) {
        let a = build(a_len, &a_ones);
        let b = build(b_len, &b_ones);

        let mut union = a.clone();
        union.union_with(&b);
        prop_assert_eq!(union.ones().collect::<BTreeSet<_>>(), a.union(&b).collect::<BTreeSet<_>>());

        let mut intersection = a.clone();
        intersection.intersect_with(&b);
        prop_assert_eq!(intersection.len(), a.len());
        prop_assert_eq!(intersection.ones().collect::<Vec<_>>(), a.intersection(&b).collect::<Vec<_>>());

        let mut difference = a.clone();
        difference.difference_with(&b);
        prop_assert_eq!(difference.ones().collect::<Vec<_>>(), a.difference(&b).collect::<Vec<_>>());

        let mut symmetric = a.clone();
        symmetric.symmetric_difference_with(&b);
        prop_assert_eq!(
            symmetric.ones().collect::<BTreeSet<_>>(),
            a.symmetric_difference(&b).collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn prop_subset_follows_model((a_len, a_ones) in sized_ones(), (b_len, b_ones) in sized_ones()) {
        let a = build(a_len, &a_ones);
        let b = build(b_len, &b_ones);
        let a_model: BTreeSet<usize> = a_ones.into_iter().collect();
        let b_model: BTreeSet<usize> = b_ones.into_iter().collect();

        prop_assert_eq!(a.is_subset(&b), a_model.is_subset(&b_model));
        prop_assert_eq!(a.is_disjoint(&b), a_model.is_disjoint(&b_model));
        prop_assert_eq!(a == b, a_model == b_model);
    }
}
