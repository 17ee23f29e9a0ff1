mod common;

use proptest::prelude::*;
use sa_aligner::align::{align_blocked, align_read, Alignments, Hit};
use sa_aligner::assemble::assemble;
use sa_aligner::config::{BlockConfig, MatchPolicy};
use sa_aligner::index::{SaAlgorithm, SuffixArray, SuffixIndex};
use sa_aligner::reference::Reference;
use sa_aligner::util::dna::count_mismatches;

fn dna(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')], len)
}

fn algorithms() -> impl Strategy<Value = SaAlgorithm> {
    prop_oneof![Just(SaAlgorithm::Naive), Just(SaAlgorithm::Doubling), Just(SaAlgorithm::Sais)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn suffix_order_is_total(text in dna(0..200), algo in algorithms()) {
        let sa = SuffixArray::build_with(&algo, &text);
        prop_assert_eq!(sa.len(), text.len());

        let mut seen = vec![false; text.len()];
        for &p in sa.as_slice() {
            prop_assert!(!seen[p], "offset {} appears twice", p);
            seen[p] = true;
        }
        for w in sa.as_slice().windows(2) {
            prop_assert!(text[w[0]..] < text[w[1]..], "suffix {} should sort before {}", w[0], w[1]);
        }
    }

    #[test]
    fn builders_are_interchangeable(text in dna(0..300)) {
        let naive = SuffixArray::build_with(&SaAlgorithm::Naive, &text);
        prop_assert_eq!(&SuffixArray::build_with(&SaAlgorithm::Doubling, &text), &naive);
        prop_assert_eq!(&SuffixArray::build_with(&SaAlgorithm::Sais, &text), &naive);
    }

    #[test]
    fn range_returns_exactly_the_occurrences(
        text in dna(1..200),
        start in any::<prop::sample::Index>(),
        len in 0usize..8,
        random_pattern in dna(1..6),
    ) {
        let idx = SuffixIndex::build(&text, SaAlgorithm::Doubling);
        let s = start.index(text.len());
        let present = text[s..(s + len).min(text.len())].to_vec();

        for pattern in [present, random_pattern] {
            let mut got = idx.positions(&pattern).to_vec();
            got.sort_unstable();
            prop_assert_eq!(got, common::occurrences(&text, &pattern));
        }
    }

    #[test]
    fn align_matches_brute_force(
        text in dna(40..400),
        k in 0usize..4,
        read_len in 8usize..40,
        start in any::<prop::sample::Index>(),
        edits in proptest::collection::vec(0usize..1000, 0..6),
    ) {
        prop_assume!(read_len <= text.len());
        let s = start.index(text.len() - read_len + 1);
        let read = common::mutate(&text[s..s + read_len], &edits);

        let idx = SuffixIndex::build(&text, SaAlgorithm::Sais);
        let got = align_read(&idx, &read, k).map(|h| (h.offset, h.mismatches));
        prop_assert_eq!(got, common::brute_force_within(&text, &read, k));
    }

    #[test]
    fn reads_within_budget_are_recovered(
        text in dna(100..400),
        k in 1usize..4,
        start in any::<prop::sample::Index>(),
        edits in proptest::collection::vec(0usize..30, 0..4),
    ) {
        let read_len = 30;
        let s = start.index(text.len() - read_len + 1);
        let read = common::mutate(&text[s..s + read_len], &edits[..edits.len().min(k)]);

        let idx = SuffixIndex::build(&text, SaAlgorithm::Doubling);
        let hit = align_read(&idx, &read, k);
        prop_assert!(hit.is_some());
        let hit = hit.unwrap();
        prop_assert_eq!(Some((hit.offset, hit.mismatches)), common::brute_force(&text, &read));

        // 原位置之外没有同样好的位置时，必须返回原位置
        let at_truth = count_mismatches(&text[s..s + read_len], &read);
        let as_good = (0..=text.len() - read_len)
            .filter(|&p| count_mismatches(&text[p..p + read_len], &read) <= at_truth)
            .count();
        if as_good == 1 {
            prop_assert_eq!(hit.offset, s);
        }
    }

    #[test]
    fn align_is_idempotent(text in dna(20..200), read in dna(10..20), k in 0usize..3) {
        let idx = SuffixIndex::build(&text, SaAlgorithm::Naive);
        prop_assert_eq!(align_read(&idx, &read, k), align_read(&idx, &read, k));
    }

    #[test]
    fn best_match_blocking_equals_whole_index(
        text in dna(50..400),
        block_size in 8usize..120,
        overlap in 0usize..10,
        reads_spec in proptest::collection::vec(
            (any::<prop::sample::Index>(), proptest::collection::vec(0usize..1000, 0..4)),
            1..12,
        ),
    ) {
        let read_len = 16;
        let k = 2;
        let reads: Vec<Vec<u8>> = reads_spec
            .iter()
            .map(|(start, edits)| {
                let s = start.index(text.len() - read_len + 1);
                common::mutate(&text[s..s + read_len], edits)
            })
            .collect();

        let idx = SuffixIndex::build(&text, SaAlgorithm::Doubling);
        let whole: Vec<Option<Hit>> = reads.iter().map(|r| align_read(&idx, r, k)).collect();

        let reference = Reference::new(text.clone());
        let cfg = BlockConfig { block_size, overlap, policy: MatchPolicy::BestMatch };
        let blocked = align_blocked(&reference, &reads, k, &cfg, SaAlgorithm::Doubling);
        prop_assert_eq!(blocked, Alignments::from_hits(whole.clone()));

        // FirstMatch 找到的 read 集合与整条索引一致，且都在预算内
        let cfg = BlockConfig { policy: MatchPolicy::FirstMatch, ..cfg };
        let first = align_blocked(&reference, &reads, k, &cfg, SaAlgorithm::Doubling);
        for (i, hit) in whole.iter().enumerate() {
            prop_assert_eq!(first.get(i).is_some(), hit.is_some());
            if let Some(h) = first.get(i) {
                prop_assert!(h.mismatches <= k);
                prop_assert!(h.offset + read_len <= text.len());
            }
        }
    }

    #[test]
    fn tiled_reads_reconstruct_mutated_sequence(
        read_len in 1usize..30,
        n_tiles in 1usize..10,
        seed in any::<u32>(),
        edits in proptest::collection::vec(0usize..10_000, 0..20),
    ) {
        let target = common::lcg_sequence(read_len * n_tiles, seed);
        let reference = Reference::new(common::mutate(&target, &edits));

        let reads: Vec<Vec<u8>> = target.chunks(read_len).map(<[u8]>::to_vec).collect();
        let alignments = Alignments::from_hits(
            (0..reads.len()).map(|i| Some(Hit { offset: i * read_len, mismatches: 0 })).collect(),
        );
        prop_assert_eq!(assemble(&reference, &reads, &alignments), target);
    }
}
