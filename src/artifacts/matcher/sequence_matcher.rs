//! Sequence matcher
//!
//! Finds the longest contiguous matching subsequence that contains no junk
//! elements, then applies the same idea recursively to the pieces on either
//! side of it. The result does not always have the minimal edit count, but it
//! tends to line up with what people perceive as the change.
//!
//! ## Index over `b`
//!
//! The matcher is tuned for comparing many `a`s against one `b`: every
//! position of `b` is indexed by element once (`b2j`) and replacing `a` leaves
//! the index alone. Two kinds of elements are removed from the index:
//!
//! - junk elements, as classified by the caller supplied predicate
//! - popular elements (autojunk): when `b` has at least 200 elements, any
//!   element occurring more than `len(b) / 100 + 1` times
//!
//! Neither kind can start a match, but both can extend one found next to them.
//!
//! ## Block discovery
//!
//! Regions are split with an explicit worklist rather than call recursion, so
//! adversarial inputs (long alternating sequences) cannot exhaust the stack.

use crate::artifacts::junk::JunkPredicate;
use crate::artifacts::matcher::grouped_opcodes::GroupedOpcodes;
use crate::artifacts::matcher::match_block::Match;
use crate::artifacts::matcher::opcode::{Opcode, Tag};
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

const AUTOJUNK_MIN_LEN: usize = 200;

pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    isjunk: Option<JunkPredicate<'a, T>>,
    autojunk: bool,
    b2j: HashMap<&'a T, Vec<usize>>,
    bjunk: HashSet<&'a T>,
    bpopular: HashSet<&'a T>,
    matching_blocks: OnceCell<Vec<Match>>,
    opcodes: OnceCell<Vec<Opcode>>,
    full_b_count: OnceCell<HashMap<&'a T, usize>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Hash + Eq,
{
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_junk(None, a, b, true)
    }

    pub fn with_junk(
        isjunk: Option<JunkPredicate<'a, T>>,
        a: &'a [T],
        b: &'a [T],
        autojunk: bool,
    ) -> Self {
        let mut matcher = Self {
            a,
            b,
            isjunk,
            autojunk,
            b2j: HashMap::new(),
            bjunk: HashSet::new(),
            bpopular: HashSet::new(),
            matching_blocks: OnceCell::new(),
            opcodes: OnceCell::new(),
            full_b_count: OnceCell::new(),
        };
        matcher.chain_b();
        matcher
    }

    pub fn a(&self) -> &'a [T] {
        self.a
    }

    pub fn b(&self) -> &'a [T] {
        self.b
    }

    /// Elements of `b` classified as junk by the predicate
    pub fn bjunk(&self) -> &HashSet<&'a T> {
        &self.bjunk
    }

    /// Elements of `b` dropped from the index by the autojunk heuristic
    pub fn bpopular(&self) -> &HashSet<&'a T> {
        &self.bpopular
    }

    pub fn set_seqs(&mut self, a: &'a [T], b: &'a [T]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replaces `a`; the index over `b` is kept.
    pub fn set_seq1(&mut self, a: &'a [T]) {
        if std::ptr::eq(self.a, a) {
            return;
        }

        self.a = a;
        self.invalidate_matches();
    }

    /// Replaces `b` and rebuilds its index, junk and popular sets.
    pub fn set_seq2(&mut self, b: &'a [T]) {
        if std::ptr::eq(self.b, b) {
            return;
        }

        self.b = b;
        self.invalidate_matches();
        self.full_b_count.take();
        self.chain_b();
    }

    fn invalidate_matches(&mut self) {
        self.matching_blocks.take();
        self.opcodes.take();
    }

    fn chain_b(&mut self) {
        let b = self.b;

        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        let mut bjunk = HashSet::new();
        if let Some(isjunk) = &self.isjunk {
            bjunk.extend(b2j.keys().copied().filter(|elt| isjunk(*elt)));
            b2j.retain(|elt, _| !bjunk.contains(elt));
        }

        let mut bpopular = HashSet::new();
        let n = b.len();
        if self.autojunk && n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            bpopular.extend(
                b2j.iter()
                    .filter(|(_, indices)| indices.len() > ntest)
                    .map(|(elt, _)| *elt),
            );
            b2j.retain(|elt, _| !bpopular.contains(elt));
        }

        debug_log!(
            "indexed b: {} elements, {} distinct, {} junk, {} popular",
            n,
            b2j.len(),
            bjunk.len(),
            bpopular.len()
        );

        self.b2j = b2j;
        self.bjunk = bjunk;
        self.bpopular = bpopular;
    }

    fn is_bjunk(&self, elt: &T) -> bool {
        self.bjunk.contains(elt)
    }

    /// Longest matching block over the full extent of both sequences
    pub fn longest_match(&self) -> Match {
        self.find_longest_match(0, self.a.len(), 0, self.b.len())
    }

    /// Finds the longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Of all maximal blocks the one starting earliest in `a` wins, and of
    /// those the one starting earliest in `b`. The block is junk free except
    /// for junk that sits directly next to it and matches on both sides.
    /// Returns `Match(alo, blo, 0)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending with a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            if let Some(indices) = self.b2j.get(elt) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        (besti, bestj, bestsize) = (i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut new_j2len);
            new_j2len.clear();
        }

        // Popular elements never enter the index; recover them around the
        // block, then absorb adjacent matching junk.
        for junk in [false, true] {
            while besti > alo
                && bestj > blo
                && self.is_bjunk(&b[bestj - 1]) == junk
                && a[besti - 1] == b[bestj - 1]
            {
                (besti, bestj, bestsize) = (besti - 1, bestj - 1, bestsize + 1);
            }
            while besti + bestsize < ahi
                && bestj + bestsize < bhi
                && self.is_bjunk(&b[bestj + bestsize]) == junk
                && a[besti + bestsize] == b[bestj + bestsize]
            {
                bestsize += 1;
            }
        }

        Match::new(besti, bestj, bestsize)
    }

    /// Non-adjacent matching blocks, ending with `Match(len(a), len(b), 0)`.
    pub fn get_matching_blocks(&self) -> &[Match] {
        self.matching_blocks
            .get_or_init(|| self.compute_matching_blocks())
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }

            blocks.push(found);
            if alo < found.a && blo < found.b {
                queue.push((alo, found.a, blo, found.b));
            }
            if found.a_end() < ahi && found.b_end() < bhi {
                queue.push((found.a_end(), ahi, found.b_end(), bhi));
            }
        }
        blocks.sort();

        // Adjacent blocks can appear when a junk-free block is followed by
        // one found in a later region; collapse them.
        let mut non_adjacent: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        let mut current = Match::new(0, 0, 0);
        for block in blocks {
            if current.a_end() == block.a && current.b_end() == block.b {
                current.size += block.size;
            } else {
                if current.size > 0 {
                    non_adjacent.push(current);
                }
                current = block;
            }
        }
        if current.size > 0 {
            non_adjacent.push(current);
        }
        non_adjacent.push(Match::new(la, lb, 0));

        debug_log!("found {} matching blocks", non_adjacent.len() - 1);

        non_adjacent
    }

    /// Edit operations turning `a` into `b`, covering both sequences.
    pub fn get_opcodes(&self) -> &[Opcode] {
        self.opcodes.get_or_init(|| self.compute_opcodes())
    }

    fn compute_opcodes(&self) -> Vec<Opcode> {
        let (mut i, mut j) = (0, 0);
        let mut opcodes = Vec::new();

        for block in self.get_matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(Tag::Replace),
                (true, false) => Some(Tag::Delete),
                (false, true) => Some(Tag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i, block.a, j, block.b));
            }

            (i, j) = (block.a_end(), block.b_end());
            if block.size > 0 {
                opcodes.push(Opcode::new(Tag::Equal, block.a, i, block.b, j));
            }
        }

        opcodes
    }

    /// Hunks of opcodes with up to `context` lines of equal context around
    /// each change. Every call returns a fresh iterator.
    pub fn get_grouped_opcodes(&self, context: usize) -> GroupedOpcodes {
        GroupedOpcodes::new(self.get_opcodes(), context)
    }

    /// Similarity in `[0, 1]`: twice the matched elements over the total.
    pub fn ratio(&self) -> f64 {
        let matches = self
            .get_matching_blocks()
            .iter()
            .map(|block| block.size)
            .sum();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on `ratio()` counting common elements regardless of order.
    pub fn quick_ratio(&self) -> f64 {
        let full_b_count = self.full_b_count.get_or_init(|| {
            let mut counts = HashMap::new();
            for elt in self.b {
                *counts.entry(elt).or_insert(0) += 1;
            }
            counts
        });

        let mut avail: HashMap<&T, isize> = HashMap::new();
        let mut matches = 0;
        for elt in self.a {
            let numb = avail
                .entry(elt)
                .or_insert_with(|| full_b_count.get(elt).copied().unwrap_or(0) as isize);
            if *numb > 0 {
                matches += 1;
            }
            *numb -= 1;
        }

        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on `quick_ratio()` from the lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length > 0 {
        2.0 * matches as f64 / length as f64
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn ops(matcher: &SequenceMatcher<'_, char>) -> Vec<(Tag, usize, usize, usize, usize)> {
        matcher
            .get_opcodes()
            .iter()
            .map(|op| (op.tag, op.a_start, op.a_end, op.b_start, op.b_end))
            .collect()
    }

    #[test]
    fn matching_blocks_are_cached_and_stable() {
        let (a, b) = (chars("abxcd"), chars("abcd"));
        let matcher = SequenceMatcher::new(&a, &b);
        let expected: Vec<Match> = vec![(0, 0, 2).into(), (3, 2, 2).into(), (5, 4, 0).into()];

        assert_eq!(matcher.get_matching_blocks(), expected.as_slice());
        assert_eq!(matcher.get_matching_blocks(), expected.as_slice());
    }

    #[test]
    fn opcodes_describe_every_edit_kind() {
        let (a, b) = (chars("qabxcd"), chars("abycdf"));
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(
            ops(&matcher),
            vec![
                (Tag::Delete, 0, 1, 0, 0),
                (Tag::Equal, 1, 3, 0, 2),
                (Tag::Replace, 3, 4, 2, 3),
                (Tag::Equal, 4, 6, 3, 5),
                (Tag::Insert, 6, 6, 5, 6),
            ]
        );
    }

    #[test]
    fn one_insert() {
        let a = chars(&"b".repeat(100));
        let b = chars(&format!("a{}", "b".repeat(100)));
        let matcher = SequenceMatcher::new(&a, &b);

        assert!((matcher.ratio() - 0.995).abs() < 1e-3);
        assert_eq!(
            ops(&matcher),
            vec![(Tag::Insert, 0, 0, 0, 1), (Tag::Equal, 0, 100, 1, 101)]
        );
        assert!(matcher.bpopular().is_empty());

        let b = chars(&format!("{}a{}", "b".repeat(50), "b".repeat(50)));
        let matcher = SequenceMatcher::new(&a, &b);

        assert!((matcher.ratio() - 0.995).abs() < 1e-3);
        assert_eq!(
            ops(&matcher),
            vec![
                (Tag::Equal, 0, 50, 0, 50),
                (Tag::Insert, 50, 50, 50, 51),
                (Tag::Equal, 50, 100, 51, 101),
            ]
        );
    }

    #[test]
    fn one_delete() {
        let a = chars(&format!("{}c{}", "a".repeat(40), "b".repeat(40)));
        let b = chars(&format!("{}{}", "a".repeat(40), "b".repeat(40)));
        let matcher = SequenceMatcher::new(&a, &b);

        assert!((matcher.ratio() - 0.994).abs() < 1e-3);
        assert_eq!(
            ops(&matcher),
            vec![
                (Tag::Equal, 0, 40, 0, 40),
                (Tag::Delete, 40, 41, 40, 40),
                (Tag::Equal, 41, 81, 40, 80),
            ]
        );
    }

    #[rstest]
    #[case(&[' '], "", HashSet::new())]
    #[case(&[' '], "          ", HashSet::from([' ']))]
    #[case(&[' ', 'b'], "          ", HashSet::from([' ', 'b']))]
    fn bjunk_only_holds_classified_elements_of_b(
        #[case] junk: &'static [char],
        #[case] trailing: &str,
        #[case] expected: HashSet<char>,
    ) {
        let a = chars(&format!("{}{}", "a".repeat(40), "b".repeat(40)));
        let b = chars(&format!("{}{}{}", "a".repeat(44), "b".repeat(40), trailing));
        let matcher = SequenceMatcher::<char>::with_junk(
            Some(Box::new(|c: &char| junk.contains(c))),
            &a,
            &b,
            true,
        );

        let bjunk: HashSet<char> = matcher.bjunk().iter().map(|c| **c).collect();
        assert_eq!(bjunk, expected);
    }

    #[test]
    fn autojunk_drops_popular_elements() {
        let a = chars(&"b".repeat(200));
        let b = chars(&format!("a{}", "b".repeat(200)));

        let matcher = SequenceMatcher::new(&a, &b);
        assert!(matcher.ratio().abs() < 1e-3);
        let popular: Vec<char> = matcher.bpopular().iter().map(|c| **c).collect();
        assert_eq!(popular, vec!['b']);

        let matcher = SequenceMatcher::with_junk(None, &a, &b, false);
        assert!((matcher.ratio() - 0.9975).abs() < 1e-3);
        assert!(matcher.bpopular().is_empty());
    }

    #[test]
    fn longest_match_respects_bounds() {
        let (a, b) = (chars("foo bar"), chars("foo baz bar"));
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.longest_match(), Match::new(0, 0, 6));
        assert_eq!(matcher.find_longest_match(2, 7, 4, 11), Match::new(3, 7, 4));
        assert_eq!(matcher.find_longest_match(0, 7, 1, 5), Match::new(1, 1, 4));
    }

    #[test]
    fn longest_match_extends_through_popular_elements() {
        let a = chars("dabcd");
        let b = chars(&format!("{}abc{}", "d".repeat(100), "d".repeat(100)));
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.longest_match(), Match::new(0, 99, 5));
    }

    #[test]
    fn longest_match_absorbs_adjacent_junk() {
        let (a, b) = (chars(" abcd"), chars("abcd abcd"));

        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(matcher.longest_match(), Match::new(0, 4, 5));

        let matcher =
            SequenceMatcher::<char>::with_junk(Some(Box::new(|c: &char| *c == ' ')), &a, &b, true);
        assert_eq!(matcher.longest_match(), Match::new(1, 0, 4));
    }

    #[test]
    fn set_seqs_replaces_both_sides() {
        let (a, b) = (chars("abcd"), chars("abcd"));
        let (c, d) = (chars("qabxcd"), chars("abycdf"));
        let mut matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(matcher.ratio(), 1.0);

        matcher.set_seqs(&c, &d);
        assert_eq!(
            ops(&matcher),
            vec![
                (Tag::Delete, 0, 1, 0, 0),
                (Tag::Equal, 1, 3, 0, 2),
                (Tag::Replace, 3, 4, 2, 3),
                (Tag::Equal, 4, 6, 3, 5),
                (Tag::Insert, 6, 6, 5, 6),
            ]
        );
        assert!((matcher.ratio() - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn no_match_reports_region_start() {
        let (a, b) = (chars("ab"), chars("c"));
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.longest_match(), Match::new(0, 0, 0));
    }

    #[test]
    fn ratios_of_empty_sequences_are_one() {
        let empty: Vec<char> = Vec::new();
        let matcher = SequenceMatcher::new(&empty, &empty);

        assert_eq!(matcher.ratio(), 1.0);
        assert_eq!(matcher.quick_ratio(), 1.0);
        assert_eq!(matcher.real_quick_ratio(), 1.0);
        assert_eq!(matcher.get_grouped_opcodes(3).count(), 0);
    }

    #[test]
    fn ratio_cascade() {
        let (a, b) = (chars("abcd"), chars("bcde"));
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.ratio(), 0.75);
        assert_eq!(matcher.quick_ratio(), 0.75);
        assert_eq!(matcher.real_quick_ratio(), 1.0);
    }

    #[test]
    fn junk_spaces_ratio() {
        let a = chars("private Thread currentThread;");
        let b = chars("private volatile Thread currentThread;");
        let matcher =
            SequenceMatcher::<char>::with_junk(Some(Box::new(|c: &char| *c == ' ')), &a, &b, true);

        assert!((matcher.ratio() - 0.866).abs() < 1e-3);
    }

    #[test]
    fn replacing_a_keeps_b_index() {
        let (a1, a2, b) = (chars("abxcd"), chars("abcd"), chars("abcd"));
        let b2 = chars("xyz");
        let mut matcher = SequenceMatcher::new(&a1, &b);
        assert!(matcher.ratio() < 1.0);

        matcher.set_seq1(&a2);
        assert_eq!(matcher.ratio(), 1.0);
        assert_eq!(ops(&matcher), vec![(Tag::Equal, 0, 4, 0, 4)]);

        matcher.set_seq2(&b2);
        assert_eq!(matcher.ratio(), 0.0);
        assert_eq!(ops(&matcher), vec![(Tag::Replace, 0, 4, 0, 3)]);
    }

    #[test]
    fn alternating_sequences_do_not_exhaust_the_stack() {
        let old: Vec<String> = (0..4000)
            .map(|i| {
                if i % 2 == 1 {
                    format!("K:{i}")
                } else {
                    format!("V:A:{i}")
                }
            })
            .collect();
        let new: Vec<String> = (0..4000)
            .map(|i| {
                if i % 2 == 1 {
                    format!("K:{i}")
                } else {
                    format!("V:B:{i}")
                }
            })
            .collect();
        let matcher = SequenceMatcher::new(&old, &new);

        assert_eq!(matcher.get_opcodes().len(), 4000);
    }

    proptest! {
        #[test]
        fn opcodes_tile_both_sequences(a in "[a-d]{0,40}", b in "[a-d]{0,40}") {
            let (a, b) = (chars(&a), chars(&b));
            let matcher = SequenceMatcher::new(&a, &b);

            let (mut i, mut j) = (0, 0);
            for op in matcher.get_opcodes() {
                prop_assert_eq!(op.a_start, i);
                prop_assert_eq!(op.b_start, j);
                if op.is_equal() {
                    prop_assert_eq!(&a[op.a_start..op.a_end], &b[op.b_start..op.b_end]);
                }
                (i, j) = (op.a_end, op.b_end);
            }
            prop_assert_eq!(i, a.len());
            prop_assert_eq!(j, b.len());

            let matched: usize = matcher.get_matching_blocks().iter().map(|m| m.size).sum();
            prop_assert!(matched <= a.len().min(b.len()));
        }

        #[test]
        fn ratios_are_ordered_and_bounded(a in "[a-e ]{0,50}", b in "[a-e ]{0,50}") {
            let (a, b) = (chars(&a), chars(&b));
            let matcher = SequenceMatcher::new(&a, &b);

            let (ratio, quick, real_quick) =
                (matcher.ratio(), matcher.quick_ratio(), matcher.real_quick_ratio());
            prop_assert!((0.0..=1.0).contains(&ratio));
            prop_assert!(real_quick >= quick);
            prop_assert!(quick >= ratio);
        }

        #[test]
        fn sequence_is_identical_to_itself(a in prop::collection::vec(any::<u8>(), 0..300)) {
            let matcher = SequenceMatcher::with_junk(None, &a, &a, false);
            prop_assert_eq!(matcher.ratio(), 1.0);
        }
    }
}
