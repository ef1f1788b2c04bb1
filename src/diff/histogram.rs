use std::collections::HashMap;

use super::{myers, push_hunk, Comparison, Hunk, LineComparator, Region, WhitespaceInsensitive};

/// Lines occurring more often than this in a region are never used as anchors.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 64;

/// Histogram diff.
///
/// Each region is split around the longest common run that contains one of
/// its least frequent lines, and both halves are processed the same way.
/// Regions whose shared lines are all too frequent fall back to Myers; regions
/// without any shared line become a single replacement hunk.
#[derive(Debug, Clone)]
pub struct HistogramDiff<C = WhitespaceInsensitive> {
    comparator: C,
    max_chain_length: usize,
}

impl HistogramDiff<WhitespaceInsensitive> {
    pub fn new() -> Self {
        Self::with_comparator(WhitespaceInsensitive)
    }
}

impl Default for HistogramDiff<WhitespaceInsensitive> {
    fn default() -> Self {
        Self::new()
    }
}

enum Anchor {
    Run(Region),
    TooCommon,
    Disjoint,
}

impl<C: LineComparator> HistogramDiff<C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            comparator,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }

    pub fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = max_chain_length;
        self
    }

    /// Diff `a` against `b`, returning ordered, non-overlapping hunks.
    pub fn diff<S: AsRef<str>>(&self, a: &[S], b: &[S]) -> Vec<Hunk> {
        let cmp = Comparison::new(a, b, &self.comparator);
        let mut out = Vec::new();

        // Regions are popped depth-first, "before" ahead of "after", so hunks
        // come out in order.
        let mut pending = vec![Region {
            begin_a: 0,
            end_a: a.len(),
            begin_b: 0,
            end_b: b.len(),
        }];

        while let Some(mut region) = pending.pop() {
            region.trim(&cmp);
            if region.len_a() == 0 || region.len_b() == 0 {
                push_hunk(&mut out, replace(&region));
                continue;
            }

            match self.find_anchor(&cmp, &region) {
                Anchor::Run(run) => {
                    pending.push(Region {
                        begin_a: run.end_a,
                        end_a: region.end_a,
                        begin_b: run.end_b,
                        end_b: region.end_b,
                    });
                    pending.push(Region {
                        begin_a: region.begin_a,
                        end_a: run.begin_a,
                        begin_b: region.begin_b,
                        end_b: run.begin_b,
                    });
                }
                Anchor::TooCommon => myers::diff_region(&cmp, region, &mut out),
                Anchor::Disjoint => push_hunk(&mut out, replace(&region)),
            }
        }

        out
    }

    fn find_anchor<S: AsRef<str>>(&self, cmp: &Comparison<'_, S, C>, region: &Region) -> Anchor {
        // Equivalence classes of A's lines, bucketed by hash. Positions within
        // a class are ascending.
        let mut classes: HashMap<u64, Vec<Vec<usize>>> = HashMap::new();
        for i in region.begin_a..region.end_a {
            let bucket = classes.entry(cmp.a.hash(i)).or_default();
            match bucket.iter_mut().find(|class| cmp.eq_a(class[0], i)) {
                Some(class) => class.push(i),
                None => bucket.push(vec![i]),
            }
        }

        let mut occurrences = vec![0usize; region.len_a()];
        for class in classes.values().flatten() {
            for &i in class {
                occurrences[i - region.begin_a] = class.len();
            }
        }
        let count_at = |i: usize| occurrences[i - region.begin_a];

        let mut best: Option<Region> = None;
        let mut best_count = self.max_chain_length + 1;
        let mut too_common = false;

        let mut j = region.begin_b;
        while j < region.end_b {
            let mut next_j = j + 1;

            let class = classes
                .get(&cmp.b.hash(j))
                .and_then(|bucket| bucket.iter().find(|class| cmp.eq(class[0], j)));

            if let Some(class) = class {
                if class.len() > self.max_chain_length {
                    too_common = true;
                } else if class.len() <= best_count {
                    for &i in class {
                        let mut run = Region {
                            begin_a: i,
                            end_a: i + 1,
                            begin_b: j,
                            end_b: j + 1,
                        };
                        let mut count = class.len();

                        while run.begin_a > region.begin_a
                            && run.begin_b > region.begin_b
                            && cmp.eq(run.begin_a - 1, run.begin_b - 1)
                        {
                            run.begin_a -= 1;
                            run.begin_b -= 1;
                            count = count.min(count_at(run.begin_a));
                        }
                        while run.end_a < region.end_a
                            && run.end_b < region.end_b
                            && cmp.eq(run.end_a, run.end_b)
                        {
                            count = count.min(count_at(run.end_a));
                            run.end_a += 1;
                            run.end_b += 1;
                        }

                        next_j = next_j.max(run.end_b);

                        let longer = best.map_or(true, |b| run.len_a() > b.len_a());
                        if longer || count < best_count {
                            best = Some(run);
                            best_count = count;
                        }
                    }
                }
            }

            j = next_j;
        }

        match best {
            Some(run) => Anchor::Run(run),
            None if too_common => Anchor::TooCommon,
            None => Anchor::Disjoint,
        }
    }
}

fn replace(region: &Region) -> Hunk {
    Hunk {
        begin_a: region.begin_a,
        end_a: region.end_a,
        begin_b: region.begin_b,
        end_b: region.end_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changed_lines;

    fn hunk(begin_a: usize, end_a: usize, begin_b: usize, end_b: usize) -> Hunk {
        Hunk {
            begin_a,
            end_a,
            begin_b,
            end_b,
        }
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    fn assert_well_formed(hunks: &[Hunk], len_a: usize, len_b: usize) {
        for pair in hunks.windows(2) {
            assert!(pair[0].end_a <= pair[1].begin_a, "{hunks:?}");
            assert!(pair[0].end_b <= pair[1].begin_b, "{hunks:?}");
            assert!(
                pair[0].end_a < pair[1].begin_a || pair[0].end_b < pair[1].begin_b,
                "adjacent hunks not merged: {hunks:?}"
            );
        }
        for h in hunks {
            assert!(h.begin_a <= h.end_a && h.end_a <= len_a);
            assert!(h.begin_b <= h.end_b && h.end_b <= len_b);
            assert!(h.len_a() + h.len_b() > 0);
        }
    }

    #[test]
    fn test_identical_inputs_produce_no_hunks() {
        let text = lines("one\ntwo\n\nthree");
        assert!(HistogramDiff::new().diff(&text, &text).is_empty());
    }

    #[test]
    fn test_both_empty_produce_no_hunks() {
        let empty: Vec<&str> = Vec::new();
        assert!(HistogramDiff::new().diff(&empty, &empty).is_empty());
    }

    #[test]
    fn test_empty_side_is_a_single_hunk() {
        let empty: Vec<&str> = Vec::new();
        let text = lines("a\nb\nc");
        let engine = HistogramDiff::new();

        assert_eq!(engine.diff(&empty, &text), vec![hunk(0, 0, 0, 3)]);
        assert_eq!(engine.diff(&text, &empty), vec![hunk(0, 3, 0, 0)]);
    }

    #[test]
    fn test_whitespace_only_changes_are_ignored() {
        let a = lines("  Copyright (c) <year>\n\n   Permission   is hereby granted");
        let b = lines("Copyright (c) <year>\n   \nPermission is hereby granted  ");
        assert!(HistogramDiff::new().diff(&a, &b).is_empty());
    }

    #[test]
    fn test_single_line_replacement() {
        let a = lines("a\nb\nX\nd\ne");
        let b = lines("a\nb\nc\nd\ne");
        assert_eq!(HistogramDiff::new().diff(&a, &b), vec![hunk(2, 3, 2, 3)]);
    }

    #[test]
    fn test_insertion_and_deletion_in_one_pass() {
        let a = lines("preamble\nalpha\nbeta\ngamma\ndelta");
        let b = lines("alpha\nbeta\nnew line\ngamma\ndelta");
        let hunks = HistogramDiff::new().diff(&a, &b);
        assert_eq!(hunks, vec![hunk(0, 1, 0, 0), hunk(3, 3, 2, 3)]);
        assert_eq!(changed_lines(&hunks), 2);
    }

    #[test]
    fn test_disjoint_inputs_become_one_replacement() {
        let a = lines("x\ny");
        let b = lines("p\nq\nr");
        assert_eq!(HistogramDiff::new().diff(&a, &b), vec![hunk(0, 2, 0, 3)]);
    }

    #[test]
    fn test_anchors_on_rare_lines_around_repeated_blanks() {
        let a = lines("1. Definitions\n\nfoo\n\n2. Grant\n\nbar\n\n3. Terms");
        let b = lines("1. Definitions\n\nfoo\n\n2. Grant\n\nbaz\n\n3. Terms");
        let hunks = HistogramDiff::new().diff(&a, &b);
        assert_eq!(hunks, vec![hunk(6, 7, 6, 7)]);
    }

    #[test]
    fn test_too_common_lines_fall_back_to_myers() {
        // With a zero chain limit no line may anchor, so every region goes
        // through the fallback. The result must still be a minimal script.
        let a = lines("a\nb\nc\na\nb\nb\na");
        let b = lines("c\nb\na\nb\na\nc");
        let engine = HistogramDiff::new().with_max_chain_length(0);
        let hunks = engine.diff(&a, &b);
        assert_well_formed(&hunks, a.len(), b.len());
        assert_eq!(changed_lines(&hunks), 5);
    }

    #[test]
    fn test_hunks_are_ordered_and_disjoint_on_noisy_input() {
        let a: Vec<String> = (0..120)
            .map(|i| if i % 3 == 0 { String::new() } else { format!("line {}", i % 17) })
            .collect();
        let b: Vec<String> = (0..100)
            .map(|i| if i % 4 == 0 { String::new() } else { format!("line {}", i % 13) })
            .collect();
        for limit in [0, 2, DEFAULT_MAX_CHAIN_LENGTH] {
            let hunks = HistogramDiff::new().with_max_chain_length(limit).diff(&a, &b);
            assert_well_formed(&hunks, a.len(), b.len());
        }
    }
}
