//! Line-oriented diffing between a candidate text (side A) and a reference
//! text (side B).
//!
//! - [`comparator`]: whitespace-insensitive line equality.
//! - [`histogram`]: histogram diff, the entry point.
//! - [`myers`]: O(ND) fallback for regions without a usable anchor.

pub mod comparator;
pub mod histogram;
mod myers;

pub use comparator::{LineComparator, WhitespaceInsensitive};
pub use histogram::HistogramDiff;

/// A contiguous divergence between the two sides.
///
/// `begin_a..end_a` is the affected range of A and `begin_b..end_b` the range
/// of B it corresponds to. Either range may be empty (pure insertion or
/// deletion) but never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub begin_a: usize,
    pub end_a: usize,
    pub begin_b: usize,
    pub end_b: usize,
}

impl Hunk {
    pub fn len_a(&self) -> usize {
        self.end_a - self.begin_a
    }

    pub fn len_b(&self) -> usize {
        self.end_b - self.begin_b
    }
}

/// Total number of lines touched by `hunks`, counting both sides.
pub fn changed_lines(hunks: &[Hunk]) -> usize {
    hunks.iter().map(|h| h.len_a() + h.len_b()).sum()
}

/// Half-open pair of ranges still to be diffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Region {
    pub begin_a: usize,
    pub end_a: usize,
    pub begin_b: usize,
    pub end_b: usize,
}

impl Region {
    pub fn len_a(&self) -> usize {
        self.end_a - self.begin_a
    }

    pub fn len_b(&self) -> usize {
        self.end_b - self.begin_b
    }

    /// Drop the lines both sides share at the start and at the end.
    pub fn trim<S: AsRef<str>, C: LineComparator>(&mut self, cmp: &Comparison<'_, S, C>) {
        while self.begin_a < self.end_a
            && self.begin_b < self.end_b
            && cmp.eq(self.begin_a, self.begin_b)
        {
            self.begin_a += 1;
            self.begin_b += 1;
        }
        while self.begin_a < self.end_a
            && self.begin_b < self.end_b
            && cmp.eq(self.end_a - 1, self.end_b - 1)
        {
            self.end_a -= 1;
            self.end_b -= 1;
        }
    }
}

/// One side of a diff with the comparator hash of every line precomputed.
pub(crate) struct Sequence<'a, S> {
    lines: &'a [S],
    hashes: Vec<u64>,
}

impl<'a, S: AsRef<str>> Sequence<'a, S> {
    pub fn new<C: LineComparator>(lines: &'a [S], comparator: &C) -> Self {
        let hashes = lines.iter().map(|l| comparator.hash(l.as_ref())).collect();
        Self { lines, hashes }
    }

    pub fn line(&self, i: usize) -> &str {
        self.lines[i].as_ref()
    }

    pub fn hash(&self, i: usize) -> u64 {
        self.hashes[i]
    }
}

/// Both sides of a diff plus the comparator that decides line equality.
pub(crate) struct Comparison<'a, S, C> {
    pub a: Sequence<'a, S>,
    pub b: Sequence<'a, S>,
    comparator: &'a C,
}

impl<'a, S: AsRef<str>, C: LineComparator> Comparison<'a, S, C> {
    pub fn new(a: &'a [S], b: &'a [S], comparator: &'a C) -> Self {
        Self {
            a: Sequence::new(a, comparator),
            b: Sequence::new(b, comparator),
            comparator,
        }
    }

    /// Whether line `i` of A equals line `j` of B.
    pub fn eq(&self, i: usize, j: usize) -> bool {
        self.a.hash(i) == self.b.hash(j) && self.comparator.equals(self.a.line(i), self.b.line(j))
    }

    /// Whether lines `i` and `k` of A equal each other.
    pub fn eq_a(&self, i: usize, k: usize) -> bool {
        self.a.hash(i) == self.a.hash(k) && self.comparator.equals(self.a.line(i), self.a.line(k))
    }

    /// Whether lines `j` and `k` of B equal each other.
    pub fn eq_b(&self, j: usize, k: usize) -> bool {
        self.b.hash(j) == self.b.hash(k) && self.comparator.equals(self.b.line(j), self.b.line(k))
    }
}

/// Append `hunk`, merging it into the previous one when the two touch.
pub(crate) fn push_hunk(out: &mut Vec<Hunk>, hunk: Hunk) {
    if hunk.len_a() == 0 && hunk.len_b() == 0 {
        return;
    }
    if let Some(last) = out.last_mut() {
        if last.end_a == hunk.begin_a && last.end_b == hunk.begin_b {
            last.end_a = hunk.end_a;
            last.end_b = hunk.end_b;
            return;
        }
    }
    out.push(hunk);
}
