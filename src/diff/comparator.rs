use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Line equality used by the diff engine.
///
/// Implementations must keep `hash` consistent with `equals`: two lines that
/// compare equal must hash to the same value.
pub trait LineComparator: Send + Sync {
    fn equals(&self, a: &str, b: &str) -> bool;

    fn hash(&self, line: &str) -> u64;
}

/// Compares lines ignoring leading and trailing whitespace and treating any
/// run of internal whitespace as a single separator.
///
/// Comparison is otherwise exact and case-sensitive: `"a  b"` equals
/// `" a b "`, but `"a b"` does not equal `"ab"` or `"A b"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceInsensitive;

impl LineComparator for WhitespaceInsensitive {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.split_whitespace().eq(b.split_whitespace())
    }

    fn hash(&self, line: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        for word in line.split_whitespace() {
            word.hash(&mut hasher);
        }
        hasher.finish()
    }
}
