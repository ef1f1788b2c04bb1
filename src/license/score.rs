use crate::diff::{changed_lines, HistogramDiff, LineComparator, WhitespaceInsensitive};

/// Scores how closely a candidate text reproduces a reference text.
///
/// `score = 1 - min(1, changed / reference_lines)` where `changed` counts the
/// lines on both sides touched by the diff. Only the reference length
/// normalizes the score, so a long candidate can still score well against a
/// short reference if it mostly agrees with it line by line.
#[derive(Debug, Clone)]
pub struct SimilarityScorer<C = WhitespaceInsensitive> {
    engine: HistogramDiff<C>,
}

impl SimilarityScorer<WhitespaceInsensitive> {
    pub fn new() -> Self {
        Self::with_engine(HistogramDiff::new())
    }
}

impl Default for SimilarityScorer<WhitespaceInsensitive> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LineComparator> SimilarityScorer<C> {
    pub fn with_engine(engine: HistogramDiff<C>) -> Self {
        Self { engine }
    }

    /// Similarity in `[0.0, 1.0]`; `1.0` means no line differs.
    pub fn score<S: AsRef<str>>(&self, candidate: &[S], reference: &[S]) -> f64 {
        let changed = changed_lines(&self.engine.diff(candidate, reference));

        if reference.is_empty() {
            return if changed == 0 { 1.0 } else { 0.0 };
        }

        1.0 - (changed as f64 / reference.len() as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::catalog::License;
    use crate::license::reference::{to_lines, BundledTexts};

    fn mit() -> Vec<String> {
        to_lines(BundledTexts::text(License::Mit))
    }

    #[test]
    fn test_identical_text_scores_one() {
        let reference = mit();
        assert_eq!(SimilarityScorer::new().score(&reference, &reference), 1.0);
    }

    #[test]
    fn test_reindented_text_scores_one() {
        let reference = mit();
        let candidate: Vec<String> = reference
            .iter()
            .map(|l| format!("    {}  ", l.split_whitespace().collect::<Vec<_>>().join("   ")))
            .collect();
        assert_eq!(SimilarityScorer::new().score(&candidate, &reference), 1.0);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(SimilarityScorer::new().score(&empty, &mit()), 0.0);
    }

    #[test]
    fn test_empty_reference() {
        let empty: Vec<String> = Vec::new();
        let scorer = SimilarityScorer::new();
        assert_eq!(scorer.score(&empty, &empty), 1.0);
        assert_eq!(scorer.score(&mit(), &empty), 0.0);
    }

    #[test]
    fn test_unrelated_long_candidate_is_clamped_to_zero() {
        let candidate: Vec<String> = (0..200).map(|i| format!("unrelated {i}")).collect();
        assert_eq!(SimilarityScorer::new().score(&candidate, &mit()), 0.0);
    }

    #[test]
    fn test_one_replaced_line() {
        let reference = mit();
        let mut candidate = reference.clone();
        candidate[0] = "Some Other License".to_string();

        let expected = 1.0 - 2.0 / reference.len() as f64;
        let score = SimilarityScorer::new().score(&candidate, &reference);
        assert!((score - expected).abs() < 1e-9, "{score} != {expected}");
    }

    #[test]
    fn test_score_never_increases_as_more_lines_change() {
        let reference = to_lines(BundledTexts::text(License::Apache2_0));
        let scorer = SimilarityScorer::new();

        let mut previous = f64::INFINITY;
        for altered in 0..12 {
            let mut candidate = reference.clone();
            for k in 0..altered {
                candidate.insert(100, format!("inserted clause {k}"));
            }
            let score = scorer.score(&candidate, &reference);
            assert!(score <= previous, "{altered} altered lines: {score} > {previous}");
            assert!((0.0..=1.0).contains(&score));
            previous = score;
        }
    }
}
