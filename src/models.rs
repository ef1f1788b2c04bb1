use std::path::PathBuf;

use serde::Serialize;

use crate::license::catalog::License;

/// Similarity of a candidate against one catalog license.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub license: License,
    pub score: f64,
}

/// Outcome of classifying one candidate text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Best-scoring license; ties go to the earliest catalog entry.
    pub license: License,
    pub score: f64,
    /// Every catalog license's score, in catalog order.
    pub scores: Vec<ScoreResult>,
}

impl Classification {
    /// Scores from best to worst. Equal scores keep catalog order.
    pub fn ranking(&self) -> Vec<ScoreResult> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// A classified license file, as rendered by the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub path: PathBuf,
    pub license: License,
    pub score: f64,
    pub ranking: Vec<ScoreResult>,
}

impl Detection {
    pub fn new(path: PathBuf, classification: &Classification, top: usize) -> Self {
        Self {
            path,
            license: classification.license,
            score: classification.score,
            ranking: classification.ranking().into_iter().take(top).collect(),
        }
    }
}
