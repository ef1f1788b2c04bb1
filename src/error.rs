use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while classifying a candidate file.
///
/// An ineligible candidate is not an error; classification simply reports no
/// match.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Missing reference text for license '{slug}'")]
    MissingReference { slug: String },

    #[error("Failed to read reference text {}: {source}", path.display())]
    Reference {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read candidate {}: {source}", path.display())]
    Candidate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scoring task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;
