use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use crate::detector::find_license_files;
use crate::error::{ClassifyError, ClassifyResult};
use crate::license::catalog::{is_eligible, CATALOG};
use crate::license::reference::{to_lines, BundledTexts, ReferenceSource};
use crate::license::score::SimilarityScorer;
use crate::models::{Classification, ScoreResult};

/// Identifies which catalog license a candidate text is a copy of.
///
/// Every catalog entry is scored on tokio's blocking pool, at most `jobs`
/// at a time. Scores are gathered in catalog order before the best one is
/// picked, so the result does not depend on task completion order.
pub struct Classifier {
    source: Arc<dyn ReferenceSource>,
    scorer: Arc<SimilarityScorer>,
    jobs: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier over the bundled reference texts.
    pub fn new() -> Self {
        Self::with_source(BundledTexts)
    }

    pub fn with_source(source: impl ReferenceSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn ReferenceSource>) -> Self {
        Self {
            source,
            scorer: Arc::new(SimilarityScorer::new()),
            jobs: default_jobs(),
        }
    }

    /// Limit concurrent scoring tasks. `0` selects the available parallelism.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs == 0 { default_jobs() } else { jobs };
        self
    }

    pub fn job_count(&self) -> usize {
        self.jobs
    }

    /// Classify the file at `path`.
    ///
    /// Returns `Ok(None)` without reading anything when the file name is not a
    /// recognized license file name or the path is not a regular file.
    pub async fn classify(&self, path: &Path) -> ClassifyResult<Option<Classification>> {
        if !is_eligible(path) {
            debug!(path = %path.display(), "not a license file, skipping");
            return Ok(None);
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClassifyError::Candidate {
                path: path.to_path_buf(),
                source,
            })?;

        let classification = self.classify_text(&String::from_utf8_lossy(&bytes)).await?;
        if let Some(c) = &classification {
            info!(
                path = %path.display(),
                license = c.license.slug(),
                score = c.score,
                "classified license file"
            );
        }
        Ok(classification)
    }

    /// Classify in-memory text. No file name check applies.
    pub async fn classify_text(&self, text: &str) -> ClassifyResult<Option<Classification>> {
        let scores = self.score_all(Arc::new(to_lines(text))).await?;
        Ok(best_match(&scores).map(|best| Classification {
            license: best.license,
            score: best.score,
            scores,
        }))
    }

    /// Score `candidate` against every catalog license, in catalog order.
    ///
    /// The first reference that fails to load aborts the whole call.
    pub async fn score_all(&self, candidate: Arc<Vec<String>>) -> ClassifyResult<Vec<ScoreResult>> {
        let mut scores = Vec::with_capacity(CATALOG.len());

        for batch in CATALOG.chunks(self.jobs) {
            let tasks: Vec<_> = batch
                .iter()
                .map(|&license| {
                    let source = Arc::clone(&self.source);
                    let scorer = Arc::clone(&self.scorer);
                    let candidate = Arc::clone(&candidate);
                    tokio::task::spawn_blocking(move || -> ClassifyResult<ScoreResult> {
                        let reference = source.load(license)?;
                        let score = scorer.score(candidate.as_slice(), reference.as_slice());
                        debug!(license = license.slug(), score, "scored");
                        Ok(ScoreResult { license, score })
                    })
                })
                .collect();

            for result in join_all(tasks).await {
                scores.push(result??);
            }
        }

        Ok(scores)
    }

    /// Detect the license of the project rooted at `dir`.
    ///
    /// Recognized license files directly inside `dir` are tried in file name
    /// order; the first one that classifies is returned with its path.
    pub async fn classify_dir(
        &self,
        dir: &Path,
    ) -> ClassifyResult<Option<(PathBuf, Classification)>> {
        let files = find_license_files(dir).map_err(|source| ClassifyError::Candidate {
            path: dir.to_path_buf(),
            source,
        })?;

        for path in files {
            if let Some(classification) = self.classify(&path).await? {
                return Ok(Some((path, classification)));
            }
        }

        debug!(dir = %dir.display(), "no license file found");
        Ok(None)
    }
}

/// Highest score wins; on equal scores the earliest entry is kept.
pub fn best_match(scores: &[ScoreResult]) -> Option<ScoreResult> {
    let (first, rest) = scores.split_first()?;
    Some(rest.iter().fold(*first, |best, s| if s.score > best.score { *s } else { best }))
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::catalog::License;
    use crate::license::reference::DirectoryTexts;

    const CUSTOM_MIT: &str = "MIT License

Copyright (c) 2024 Jane Doe

Permission is hereby granted, without charge, to anyone obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

    fn scored(license: License, score: f64) -> ScoreResult {
        ScoreResult { license, score }
    }

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[tokio::test]
    async fn test_every_reference_classifies_as_itself() {
        let classifier = Classifier::new();
        for license in CATALOG {
            let result = classifier
                .classify_text(BundledTexts::text(license))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(result.license, license, "{} misclassified", license.slug());
            assert_eq!(result.score, 1.0);
        }
    }

    #[tokio::test]
    async fn test_unmodified_apache_license_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "LICENSE", BundledTexts::text(License::Apache2_0));

        let result = Classifier::new().classify(&path).await.unwrap().unwrap();
        assert_eq!(result.license, License::Apache2_0);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.license.url(), "https://opensource.org/licenses/apache-2.0");
    }

    #[tokio::test]
    async fn test_customized_mit_still_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "LICENSE.md", CUSTOM_MIT);

        let result = Classifier::new().classify(&path).await.unwrap().unwrap();
        assert_eq!(result.license, License::Mit);
        assert!(result.score < 1.0 && result.score > 0.5, "score {}", result.score);
        for other in result.scores.iter().filter(|s| s.license != License::Mit) {
            assert!(other.score < result.score, "{} scored {}", other.license.slug(), other.score);
        }
    }

    #[tokio::test]
    async fn test_whitespace_edits_do_not_change_the_result() {
        let reindented: String = BundledTexts::text(License::Apache2_0)
            .lines()
            .map(|l| format!("\t  {}   \r\n", l.split_whitespace().collect::<Vec<_>>().join("  ")))
            .collect::<String>()
            + "\n\n\n";

        let result = Classifier::new().classify_text(&reindented).await.unwrap().unwrap();
        assert_eq!(result.license, License::Apache2_0);
        assert!(result.score > 0.98, "score {}", result.score);
    }

    #[tokio::test]
    async fn test_unrecognized_names_are_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let readme = write(dir.path(), "README.md", BundledTexts::text(License::Mit));
        let json = write(dir.path(), "license.json", BundledTexts::text(License::Mit));
        let classifier = Classifier::new();

        assert!(classifier.classify(&readme).await.unwrap().is_none());
        assert!(classifier.classify(&json).await.unwrap().is_none());
        assert!(classifier.classify(&dir.path().join("LICENSE")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_candidate_falls_back_to_first_catalog_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "LICENSE.txt", "");

        let result = Classifier::new().classify(&path).await.unwrap().unwrap();
        assert!(result.scores.iter().all(|s| s.score == 0.0));
        assert_eq!(result.license, CATALOG[0]);
        assert_eq!(result.score, 0.0);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_unreadable_candidate_is_an_error() {
        // A regular file whose reads fail with EIO, whatever the user.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LICENSE");
        std::os::unix::fs::symlink("/proc/self/mem", &path).unwrap();

        match Classifier::new().classify(&path).await {
            Err(ClassifyError::Candidate { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Candidate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = BundledTexts::text(License::Mit).as_bytes().to_vec();
        bytes.extend_from_slice(b"Signed: \xff\xfe\xc3\n");
        let path = dir.path().join("LICENSE");
        std::fs::write(&path, &bytes).unwrap();

        let result = Classifier::new().classify(&path).await.unwrap().unwrap();
        let reference_lines = to_lines(BundledTexts::text(License::Mit)).len() as f64;
        assert_eq!(result.license, License::Mit);
        assert_eq!(result.score, 1.0 - 1.0 / reference_lines);
    }

    #[tokio::test]
    async fn test_long_repetitive_candidate_is_classified_quickly() {
        let candidate = "x\n\n".repeat(30_000);

        let started = std::time::Instant::now();
        let result = Classifier::new().classify_text(&candidate).await.unwrap().unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(30));
        assert!(result.scores.iter().all(|s| s.score == 0.0));
        assert_eq!(result.license, CATALOG[0]);
    }

    #[tokio::test]
    async fn test_sequential_and_parallel_runs_agree() {
        let sequential = Classifier::new().jobs(1);
        let parallel = Classifier::new().jobs(16);

        let a = sequential.classify_text(CUSTOM_MIT).await.unwrap().unwrap();
        let b = parallel.classify_text(CUSTOM_MIT).await.unwrap().unwrap();
        let again = parallel.classify_text(CUSTOM_MIT).await.unwrap().unwrap();

        assert_eq!(a, b);
        assert_eq!(b, again);
        let order: Vec<License> = a.scores.iter().map(|s| s.license).collect();
        assert_eq!(order, CATALOG.to_vec());
    }

    #[tokio::test]
    async fn test_missing_reference_aborts_classification() {
        let refs = tempfile::tempdir().unwrap();
        std::fs::write(refs.path().join("mit.txt"), BundledTexts::text(License::Mit)).unwrap();

        let classifier = Classifier::with_source(DirectoryTexts::new(refs.path())).jobs(4);
        match classifier.classify_text(CUSTOM_MIT).await {
            Err(ClassifyError::MissingReference { slug }) => assert_eq!(slug, "afl-3.0"),
            other => panic!("expected MissingReference, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_classify_dir_picks_first_license_file_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "# project");
        write(dir.path(), "LICENSE.txt", BundledTexts::text(License::Isc));
        write(dir.path(), "LICENSE", BundledTexts::text(License::Zlib));

        let (path, result) = Classifier::new().classify_dir(dir.path()).await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "LICENSE");
        assert_eq!(result.license, License::Zlib);
    }

    #[tokio::test]
    async fn test_classify_dir_without_license_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Cargo.toml", "[package]");
        assert!(Classifier::new().classify_dir(dir.path()).await.unwrap().is_none());
    }

    #[test]
    fn test_best_match_prefers_earliest_on_ties() {
        let scores = [
            scored(License::Bsd2Clause, 0.4),
            scored(License::Mit, 0.7),
            scored(License::Isc, 0.7),
        ];
        assert_eq!(best_match(&scores).unwrap().license, License::Mit);
        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn test_zero_jobs_uses_available_parallelism() {
        assert!(Classifier::new().jobs(0).job_count() >= 1);
        assert_eq!(Classifier::new().jobs(3).job_count(), 3);
    }
}
