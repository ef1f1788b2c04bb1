//! `license-matchr`: identify which known open-source license a license file
//! is a copy of.
//!
//! A candidate is diffed line by line against the reference text of every
//! catalog license ([`license::catalog::CATALOG`]), ignoring whitespace. Each
//! diff is reduced to a similarity score and the best-scoring license wins.
//!
//! ```no_run
//! # async fn run() -> license_matchr::error::ClassifyResult<()> {
//! use std::path::Path;
//! use license_matchr::license::Classifier;
//!
//! let classifier = Classifier::new();
//! if let Some(found) = classifier.classify(Path::new("LICENSE")).await? {
//!     println!("{} ({:.2})", found.license.name(), found.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detector;
pub mod diff;
pub mod error;
pub mod license;
pub mod models;
pub mod report;
