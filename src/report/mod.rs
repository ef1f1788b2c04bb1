//! Report renderers for classification results.
//!
//! - [`terminal`]: summary box plus a ranked score table; respects `--quiet`.
//! - [`pom`]: Maven POM `<licenses>` fragment for the detected license.
//!
//! JSON output is plain `serde_json` over [`crate::models::Detection`].

pub mod pom;
pub mod terminal;
