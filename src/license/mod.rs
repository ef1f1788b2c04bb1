//! License identification by whole-text comparison.
//!
//! - [`catalog`]: the known licenses, their families and eligible file names.
//! - [`reference`]: where reference texts come from.
//! - [`score`]: diff-based similarity between a candidate and a reference.
//! - [`classifier`]: scores a candidate against the whole catalog and picks
//!   the best match.

pub mod catalog;
pub mod classifier;
pub mod reference;
pub mod score;

pub use catalog::{License, LicenseFamily, CATALOG};
pub use classifier::Classifier;
