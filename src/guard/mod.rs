//! Duplicate-image guard: avoids re-analyzing an exit photo that is the same
//! image used at entry, which would invent differences that do not exist.

pub mod duplicate;
pub mod phash;

use serde::{Deserialize, Serialize};

pub use duplicate::{
    check_duplicate, check_duplicate_with_hashes, derive_exit_analysis, DuplicateVerdict,
};
pub use phash::compute_phash;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Maximum perceptual hash distance still treated as the same image.
    pub max_hash_distance: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_hash_distance: 5,
        }
    }
}
