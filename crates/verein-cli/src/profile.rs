//! Loading the collection profile.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use verein_model::Profile;

/// Read and parse a profile JSON file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read profile: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse profile: {}", path.display()))
}
