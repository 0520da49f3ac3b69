use std::path::Path;

use anyhow::{Context, Result};

/// Replaces the file at `path` with `contents`, byte for byte. The previous
/// content is lost.
pub fn overwrite_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Couldn't write {}", path.to_string_lossy()))?;

    Ok(())
}
