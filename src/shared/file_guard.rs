use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest snapshot accepted from disk (64 MB).
pub const MAX_SNAPSHOT_SIZE: u64 = 64 * 1024 * 1024;

/// Checks that `path` is a regular, non-symlinked file no larger than `max_size`
/// and returns its size in bytes.
pub fn inspect_input_file(path: &Path, description: &str, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "{} is a symbolic link; symbolic links are not accepted as {} input",
            path.display(),
            description
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let size = metadata.len();
    if size > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            size,
            max_size
        );
    }

    Ok(size)
}
