use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ignore::WalkBuilder;
use log::debug;

use crate::error::{AppError, Result};

/// Find the most recent regular file directly inside `dir` whose name starts
/// with `prefix`.
///
/// Recency is the creation time where the platform records one, otherwise the
/// modification time. Ties are broken by name so the choice is stable.
///
/// # Errors
///
/// [`AppError::Discovery`] if `dir` cannot be read, [`AppError::NoInputFound`]
/// if nothing matches.
pub fn find_latest(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build();

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in walker {
        let entry = entry.map_err(|source| AppError::Discovery {
            dir: dir.to_path_buf(),
            source,
        })?;
        // depth 0 is `dir` itself
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix));
        if !matches {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        let Ok(stamp) = meta.created().or_else(|_| meta.modified()) else {
            continue;
        };

        let candidate = (stamp, entry.into_path());
        if best.as_ref().is_none_or(|current| candidate > *current) {
            best = Some(candidate);
        }
    }

    let (_, path) = best.ok_or_else(|| AppError::NoInputFound {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
    })?;
    debug!("selected input {}", path.display());
    Ok(path)
}
