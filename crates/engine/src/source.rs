use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::warn;
use memmap2::Mmap;

use crate::error::{EngineError, Result};

/// Read-only, memory-mapped view of the input shared by every worker.
///
/// The mapping and the advisory shared lock live exactly as long as this
/// value; dropping it unmaps the file and releases the lock.
#[derive(Debug)]
pub struct InputFile {
    path: PathBuf,
    file: File,
    // None for an empty file: zero-length mappings are rejected on some platforms.
    map: Option<Mmap>,
    locked: bool,
}

impl InputFile {
    /// Open and map `path`.
    ///
    /// # Errors
    ///
    /// [`EngineError::FileOpen`] if the file cannot be opened or stat'ed,
    /// [`EngineError::FileMap`] if it cannot be mapped.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| EngineError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let locked = match FileExt::try_lock_shared(&file) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not take shared lock on {}: {e}", path.display());
                false
            }
        };

        let size = file
            .metadata()
            .map_err(|source| EngineError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let map = if size == 0 {
            None
        } else {
            // SAFETY: the map is read-only and owned alongside `file`; the
            // shared lock asks cooperating writers to stay away while it lives.
            let map = unsafe { Mmap::map(&file) }.map_err(|source| EngineError::FileMap {
                path: path.to_path_buf(),
                source,
            })?;
            #[cfg(unix)]
            {
                let _ = map.advise(memmap2::Advice::Sequential);
            }
            Some(map)
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
            map,
            locked,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or_default()
    }

    pub fn size(&self) -> u64 {
        self.bytes().len() as u64
    }
}

impl Drop for InputFile {
    fn drop(&mut self) {
        // Unmap before unlocking.
        self.map.take();
        if self.locked {
            let _ = FileExt::unlock(&self.file);
        }
    }
}
