//! Module image loading.
//!
//! Only the PE container is checked here: the DOS header, the `e_lfanew`
//! pointer and the NT signature. Parsing metadata and resolving references
//! belong to the decompiler engine.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// DOS header magic
const DOS_MAGIC: &[u8; 2] = b"MZ";

/// Offset of the `e_lfanew` field in the DOS header
const LFANEW_OFFSET: usize = 0x3C;

/// NT headers signature
const PE_SIGNATURE: &[u8; 4] = b"PE\0\0";

/// A PE module read into memory
#[derive(Debug, Clone)]
pub struct ModuleImage {
    path: PathBuf,
    data: Vec<u8>,
    pe_offset: usize,
}

impl ModuleImage {
    /// Reads and validates a module file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
        trace!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(path, data)
    }

    /// Validates an in-memory module image
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();

        if data.len() < LFANEW_OFFSET + 4 || &data[..2] != DOS_MAGIC {
            return Err(Error::invalid_module(path, "missing DOS header"));
        }

        let mut lfanew = [0u8; 4];
        lfanew.copy_from_slice(&data[LFANEW_OFFSET..LFANEW_OFFSET + 4]);
        let pe_offset = u32::from_le_bytes(lfanew) as usize;

        // signature plus the COFF machine field
        let Some(header) = pe_offset
            .checked_add(PE_SIGNATURE.len() + 2)
            .and_then(|end| data.get(pe_offset..end))
        else {
            return Err(Error::invalid_module(
                path,
                format!("NT headers at offset {:#x} are out of bounds", pe_offset),
            ));
        };

        if &header[..4] != PE_SIGNATURE {
            return Err(Error::invalid_module(
                path,
                format!("missing PE signature at offset {:#x}", pe_offset),
            ));
        }

        let image = Self {
            path,
            data,
            pe_offset,
        };
        debug!(
            "Loaded module {} (machine {:#06x})",
            image.path.display(),
            image.machine()
        );
        Ok(image)
    }

    /// Returns the path the module was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name for display
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Returns the raw image
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the COFF machine type, e.g. `0x14c` for x86
    pub fn machine(&self) -> u16 {
        let at = self.pe_offset + PE_SIGNATURE.len();
        u16::from_le_bytes([self.data[at], self.data[at + 1]])
    }
}
