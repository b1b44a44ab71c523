//! Decompiler engine seam.
//!
//! The engine that turns a module into a project is an external
//! collaborator. It receives the decoded [`DecompilerSettings`] as an opaque
//! configuration value; nothing in this crate interprets individual toggles.
//!
//! ```no_run
//! use sild_core::{DecompilerEngine, DecompilerSettings, ModuleImage, Result};
//! use std::path::Path;
//!
//! struct EchoEngine;
//!
//! impl DecompilerEngine for EchoEngine {
//!     fn decompile_project(
//!         &self,
//!         module: &ModuleImage,
//!         _settings: &DecompilerSettings,
//!         output_dir: &Path,
//!     ) -> Result<()> {
//!         println!("{} -> {}", module.name(), output_dir.display());
//!         Ok(())
//!     }
//!
//!     fn disassemble(&self, module: &ModuleImage, output_dir: &Path) -> Result<()> {
//!         println!("{} -> {}", module.name(), output_dir.display());
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::module::ModuleImage;
use crate::settings::DecompilerSettings;
use std::path::Path;
use tracing::{debug, info};

/// Trait for implementing decompiler back ends
pub trait DecompilerEngine {
    /// Engine version for display, if known
    fn version(&self) -> Option<String> {
        None
    }

    /// Decompile a module into a project under `output_dir`
    fn decompile_project(
        &self,
        module: &ModuleImage,
        settings: &DecompilerSettings,
        output_dir: &Path,
    ) -> Result<()>;

    /// Disassemble a module into IL listings under `output_dir`
    fn disassemble(&self, module: &ModuleImage, output_dir: &Path) -> Result<()>;
}

/// Creates the output directory and its parents if missing
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    debug!("Creating output directory {}", path.display());
    std::fs::create_dir_all(path).map_err(|e| Error::directory_create(path, e))
}

/// Decompiles a module with the given settings
pub fn run_decompile<E: DecompilerEngine + ?Sized>(
    engine: &E,
    module: &ModuleImage,
    settings: &DecompilerSettings,
    output_dir: &Path,
) -> Result<()> {
    ensure_output_dir(output_dir)?;
    info!("Decompiling {} into {}", module.name(), output_dir.display());
    engine.decompile_project(module, settings, output_dir)
}

/// Disassembles a module
pub fn run_disassemble<E: DecompilerEngine + ?Sized>(
    engine: &E,
    module: &ModuleImage,
    output_dir: &Path,
) -> Result<()> {
    ensure_output_dir(output_dir)?;
    info!("Disassembling {} into {}", module.name(), output_dir.display());
    engine.disassemble(module, output_dir)
}
