//! Engine that runs an external decompiler executable.
//!
//! Invocation contract:
//!
//! - `<engine> --version` prints the engine version
//! - `<engine> decompile <module> <output dir>` reads the settings document
//!   from stdin
//! - `<engine> disassemble <module> <output dir>`
//!
//! A non-zero exit status is an engine failure.

use sild_core::{DecompilerEngine, DecompilerSettings, Error, ModuleImage, Result, SettingsCodec};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Runs decompilation in a child process
#[derive(Debug, Clone)]
pub(crate) struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    pub(crate) fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn label(&self) -> String {
        self.program.display().to_string()
    }

    fn run(&self, command: &mut Command, stdin: Option<&str>) -> Result<()> {
        debug!("Running {:?}", command);
        command.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = command
            .spawn()
            .map_err(|e| Error::engine(self.label(), format!("failed to start: {}", e)))?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            trace!("Writing {} bytes of settings to engine stdin", input.len());
            // an engine that exits early closes the pipe; its exit status says why
            if let Err(e) = pipe.write_all(input.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(Error::engine(
                        self.label(),
                        format!("failed to send settings: {}", e),
                    ));
                }
                trace!("Engine closed stdin early");
            }
        }

        let status = child
            .wait()
            .map_err(|e| Error::engine(self.label(), format!("failed to wait: {}", e)))?;

        if !status.success() {
            return Err(Error::engine(self.label(), format!("exited with {}", status)));
        }
        Ok(())
    }
}

impl DecompilerEngine for ProcessEngine {
    fn version(&self) -> Option<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!version.is_empty()).then_some(version)
    }

    fn decompile_project(
        &self,
        module: &ModuleImage,
        settings: &DecompilerSettings,
        output_dir: &Path,
    ) -> Result<()> {
        let document = SettingsCodec::new().to_json_string(settings)?;
        let mut command = Command::new(&self.program);
        command.arg("decompile").arg(module.path()).arg(output_dir);
        self.run(&mut command, Some(&document))
    }

    fn disassemble(&self, module: &ModuleImage, output_dir: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.arg("disassemble").arg(module.path()).arg(output_dir);
        self.run(&mut command, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ProcessEngine::new(dir.path().join("no-such-engine"));

        assert_eq!(engine.version(), None);

        let module = ModuleImage::from_bytes("Sample.dll", sample_pe()).unwrap();
        let err = engine.disassemble(&module, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Engine { .. }));
        assert!(err.to_string().contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ProcessEngine::new("false");
        let module = ModuleImage::from_bytes("Sample.dll", sample_pe()).unwrap();

        let err = engine
            .decompile_project(&module, &DecompilerSettings::default(), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    fn sample_pe() -> Vec<u8> {
        let mut data = vec![0u8; 0x80];
        data[..2].copy_from_slice(b"MZ");
        data[0x3C..0x40].copy_from_slice(&0x40u32.to_le_bytes());
        data[0x40..0x44].copy_from_slice(b"PE\0\0");
        data
    }
}
