//! sild - Decompile .NET assemblies with settings supplied as JSON
//!
//! This tool loads a settings document, validates it against the decompiler
//! settings schema and hands the module to a decompiler engine, which writes
//! a project (or IL listings) to the output directory.

mod engine;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use engine::ProcessEngine;
use sild_core::{
    run_decompile, run_disassemble, CodecConfig, DecompilerEngine, DecompilerSettings,
    ModuleImage, SettingsCodec,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Decompile an assembly to a csproj project using ILSpy with custom settings supplied in JSON
#[derive(Parser, Debug)]
#[command(name = "sild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decompiler engine executable
    #[arg(long, global = true, env = "SILD_ENGINE", default_value = "ilspy-engine")]
    engine: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a JSON document containing all the default settings
    #[command(visible_alias = "g")]
    GenerateSettings {
        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(long, default_value = "2")]
        indent: usize,

        /// Write the document on a single line
        #[arg(long, conflicts_with = "indent")]
        compact: bool,
    },

    /// Decompile an assembly with a JSON settings file
    #[command(visible_alias = "d")]
    Decompile {
        /// The assembly file to decompile to a csproj project
        assembly: PathBuf,

        /// The directory to output the csproj and project files. It will be created if it doesn't exist
        #[arg(value_name = "OUTPUT_DIRECTORY")]
        output_directory: PathBuf,

        /// The JSON settings file. Any setting not specified will be their default value
        settings: PathBuf,
    },

    /// Disassemble an assembly
    #[command(visible_alias = "dis")]
    Disassemble {
        /// The assembly file to disassemble
        assembly: PathBuf,

        /// The directory to output the IL files. It will be created if it doesn't exist
        #[arg(value_name = "OUTPUT_DIRECTORY")]
        output_directory: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let engine = ProcessEngine::new(&cli.engine);

    match &cli.command {
        Command::GenerateSettings {
            output,
            indent,
            compact,
        } => generate_settings(output.as_deref(), *indent, *compact),
        Command::Decompile {
            assembly,
            output_directory,
            settings,
        } => decompile(&engine, assembly, settings, output_directory),
        Command::Disassemble {
            assembly,
            output_directory,
        } => disassemble(&engine, assembly, output_directory),
    }
}

/// Print or write the default settings document
fn generate_settings(output: Option<&Path>, indent: usize, compact: bool) -> Result<()> {
    let config = CodecConfig::new().indent(" ".repeat(indent)).pretty(!compact);
    let codec = SettingsCodec::new().with_config(config);
    let settings = DecompilerSettings::default();

    match output {
        Some(path) => {
            codec
                .save(path, &settings)
                .with_context(|| format!("Failed to write settings: {}", path.display()))?;
            info!("Wrote default settings to {}", path.display());
        }
        None => {
            let document = codec
                .to_json_string(&settings)
                .context("Failed to encode default settings")?;
            println!("{}", document);
        }
    }

    Ok(())
}

/// Decompile a module to a project
fn decompile(
    engine: &dyn DecompilerEngine,
    assembly: &Path,
    settings_file: &Path,
    output_directory: &Path,
) -> Result<()> {
    report_engine_version(engine);
    let module = open_module(assembly)?;

    let settings = SettingsCodec::new()
        .load(settings_file)
        .with_context(|| format!("Invalid settings file: {}", settings_file.display()))?;
    debug!("Loaded settings from {}", settings_file.display());

    println!("Decompiling {}...", module.name());
    run_decompile(engine, &module, &settings, output_directory)
        .with_context(|| format!("Failed to decompile {}", assembly.display()))?;

    print_summary(output_directory);
    Ok(())
}

/// Disassemble a module to IL listings
fn disassemble(engine: &dyn DecompilerEngine, assembly: &Path, output_directory: &Path) -> Result<()> {
    report_engine_version(engine);
    let module = open_module(assembly)?;

    println!("Disassembling {}...", module.name());
    run_disassemble(engine, &module, output_directory)
        .with_context(|| format!("Failed to disassemble {}", assembly.display()))?;

    print_summary(output_directory);
    Ok(())
}

fn open_module(assembly: &Path) -> Result<ModuleImage> {
    if !assembly.exists() {
        bail!("Input file does not exist: {}", assembly.display());
    }
    if !assembly.is_file() {
        bail!("Input path is not a file: {}", assembly.display());
    }

    ModuleImage::open(assembly)
        .with_context(|| format!("Failed to load assembly: {}", assembly.display()))
}

fn report_engine_version(engine: &dyn DecompilerEngine) {
    match engine.version() {
        Some(version) => println!("Using engine version {}", version),
        None => debug!("Engine did not report a version"),
    }
}

fn print_summary(output_directory: &Path) {
    let written = count_files(output_directory);
    info!("Summary: {} files in {}", written, output_directory.display());
    println!("Done!");
}

/// Count regular files below a directory
fn count_files(directory: &Path) -> usize {
    WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .inspect(|e| trace!("Output file: {}", e.path().display()))
        .count()
}
