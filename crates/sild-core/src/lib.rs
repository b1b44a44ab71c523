//! # sild-core
//!
//! A library for driving a .NET decompiler with settings supplied as JSON.
//!
//! This crate provides the core functionality for:
//! - Describing every decompiler setting in a static schema
//! - Encoding settings as a JSON document grouped by category
//! - Decoding such documents with strict validation
//! - Loading PE modules and handing them to a decompiler engine
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`settings`]: The settings object and its field tables
//! - [`schema`]: Schema registry and category ordering
//! - [`codec`]: Document encoder, decoder and scalar dispatcher
//! - [`module`]: PE module loading
//! - [`engine`]: The decompiler engine seam
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use sild_core::{DecompilerSettings, SettingsCodec};
//!
//! let codec = SettingsCodec::new();
//!
//! // Print the default document
//! println!("{}", codec.to_json_string(&DecompilerSettings::default())?);
//!
//! // Load a user-edited document
//! let settings = codec.load("./settings.json")?;
//! assert!(settings.formatting.indentation_string.len() > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`DecompilerEngine`]: Plug in the back end that writes projects
//! - [`SchemaRegistry::new`]: Validate documents against a custom field table
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod codec;
pub mod engine;
pub mod error;
pub mod module;
pub mod schema;
pub mod settings;

// Re-export primary types for convenience
pub use codec::{
    decode, encode, CodecConfig, ScalarKind, ScalarValue, SettingsCodec, FORMATTING_KEY,
};
pub use engine::{run_decompile, run_disassemble, DecompilerEngine};
pub use error::{Error, Result};
pub use module::ModuleImage;
pub use schema::{order_categories, Category, SchemaRegistry};
pub use settings::{DecompilerSettings, FormattingOptions, OptionEnum};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
