//! Settings document codec.
//!
//! This module converts [`DecompilerSettings`] to and from a JSON document
//! that groups the toggles by category:
//!
//! ```json
//! {
//!   "C# 1.0 / VS .NET": { "DecimalConstants": true, ... },
//!   ...
//!   "Other": { "ShowXmlDocumentation": true, ... },
//!   "CSharpFormattingOptions": { "IndentationString": "\t", ... }
//! }
//! ```
//!
//! ## Architecture
//!
//! [`SettingsCodec`] pairs a [`SchemaRegistry`] with a [`CodecConfig`]:
//!
//! 1. `encode` walks the registry and emits every field, categories in
//!    registry order and the formatting block last
//! 2. `decode` validates each key against the registry and fails on the
//!    first unknown or mistyped entry
//! 3. Formatting values go through the scalar dispatcher in [`scalar`]
//!
//! Encoding is deterministic; decoding accepts keys in any order.

mod decoder;
mod encoder;
pub mod scalar;

use crate::error::{Error, Result};
use crate::schema::SchemaRegistry;
use crate::settings::DecompilerSettings;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub use scalar::{decode_scalar, encode_scalar, ScalarError, ScalarKind, ScalarValue};

/// Document key of the formatting options block
pub const FORMATTING_KEY: &str = "CSharpFormattingOptions";

/// Configuration for document output
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Indentation string (default: 2 spaces)
    pub indent: String,
    /// Emit one entry per line
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            pretty: true,
        }
    }
}

impl CodecConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation string
    pub fn indent(mut self, s: impl Into<String>) -> Self {
        self.indent = s.into();
        self
    }

    /// Sets whether to emit one entry per line
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Encodes and decodes settings documents
#[derive(Debug, Clone)]
pub struct SettingsCodec<'r> {
    registry: &'r SchemaRegistry,
    config: CodecConfig,
}

impl Default for SettingsCodec<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsCodec<'static> {
    /// Creates a codec over the built-in registry
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::builtin())
    }
}

impl<'r> SettingsCodec<'r> {
    /// Creates a codec over a custom registry
    pub fn with_registry(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    /// Sets the output configuration
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the registry this codec validates against
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Encodes settings as a fully populated document
    pub fn encode(&self, settings: &DecompilerSettings) -> Value {
        encoder::encode_document(self.registry, settings)
    }

    /// Decodes a document into a fresh settings value
    pub fn decode(&self, document: &Value) -> Result<DecompilerSettings> {
        decoder::decode_document(self.registry, document)
    }

    /// Encodes settings as JSON text
    pub fn to_json_string(&self, settings: &DecompilerSettings) -> Result<String> {
        let document = self.encode(settings);
        let mut buf = Vec::new();

        if self.config.pretty {
            let formatter = PrettyFormatter::with_indent(self.config.indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            document.serialize(&mut ser)?;
        } else {
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, CompactFormatter);
            document.serialize(&mut ser)?;
        }

        String::from_utf8(buf).map_err(|e| Error::internal(format!("non UTF-8 JSON output: {}", e)))
    }

    /// Decodes settings from JSON text
    pub fn from_json_str(&self, text: &str) -> Result<DecompilerSettings> {
        let document: Value = serde_json::from_str(text)?;
        self.decode(&document)
    }

    /// Reads and decodes a settings file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DecompilerSettings> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        self.from_json_str(&text)
    }

    /// Encodes settings and writes them to a file
    pub fn save(&self, path: impl AsRef<Path>, settings: &DecompilerSettings) -> Result<()> {
        let path = path.as_ref();
        let mut text = self.to_json_string(settings)?;
        text.push('\n');
        std::fs::write(path, text).map_err(|e| Error::file_write(path, e))?;
        debug!("Wrote settings to {}", path.display());
        Ok(())
    }
}

/// Encodes settings with the built-in registry
pub fn encode(settings: &DecompilerSettings) -> Value {
    SettingsCodec::new().encode(settings)
}

/// Decodes a document with the built-in registry
pub fn decode(document: &Value) -> Result<DecompilerSettings> {
    SettingsCodec::new().decode(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FormattingField, SettingsField};
    use crate::settings::{
        self, BraceStyle, FormattingOptions, NewLinePlacement, UsingPlacement,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map};

    fn basic_registry() -> SchemaRegistry {
        let toggle = settings::settings_fields()
            .into_iter()
            .find(|f| f.name == "ShowXmlDocumentation")
            .unwrap();
        let indentation = settings::formatting_fields()
            .into_iter()
            .find(|f| f.name == "IndentationString")
            .unwrap();
        SchemaRegistry::new(
            vec![SettingsField {
                category: "Basic",
                ..toggle
            }],
            vec![indentation],
        )
        .unwrap()
    }

    fn customized() -> DecompilerSettings {
        let mut settings = DecompilerSettings::default();
        settings.pattern_matching = false;
        settings.remove_dead_code = true;
        settings.use_nested_directories_for_namespaces = true;
        settings.formatting = FormattingOptions {
            indentation_string: "    ".to_string(),
            class_brace_style: BraceStyle::EndOfLine,
            else_new_line_placement: NewLinePlacement::SameLine,
            using_placement: UsingPlacement::InsideNamespace,
            blank_lines_between_members: 2,
            space_before_method_call_parentheses: true,
            ..FormattingOptions::default()
        };
        settings
    }

    /// Reverses key order at both levels
    fn reversed(document: &Value) -> Value {
        let root = document.as_object().unwrap();
        let flipped: Map<String, Value> = root
            .iter()
            .rev()
            .map(|(key, block)| {
                let inner: Map<String, Value> = block
                    .as_object()
                    .unwrap()
                    .iter()
                    .rev()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                (key.clone(), Value::Object(inner))
            })
            .collect();
        Value::Object(flipped)
    }

    #[test]
    fn test_basic_registry_encodes_defaults() {
        let registry = basic_registry();
        let codec = SettingsCodec::with_registry(&registry);

        assert_eq!(
            codec.encode(&DecompilerSettings::default()),
            json!({
                "Basic": { "ShowXmlDocumentation": true },
                "CSharpFormattingOptions": { "IndentationString": "\t" }
            })
        );
    }

    #[test]
    fn test_basic_registry_decodes_overrides() {
        let registry = basic_registry();
        let codec = SettingsCodec::with_registry(&registry);

        let settings = codec
            .decode(&json!({
                "Basic": { "ShowXmlDocumentation": false },
                "CSharpFormattingOptions": { "IndentationString": "    " }
            }))
            .unwrap();
        assert!(!settings.show_xml_documentation);
        assert_eq!(settings.formatting.indentation_string, "    ");
    }

    #[test]
    fn test_round_trip() {
        for settings in [DecompilerSettings::default(), customized()] {
            let document = encode(&settings);
            assert_eq!(decode(&document).unwrap(), settings);
        }
    }

    #[test]
    fn test_round_trip_through_text() {
        let codec = SettingsCodec::new().with_config(CodecConfig::new().indent("\t"));
        let text = codec.to_json_string(&customized()).unwrap();
        assert!(text.contains("\n\t\"C# 1.0 / VS .NET\": {"));
        assert_eq!(codec.from_json_str(&text).unwrap(), customized());
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let codec = SettingsCodec::new().with_config(CodecConfig::new().pretty(false));
        let text = codec.to_json_string(&DecompilerSettings::default()).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_every_field_is_written() {
        let registry = SchemaRegistry::builtin();
        let document = encode(&DecompilerSettings::default());
        let root = document.as_object().unwrap();

        assert_eq!(root.len(), registry.categories().len() + 1);
        for category in registry.categories() {
            let block = root[category.label()].as_object().unwrap();
            assert_eq!(block.len(), category.fields().len());
            assert!(block.values().all(Value::is_boolean));
        }
        let formatting = root[FORMATTING_KEY].as_object().unwrap();
        assert_eq!(formatting.len(), registry.formatting_fields().len());

        assert_eq!(root["Other"]["RemoveDeadCode"], json!(false));
        assert_eq!(formatting["ClassBraceStyle"], json!("NextLine"));
        assert_eq!(formatting["BlankLinesAfterUsings"], json!(1));
    }

    #[test]
    fn test_blocks_are_emitted_in_category_order() {
        let document = encode(&DecompilerSettings::default());
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();

        let mut expected: Vec<String> = SchemaRegistry::builtin()
            .categories()
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        expected.push(FORMATTING_KEY.to_string());
        assert_eq!(keys, expected);

        let position = |label: &str| keys.iter().position(|k| k == label).unwrap();
        assert!(position("C# 7.3 / VS 2017.7") < position("C# 8.0 / VS 2019"));
        assert!(position("C# 9.0 / VS 2019.8") < position("C# 10.0 / VS 2022"));
        assert!(position("C# 12.0 / VS 2022.8") < position("Other"));
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let document = encode(&customized());
        assert_eq!(decode(&reversed(&document)).unwrap(), customized());
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let settings = decode(&json!({
            "Other": { "RemoveDeadCode": true }
        }))
        .unwrap();

        let mut expected = DecompilerSettings::default();
        expected.remove_dead_code = true;
        assert_eq!(settings, expected);
        assert_eq!(decode(&json!({})).unwrap(), DecompilerSettings::default());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut document = encode(&DecompilerSettings::default());
        document["Extras"] = json!({});

        let err = decode(&document).unwrap_err();
        assert!(
            matches!(&err, Error::UnknownCategory { category } if category == "Extras"),
            "{err}"
        );
    }

    #[test]
    fn test_unknown_field_is_rejected_with_hint() {
        let err = decode(&json!({ "Other": { "PatternMatching": true } })).unwrap_err();
        match err {
            Error::UnknownField { scope, field, hint } => {
                assert_eq!(scope, "Other");
                assert_eq!(field, "PatternMatching");
                assert_eq!(hint.as_deref(), Some("C# 7.0 / VS 2017"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = decode(&json!({ FORMATTING_KEY: { "TabWidth": 4 } })).unwrap_err();
        assert!(matches!(err, Error::UnknownField { hint: None, .. }), "{err}");
    }

    #[test]
    fn test_numeric_toggle_is_a_type_mismatch() {
        let err = decode(&json!({ "Other": { "RemoveDeadCode": 1 } })).unwrap_err();
        match err {
            Error::TypeMismatch {
                scope,
                field,
                found,
                ..
            } => {
                assert_eq!(scope, "Other");
                assert_eq!(field, "RemoveDeadCode");
                assert_eq!(found, "number 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_formatting_type_mismatch() {
        for block in [
            json!({ "BlankLinesBetweenMembers": "2" }),
            json!({ "BlankLinesBetweenMembers": 4_294_967_296_i64 }),
            json!({ "IndentationString": false }),
            json!({ "IndentBlocks": "yes" }),
            json!({ "UsingPlacement": 1 }),
        ] {
            let err = decode(&json!({ FORMATTING_KEY: block })).unwrap_err();
            assert!(matches!(err, Error::TypeMismatch { .. }), "{err}");
        }
    }

    #[test]
    fn test_unknown_enum_text_is_rejected() {
        let err = decode(&json!({ FORMATTING_KEY: { "ClassBraceStyle": "K&R" } })).unwrap_err();
        match err {
            Error::UnknownVariant {
                field,
                value,
                expected,
                ..
            } => {
                assert_eq!(field, "ClassBraceStyle");
                assert_eq!(value, "K&R");
                assert!(expected.starts_with("EndOfLine, "));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_structural_errors() {
        for document in [
            json!([]),
            json!("settings"),
            json!({ "Other": [] }),
            json!({ "Other": true }),
            json!({ FORMATTING_KEY: null }),
        ] {
            let err = decode(&document).unwrap_err();
            assert!(matches!(err, Error::Structural { .. }), "{document}: {err}");
        }
    }

    #[test]
    fn test_malformed_json_text() {
        let err = SettingsCodec::new().from_json_str("{ \"Other\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_custom_registry_rejects_builtin_categories() {
        let registry = basic_registry();
        let codec = SettingsCodec::with_registry(&registry);
        let err = codec.decode(&json!({ "Other": {} })).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let codec = SettingsCodec::new();
        codec.save(&path, &customized()).unwrap();
        assert_eq!(codec.load(&path).unwrap(), customized());

        let err = codec.load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_formatting_field_kinds_in_registry() {
        let registry = SchemaRegistry::builtin();
        let kinds: Vec<_> = registry
            .formatting_fields()
            .iter()
            .map(|f: &FormattingField| f.kind)
            .collect();
        assert!(kinds.contains(&ScalarKind::Text));
        assert!(kinds.contains(&ScalarKind::Int32));
        assert!(kinds.iter().any(|k| matches!(k, ScalarKind::Enum(_))));
    }
}
