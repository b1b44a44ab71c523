//! Document to settings.
//!
//! The document is read as two nested levels of objects:
//!
//! ```text
//! document   := { (category-key: category | FORMATTING_KEY: formatting)* }
//! category   := { (toggle-name: bool)* }
//! formatting := { (option-name: scalar)* }
//! ```
//!
//! Keys may appear in any order and may be omitted; omitted fields keep the
//! value of a fresh [`DecompilerSettings`]. Every key that is present must
//! resolve in the registry. The first violation aborts the decode and no
//! partially populated settings value escapes.

use super::scalar::{decode_scalar, describe_token, ScalarError, ScalarKind};
use super::FORMATTING_KEY;
use crate::error::{Error, Result};
use crate::schema::{Category, SchemaRegistry};
use crate::settings::{DecompilerSettings, FormattingOptions};
use serde_json::{Map, Value};
use tracing::{debug, trace};

pub(crate) fn decode_document(
    registry: &SchemaRegistry,
    document: &Value,
) -> Result<DecompilerSettings> {
    let root = expect_object(document, "document")?;
    let mut settings = DecompilerSettings::default();

    for (key, block) in root {
        if key == FORMATTING_KEY {
            decode_formatting(registry, block, &mut settings.formatting)?;
            continue;
        }

        let category = registry
            .category(key)
            .ok_or_else(|| Error::unknown_category(key.as_str()))?;
        decode_category(registry, category, block, &mut settings)?;
    }

    debug!("Decoded settings document with {} blocks", root.len());
    Ok(settings)
}

fn decode_category(
    registry: &SchemaRegistry,
    category: &Category,
    block: &Value,
    settings: &mut DecompilerSettings,
) -> Result<()> {
    let label = category.label();
    let entries = expect_object(block, label)?;
    trace!("Decoding category '{}' ({} entries)", label, entries.len());

    for (name, token) in entries {
        let field = category.field(name).ok_or_else(|| {
            Error::unknown_field(label, name.as_str(), registry.category_of(name))
        })?;

        let Value::Bool(value) = token else {
            return Err(Error::type_mismatch(
                label,
                name.as_str(),
                "a boolean",
                describe_token(token),
            ));
        };
        field.set(settings, *value);
    }

    Ok(())
}

fn decode_formatting(
    registry: &SchemaRegistry,
    block: &Value,
    options: &mut FormattingOptions,
) -> Result<()> {
    let entries = expect_object(block, FORMATTING_KEY)?;
    trace!("Decoding formatting options ({} entries)", entries.len());

    for (name, token) in entries {
        let field = registry
            .formatting_field(name)
            .ok_or_else(|| Error::unknown_field(FORMATTING_KEY, name.as_str(), None))?;

        let value = decode_scalar(field.kind, token).map_err(|e| match e {
            ScalarError::TypeMismatch { found } => {
                Error::type_mismatch(FORMATTING_KEY, name.as_str(), field.kind.to_string(), found)
            }
            ScalarError::UnknownVariant { value } => {
                let variants: &[&str] = match field.kind {
                    ScalarKind::Enum(variants) => variants,
                    _ => &[],
                };
                Error::unknown_variant(FORMATTING_KEY, name.as_str(), value, variants)
            }
        })?;
        field.set(options, value);
    }

    Ok(())
}

fn expect_object<'a>(value: &'a Value, scope: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::structural(
            scope,
            format!("expected an object, found {}", describe_token(value)),
        )
    })
}
