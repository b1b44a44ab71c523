//! Settings to document.

use super::scalar::encode_scalar;
use super::FORMATTING_KEY;
use crate::schema::SchemaRegistry;
use crate::settings::DecompilerSettings;
use serde_json::{Map, Value};
use tracing::trace;

/// Writes every category block in registry order, then the formatting block.
pub(crate) fn encode_document(registry: &SchemaRegistry, settings: &DecompilerSettings) -> Value {
    let mut root = Map::with_capacity(registry.categories().len() + 1);

    for category in registry.categories() {
        let block: Map<String, Value> = category
            .fields()
            .iter()
            .map(|field| (field.name.to_string(), Value::Bool(field.get(settings))))
            .collect();

        trace!("Encoded category '{}' ({} fields)", category.label(), block.len());
        root.insert(category.label().to_string(), Value::Object(block));
    }

    let formatting: Map<String, Value> = registry
        .formatting_fields()
        .iter()
        .map(|field| {
            let value = field.get(&settings.formatting);
            (field.name.to_string(), encode_scalar(&value))
        })
        .collect();
    root.insert(FORMATTING_KEY.to_string(), Value::Object(formatting));

    Value::Object(root)
}
