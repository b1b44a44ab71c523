//! Schema registry.
//!
//! The registry is the static description of every settings field: toggle
//! name, category and accessor pair, and formatting-option name, scalar kind
//! and accessor pair. Both directions of the codec walk it; neither holds any
//! field knowledge of its own.
//!
//! ## Construction
//!
//! [`SchemaRegistry::new`] groups toggles by category, orders the groups
//! with [`order_categories`] and checks the table invariants once:
//!
//! - toggle names are unique across all categories
//! - formatting names are unique within the formatting block
//! - every versioned category label carries a version number
//! - no category label equals [`FORMATTING_KEY`]
//!
//! [`SchemaRegistry::builtin`] returns the process-wide registry for
//! [`DecompilerSettings`].

mod order;

use crate::codec::{ScalarKind, ScalarValue, FORMATTING_KEY};
use crate::error::{Error, Result};
use crate::settings::{self, DecompilerSettings, FormattingOptions};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

pub use order::{order_categories, CategoryKey, VERSION_MARKER};

/// A boolean toggle of [`DecompilerSettings`]
#[derive(Clone, Copy)]
pub struct SettingsField {
    /// Document key of the toggle
    pub name: &'static str,
    /// Category label the toggle is grouped under
    pub category: &'static str,
    pub(crate) getter: fn(&DecompilerSettings) -> bool,
    pub(crate) setter: fn(&mut DecompilerSettings, bool),
}

impl SettingsField {
    pub(crate) fn new(
        name: &'static str,
        category: &'static str,
        getter: fn(&DecompilerSettings) -> bool,
        setter: fn(&mut DecompilerSettings, bool),
    ) -> Self {
        Self {
            name,
            category,
            getter,
            setter,
        }
    }

    /// Reads the toggle
    pub fn get(&self, settings: &DecompilerSettings) -> bool {
        (self.getter)(settings)
    }

    /// Writes the toggle
    pub fn set(&self, settings: &mut DecompilerSettings, value: bool) {
        (self.setter)(settings, value)
    }
}

impl fmt::Debug for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsField")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A field of [`FormattingOptions`]
#[derive(Clone, Copy)]
pub struct FormattingField {
    /// Document key of the option
    pub name: &'static str,
    /// Declared kind of the option's value
    pub kind: ScalarKind,
    pub(crate) getter: fn(&FormattingOptions) -> ScalarValue,
    pub(crate) setter: fn(&mut FormattingOptions, ScalarValue),
}

impl FormattingField {
    pub(crate) fn new(
        name: &'static str,
        kind: ScalarKind,
        getter: fn(&FormattingOptions) -> ScalarValue,
        setter: fn(&mut FormattingOptions, ScalarValue),
    ) -> Self {
        Self {
            name,
            kind,
            getter,
            setter,
        }
    }

    /// Reads the option
    pub fn get(&self, options: &FormattingOptions) -> ScalarValue {
        (self.getter)(options)
    }

    /// Writes the option. A value of another kind is ignored.
    pub fn set(&self, options: &mut FormattingOptions, value: ScalarValue) {
        (self.setter)(options, value)
    }
}

impl fmt::Debug for FormattingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattingField")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The toggles sharing one category label
#[derive(Debug, Clone)]
pub struct Category {
    label: &'static str,
    fields: Vec<SettingsField>,
    index: HashMap<&'static str, usize>,
}

impl Category {
    /// Returns the category label
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the toggles in table order
    pub fn fields(&self) -> &[SettingsField] {
        &self.fields
    }

    /// Looks up a toggle of this category by name
    pub fn field(&self, name: &str) -> Option<&SettingsField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }
}

/// Immutable description of every settings field
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    categories: Vec<Category>,
    category_index: HashMap<&'static str, usize>,
    owners: HashMap<&'static str, &'static str>,
    formatting: Vec<FormattingField>,
    formatting_index: HashMap<&'static str, usize>,
}

impl SchemaRegistry {
    /// Builds a registry from toggle and formatting tables.
    ///
    /// Toggles keep their relative order within a category; categories are
    /// ordered with [`order_categories`].
    pub fn new(
        settings_fields: Vec<SettingsField>,
        formatting_fields: Vec<FormattingField>,
    ) -> Result<Self> {
        let mut owners = HashMap::with_capacity(settings_fields.len());
        let mut grouped: HashMap<&'static str, Vec<SettingsField>> = HashMap::new();

        for field in settings_fields {
            if field.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "toggle with empty name in category '{}'",
                    field.category
                )));
            }
            if field.category == FORMATTING_KEY {
                return Err(Error::invalid_schema(format!(
                    "category '{}' collides with the formatting key",
                    field.category
                )));
            }
            if let Some(previous) = owners.insert(field.name, field.category) {
                return Err(Error::invalid_schema(format!(
                    "toggle '{}' declared in both '{}' and '{}'",
                    field.name, previous, field.category
                )));
            }
            grouped.entry(field.category).or_default().push(field);
        }

        let order = order_categories(grouped.keys().copied())?;
        let mut categories = Vec::with_capacity(order.len());
        for label in order {
            let fields = grouped.remove(label).unwrap_or_default();
            let index = fields
                .iter()
                .enumerate()
                .map(|(i, field)| (field.name, i))
                .collect();
            categories.push(Category {
                label,
                fields,
                index,
            });
        }

        let category_index = categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.label, i))
            .collect();

        let mut formatting_index = HashMap::with_capacity(formatting_fields.len());
        for (i, field) in formatting_fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(Error::invalid_schema("formatting option with empty name"));
            }
            if formatting_index.insert(field.name, i).is_some() {
                return Err(Error::invalid_schema(format!(
                    "formatting option '{}' declared twice",
                    field.name
                )));
            }
        }

        debug!(
            "Built settings schema: {} categories, {} toggles, {} formatting options",
            categories.len(),
            owners.len(),
            formatting_fields.len()
        );

        Ok(Self {
            categories,
            category_index,
            owners,
            formatting: formatting_fields,
            formatting_index,
        })
    }

    /// Returns the registry describing [`DecompilerSettings`].
    ///
    /// Built on first use and shared for the life of the process.
    ///
    /// # Panics
    ///
    /// Panics if the built-in tables violate a schema invariant.
    pub fn builtin() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            Self::new(settings::settings_fields(), settings::formatting_fields())
                .unwrap_or_else(|e| panic!("built-in settings schema is invalid: {}", e))
        })
    }

    /// Returns the categories in document order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by label
    pub fn category(&self, label: &str) -> Option<&Category> {
        self.category_index.get(label).map(|&i| &self.categories[i])
    }

    /// Looks up a toggle by category label and name
    pub fn settings_field(&self, category: &str, name: &str) -> Option<&SettingsField> {
        self.category(category)?.field(name)
    }

    /// Returns the category label a toggle is declared under
    pub fn category_of(&self, name: &str) -> Option<&'static str> {
        self.owners.get(name).copied()
    }

    /// Returns the formatting options in table order
    pub fn formatting_fields(&self) -> &[FormattingField] {
        &self.formatting
    }

    /// Looks up a formatting option by name
    pub fn formatting_field(&self, name: &str) -> Option<&FormattingField> {
        self.formatting_index.get(name).map(|&i| &self.formatting[i])
    }

    /// Returns the total number of toggles
    pub fn toggle_count(&self) -> usize {
        self.owners.len()
    }
}
