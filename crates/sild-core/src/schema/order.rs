//! Category ordering.
//!
//! Categories whose label starts with [`VERSION_MARKER`] come first, ordered
//! by the decimal language version that follows the marker. Every other
//! label follows in lexicographic order, the ungrouped `""` label included.

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Label prefix of language-version categories
pub const VERSION_MARKER: &str = "C#";

/// Sort key of a category label
#[derive(Debug, Clone, Copy)]
pub struct CategoryKey<'a> {
    label: &'a str,
    version: Option<f64>,
}

impl<'a> CategoryKey<'a> {
    /// Parses the sort key of a label.
    ///
    /// A label under the version marker must carry a finite version number
    /// as its first token, e.g. `7.3` in `"C# 7.3 / VS 2017.7"`.
    pub fn parse(label: &'a str) -> Result<Self> {
        let Some(rest) = label.strip_prefix(VERSION_MARKER) else {
            return Ok(Self {
                label,
                version: None,
            });
        };

        let head = rest.split('/').next().unwrap_or_default();
        let version = head
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "category '{}' has no version number after '{}'",
                    label, VERSION_MARKER
                ))
            })?;

        Ok(Self {
            label,
            version: Some(version),
        })
    }

    /// Returns the label
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Returns the parsed language version, if this is a versioned category
    pub fn version(&self) -> Option<f64> {
        self.version
    }
}

impl PartialEq for CategoryKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CategoryKey<'_> {}

impl PartialOrd for CategoryKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.version, other.version) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.label.cmp(other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(other.label),
        }
    }
}

/// Orders a set of category labels for document emission.
///
/// Duplicate labels collapse into one entry.
pub fn order_categories<'a, I>(labels: I) -> Result<Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys = labels
        .into_iter()
        .map(CategoryKey::parse)
        .collect::<Result<Vec<_>>>()?;
    keys.sort();
    keys.dedup();
    Ok(keys.into_iter().map(|key| key.label()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_categories_come_first() {
        let ordered = order_categories(["Other", "C# 2.0 / VS 2005", "", "ProjectExport"]).unwrap();
        assert_eq!(ordered, vec!["C# 2.0 / VS 2005", "", "Other", "ProjectExport"]);
    }

    #[test]
    fn test_versions_sort_numerically() {
        let ordered = order_categories([
            "C# 10.0 / VS 2022",
            "C# 7.3 / VS 2017.7",
            "C# 9.0 / VS 2019.8",
            "C# 7.0 / VS 2017",
            "C# 1.0 / VS .NET",
        ])
        .unwrap();
        assert_eq!(
            ordered,
            vec![
                "C# 1.0 / VS .NET",
                "C# 7.0 / VS 2017",
                "C# 7.3 / VS 2017.7",
                "C# 9.0 / VS 2019.8",
                "C# 10.0 / VS 2022",
            ]
        );
    }

    #[test]
    fn test_same_version_breaks_ties_by_label() {
        let ordered = order_categories(["C# 7.3 / records", "C# 7.3 / pattern matching"]).unwrap();
        assert_eq!(ordered, vec!["C# 7.3 / pattern matching", "C# 7.3 / records"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let ordered = order_categories(["Other", "Other", "C# 5.0"]).unwrap();
        assert_eq!(ordered, vec!["C# 5.0", "Other"]);
    }

    #[test]
    fn test_versioned_label_without_number_is_rejected() {
        for label in ["C# next / preview", "C#", "C# NaN / VS", "C# inf"] {
            let err = CategoryKey::parse(label).unwrap_err();
            assert!(matches!(err, Error::InvalidSchema(_)), "{label}");
        }
    }

    #[test]
    fn test_parse_version() {
        let key = CategoryKey::parse("C# 7.3 / pattern matching").unwrap();
        assert_eq!(key.version(), Some(7.3));
        assert_eq!(CategoryKey::parse("Other").unwrap().version(), None);
        assert_eq!(CategoryKey::parse("C#11.0").unwrap().version(), Some(11.0));
    }
}
