use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Activity label a user can assign to a loaded track.
///
/// The set is fixed. Labels parse case-insensitively and are displayed with
/// their canonical spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[default]
    Uncategorized,
    Running,
    Cycling,
    Hiking,
    Driving,
    Walking,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("invalid category \"{0}\"")]
    Invalid(String),
}

impl Category {
    /// Parses a category label as offered by the presentation layer.
    ///
    /// Surrounding whitespace is ignored. Unknown labels are rejected with
    /// [`CategoryError::Invalid`] carrying the original input.
    pub fn parse(label: &str) -> Result<Category, CategoryError> {
        Category::from_str(label.trim()).map_err(|_| CategoryError::Invalid(label.to_string()))
    }

    /// All labels in display order.
    pub fn labels() -> Vec<&'static str> {
        Category::iter().map(|c| c.label()).collect()
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}
