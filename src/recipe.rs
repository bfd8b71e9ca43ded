//! Ordered selection of the fields that make up one progress line.
//!
//! A [`Recipe`] is fixed when the gauge is built and never changes afterwards. Recipes known
//! at compile time are plain `const` slices with no allocation at all:
//!
//! ```
//! use atomic_gauge::{Field, Recipe};
//!
//! const COMPACT: Recipe = Recipe::from_static(&[Field::ProgressBar, Field::Percentage]);
//! assert_eq!(COMPACT.fields().len(), 2);
//! ```
//!
//! Recipes coming from configuration are collected once into an owned slice.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

use crate::field::{BarStyle, Field, Frame};

/// An immutable, ordered list of [`Field`]s.
///
/// Duplicates are allowed and rendered as many times as listed; an empty recipe renders an
/// empty line. Fields are concatenated without separators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct Recipe {
    fields: Cow<'static, [Field]>,
}

impl Recipe {
    /// Every field in canonical order.
    pub const ALL: Self = Self::from_static(&[Field::All]);

    /// Renders nothing.
    pub const EMPTY: Self = Self::from_static(&[]);

    /// Wraps a compile-time field list.
    #[must_use]
    pub const fn from_static(fields: &'static [Field]) -> Self {
        Self {
            fields: Cow::Borrowed(fields),
        }
    }

    /// The fields in render order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns `true` if the recipe renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends every field, in order, to `out`.
    ///
    /// # Errors
    ///
    /// Only propagates errors of the underlying [`fmt::Write`] sink.
    pub fn render<W: fmt::Write>(&self, frame: &Frame, style: &BarStyle, out: &mut W) -> fmt::Result {
        for field in self.fields.iter() {
            field.render(frame, style, out)?;
        }
        Ok(())
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Vec<Field>> for Recipe {
    fn from(fields: Vec<Field>) -> Self {
        Self {
            fields: Cow::Owned(fields),
        }
    }
}

impl From<Recipe> for Vec<Field> {
    fn from(recipe: Recipe) -> Self {
        recipe.fields.into_owned()
    }
}

impl FromIterator<Field> for Recipe {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(field, f)?;
        }
        Ok(())
    }
}
