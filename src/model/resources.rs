//! Shared document resources referenced by index from the body.

use super::{Color, ColorTable, FontTable};
use crate::error::{Error, Result};

/// Font and color tables of the document head.
///
/// Filled by a pre-pass over every container before rendering, then
/// borrowed read-only by the render pass.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    /// Registered colors
    pub colors: ColorTable,

    /// Registered font families
    pub fonts: FontTable,
}

impl Resources {
    /// Create resources whose default font family is `family`.
    pub fn with_default_font(family: impl Into<String>) -> Self {
        Self {
            colors: ColorTable::new(),
            fonts: FontTable::new(family),
        }
    }

    /// Color index, failing when the color was never registered.
    pub fn color_index(&self, color: &Color) -> Result<usize> {
        self.colors
            .index_of(color)
            .ok_or_else(|| Error::Render(format!("color {} is not registered", color)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index() {
        let mut resources = Resources::default();
        let blue = Color::from_hex("#0000FF").unwrap();
        assert!(matches!(resources.color_index(&blue), Err(Error::Render(_))));

        resources.colors.add(&blue);
        assert_eq!(resources.color_index(&blue).unwrap(), 2);
    }

    #[test]
    fn test_default_font_family() {
        let resources = Resources::with_default_font("Arial");
        assert_eq!(resources.fonts.index_of("Arial"), Some(0));
    }
}
