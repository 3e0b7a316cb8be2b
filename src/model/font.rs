//! Character formatting: fonts and the document font table.

use super::{Color, Resources};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Font family used when none is given.
pub const DEFAULT_FONT_FAMILY: &str = "Times New Roman";

/// Character formatting applied to a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Size in points
    pub size: f32,

    /// Font family name
    pub family: String,

    /// Text color
    pub color: Option<Color>,

    /// Highlight color
    pub background: Option<Color>,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Struck-through text
    pub strike: bool,
}

impl Font {
    /// Create a font with the given size and family.
    pub fn new(size: f32, family: impl Into<String>) -> Result<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::InvalidDimension(format!("font size {}", size)));
        }
        Ok(Self {
            size,
            family: family.into(),
            ..Self::default()
        })
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the highlight color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Make the font bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Make the font italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Make the font underlined.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Strike the font through.
    pub fn strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Register family and colors with the document resources.
    pub fn collect_resources(&self, resources: &mut Resources) {
        resources.fonts.add(&self.family);
        if let Some(ref color) = self.color {
            resources.colors.add(color);
        }
        if let Some(ref color) = self.background {
            resources.colors.add(color);
        }
    }

    /// Opening markup of the font scope.
    pub fn content(&self, resources: &Resources) -> Result<String> {
        let mut content = String::from("{");
        // half-points
        content.push_str(&format!("\\fs{}", (self.size * 2.0).round() as u32));

        let font_index = resources.fonts.index_of(&self.family).ok_or_else(|| {
            Error::Render(format!("font '{}' is not registered", self.family))
        })?;
        content.push_str(&format!("\\f{}", font_index));

        if let Some(ref color) = self.color {
            content.push_str(&format!("\\cf{}", resources.color_index(color)?));
        }
        if let Some(ref color) = self.background {
            content.push_str(&format!("\\chcbpat{}", resources.color_index(color)?));
        }
        if self.bold {
            content.push_str("\\b");
        }
        if self.italic {
            content.push_str("\\i");
        }
        if self.underline {
            content.push_str("\\ul");
        }
        if self.strike {
            content.push_str("\\strike");
        }
        content.push(' ');

        Ok(content)
    }

    /// Closing markup of the font scope.
    pub fn closing_content(&self) -> &'static str {
        "}"
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 12.0,
            family: DEFAULT_FONT_FAMILY.to_string(),
            color: None,
            background: None,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
        }
    }
}

/// Font table of the document head. `\f0` is the default family.
#[derive(Debug, Clone)]
pub struct FontTable {
    families: Vec<String>,
}

impl FontTable {
    /// Create a font table whose first entry is `default_family`.
    pub fn new(default_family: impl Into<String>) -> Self {
        Self {
            families: vec![default_family.into()],
        }
    }

    /// Register a family; duplicates are ignored.
    pub fn add(&mut self, family: &str) {
        if !self.families.iter().any(|f| f == family) {
            self.families.push(family.to_string());
        }
    }

    /// 0-based RTF index of a family.
    pub fn index_of(&self, family: &str) -> Option<usize> {
        self.families.iter().position(|f| f == family)
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Render the `\fonttbl` group.
    pub fn content(&self) -> String {
        let mut content = String::from("{\\fonttbl");
        for (index, family) in self.families.iter().enumerate() {
            content.push_str(&format!("{{\\f{}\\fnil\\fcharset0 {};}}", index, family));
        }
        content.push_str("}\r\n");
        content
    }
}

impl Default for FontTable {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_content() {
        let font = Font::new(11.0, "Arial")
            .unwrap()
            .with_color(Color::from_hex("#FF0000").unwrap())
            .bold()
            .italic();

        let mut resources = Resources::default();
        font.collect_resources(&mut resources);

        assert_eq!(font.content(&resources).unwrap(), "{\\fs22\\f1\\cf2\\b\\i ");
        assert_eq!(font.closing_content(), "}");
    }

    #[test]
    fn test_default_font_uses_f0() {
        let font = Font::default();
        let resources = Resources::default();
        assert_eq!(font.content(&resources).unwrap(), "{\\fs24\\f0 ");
    }

    #[test]
    fn test_unregistered_font_fails() {
        let font = Font::new(10.0, "Courier New").unwrap();
        let resources = Resources::default();
        assert!(matches!(font.content(&resources), Err(Error::Render(_))));
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            Font::new(0.0, "Arial"),
            Err(Error::InvalidDimension(_))
        ));
        assert!(Font::new(f32::NAN, "Arial").is_err());
    }

    #[test]
    fn test_font_table() {
        let mut table = FontTable::default();
        table.add("Arial");
        table.add("Arial");
        table.add(DEFAULT_FONT_FAMILY);

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("Arial"), Some(1));
        assert_eq!(
            table.content(),
            "{\\fonttbl{\\f0\\fnil\\fcharset0 Times New Roman;}{\\f1\\fnil\\fcharset0 Arial;}}\r\n"
        );
    }
}
