//! Colors and the document color table.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color, stored as upper-case 6-digit hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse a color from `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let full = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(Error::InvalidColor(hex.to_string())),
        };

        Ok(Self(full.to_ascii_uppercase()))
    }

    /// Black, always present at index 1 of the color table.
    pub fn black() -> Self {
        Self("000000".to_string())
    }

    /// Upper-case 6-digit hex code without `#`.
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let component = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (component(0), component(2), component(4))
    }

    /// RTF color definition, e.g. `\red255\green0\blue0`.
    pub fn to_rtf(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("\\red{}\\green{}\\blue{}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{}", color.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Color table of the document head.
///
/// Index 0 of an RTF color table is the "auto" color, so the first
/// registered color is referenced as `\cf1`.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: Vec<Color>,
}

impl ColorTable {
    /// Create a color table holding black.
    pub fn new() -> Self {
        Self {
            colors: vec![Color::black()],
        }
    }

    /// Register a color; duplicates are ignored.
    pub fn add(&mut self, color: &Color) {
        if !self.colors.contains(color) {
            self.colors.push(color.clone());
        }
    }

    /// 1-based RTF index of a registered color.
    pub fn index_of(&self, color: &Color) -> Option<usize> {
        self.colors.iter().position(|c| c == color).map(|i| i + 1)
    }

    /// Number of registered colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the table is empty (never true, black is always present).
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Render the `\colortbl` group.
    pub fn content(&self) -> String {
        let mut content = String::from("{\\colortbl;");
        for color in &self.colors {
            content.push_str(&color.to_rtf());
            content.push(';');
        }
        content.push_str("}\r\n");
        content
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_expands() {
        let color = Color::from_hex("#f0a").unwrap();
        assert_eq!(color.hex(), "FF00AA");
        assert_eq!(color.rgb(), (255, 0, 170));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(matches!(Color::from_hex("#12"), Err(Error::InvalidColor(_))));
        assert!(matches!(
            Color::from_hex("#GGHHII"),
            Err(Error::InvalidColor(_))
        ));
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_color_table_dedup() {
        let mut table = ColorTable::new();
        table.add(&Color::from_hex("#FF0000").unwrap());
        table.add(&Color::from_hex("f00").unwrap());
        table.add(&Color::from_hex("000").unwrap());

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of(&Color::black()), Some(1));
        assert_eq!(table.index_of(&Color::from_hex("#ff0000").unwrap()), Some(2));
        assert_eq!(table.index_of(&Color::from_hex("#00ff00").unwrap()), None);
    }

    #[test]
    fn test_color_table_content() {
        let mut table = ColorTable::new();
        table.add(&Color::from_hex("#FF8000").unwrap());
        assert_eq!(
            table.content(),
            "{\\colortbl;\\red0\\green0\\blue0;\\red255\\green128\\blue0;}\r\n"
        );
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("\"#abc\"").unwrap();
        assert_eq!(color.hex(), "AABBCC");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#AABBCC\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
