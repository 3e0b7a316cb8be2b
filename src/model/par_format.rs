//! Paragraph formatting.

use super::{Border, Color, Resources};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Twips per centimeter.
pub const TWIPS_PER_CM: f32 = 567.0;

/// Twips per point.
pub const TWIPS_PER_PT: f32 = 20.0;

/// Convert centimeters to twips.
pub fn cm_to_twips(cm: f32) -> i32 {
    (cm * TWIPS_PER_CM).round() as i32
}

/// Convert points to twips.
pub fn pt_to_twips(pt: f32) -> i32 {
    (pt * TWIPS_PER_PT).round() as i32
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Paragraph alignment control word.
    pub fn control_word(self) -> &'static str {
        match self {
            Alignment::Left => "\\ql",
            Alignment::Center => "\\qc",
            Alignment::Right => "\\qr",
            Alignment::Justify => "\\qj",
        }
    }

    /// Table row alignment control word; justify falls back to left.
    pub fn row_control_word(self) -> &'static str {
        match self {
            Alignment::Center => "\\trqc",
            Alignment::Right => "\\trqr",
            Alignment::Left | Alignment::Justify => "\\trql",
        }
    }
}

/// Vertical alignment for table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Top alignment
    #[default]
    Top,
    /// Middle/center alignment
    Center,
    /// Bottom alignment
    Bottom,
}

impl VerticalAlignment {
    /// Cell vertical alignment control word.
    pub fn control_word(self) -> &'static str {
        match self {
            VerticalAlignment::Top => "\\clvertalt",
            VerticalAlignment::Center => "\\clvertalc",
            VerticalAlignment::Bottom => "\\clvertalb",
        }
    }
}

/// Paragraph-level formatting: alignment, indentation, spacing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParFormat {
    /// Text alignment
    pub alignment: Alignment,

    /// First line indent in centimeters
    pub indent_first_line: f32,

    /// Left indent in centimeters
    pub indent_left: f32,

    /// Right indent in centimeters
    pub indent_right: f32,

    /// Space before paragraph in points
    pub space_before: f32,

    /// Space after paragraph in points
    pub space_after: f32,

    /// Exact line spacing in points (0 = automatic)
    pub line_spacing: f32,

    /// Background shading
    pub shading: Option<Color>,

    /// Paragraph border
    pub border: Option<Border>,
}

impl ParFormat {
    /// Create a paragraph format with the given alignment.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    /// Set indentation in centimeters.
    pub fn with_indent(mut self, first_line: f32, left: f32, right: f32) -> Self {
        self.indent_first_line = first_line;
        self.indent_left = left;
        self.indent_right = right;
        self
    }

    /// Set spacing before and after in points.
    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    /// Set exact line spacing in points.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set background shading.
    pub fn with_shading(mut self, color: Color) -> Self {
        self.shading = Some(color);
        self
    }

    /// Set the paragraph border.
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Register shading and border colors.
    pub fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref color) = self.shading {
            resources.colors.add(color);
        }
        if let Some(ref border) = self.border {
            border.collect_resources(resources);
        }
    }

    /// Paragraph formatting markup, without the `\pard` reset.
    pub fn content(&self, resources: &Resources) -> Result<String> {
        let mut content = String::from(self.alignment.control_word());

        let indents = [
            ("\\fi", self.indent_first_line),
            ("\\li", self.indent_left),
            ("\\ri", self.indent_right),
        ];
        for (word, cm) in indents {
            if cm != 0.0 {
                content.push_str(&format!("{}{}", word, cm_to_twips(cm)));
            }
        }

        if self.space_before > 0.0 {
            content.push_str(&format!("\\sb{}", pt_to_twips(self.space_before)));
        }
        if self.space_after > 0.0 {
            content.push_str(&format!("\\sa{}", pt_to_twips(self.space_after)));
        }
        if self.line_spacing > 0.0 {
            // negative \sl means "exactly"
            content.push_str(&format!(
                "\\sl-{}\\slmult0",
                pt_to_twips(self.line_spacing)
            ));
        }
        if let Some(ref color) = self.shading {
            content.push_str(&format!("\\cbpat{}", resources.color_index(color)?));
        }
        if let Some(ref border) = self.border {
            content.push_str(&border.content("\\brdr", resources)?);
        }
        content.push(' ');

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BorderLine;

    #[test]
    fn test_default_content() {
        let format = ParFormat::default();
        assert_eq!(format.content(&Resources::default()).unwrap(), "\\ql ");
    }

    #[test]
    fn test_full_content() {
        let format = ParFormat::new(Alignment::Center)
            .with_indent(1.0, 0.5, 0.0)
            .with_spacing(6.0, 12.0)
            .with_line_spacing(14.0)
            .with_shading(Color::from_hex("#EEEEEE").unwrap());

        let mut resources = Resources::default();
        format.collect_resources(&mut resources);

        assert_eq!(
            format.content(&resources).unwrap(),
            "\\qc\\fi567\\li284\\sb120\\sa240\\sl-280\\slmult0\\cbpat2 "
        );
    }

    #[test]
    fn test_border_content() {
        let format =
            ParFormat::new(Alignment::Justify).with_border(Border::all(BorderLine::new(1.0).unwrap()));
        let content = format.content(&Resources::default()).unwrap();
        assert!(content.starts_with("\\qj\\brdrt\\brdrs\\brdrw20"));
        assert!(content.contains("\\brdrr\\brdrs\\brdrw20"));
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(cm_to_twips(2.0), 1134);
        assert_eq!(pt_to_twips(12.0), 240);
        assert_eq!(Alignment::Right.row_control_word(), "\\trqr");
        assert_eq!(VerticalAlignment::Bottom.control_word(), "\\clvertalb");
    }
}
