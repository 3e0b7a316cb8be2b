//! Border lines for paragraphs and table cells.

use super::{Color, Resources};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Line style of a border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Single solid line
    #[default]
    Single,
    /// Dotted line
    Dot,
    /// Dashed line
    Dash,
    /// Double line
    Double,
}

impl BorderStyle {
    fn control_word(self) -> &'static str {
        match self {
            BorderStyle::Single => "\\brdrs",
            BorderStyle::Dot => "\\brdrdot",
            BorderStyle::Dash => "\\brdrdash",
            BorderStyle::Double => "\\brdrdb",
        }
    }
}

/// One side of a border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderLine {
    /// Line width in points
    pub width: f32,

    /// Line color
    #[serde(default)]
    pub color: Option<Color>,

    /// Line style
    #[serde(default)]
    pub style: BorderStyle,
}

impl BorderLine {
    /// Create a single line of the given width.
    pub fn new(width: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidDimension(format!("border width {}", width)));
        }
        Ok(Self {
            width,
            color: None,
            style: BorderStyle::Single,
        })
    }

    /// Set the line color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the line style.
    pub fn with_style(mut self, style: BorderStyle) -> Self {
        self.style = style;
        self
    }

    fn content(&self, resources: &Resources) -> Result<String> {
        let mut content = format!(
            "{}\\brdrw{}",
            self.style.control_word(),
            (self.width * 20.0).round() as u32
        );
        if let Some(ref color) = self.color {
            content.push_str(&format!("\\brdrcf{}", resources.color_index(color)?));
        }
        Ok(content)
    }
}

/// Border around a paragraph or cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Top line
    pub top: Option<BorderLine>,
    /// Bottom line
    pub bottom: Option<BorderLine>,
    /// Left line
    pub left: Option<BorderLine>,
    /// Right line
    pub right: Option<BorderLine>,
}

impl Border {
    /// Same line on all four sides.
    pub fn all(line: BorderLine) -> Self {
        Self {
            top: Some(line.clone()),
            bottom: Some(line.clone()),
            left: Some(line.clone()),
            right: Some(line),
        }
    }

    /// Check if no side is set.
    pub fn is_empty(&self) -> bool {
        self.sides().next().is_none()
    }

    fn sides(&self) -> impl Iterator<Item = (&'static str, &BorderLine)> {
        [
            ("t", &self.top),
            ("l", &self.left),
            ("b", &self.bottom),
            ("r", &self.right),
        ]
        .into_iter()
        .filter_map(|(side, line)| line.as_ref().map(|l| (side, l)))
    }

    /// Register line colors.
    pub fn collect_resources(&self, resources: &mut Resources) {
        for (_, line) in self.sides() {
            if let Some(ref color) = line.color {
                resources.colors.add(color);
            }
        }
    }

    /// Markup with `prefix` selecting the target: `\brdr` for paragraphs,
    /// `\clbrdr` for table cells.
    pub fn content(&self, prefix: &str, resources: &Resources) -> Result<String> {
        let mut content = String::new();
        for (side, line) in self.sides() {
            content.push_str(prefix);
            content.push_str(side);
            content.push_str(&line.content(resources)?);
        }
        Ok(content)
    }
}
