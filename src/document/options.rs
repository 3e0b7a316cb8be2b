//! Document options and configuration.

use crate::model::{cm_to_twips, DEFAULT_FONT_FAMILY};
use serde::{Deserialize, Serialize};

/// Options for page setup and document defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Paper size
    pub paper: PaperSize,

    /// Page margins in centimeters
    pub margins: Margins,

    /// Swap paper width and height
    pub landscape: bool,

    /// Distinct left and right pages (also implied by left/right headers)
    pub facing_pages: bool,

    /// Default font family (`\f0`)
    pub default_font_family: String,

    /// Default font size in points
    pub default_font_size: f32,

    /// Footnote and endnote numbering
    pub notes: NoteSettings,
}

impl DocumentOptions {
    /// Create new document options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Enable or disable landscape orientation.
    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    /// Enable or disable facing pages.
    pub fn with_facing_pages(mut self, facing: bool) -> Self {
        self.facing_pages = facing;
        self
    }

    /// Set the default font.
    pub fn with_default_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.default_font_family = family.into();
        self.default_font_size = size;
        self
    }

    /// Set footnote and endnote numbering.
    pub fn with_notes(mut self, notes: NoteSettings) -> Self {
        self.notes = notes;
        self
    }

    /// Paper width and height in centimeters, after orientation.
    pub fn page_size(&self) -> (f32, f32) {
        let (width, height) = self.paper.dimensions();
        if self.landscape {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Page setup control words.
    pub fn page_setup_content(&self) -> String {
        let (width, height) = self.page_size();
        let mut content = format!(
            "\\paperw{}\\paperh{}\\margl{}\\margr{}\\margt{}\\margb{}",
            cm_to_twips(width),
            cm_to_twips(height),
            cm_to_twips(self.margins.left),
            cm_to_twips(self.margins.right),
            cm_to_twips(self.margins.top),
            cm_to_twips(self.margins.bottom)
        );
        if self.landscape {
            content.push_str("\\landscape");
        }
        content
    }
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margins: Margins::default(),
            landscape: false,
            facing_pages: false,
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            default_font_size: 10.0,
            notes: NoteSettings::default(),
        }
    }
}

/// Paper size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// 21.0 x 29.7 cm
    #[default]
    A4,
    /// 14.8 x 21.0 cm
    A5,
    /// 8.5 x 11 in
    Letter,
    /// 8.5 x 14 in
    Legal,
    /// Width and height in centimeters
    Custom {
        /// Width in centimeters
        width: f32,
        /// Height in centimeters
        height: f32,
    },
}

impl PaperSize {
    /// Width and height in centimeters, portrait.
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            PaperSize::A4 => (21.0, 29.7),
            PaperSize::A5 => (14.8, 21.0),
            PaperSize::Letter => (21.59, 27.94),
            PaperSize::Legal => (21.59, 35.56),
            PaperSize::Custom { width, height } => (width, height),
        }
    }

    /// Parse a paper size name (e.g., "a4", "letter") or "WxH" in centimeters.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "a4" => Ok(PaperSize::A4),
            "a5" => Ok(PaperSize::A5),
            "letter" => Ok(PaperSize::Letter),
            "legal" => Ok(PaperSize::Legal),
            _ => {
                let (width, height) = s
                    .split_once('x')
                    .ok_or_else(|| format!("Unknown paper size: {}", s))?;
                let width: f32 = width.trim().parse().map_err(|_| "Invalid paper width")?;
                let height: f32 = height.trim().parse().map_err(|_| "Invalid paper height")?;
                if width <= 0.0 || height <= 0.0 {
                    return Err("Paper dimensions must be positive".to_string());
                }
                Ok(PaperSize::Custom { width, height })
            }
        }
    }
}

/// Page margins in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
}

impl Margins {
    /// Same margin on all sides.
    pub fn uniform(margin: f32) -> Self {
        Self {
            left: margin,
            right: margin,
            top: margin,
            bottom: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 3.0,
            right: 3.0,
            top: 1.0,
            bottom: 2.0,
        }
    }
}

/// Numbering style of footnotes or endnotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteNumbering {
    /// 1, 2, 3, ...
    Arabic,
    /// a, b, c, ...
    AlphaLower,
    /// A, B, C, ...
    AlphaUpper,
    /// i, ii, iii, ...
    RomanLower,
    /// I, II, III, ...
    RomanUpper,
    /// *, †, ‡, §, ...
    Chicago,
}

impl NoteNumbering {
    fn suffix(self) -> &'static str {
        match self {
            NoteNumbering::Arabic => "ar",
            NoteNumbering::AlphaLower => "alc",
            NoteNumbering::AlphaUpper => "auc",
            NoteNumbering::RomanLower => "rlc",
            NoteNumbering::RomanUpper => "ruc",
            NoteNumbering::Chicago => "chi",
        }
    }
}

/// Footnote and endnote numbering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSettings {
    /// Footnote numbering style
    pub footnote_numbering: NoteNumbering,

    /// First footnote number
    pub footnote_start: u32,

    /// Endnote numbering style
    pub endnote_numbering: NoteNumbering,

    /// First endnote number
    pub endnote_start: u32,
}

impl NoteSettings {
    /// Document-level note control words.
    pub fn content(&self) -> String {
        format!(
            "\\fet2\\ftnbj\\aenddoc\\ftnn{}\\aftnn{}\\ftnstart{}\\aftnstart{}",
            self.footnote_numbering.suffix(),
            self.endnote_numbering.suffix(),
            self.footnote_start.max(1),
            self.endnote_start.max(1)
        )
    }
}

impl Default for NoteSettings {
    fn default() -> Self {
        Self {
            footnote_numbering: NoteNumbering::Arabic,
            footnote_start: 1,
            endnote_numbering: NoteNumbering::RomanLower,
            endnote_start: 1,
        }
    }
}
