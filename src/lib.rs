//! # rtfcraft
//!
//! Assemble RTF documents from paragraphs, tables, images, hyperlinks
//! and notes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rtfcraft::{Alignment, Document, ParFormat};
//!
//! fn main() -> rtfcraft::Result<()> {
//!     let mut doc = Document::new();
//!     let section = doc.add_section();
//!     section.write_text("Hello <b>world</b>");
//!     section.write_text_with("Centered", None, Some(ParFormat::new(Alignment::Center)));
//!
//!     let table = section.add_table(Alignment::Left);
//!     table.add_columns(&[4.0, 4.0])?;
//!     table.add_row(None)?;
//!     table.cell_mut(1, 1)?.write_text("A1");
//!
//!     doc.save("hello.rtf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Containers**: sections, headers, footers and table cells share one
//!   rendering algorithm that places paragraph breaks and resets
//! - **Tables**: nested tables, merged cells, borders and backgrounds
//! - **Images**: PNG and JPEG, sized in centimeters
//! - **Notes**: footnotes and endnotes with configurable numbering
//! - **Templates**: whole documents described as JSON
//! - **Streaming**: output goes to any [`render::Sink`]

pub mod container;
pub mod detect;
pub mod document;
pub mod element;
pub mod error;
pub mod model;
pub mod render;
pub mod template;

// Re-export commonly used types
pub use container::{needs_paragraph_break, CellScope, Container, ContainerKind};
pub use detect::{detect_format_from_bytes, detect_format_from_path, ImageFormat};
pub use document::{
    Document, DocumentInfo, DocumentOptions, HeaderKind, Margins, NoteNumbering, NoteSettings,
    PaperSize, Section,
};
pub use element::{Cell, Element, EmptyParagraph, Hyperlink, Image, Note, NoteKind, Table, Text};
pub use error::{Error, Result};
pub use model::{
    Alignment, Border, BorderLine, BorderStyle, Color, Font, ParFormat, VerticalAlignment,
};
pub use render::{RenderStats, Sink, StreamSink};
pub use template::DocumentTemplate;

use std::path::Path;

/// Build a document from a JSON template file.
///
/// # Example
///
/// ```no_run
/// use rtfcraft::from_template_file;
///
/// let doc = from_template_file("report.json").unwrap();
/// doc.save("report.rtf").unwrap();
/// ```
pub fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentTemplate::from_path(path)?.build()
}

/// Build a document from a JSON template string.
pub fn from_template_json(json: &str) -> Result<Document> {
    DocumentTemplate::from_json(json)?.build()
}

/// Render a JSON template string to RTF.
///
/// # Example
///
/// ```
/// let rtf = rtfcraft::template_to_rtf(r#"{"sections": [{"blocks": [{"type": "text", "text": "Hi"}]}]}"#)?;
/// assert!(rtf.contains("Hi"));
/// # Ok::<(), rtfcraft::Error>(())
/// ```
pub fn template_to_rtf(json: &str) -> Result<String> {
    from_template_json(json)?.to_rtf_string()
}

/// Builder for turning templates into documents with option overrides.
///
/// # Example
///
/// ```no_run
/// use rtfcraft::{PaperSize, RtfCraft};
///
/// let stats = RtfCraft::new()
///     .with_paper(PaperSize::Letter)
///     .with_landscape(true)
///     .with_title("Quarterly report")
///     .load("report.json")?
///     .save("report.rtf")?;
/// println!("{} bytes", stats.bytes);
/// # Ok::<(), rtfcraft::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RtfCraft {
    paper: Option<PaperSize>,
    landscape: Option<bool>,
    default_font: Option<(String, f32)>,
    title: Option<String>,
    author: Option<String>,
    stamp_creation: bool,
}

impl RtfCraft {
    /// Create a builder that keeps the template's settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the paper size.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = Some(paper);
        self
    }

    /// Override the orientation.
    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = Some(landscape);
        self
    }

    /// Override the default font.
    pub fn with_default_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.default_font = Some((family.into(), size));
        self
    }

    /// Override the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Stamp the creation time when the template has none.
    pub fn with_creation_time(mut self) -> Self {
        self.stamp_creation = true;
        self
    }

    /// Apply the overrides to a parsed template.
    pub fn apply(&self, template: &mut DocumentTemplate) {
        let options = &mut template.options;
        if let Some(paper) = self.paper {
            options.paper = paper;
        }
        if let Some(landscape) = self.landscape {
            options.landscape = landscape;
        }
        if let Some((ref family, size)) = self.default_font {
            options.default_font_family = family.clone();
            options.default_font_size = size;
        }

        let info = &mut template.info;
        if self.title.is_some() {
            info.title = self.title.clone();
        }
        if self.author.is_some() {
            info.author = self.author.clone();
        }
        if self.stamp_creation && info.created.is_none() {
            info.created = Some(chrono::Utc::now());
        }
    }

    /// Load a template file and build the document.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let mut template = DocumentTemplate::from_path(path)?;
        self.apply(&mut template);
        template.build()
    }

    /// Parse a template string and build the document.
    pub fn load_json(&self, json: &str) -> Result<Document> {
        let mut template = DocumentTemplate::from_json(json)?;
        self.apply(&mut template);
        template.build()
    }
}
