//! Content elements placed in containers.

mod image;
mod note;
mod table;
mod text;

pub use image::Image;
pub use note::{Note, NoteKind};
pub use table::{Cell, CellMerge, Column, Row, Table};
pub use text::{escape_text, format_text, EmptyParagraph, Hyperlink, Text};

use crate::error::Result;
use crate::model::{ParFormat, Resources};
use crate::render::RenderContext;

/// One unit of content, rendered in container order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Text run
    Text(Text),
    /// RTF code written verbatim
    RawRtf(String),
    /// Paragraph without text
    EmptyParagraph(EmptyParagraph),
    /// Hyperlink field
    Hyperlink(Hyperlink),
    /// Embedded picture
    Image(Image),
    /// Footnote or endnote
    Note(Note),
    /// Table, possibly nested
    Table(Table),
}

impl Element {
    /// Check if this is an empty paragraph.
    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self, Element::EmptyParagraph(_))
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Element::Table(_))
    }

    /// Nesting depth, for tables.
    pub fn nest_depth(&self) -> Option<u32> {
        match self {
            Element::Table(table) => Some(table.nest_depth()),
            _ => None,
        }
    }

    /// Paragraph format starting a new paragraph before this element.
    ///
    /// Tables format their cells themselves and never report one.
    pub fn par_format(&self) -> Option<&ParFormat> {
        match self {
            Element::Text(text) => text.par_format.as_ref(),
            Element::EmptyParagraph(empty) => Some(&empty.par_format),
            Element::Hyperlink(link) => link.par_format.as_ref(),
            Element::Image(image) => image.par_format.as_ref(),
            Element::Note(note) => note.par_format.as_ref(),
            Element::RawRtf(_) | Element::Table(_) => None,
        }
    }

    /// Short variant name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::RawRtf(_) => "raw rtf",
            Element::EmptyParagraph(_) => "empty paragraph",
            Element::Hyperlink(_) => "hyperlink",
            Element::Image(_) => "image",
            Element::Note(_) => "note",
            Element::Table(_) => "table",
        }
    }

    /// Register fonts and colors used by this element.
    pub fn collect_resources(&self, resources: &mut Resources) {
        match self {
            Element::Text(text) => text.collect_resources(resources),
            Element::RawRtf(_) => {}
            Element::EmptyParagraph(empty) => empty.collect_resources(resources),
            Element::Hyperlink(link) => link.collect_resources(resources),
            Element::Image(image) => image.collect_resources(resources),
            Element::Note(note) => note.collect_resources(resources),
            Element::Table(table) => table.collect_resources(resources),
        }
    }

    /// Render the element body. Separators and paragraph formats are
    /// written by the owning container.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        match self {
            Element::Text(text) => {
                ctx.stats_mut().add_paragraph();
                text.render(ctx)
            }
            Element::RawRtf(code) => {
                ctx.stats_mut().add_paragraph();
                ctx.write(code)
            }
            Element::EmptyParagraph(empty) => {
                ctx.stats_mut().add_paragraph();
                empty.render(ctx)
            }
            Element::Hyperlink(link) => {
                ctx.stats_mut().add_paragraph();
                link.render(ctx)
            }
            Element::Image(image) => image.render(ctx),
            Element::Note(note) => note.render(ctx),
            Element::Table(table) => table.render(ctx),
        }
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

impl From<Table> for Element {
    fn from(table: Table) -> Self {
        Element::Table(table)
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Self {
        Element::Image(image)
    }
}

impl From<Note> for Element {
    fn from(note: Note) -> Self {
        Element::Note(note)
    }
}
