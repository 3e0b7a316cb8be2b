//! Containers: ordered holders of content elements.
//!
//! Sections, headers, footers and table cells are all containers. A
//! container renders its elements in insertion order and decides, for
//! each adjacent pair, which separators have to go between them:
//!
//! * paragraph breaks (`\par `) when the next element starts a new
//!   paragraph (it is a table or carries a paragraph format),
//! * the paragraph reset (`\pard `) before each paragraph format,
//! * inside table cells: the cell initialization marker, the cell font
//!   scope and a `{ }` scope around each formatted paragraph except the
//!   last one.
//!
//! # Example
//!
//! ```
//! use rtfcraft::container::{Container, ContainerKind};
//! use rtfcraft::model::{Alignment, ParFormat};
//!
//! let mut section = Container::new(ContainerKind::Section);
//! section.write_text("Hello");
//! section.write_text_with("World", None, Some(ParFormat::new(Alignment::Center)));
//!
//! let rtf = section.render_to_string()?;
//! assert_eq!(rtf, "Hello\\par \\pard \\qc World");
//! # Ok::<(), rtfcraft::Error>(())
//! ```

use crate::document::HeaderKind;
use crate::element::{Element, EmptyParagraph, Hyperlink, Image, Note, Table, Text};
use crate::error::Result;
use crate::model::{Alignment, Font, ParFormat, Resources};
use crate::render::RenderContext;
use std::path::Path;

/// Paragraph break emitted between elements.
const PARAGRAPH_BREAK: &str = "\\par ";

/// Paragraph reset preceding every paragraph format.
const PARAGRAPH_RESET: &str = "\\pard ";

/// Formatting applied by a table cell to the elements it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct CellScope {
    /// Nesting depth of the table owning the cell (1 = top level)
    pub nest_depth: u32,

    /// Font wrapped around every non-table element of the cell
    pub font: Option<Font>,

    /// Text alignment written when the cell (re)starts a paragraph
    pub alignment: Alignment,
}

impl CellScope {
    /// Create a scope for a cell of a table at `nest_depth`.
    pub fn new(nest_depth: u32) -> Self {
        Self {
            nest_depth: nest_depth.max(1),
            font: None,
            alignment: Alignment::Left,
        }
    }
}

/// The role of a container in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerKind {
    /// Body section
    Section,
    /// Page header
    Header(HeaderKind),
    /// Page footer
    Footer(HeaderKind),
    /// Table cell
    Cell(CellScope),
}

/// An ordered, append-only sequence of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    kind: ContainerKind,
    elements: Vec<Element>,
}

impl Container {
    /// Create an empty container.
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    /// The container role.
    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// Cell formatting, if this container is a table cell.
    pub fn cell_scope(&self) -> Option<&CellScope> {
        match self.kind {
            ContainerKind::Cell(ref scope) => Some(scope),
            _ => None,
        }
    }

    pub(crate) fn cell_scope_mut(&mut self) -> Option<&mut CellScope> {
        match self.kind {
            ContainerKind::Cell(ref mut scope) => Some(scope),
            _ => None,
        }
    }

    /// Number of elements added so far.
    pub fn count_elements(&self) -> usize {
        self.elements.len()
    }

    /// Elements in render order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Paragraph reset of this container. Inside a cell the reset has to
    /// restore the table paragraph properties it clears.
    pub fn paragraph_reset(&self) -> String {
        match self.cell_scope() {
            Some(scope) => format!("{}\\intbl\\itap{} ", PARAGRAPH_RESET, scope.nest_depth),
            None => PARAGRAPH_RESET.to_string(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Add RTF code that is written verbatim.
    pub fn write_rtf_code(&mut self, code: impl Into<String>) {
        self.push(Element::RawRtf(code.into()));
    }

    /// Add text to the current paragraph.
    pub fn write_text(&mut self, text: impl Into<String>) {
        self.push(Element::Text(Text::new(text)));
    }

    /// Add text with a font and paragraph format. A paragraph format
    /// starts a new paragraph.
    pub fn write_text_with(
        &mut self,
        text: impl Into<String>,
        font: Option<Font>,
        par_format: Option<ParFormat>,
    ) {
        self.push(Element::Text(Text {
            font,
            par_format,
            ..Text::new(text)
        }));
    }

    /// Add a prepared text element.
    pub fn add_text(&mut self, text: Text) {
        self.push(Element::Text(text));
    }

    /// Add an empty paragraph; a missing format defaults to left aligned.
    pub fn add_empty_paragraph(&mut self, font: Option<Font>, par_format: Option<ParFormat>) {
        self.push(Element::EmptyParagraph(EmptyParagraph::new(font, par_format)));
    }

    /// Add a hyperlink.
    pub fn write_hyperlink(
        &mut self,
        url: impl Into<String>,
        text: impl Into<String>,
        font: Option<Font>,
        par_format: Option<ParFormat>,
    ) -> &mut Hyperlink {
        self.push(Element::Hyperlink(Hyperlink {
            font,
            par_format,
            ..Hyperlink::new(url, text)
        }));
        match self.elements.last_mut() {
            Some(Element::Hyperlink(link)) => link,
            _ => unreachable!("hyperlink was just pushed"),
        }
    }

    /// Add a table. Tables added to a cell are nested one level deeper
    /// than the cell's table.
    pub fn add_table(&mut self, alignment: Alignment) -> &mut Table {
        let depth = self.cell_scope().map_or(1, |scope| scope.nest_depth + 1);
        self.push(Element::Table(Table::new(alignment, depth)));
        match self.elements.last_mut() {
            Some(Element::Table(table)) => table,
            _ => unreachable!("table was just pushed"),
        }
    }

    /// Add an image file. Width and height are in centimeters; when only
    /// one is given the other keeps the aspect ratio.
    pub fn add_image<P: AsRef<Path>>(
        &mut self,
        path: P,
        par_format: Option<ParFormat>,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<&mut Image> {
        let image = Image::from_path(path)?;
        self.push_image(image, par_format, width, height)
    }

    /// Add an image from PNG or JPEG bytes.
    pub fn add_image_from_bytes(
        &mut self,
        data: Vec<u8>,
        par_format: Option<ParFormat>,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<&mut Image> {
        let image = Image::from_bytes(data)?;
        self.push_image(image, par_format, width, height)
    }

    fn push_image(
        &mut self,
        mut image: Image,
        par_format: Option<ParFormat>,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<&mut Image> {
        if let Some(width) = width {
            image.set_width(width)?;
        }
        if let Some(height) = height {
            image.set_height(height)?;
        }
        image.par_format = par_format;

        self.push(Element::Image(image));
        match self.elements.last_mut() {
            Some(Element::Image(image)) => Ok(image),
            _ => unreachable!("image was just pushed"),
        }
    }

    /// Add a footnote.
    pub fn add_footnote(
        &mut self,
        text: impl Into<String>,
        font: Option<Font>,
        par_format: Option<ParFormat>,
    ) -> &mut Note {
        self.push_note(Note::footnote(text), font, par_format)
    }

    /// Add an endnote.
    pub fn add_endnote(
        &mut self,
        text: impl Into<String>,
        font: Option<Font>,
        par_format: Option<ParFormat>,
    ) -> &mut Note {
        self.push_note(Note::endnote(text), font, par_format)
    }

    fn push_note(
        &mut self,
        note: Note,
        font: Option<Font>,
        par_format: Option<ParFormat>,
    ) -> &mut Note {
        self.push(Element::Note(Note {
            font,
            par_format,
            ..note
        }));
        match self.elements.last_mut() {
            Some(Element::Note(note)) => note,
            _ => unreachable!("note was just pushed"),
        }
    }

    /// Register every font and color used by this container.
    pub fn collect_resources(&self, resources: &mut Resources) {
        if let Some(font) = self.cell_scope().and_then(|scope| scope.font.as_ref()) {
            font.collect_resources(resources);
        }
        for element in &self.elements {
            element.collect_resources(resources);
        }
    }

    /// Render all elements into the context's sink.
    ///
    /// An empty container renders one default empty paragraph. Errors of
    /// individual elements abort the pass; the sink may then hold a
    /// partial prefix of the output.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let fallback;
        let elements: &[Element] = if self.elements.is_empty() {
            fallback = [Element::EmptyParagraph(EmptyParagraph::default())];
            &fallback
        } else {
            &self.elements
        };

        let reset = self.paragraph_reset();
        let scope = self.cell_scope();
        let last = elements.len() - 1;

        for (index, element) in elements.iter().enumerate() {
            ctx.stats_mut().add_element();

            if let Some(scope) = scope {
                if index == 0 || elements[index - 1].is_table() {
                    ctx.write(&reset)?;
                    ctx.write(scope.alignment.control_word())?;
                    ctx.write(" ")?;
                }
            }

            let mut scope_opened = false;
            if let Some(par_format) = element.par_format() {
                ctx.write(&reset)?;
                if scope.is_some() && index != last {
                    ctx.write("{")?;
                    scope_opened = true;
                }
                let content = par_format.content(ctx.resources())?;
                ctx.write(&content)?;
            }

            let cell_font = match scope {
                Some(scope) if !element.is_table() => scope.font.as_ref(),
                _ => None,
            };
            if let Some(font) = cell_font {
                let content = font.content(ctx.resources())?;
                ctx.write(&content)?;
            }

            element.render(ctx)?;

            if let Some(next) = elements.get(index + 1) {
                if needs_paragraph_break(element, next) {
                    log::trace!(
                        "Paragraph break between {} and {} at {}",
                        element.name(),
                        next.name(),
                        index
                    );
                    ctx.stats_mut().add_separator();
                    ctx.write(PARAGRAPH_BREAK)?;
                }
            }

            if let Some(font) = cell_font {
                ctx.write(font.closing_content())?;
            }
            if scope_opened {
                ctx.write("}")?;
            }
        }

        Ok(())
    }

    /// Render into a string, collecting resources with the default font
    /// table first.
    pub fn render_to_string(&self) -> Result<String> {
        let mut resources = Resources::default();
        self.collect_resources(&mut resources);

        let mut out = String::new();
        let mut ctx = RenderContext::new(&mut out, &resources);
        self.render(&mut ctx)?;
        drop(ctx);
        Ok(out)
    }
}

/// Whether a paragraph break goes between `current` and the `next`
/// element that follows it.
pub fn needs_paragraph_break(current: &Element, next: &Element) -> bool {
    let next_starts_paragraph = next.is_table() || next.par_format().is_some();
    match current {
        // top level tables close their rows themselves; nested ones never
        // get a break here
        Element::Table(table) => table.nest_depth() == 1 && !next.is_table(),
        Element::Image(_) => next_starts_paragraph,
        Element::Text(_)
        | Element::RawRtf(_)
        | Element::EmptyParagraph(_)
        | Element::Hyperlink(_)
        | Element::Note(_) => !current.is_empty_paragraph() && next_starts_paragraph,
    }
}
