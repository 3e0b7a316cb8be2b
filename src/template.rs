//! JSON document templates.
//!
//! A template describes a whole document as data: metadata, options,
//! headers, footers and sections made of typed blocks.
//!
//! ```json
//! {
//!   "info": { "title": "Report" },
//!   "sections": [
//!     { "blocks": [
//!       { "type": "text", "text": "Hello <b>world</b>" },
//!       { "type": "table", "columns": [4.0, 4.0],
//!         "rows": [ { "cells": [ { "blocks": [ { "type": "text", "text": "A" } ] } ] } ] }
//!     ] }
//!   ]
//! }
//! ```

use crate::container::Container;
use crate::document::{Document, DocumentInfo, DocumentOptions, HeaderKind};
use crate::element::Text;
use crate::error::{Error, Result};
use crate::model::{Alignment, Border, Color, Font, ParFormat, VerticalAlignment};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A whole document described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplate {
    /// Document metadata
    pub info: DocumentInfo,

    /// Page setup and defaults
    pub options: DocumentOptions,

    /// Page headers
    pub headers: Vec<HeaderTemplate>,

    /// Page footers
    pub footers: Vec<HeaderTemplate>,

    /// Body sections
    pub sections: Vec<SectionTemplate>,

    /// Directory relative image paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A header or footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTemplate {
    /// Pages the header applies to
    pub kind: HeaderKind,

    /// Content
    pub blocks: Vec<Block>,
}

/// A body section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTemplate {
    /// Number of text columns
    pub columns: Option<u32>,

    /// Continue on the same page
    pub no_break: bool,

    /// Content
    pub blocks: Vec<Block>,
}

/// A content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Text, with tag conversion unless disabled
    Text {
        /// Text content
        text: String,
        /// Character formatting
        #[serde(default)]
        font: Option<Font>,
        /// Paragraph formatting; starts a new paragraph
        #[serde(default)]
        par: Option<ParFormat>,
        /// Convert `<b>`-style tags and line breaks
        #[serde(default = "default_true")]
        convert_tags: bool,
    },

    /// Hyperlink field
    Hyperlink {
        /// Link target
        url: String,
        /// Displayed text; the URL when empty
        #[serde(default)]
        text: String,
        /// Character formatting
        #[serde(default)]
        font: Option<Font>,
        /// Paragraph formatting
        #[serde(default)]
        par: Option<ParFormat>,
    },

    /// Paragraph without text
    EmptyParagraph {
        /// Character formatting
        #[serde(default)]
        font: Option<Font>,
        /// Paragraph formatting
        #[serde(default)]
        par: Option<ParFormat>,
    },

    /// RTF code written verbatim
    Rtf {
        /// RTF code
        code: String,
    },

    /// PNG or JPEG image file
    Image {
        /// Image path, relative to the template directory
        path: PathBuf,
        /// Width in centimeters
        #[serde(default)]
        width: Option<f32>,
        /// Height in centimeters
        #[serde(default)]
        height: Option<f32>,
        /// Paragraph formatting
        #[serde(default)]
        par: Option<ParFormat>,
    },

    /// Footnote
    Footnote {
        /// Note text
        text: String,
        /// Character formatting of the note text
        #[serde(default)]
        font: Option<Font>,
        /// Paragraph formatting of the note text
        #[serde(default)]
        par: Option<ParFormat>,
    },

    /// Endnote
    Endnote {
        /// Note text
        text: String,
        /// Character formatting of the note text
        #[serde(default)]
        font: Option<Font>,
        /// Paragraph formatting of the note text
        #[serde(default)]
        par: Option<ParFormat>,
    },

    /// Table
    Table(TableTemplate),
}

fn default_true() -> bool {
    true
}

/// A table with its rows and cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTemplate {
    /// Row alignment
    pub alignment: Alignment,

    /// Left position in centimeters
    pub left_position: Option<f32>,

    /// Column widths in centimeters
    pub columns: Vec<f32>,

    /// Rows in order
    pub rows: Vec<RowTemplate>,

    /// Merged cell ranges
    pub merges: Vec<MergeTemplate>,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowTemplate {
    /// Row height in centimeters
    pub height: Option<f32>,

    /// Cells, left to right; missing cells stay empty
    pub cells: Vec<CellTemplate>,
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellTemplate {
    /// Content
    pub blocks: Vec<Block>,

    /// Font applied to all text of the cell
    pub font: Option<Font>,

    /// Text alignment
    pub alignment: Option<Alignment>,

    /// Vertical alignment
    pub vertical_alignment: Option<VerticalAlignment>,

    /// Background color
    pub background: Option<Color>,

    /// Cell border
    pub border: Option<Border>,
}

/// An inclusive range of cells to merge, as 1-based `[row, column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTemplate {
    /// Top left cell
    pub from: [usize; 2],
    /// Bottom right cell
    pub to: [usize; 2],
}

impl DocumentTemplate {
    /// Parse a template from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a template file; image paths resolve against its directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut template = Self::from_json(&json)?;
        template.base_dir = path.parent().map(Path::to_path_buf);
        log::debug!(
            "Loaded template {} ({} sections)",
            path.display(),
            template.sections.len()
        );
        Ok(template)
    }

    /// Serialize the template to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the document.
    pub fn build(&self) -> Result<Document> {
        let mut doc = Document::with_options(self.options.clone());
        *doc.info_mut() = self.info.clone();

        for header in &self.headers {
            self.add_blocks(doc.add_header(header.kind), &header.blocks)?;
        }
        for footer in &self.footers {
            self.add_blocks(doc.add_footer(footer.kind), &footer.blocks)?;
        }
        for template in &self.sections {
            let section = doc.add_section();
            if let Some(columns) = template.columns {
                section.set_columns(columns);
            }
            section.set_no_break(template.no_break);
            self.add_blocks(section, &template.blocks)?;
        }

        Ok(doc)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.base_dir {
            Some(ref dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn add_blocks(&self, container: &mut Container, blocks: &[Block]) -> Result<()> {
        for block in blocks {
            self.add_block(container, block)?;
        }
        Ok(())
    }

    fn add_block(&self, container: &mut Container, block: &Block) -> Result<()> {
        match block {
            Block::Text {
                text,
                font,
                par,
                convert_tags,
            } => {
                let mut element = Text::new(text.as_str());
                element.font = checked_font(font)?;
                element.par_format = par.clone();
                if !convert_tags {
                    element = element.without_tag_conversion();
                }
                container.add_text(element);
            }
            Block::Hyperlink {
                url,
                text,
                font,
                par,
            } => {
                container.write_hyperlink(url.as_str(), text.as_str(), checked_font(font)?, par.clone());
            }
            Block::EmptyParagraph { font, par } => {
                container.add_empty_paragraph(checked_font(font)?, par.clone());
            }
            Block::Rtf { code } => container.write_rtf_code(code.as_str()),
            Block::Image {
                path,
                width,
                height,
                par,
            } => {
                container.add_image(self.resolve(path), par.clone(), *width, *height)?;
            }
            Block::Footnote { text, font, par } => {
                container.add_footnote(text.as_str(), checked_font(font)?, par.clone());
            }
            Block::Endnote { text, font, par } => {
                container.add_endnote(text.as_str(), checked_font(font)?, par.clone());
            }
            Block::Table(template) => self.add_table(container, template)?,
        }
        Ok(())
    }

    fn add_table(&self, container: &mut Container, template: &TableTemplate) -> Result<()> {
        let table = container.add_table(template.alignment);
        table.add_columns(&template.columns)?;
        if let Some(position) = template.left_position {
            table.set_left_position(position);
        }

        for (r, row) in template.rows.iter().enumerate() {
            table.add_row(row.height)?;
            if row.cells.len() > template.columns.len() {
                return Err(Error::ColumnOutOfRange(
                    row.cells.len(),
                    template.columns.len(),
                ));
            }

            for (c, cell_template) in row.cells.iter().enumerate() {
                let cell = table.cell_mut(r + 1, c + 1)?;
                if let Some(font) = checked_font(&cell_template.font)? {
                    cell.set_font(font);
                }
                if let Some(alignment) = cell_template.alignment {
                    cell.set_alignment(alignment);
                }
                if let Some(alignment) = cell_template.vertical_alignment {
                    cell.set_vertical_alignment(alignment);
                }
                if let Some(ref color) = cell_template.background {
                    cell.set_background(color.clone());
                }
                if let Some(ref border) = cell_template.border {
                    cell.set_border(border.clone());
                }
                self.add_blocks(cell, &cell_template.blocks)?;
            }
        }

        for merge in &template.merges {
            table.merge_cells(merge.from[0], merge.from[1], merge.to[0], merge.to[1])?;
        }
        Ok(())
    }
}

/// Fonts from JSON bypass `Font::new`, so their size is checked here.
fn checked_font(font: &Option<Font>) -> Result<Option<Font>> {
    match font {
        Some(font) => {
            Font::new(font.size, font.family.as_str())?;
            Ok(Some(font.clone()))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn test_block_tags() {
        let block: Block =
            serde_json::from_str(r#"{"type": "empty_paragraph"}"#).unwrap();
        assert_eq!(block, Block::EmptyParagraph { font: None, par: None });

        let block: Block = serde_json::from_str(r#"{"type": "text", "text": "x"}"#).unwrap();
        assert!(matches!(block, Block::Text { convert_tags: true, .. }));

        let block: Block =
            serde_json::from_str(r#"{"type": "table", "columns": [2.5]}"#).unwrap();
        assert!(matches!(block, Block::Table(ref t) if t.columns == vec![2.5]));
    }

    #[test]
    fn test_unknown_block_type() {
        assert!(matches!(
            DocumentTemplate::from_json(r#"{"sections": [{"blocks": [{"type": "video"}]}]}"#),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_build_sections() {
        let template = DocumentTemplate::from_json(
            r#"{
                "info": {"title": "T"},
                "headers": [{"kind": "first", "blocks": [{"type": "text", "text": "H"}]}],
                "sections": [
                    {"blocks": [
                        {"type": "text", "text": "a"},
                        {"type": "footnote", "text": "n"}
                    ]},
                    {"columns": 2, "no_break": true, "blocks": []}
                ]
            }"#,
        )
        .unwrap();

        let doc = template.build().unwrap();
        assert_eq!(doc.info().title.as_deref(), Some("T"));
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.sections()[0].count_elements(), 2);
        assert_eq!(doc.sections()[1].columns(), 2);
        assert!(doc.to_rtf_string().unwrap().contains("\\titlepg"));
    }

    #[test]
    fn test_build_table() {
        let template = DocumentTemplate::from_json(
            r#"{"sections": [{"blocks": [{
                "type": "table",
                "columns": [3.0, 3.0],
                "rows": [
                    {"cells": [{"blocks": [{"type": "text", "text": "A"}], "alignment": "center"}]},
                    {"height": 1.0, "cells": []}
                ],
                "merges": [{"from": [1, 1], "to": [1, 2]}]
            }]}]}"#,
        )
        .unwrap();

        let doc = template.build().unwrap();
        let table = match &doc.sections()[0].elements()[0] {
            Element::Table(table) => table,
            other => panic!("expected table, got {}", other.name()),
        };
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1).unwrap().alignment(), Alignment::Center);
        assert_eq!(table.cell(1, 1).unwrap().count_elements(), 1);
    }

    #[test]
    fn test_too_many_cells() {
        let template = DocumentTemplate::from_json(
            r#"{"sections": [{"blocks": [{
                "type": "table", "columns": [3.0],
                "rows": [{"cells": [{}, {}]}]
            }]}]}"#,
        )
        .unwrap();
        assert!(matches!(template.build(), Err(Error::ColumnOutOfRange(2, 1))));
    }

    #[test]
    fn test_invalid_font_size() {
        let template = DocumentTemplate::from_json(
            r#"{"sections": [{"blocks": [
                {"type": "text", "text": "x", "font": {"size": -1.0}}
            ]}]}"#,
        )
        .unwrap();
        assert!(matches!(template.build(), Err(Error::InvalidDimension(_))));
    }

    #[test]
    fn test_image_path_resolves_against_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("logo.png"),
            crate::detect::tests::png_header(4, 2),
        )
        .unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            r#"{"sections": [{"blocks": [{"type": "image", "path": "logo.png", "width": 2.0}]}]}"#,
        )
        .unwrap();

        let doc = DocumentTemplate::from_path(&path).unwrap().build().unwrap();
        let rtf = doc.to_rtf_string().unwrap();
        assert!(rtf.contains("{\\pict\\pngblip\\picw4\\pich2\\picwgoal1134\\pichgoal567"));
    }
}
