//! Tables: rows, columns and cells.
//!
//! Every cell is a [`Container`], so cells can hold text, images and
//! further (nested) tables. Row, column and cell positions are 1-based.

use crate::container::{CellScope, Container, ContainerKind};
use crate::error::{Error, Result};
use crate::model::{cm_to_twips, Alignment, Border, Color, Font, Resources, VerticalAlignment};
use crate::render::RenderContext;
use std::ops::{Deref, DerefMut};

/// Gap between cell text and cell border, in twips.
const CELL_GAP: u32 = 108;

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Minimum height in centimeters; `None` sizes to content
    pub height: Option<f32>,
}

/// A table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Width in centimeters
    pub width: f32,
}

/// Merge state of a cell in one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellMerge {
    /// Not merged
    #[default]
    None,
    /// First cell of a merged range
    First,
    /// Cell merged into the previous one
    Continue,
}

/// A table cell: a container plus cell appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    content: Container,

    /// Vertical alignment of the content
    pub vertical_alignment: VerticalAlignment,

    /// Background color
    pub background: Option<Color>,

    /// Cell border
    pub border: Option<Border>,

    /// Horizontal merge state
    pub horizontal_merge: CellMerge,

    /// Vertical merge state
    pub vertical_merge: CellMerge,
}

impl Cell {
    fn new(nest_depth: u32) -> Self {
        Self {
            content: Container::new(ContainerKind::Cell(CellScope::new(nest_depth))),
            vertical_alignment: VerticalAlignment::Top,
            background: None,
            border: None,
            horizontal_merge: CellMerge::None,
            vertical_merge: CellMerge::None,
        }
    }

    fn scope_mut(&mut self) -> &mut CellScope {
        match self.content.cell_scope_mut() {
            Some(scope) => scope,
            None => unreachable!("cell content is always a cell container"),
        }
    }

    /// Font applied to every non-table element of the cell.
    pub fn font(&self) -> Option<&Font> {
        self.content.cell_scope().and_then(|scope| scope.font.as_ref())
    }

    /// Set the cell font.
    pub fn set_font(&mut self, font: Font) {
        self.scope_mut().font = Some(font);
    }

    /// Text alignment of the cell.
    pub fn alignment(&self) -> Alignment {
        self.content
            .cell_scope()
            .map_or(Alignment::Left, |scope| scope.alignment)
    }

    /// Set the text alignment of the cell.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.scope_mut().alignment = alignment;
    }

    /// Set the vertical alignment.
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    /// Set the border.
    pub fn set_border(&mut self, border: Border) {
        self.border = Some(border);
    }

    /// Whether the cell continues a merge started in another cell. Word
    /// shows only the content of the first cell of a merged range.
    pub fn is_merge_continuation(&self) -> bool {
        self.horizontal_merge == CellMerge::Continue || self.vertical_merge == CellMerge::Continue
    }

    /// Nesting depth of the table owning this cell.
    pub fn nest_depth(&self) -> u32 {
        self.content.cell_scope().map_or(1, |scope| scope.nest_depth)
    }

    fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref color) = self.background {
            resources.colors.add(color);
        }
        if let Some(ref border) = self.border {
            border.collect_resources(resources);
        }
        self.content.collect_resources(resources);
    }

    /// Cell definition for the row header, ending at `right` twips.
    fn definition(&self, right: i32, resources: &Resources) -> Result<String> {
        let mut definition = String::new();
        match self.horizontal_merge {
            CellMerge::First => definition.push_str("\\clmgf"),
            CellMerge::Continue => definition.push_str("\\clmrg"),
            CellMerge::None => {}
        }
        match self.vertical_merge {
            CellMerge::First => definition.push_str("\\clvmgf"),
            CellMerge::Continue => definition.push_str("\\clvmrg"),
            CellMerge::None => {}
        }
        definition.push_str(self.vertical_alignment.control_word());
        if let Some(ref color) = self.background {
            definition.push_str(&format!("\\clcbpat{}", resources.color_index(color)?));
        }
        if let Some(ref border) = self.border {
            definition.push_str(&border.content("\\clbrdr", resources)?);
        }
        definition.push_str(&format!("\\cellx{}", right));
        Ok(definition)
    }

    fn render(&self, ctx: &mut RenderContext<'_>, nested: bool) -> Result<()> {
        ctx.stats_mut().add_cell();
        // still rendered so the row keeps one cell mark per definition
        if self.is_merge_continuation() && self.content.count_elements() > 0 {
            log::debug!(
                "Merged cell content ignored by readers ({} elements)",
                self.content.count_elements()
            );
        }
        self.content.render(ctx)?;

        // the cell mark has to sit in a paragraph of this cell's depth
        if self.content.elements().last().is_some_and(|e| e.is_table()) {
            ctx.write(&self.content.paragraph_reset())?;
        }
        ctx.write(if nested { "\\nestcell " } else { "\\cell " })
    }
}

impl Deref for Cell {
    type Target = Container;

    fn deref(&self) -> &Container {
        &self.content
    }
}

impl DerefMut for Cell {
    fn deref_mut(&mut self) -> &mut Container {
        &mut self.content
    }
}

/// A table with a grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    alignment: Alignment,
    nest_depth: u32,
    left_position: f32,
    rows: Vec<Row>,
    columns: Vec<Column>,
    cells: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table at the given nesting depth (1 = top level).
    pub fn new(alignment: Alignment, nest_depth: u32) -> Self {
        Self {
            alignment,
            nest_depth: nest_depth.max(1),
            left_position: 0.0,
            rows: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Nesting depth (1 = top level).
    pub fn nest_depth(&self) -> u32 {
        self.nest_depth
    }

    /// Row alignment on the page.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Set the left offset in centimeters.
    pub fn set_left_position(&mut self, position: f32) {
        self.left_position = position;
    }

    /// Rows of the table.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Columns of the table.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Add a row with an optional minimum height in centimeters.
    pub fn add_row(&mut self, height: Option<f32>) -> Result<()> {
        if let Some(height) = height {
            check_size("row height", height)?;
        }
        self.rows.push(Row { height });
        let depth = self.nest_depth;
        self.cells
            .push((0..self.columns.len()).map(|_| Cell::new(depth)).collect());
        Ok(())
    }

    /// Add `count` rows of the same height.
    pub fn add_rows(&mut self, count: usize, height: Option<f32>) -> Result<()> {
        for _ in 0..count {
            self.add_row(height)?;
        }
        Ok(())
    }

    /// Add a column of the given width in centimeters.
    pub fn add_column(&mut self, width: f32) -> Result<()> {
        check_size("column width", width)?;
        self.columns.push(Column { width });
        let depth = self.nest_depth;
        for row in &mut self.cells {
            row.push(Cell::new(depth));
        }
        Ok(())
    }

    /// Add one column per width, in centimeters.
    pub fn add_columns(&mut self, widths: &[f32]) -> Result<()> {
        for &width in widths {
            self.add_column(width)?;
        }
        Ok(())
    }

    /// Change the height of a row.
    pub fn set_row_height(&mut self, row: usize, height: f32) -> Result<()> {
        check_size("row height", height)?;
        let count = self.rows.len();
        let r = index(row, count).ok_or(Error::RowOutOfRange(row, count))?;
        self.rows[r].height = Some(height);
        Ok(())
    }

    /// Change the width of a column.
    pub fn set_column_width(&mut self, column: usize, width: f32) -> Result<()> {
        check_size("column width", width)?;
        let count = self.columns.len();
        let c = index(column, count).ok_or(Error::ColumnOutOfRange(column, count))?;
        self.columns[c].width = width;
        Ok(())
    }

    /// Get a cell by 1-based row and column.
    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell> {
        let (r, c) = self.position(row, column)?;
        Ok(&self.cells[r][c])
    }

    /// Get a mutable cell by 1-based row and column.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell> {
        let (r, c) = self.position(row, column)?;
        Ok(&mut self.cells[r][c])
    }

    /// Apply `f` to every cell of an inclusive range.
    pub fn for_cell_range(
        &mut self,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
        mut f: impl FnMut(&mut Cell),
    ) -> Result<()> {
        let (r0, c0, r1, c1) = self.range(start_row, start_column, end_row, end_column)?;
        for row in &mut self.cells[r0..=r1] {
            for cell in &mut row[c0..=c1] {
                f(cell);
            }
        }
        Ok(())
    }

    /// Set the font of every cell in a range.
    pub fn set_font_for_cell_range(
        &mut self,
        font: &Font,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Result<()> {
        self.for_cell_range(start_row, start_column, end_row, end_column, |cell| {
            cell.set_font(font.clone())
        })
    }

    /// Set the background of every cell in a range.
    pub fn set_background_for_cell_range(
        &mut self,
        color: &Color,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Result<()> {
        self.for_cell_range(start_row, start_column, end_row, end_column, |cell| {
            cell.set_background(color.clone())
        })
    }

    /// Set the border of every cell in a range.
    pub fn set_border_for_cell_range(
        &mut self,
        border: &Border,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Result<()> {
        self.for_cell_range(start_row, start_column, end_row, end_column, |cell| {
            cell.set_border(border.clone())
        })
    }

    /// Merge an inclusive range of cells into one.
    pub fn merge_cells(
        &mut self,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Result<()> {
        let (r0, c0, r1, c1) = self.range(start_row, start_column, end_row, end_column)?;
        if r0 == r1 && c0 == c1 {
            return Err(Error::InvalidMergeRange(format!(
                "({}, {}) is a single cell",
                start_row, start_column
            )));
        }

        for (r, row) in self.cells.iter_mut().enumerate().take(r1 + 1).skip(r0) {
            for (c, cell) in row.iter_mut().enumerate().take(c1 + 1).skip(c0) {
                if c0 != c1 {
                    cell.horizontal_merge = if c == c0 {
                        CellMerge::First
                    } else {
                        CellMerge::Continue
                    };
                }
                if r0 != r1 {
                    cell.vertical_merge = if r == r0 {
                        CellMerge::First
                    } else {
                        CellMerge::Continue
                    };
                }
            }
        }
        Ok(())
    }

    fn position(&self, row: usize, column: usize) -> Result<(usize, usize)> {
        let out_of_range =
            || Error::CellOutOfRange(row, column, self.rows.len(), self.columns.len());
        let r = index(row, self.rows.len()).ok_or_else(out_of_range)?;
        let c = index(column, self.columns.len()).ok_or_else(out_of_range)?;
        Ok((r, c))
    }

    fn range(
        &self,
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Result<(usize, usize, usize, usize)> {
        let (r0, c0) = self.position(start_row, start_column)?;
        let (r1, c1) = self.position(end_row, end_column)?;
        if r0 > r1 || c0 > c1 {
            return Err(Error::InvalidMergeRange(format!(
                "({}, {}) to ({}, {}) is inverted",
                start_row, start_column, end_row, end_column
            )));
        }
        Ok((r0, c0, r1, c1))
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        for cell in self.cells.iter().flatten() {
            cell.collect_resources(resources);
        }
    }

    /// Row header: `\trowd`, row properties and the cell definitions.
    fn row_definition(&self, row: usize, resources: &Resources) -> Result<String> {
        let mut definition = format!(
            "\\trowd\\trgaph{}{}",
            CELL_GAP,
            self.alignment.row_control_word()
        );
        let left = cm_to_twips(self.left_position);
        if left != 0 {
            definition.push_str(&format!("\\trleft{}", left));
        }
        if let Some(height) = self.rows[row].height {
            definition.push_str(&format!("\\trrh{}", cm_to_twips(height)));
        }

        let mut right = left;
        for (column, cell) in self.columns.iter().zip(&self.cells[row]) {
            right += cm_to_twips(column.width);
            definition.push(' ');
            definition.push_str(&cell.definition(right, resources)?);
        }
        Ok(definition)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.stats_mut().add_table();
        if self.is_empty() {
            log::warn!(
                "Skipping table with {} rows and {} columns",
                self.rows.len(),
                self.columns.len()
            );
            return Ok(());
        }

        let nested = self.nest_depth > 1;
        log::debug!(
            "Rendering {}x{} table at depth {}",
            self.rows.len(),
            self.columns.len(),
            self.nest_depth
        );

        for (row, cells) in self.cells.iter().enumerate() {
            let definition = self.row_definition(row, ctx.resources())?;
            if !nested {
                ctx.write(&definition)?;
                ctx.write("\r\n")?;
            }

            for cell in cells {
                cell.render(ctx, nested)?;
            }

            if nested {
                ctx.write("{\\*\\nesttableprops ")?;
                ctx.write(&definition)?;
                ctx.write("\\nestrow}{\\nonesttables\\par}\r\n")?;
            } else {
                ctx.write("\\row\r\n")?;
            }
        }

        if !nested {
            ctx.write(PARAGRAPH_END)?;
        }
        Ok(())
    }
}

/// Leaves the table paragraph properties after a top level table.
const PARAGRAPH_END: &str = "\\pard ";

/// Convert a 1-based position into an index below `len`.
fn index(position: usize, len: usize) -> Option<usize> {
    (position >= 1 && position <= len).then(|| position - 1)
}

fn check_size(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension(format!("{} {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BorderLine, ParFormat};

    fn table_2x2() -> Table {
        let mut table = Table::new(Alignment::Left, 1);
        table.add_rows(2, None).unwrap();
        table.add_columns(&[2.0, 3.0]).unwrap();
        table
    }

    fn render(table: &Table) -> String {
        let mut resources = Resources::default();
        table.collect_resources(&mut resources);
        let mut out = String::new();
        let mut ctx = RenderContext::new(&mut out, &resources);
        table.render(&mut ctx).unwrap();
        drop(ctx);
        out
    }

    #[test]
    fn test_grid_grows_with_rows_and_columns() {
        let mut table = Table::new(Alignment::Center, 1);
        table.add_column(2.0).unwrap();
        table.add_rows(3, Some(1.0)).unwrap();
        table.add_column(4.0).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert!(table.cell(3, 2).is_ok());
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut table = table_2x2();
        assert!(matches!(
            table.cell(3, 1),
            Err(Error::CellOutOfRange(3, 1, 2, 2))
        ));
        assert!(table.cell(0, 1).is_err());
        assert!(table.cell_mut(1, 5).is_err());
        assert!(matches!(
            table.set_row_height(9, 1.0),
            Err(Error::RowOutOfRange(9, 2))
        ));
        assert!(matches!(
            table.set_column_width(0, 1.0),
            Err(Error::ColumnOutOfRange(0, 2))
        ));
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut table = Table::new(Alignment::Left, 1);
        assert!(matches!(
            table.add_column(0.0),
            Err(Error::InvalidDimension(_))
        ));
        assert!(table.add_row(Some(-1.0)).is_err());
    }

    #[test]
    fn test_render_rows() {
        let mut table = table_2x2();
        table.cell_mut(1, 1).unwrap().write_text("A");
        table.cell_mut(2, 2).unwrap().write_text("D");

        let out = render(&table);
        assert!(out.starts_with(
            "\\trowd\\trgaph108\\trql \\clvertalt\\cellx1134 \\clvertalt\\cellx2835\r\n\
             \\pard \\intbl\\itap1 \\ql A\\cell "
        ));
        assert_eq!(out.matches("\\row\r\n").count(), 2);
        assert_eq!(out.matches("\\cell ").count(), 4);
        assert!(out.contains("\\pard \\intbl\\itap1 \\ql D\\cell \\row\r\n"));
        assert!(out.ends_with("\\row\r\n\\pard "));
    }

    #[test]
    fn test_render_nested_table() {
        let mut table = Table::new(Alignment::Left, 1);
        table.add_row(None).unwrap();
        table.add_column(5.0).unwrap();

        let cell = table.cell_mut(1, 1).unwrap();
        let inner = cell.add_table(Alignment::Left);
        assert_eq!(inner.nest_depth(), 2);
        inner.add_row(None).unwrap();
        inner.add_column(2.0).unwrap();
        inner.cell_mut(1, 1).unwrap().write_text("inner");

        let out = render(&table);
        assert!(out.contains("\\pard \\intbl\\itap2 \\ql inner\\nestcell "));
        assert!(out.contains(
            "{\\*\\nesttableprops \\trowd\\trgaph108\\trql \\clvertalt\\cellx1134\\nestrow}{\\nonesttables\\par}\r\n"
        ));
        // the outer cell mark follows the nested table at depth 1
        assert!(out.contains("\\pard \\intbl\\itap1 \\cell \\row"));
    }

    #[test]
    fn test_merge_cells() {
        let mut table = table_2x2();
        table.merge_cells(1, 1, 1, 2).unwrap();
        assert_eq!(table.cell(1, 1).unwrap().horizontal_merge, CellMerge::First);
        assert_eq!(
            table.cell(1, 2).unwrap().horizontal_merge,
            CellMerge::Continue
        );
        assert_eq!(table.cell(1, 1).unwrap().vertical_merge, CellMerge::None);

        table.merge_cells(1, 1, 2, 1).unwrap();
        assert_eq!(table.cell(2, 1).unwrap().vertical_merge, CellMerge::Continue);

        assert!(!table.cell(1, 1).unwrap().is_merge_continuation());
        assert!(table.cell(1, 2).unwrap().is_merge_continuation());
        assert!(table.cell(2, 1).unwrap().is_merge_continuation());
        assert!(!table.cell(2, 2).unwrap().is_merge_continuation());

        // continuation content is still written, one cell mark per definition
        table.cell_mut(1, 2).unwrap().write_text("hidden");
        let out = render(&table);
        assert!(out.contains("\\clmgf\\clvmgf\\clvertalt\\cellx1134"));
        assert!(out.contains("\\clmrg\\clvertalt\\cellx2835"));
        assert!(out.contains("hidden\\cell "));
        assert_eq!(out.matches("\\cell ").count(), 4);
    }

    #[test]
    fn test_invalid_merge() {
        let mut table = table_2x2();
        assert!(matches!(
            table.merge_cells(2, 2, 1, 1),
            Err(Error::InvalidMergeRange(_))
        ));
        assert!(matches!(
            table.merge_cells(1, 1, 1, 1),
            Err(Error::InvalidMergeRange(_))
        ));
        assert!(matches!(
            table.merge_cells(1, 1, 3, 3),
            Err(Error::CellOutOfRange(..))
        ));
    }

    #[test]
    fn test_cell_appearance() {
        let mut table = table_2x2();
        let red = Color::from_hex("#FF0000").unwrap();
        table
            .set_background_for_cell_range(&red, 1, 1, 1, 2)
            .unwrap();
        table
            .set_border_for_cell_range(&Border::all(BorderLine::new(0.5).unwrap()), 2, 2, 2, 2)
            .unwrap();
        table
            .set_font_for_cell_range(&Font::new(9.0, "Arial").unwrap(), 1, 1, 2, 2)
            .unwrap();
        let cell = table.cell_mut(2, 1).unwrap();
        cell.set_vertical_alignment(VerticalAlignment::Bottom);
        cell.set_alignment(Alignment::Right);
        assert_eq!(cell.alignment(), Alignment::Right);
        assert!(cell.font().is_some());

        let out = render(&table);
        assert!(out.contains("\\clvertalt\\clcbpat2\\cellx1134"));
        assert!(out.contains("\\clvertalb\\cellx1134"));
        assert!(out.contains("\\clbrdrt\\brdrs\\brdrw10"));
        assert!(out.contains(
            "\\pard \\intbl\\itap1 \\qr \\pard \\intbl\\itap1 \\ql {\\fs18\\f1 \\par }"
        ));
    }

    #[test]
    fn test_formatted_paragraphs_in_cell() {
        let mut table = table_2x2();
        let cell = table.cell_mut(1, 1).unwrap();
        cell.write_text_with("one", None, Some(ParFormat::new(Alignment::Center)));
        cell.write_text_with("two", None, Some(ParFormat::new(Alignment::Right)));

        let out = render(&table);
        assert!(out.contains(
            "\\pard \\intbl\\itap1 {\\qc one\\par }\\pard \\intbl\\itap1 \\qr two\\cell "
        ));
        assert_eq!(out.matches('{').count(), out.matches('}').count());
    }

    #[test]
    fn test_row_options() {
        let mut table = Table::new(Alignment::Right, 1);
        table.set_left_position(1.0);
        table.add_row(Some(0.5)).unwrap();
        table.add_column(1.0).unwrap();

        let out = render(&table);
        assert!(out.starts_with("\\trowd\\trgaph108\\trqr\\trleft567\\trrh284 \\clvertalt\\cellx1134"));
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let table = Table::new(Alignment::Left, 1);
        assert!(table.is_empty());
        assert_eq!(render(&table), "");
    }
}
