//! Render statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected during a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of sections rendered
    pub section_count: u32,

    /// Number of elements rendered, at any depth
    pub element_count: u32,

    /// Number of text-like elements (text, raw code, hyperlinks, empty paragraphs)
    pub paragraph_count: u32,

    /// Number of tables rendered, nested ones included
    pub table_count: u32,

    /// Number of table cells rendered
    pub cell_count: u32,

    /// Number of images rendered
    pub image_count: u32,

    /// Number of footnotes and endnotes
    pub note_count: u32,

    /// Number of paragraph-break separators inserted between elements
    pub separator_count: u32,

    /// Bytes of markup written
    pub bytes: u64,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Increment element count.
    pub fn add_element(&mut self) {
        self.element_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment cell count.
    pub fn add_cell(&mut self) {
        self.cell_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment note count.
    pub fn add_note(&mut self) {
        self.note_count += 1;
    }

    /// Increment separator count.
    pub fn add_separator(&mut self) {
        self.separator_count += 1;
    }

    /// Merge statistics from another pass.
    pub fn merge(&mut self, other: &RenderStats) {
        self.section_count += other.section_count;
        self.element_count += other.element_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.cell_count += other.cell_count;
        self.image_count += other.image_count;
        self.note_count += other.note_count;
        self.separator_count += other.separator_count;
        self.bytes += other.bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = RenderStats::new();
        assert_eq!(stats.element_count, 0);
        assert_eq!(stats.bytes, 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.add_table();
        stats1.add_separator();
        stats1.bytes = 10;

        let mut stats2 = RenderStats::new();
        stats2.add_table();
        stats2.add_image();
        stats2.bytes = 5;

        stats1.merge(&stats2);

        assert_eq!(stats1.table_count, 2);
        assert_eq!(stats1.image_count, 1);
        assert_eq!(stats1.separator_count, 1);
        assert_eq!(stats1.bytes, 15);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = RenderStats::new();
        stats.add_note();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"note_count\":1"));
    }
}
