//! Documents: sections, headers, footers and the RTF head.
//!
//! A [`Document`] renders in two passes. The first collects every font
//! and color used anywhere into the head tables; the second streams the
//! head and all containers into a [`Sink`].
//!
//! # Example
//!
//! ```
//! use rtfcraft::document::{Document, HeaderKind};
//!
//! let mut doc = Document::new();
//! doc.add_header(HeaderKind::All).write_text("Report");
//! doc.add_section().write_text("Hello");
//!
//! let rtf = doc.to_rtf_string()?;
//! assert!(rtf.starts_with("{\\rtf1\\ansi"));
//! assert!(rtf.contains("{\\header"));
//! # Ok::<(), rtfcraft::Error>(())
//! ```

mod header;
mod info;
mod options;
mod section;

pub use header::HeaderKind;
pub use info::DocumentInfo;
pub use options::{DocumentOptions, Margins, NoteNumbering, NoteSettings, PaperSize};
pub use section::Section;

use crate::container::{Container, ContainerKind};
use crate::error::Result;
use crate::model::Resources;
use crate::render::{RenderContext, RenderStats, Sink, StreamSink};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// An RTF document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    options: DocumentOptions,
    info: DocumentInfo,
    sections: Vec<Section>,
    headers: Vec<Container>,
    footers: Vec<Container>,
}

impl Document {
    /// Create an empty document with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given options.
    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Document options.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Mutable document options.
    pub fn options_mut(&mut self) -> &mut DocumentOptions {
        &mut self.options
    }

    /// Document metadata.
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Mutable document metadata.
    pub fn info_mut(&mut self) -> &mut DocumentInfo {
        &mut self.info
    }

    /// Set footnote and endnote numbering.
    pub fn set_note_settings(&mut self, notes: NoteSettings) {
        self.options.notes = notes;
    }

    /// Append a new section.
    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::new());
        let index = self.sections.len() - 1;
        &mut self.sections[index]
    }

    /// Sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Add a header. Adding a second header of the same kind replaces the first.
    pub fn add_header(&mut self, kind: HeaderKind) -> &mut Container {
        replace_or_push(&mut self.headers, ContainerKind::Header(kind))
    }

    /// Add a footer. Adding a second footer of the same kind replaces the first.
    pub fn add_footer(&mut self, kind: HeaderKind) -> &mut Container {
        replace_or_push(&mut self.footers, ContainerKind::Footer(kind))
    }

    /// Headers followed by footers.
    fn page_containers(&self) -> impl Iterator<Item = &Container> {
        self.headers.iter().chain(self.footers.iter())
    }

    /// Collect fonts and colors of every container.
    pub fn collect_resources(&self) -> Resources {
        let mut resources = Resources::with_default_font(&self.options.default_font_family);
        for container in self.page_containers() {
            container.collect_resources(&mut resources);
        }
        for section in &self.sections {
            section.collect_resources(&mut resources);
        }
        log::debug!(
            "Collected {} fonts and {} colors",
            resources.fonts.len(),
            resources.colors.len()
        );
        resources
    }

    /// Render the document into `sink`.
    pub fn render(&self, sink: &mut dyn Sink) -> Result<()> {
        self.render_with_stats(sink).map(|_| ())
    }

    /// Render the document into `sink` and return statistics.
    pub fn render_with_stats(&self, sink: &mut dyn Sink) -> Result<RenderStats> {
        let resources = self.collect_resources();
        let mut ctx = RenderContext::new(sink, &resources);

        self.render_head(&mut ctx)?;

        let fallback;
        let sections: &[Section] = if self.sections.is_empty() {
            fallback = [Section::new()];
            &fallback
        } else {
            &self.sections
        };

        let body_reset = self.body_reset();
        for (index, section) in sections.iter().enumerate() {
            ctx.stats_mut().add_section();
            if index > 0 {
                ctx.write("\\sect")?;
            }
            ctx.write("\\sectd")?;
            ctx.write(&section.format_content())?;
            ctx.write("\r\n")?;

            if index == 0 {
                self.render_page_containers(&mut ctx)?;
            }

            ctx.write(&body_reset)?;
            section.render(&mut ctx)?;
            ctx.write("\r\n")?;
        }

        ctx.write("}")?;

        let stats = ctx.into_stats();
        log::debug!(
            "Rendered {} sections, {} elements, {} bytes",
            stats.section_count,
            stats.element_count,
            stats.bytes
        );
        Ok(stats)
    }

    /// Render the document into a string.
    pub fn to_rtf_string(&self) -> Result<String> {
        let mut out = String::new();
        self.render(&mut out)?;
        Ok(out)
    }

    /// Render the document into a file.
    ///
    /// The file is created before rendering starts. If rendering or
    /// writing fails, the file is left holding the prefix written so far
    /// and must be discarded by the caller.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<RenderStats> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut sink = StreamSink::new(BufWriter::new(file));
        let stats = self.render_with_stats(&mut sink)?;
        sink.into_inner()?;
        log::info!("Saved {} ({} bytes)", path.display(), stats.bytes);
        Ok(stats)
    }

    /// Render the document and write it to a file asynchronously.
    ///
    /// Rendering completes in memory first, so a render failure leaves
    /// the file untouched.
    #[cfg(feature = "async")]
    pub async fn save_async<P: AsRef<Path>>(&self, path: P) -> Result<RenderStats> {
        let mut out = String::new();
        let stats = self.render_with_stats(&mut out)?;
        tokio::fs::write(path.as_ref(), out).await?;
        log::info!("Saved {} ({} bytes)", path.as_ref().display(), stats.bytes);
        Ok(stats)
    }

    fn render_head(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let resources = ctx.resources();
        ctx.write("{\\rtf1\\ansi\\ansicpg1252\\deff0\r\n")?;
        ctx.write(&resources.fonts.content())?;
        ctx.write(&resources.colors.content())?;
        ctx.write(&self.info.content())?;

        ctx.write(&self.options.page_setup_content())?;
        ctx.write(&self.options.notes.content())?;

        let facing = self.options.facing_pages
            || self
                .page_containers()
                .any(|c| page_kind(c).is_some_and(HeaderKind::needs_facing_pages));
        if facing {
            ctx.write("\\facingp")?;
        }
        if self
            .page_containers()
            .any(|c| page_kind(c) == Some(HeaderKind::First))
        {
            ctx.write("\\titlepg")?;
        }
        ctx.write("\r\n")
    }

    fn render_page_containers(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let body_reset = self.body_reset();
        for container in self.page_containers() {
            if let Some(destination) = header::destination(container) {
                ctx.write(&format!("{{{}", destination))?;
                ctx.write(&body_reset)?;
                container.render(ctx)?;
                ctx.write("\\par}\r\n")?;
            }
        }
        Ok(())
    }

    /// Paragraph and character reset to the document defaults.
    fn body_reset(&self) -> String {
        let half_points = (self.options.default_font_size * 2.0).round() as u32;
        format!("\\pard\\plain\\fs{} ", half_points)
    }
}

fn page_kind(container: &Container) -> Option<HeaderKind> {
    match container.kind() {
        ContainerKind::Header(kind) | ContainerKind::Footer(kind) => Some(*kind),
        _ => None,
    }
}

fn replace_or_push(containers: &mut Vec<Container>, kind: ContainerKind) -> &mut Container {
    let index = match containers.iter().position(|c| c.kind() == &kind) {
        Some(index) => {
            log::debug!("Replacing existing {:?}", kind);
            containers[index] = Container::new(kind);
            index
        }
        None => {
            containers.push(Container::new(kind));
            containers.len() - 1
        }
    };
    &mut containers[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Alignment, Color, Font, ParFormat};

    #[test]
    fn test_empty_document() {
        let rtf = Document::new().to_rtf_string().unwrap();
        assert_eq!(
            rtf,
            "{\\rtf1\\ansi\\ansicpg1252\\deff0\r\n\
             {\\fonttbl{\\f0\\fnil\\fcharset0 Times New Roman;}}\r\n\
             {\\colortbl;\\red0\\green0\\blue0;}\r\n\
             \\paperw11907\\paperh16840\\margl1701\\margr1701\\margt567\\margb1134\
             \\fet2\\ftnbj\\aenddoc\\ftnnar\\aftnnrlc\\ftnstart1\\aftnstart1\r\n\
             \\sectd\r\n\
             \\pard\\plain\\fs20 \\pard \\ql \\par \r\n}"
        );
    }

    #[test]
    fn test_sections_are_separated() {
        let mut doc = Document::new();
        doc.add_section().write_text("One");
        let second = doc.add_section();
        second.set_columns(2);
        second.write_text("Two");

        let rtf = doc.to_rtf_string().unwrap();
        assert!(rtf.contains("\\sectd\r\n\\pard\\plain\\fs20 One\r\n\\sect\\sectd\\cols2\r\n"));
        assert!(rtf.ends_with("Two\r\n}"));
    }

    #[test]
    fn test_headers_and_footers() {
        let mut doc = Document::new();
        doc.add_header(HeaderKind::Left).write_text("Left");
        doc.add_footer(HeaderKind::First).write_text("Cover");
        doc.add_section().write_text("Body");

        let rtf = doc.to_rtf_string().unwrap();
        assert!(rtf.contains("\\facingp\\titlepg\r\n"));
        assert!(rtf.contains("{\\headerl\\pard\\plain\\fs20 Left\\par}\r\n"));
        assert!(rtf.contains("{\\footerf\\pard\\plain\\fs20 Cover\\par}\r\n"));

        let header_pos = rtf.find("\\headerl").unwrap();
        let body_pos = rtf.find("Body").unwrap();
        assert!(header_pos < body_pos);
    }

    #[test]
    fn test_header_replaced() {
        let mut doc = Document::new();
        doc.add_header(HeaderKind::All).write_text("Old");
        doc.add_header(HeaderKind::All).write_text("New");

        let rtf = doc.to_rtf_string().unwrap();
        assert!(!rtf.contains("Old"));
        assert!(rtf.contains("New"));
        assert!(!rtf.contains("\\facingp"));
    }

    #[test]
    fn test_resources_from_all_containers() {
        let red = Color::from_hex("#FF0000").unwrap();
        let mut doc = Document::with_options(DocumentOptions::new().with_default_font("Arial", 11.0));
        doc.add_footer(HeaderKind::All).write_text_with(
            "Page",
            Some(Font::new(9.0, "Verdana").unwrap().with_color(red.clone())),
            None,
        );
        doc.add_section().write_text_with(
            "Body",
            None,
            Some(ParFormat::new(Alignment::Justify)),
        );

        let resources = doc.collect_resources();
        assert_eq!(resources.fonts.index_of("Arial"), Some(0));
        assert_eq!(resources.fonts.index_of("Verdana"), Some(1));
        assert_eq!(resources.colors.index_of(&red), Some(2));

        let rtf = doc.to_rtf_string().unwrap();
        assert!(rtf.contains("\\pard\\plain\\fs22 "));
        assert!(rtf.contains("{\\fs18\\f1\\cf2 Page}"));
    }

    #[test]
    fn test_render_stats() {
        let mut doc = Document::new();
        let section = doc.add_section();
        section.write_text("a");
        section.write_text_with("b", None, Some(ParFormat::default()));

        let mut out = String::new();
        let stats = doc.render_with_stats(&mut out).unwrap();
        assert_eq!(stats.section_count, 1);
        assert_eq!(stats.element_count, 2);
        assert_eq!(stats.separator_count, 1);
        assert_eq!(stats.bytes, out.len() as u64);
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rtf");

        let mut doc = Document::new();
        doc.add_section().write_text("Saved");
        let stats = doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_rtf_string().unwrap());
        assert_eq!(stats.bytes, written.len() as u64);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.rtf");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();

        let doc = Document::new();
        doc.save(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            doc.to_rtf_string().unwrap()
        );
    }

    #[test]
    fn test_save_to_missing_directory() {
        let doc = Document::new();
        assert!(matches!(
            doc.save("/nonexistent/dir/out.rtf"),
            Err(Error::Io(_))
        ));
    }
}
