//! Footnotes and endnotes.

use super::text::{format_text, write_in_font};
use crate::error::Result;
use crate::model::{Font, ParFormat, Resources};
use crate::render::RenderContext;
use serde::{Deserialize, Serialize};

/// Whether a note is placed at the page bottom or the document end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Note at the bottom of the page
    Footnote,
    /// Note at the end of the document
    Endnote,
}

/// A footnote or endnote anchored at its position in the text.
///
/// A paragraph format starts a new paragraph for the anchor in the
/// container and is repeated for the note text inside the note group.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Footnote or endnote
    pub kind: NoteKind,

    /// Note text
    pub text: String,

    /// Character formatting of the note text
    pub font: Option<Font>,

    /// Paragraph formatting of the note text
    pub par_format: Option<ParFormat>,

    /// Character formatting of the reference mark in the body
    pub reference_font: Option<Font>,
}

impl Note {
    /// Create a footnote.
    pub fn footnote(text: impl Into<String>) -> Self {
        Self::new(NoteKind::Footnote, text)
    }

    /// Create an endnote.
    pub fn endnote(text: impl Into<String>) -> Self {
        Self::new(NoteKind::Endnote, text)
    }

    fn new(kind: NoteKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            font: None,
            par_format: None,
            reference_font: None,
        }
    }

    /// Set the font of the note text.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the paragraph format of the note text.
    pub fn with_par_format(mut self, par_format: ParFormat) -> Self {
        self.par_format = Some(par_format);
        self
    }

    /// Set the font of the reference mark.
    pub fn set_reference_font(&mut self, font: Font) {
        self.reference_font = Some(font);
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        for font in self.font.iter().chain(self.reference_font.iter()) {
            font.collect_resources(resources);
        }
        if let Some(ref par_format) = self.par_format {
            par_format.collect_resources(resources);
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.stats_mut().add_note();

        write_in_font(ctx, self.reference_font.as_ref(), "{\\super\\chftn}")?;

        ctx.write("{\\footnote")?;
        if self.kind == NoteKind::Endnote {
            ctx.write("\\ftnalt")?;
        }
        ctx.write("\\pard\\plain ")?;
        if let Some(ref par_format) = self.par_format {
            let content = par_format.content(ctx.resources())?;
            ctx.write(&content)?;
        }
        ctx.write("{\\super\\chftn} ")?;
        write_in_font(ctx, self.font.as_ref(), &format_text(&self.text, true))?;
        ctx.write("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Alignment;

    fn render(note: &Note, resources: &Resources) -> String {
        let mut out = String::new();
        let mut ctx = RenderContext::new(&mut out, resources);
        note.render(&mut ctx).unwrap();
        assert_eq!(ctx.stats().note_count, 1);
        drop(ctx);
        out
    }

    #[test]
    fn test_footnote_render() {
        let note = Note::footnote("See appendix");
        assert_eq!(
            render(&note, &Resources::default()),
            "{\\super\\chftn}{\\footnote\\pard\\plain {\\super\\chftn} See appendix}"
        );
    }

    #[test]
    fn test_endnote_render() {
        let note = Note::endnote("Source").with_par_format(ParFormat::new(Alignment::Justify));
        let out = render(&note, &Resources::default());
        assert!(out.starts_with("{\\super\\chftn}{\\footnote\\ftnalt\\pard\\plain \\qj "));
        assert!(out.ends_with("Source}"));
    }

    #[test]
    fn test_note_fonts() {
        let mut note = Note::footnote("x").with_font(Font::new(8.0, "Arial").unwrap());
        note.set_reference_font(Font::default().bold());

        let mut resources = Resources::default();
        note.collect_resources(&mut resources);
        let out = render(&note, &resources);

        assert!(out.starts_with("{\\fs24\\f0\\b {\\super\\chftn}}"));
        assert!(out.contains("{\\fs16\\f1 x}"));
    }
}
