//! Text-like elements: text runs, empty paragraphs and hyperlinks.

use crate::error::Result;
use crate::model::{Font, ParFormat, Resources};
use crate::render::RenderContext;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A run of text with optional character and paragraph formatting.
///
/// Without a paragraph format the text continues the current paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// The text content
    pub text: String,

    /// Character formatting
    pub font: Option<Font>,

    /// Paragraph formatting; `None` continues the previous paragraph
    pub par_format: Option<ParFormat>,

    /// Convert HTML-like tags (`<b>`, `<br>`, ...) to RTF control words
    pub convert_tags: bool,
}

impl Text {
    /// Create unformatted text with tag conversion enabled.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            par_format: None,
            convert_tags: true,
        }
    }

    /// Set the font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the paragraph format.
    pub fn with_par_format(mut self, par_format: ParFormat) -> Self {
        self.par_format = Some(par_format);
        self
    }

    /// Write tags literally instead of converting them.
    pub fn without_tag_conversion(mut self) -> Self {
        self.convert_tags = false;
        self
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref font) = self.font {
            font.collect_resources(resources);
        }
        if let Some(ref par_format) = self.par_format {
            par_format.collect_resources(resources);
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let body = format_text(&self.text, self.convert_tags);
        write_in_font(ctx, self.font.as_ref(), &body)
    }
}

/// A paragraph without text, used as vertical spacing.
///
/// It terminates its own paragraph, so no separator follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyParagraph {
    /// Character formatting (affects the line height)
    pub font: Option<Font>,

    /// Paragraph formatting
    pub par_format: ParFormat,
}

impl EmptyParagraph {
    /// Create an empty paragraph; a missing format defaults to left aligned.
    pub fn new(font: Option<Font>, par_format: Option<ParFormat>) -> Self {
        Self {
            font,
            par_format: par_format.unwrap_or_default(),
        }
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref font) = self.font {
            font.collect_resources(resources);
        }
        self.par_format.collect_resources(resources);
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some(ref font) = self.font {
            let content = font.content(ctx.resources())?;
            ctx.write(&content)?;
            ctx.write(font.closing_content())?;
        }
        ctx.write("\\par ")
    }
}

impl Default for EmptyParagraph {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A hyperlink field.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    /// Target URL
    pub url: String,

    /// Displayed text; falls back to the URL when empty
    pub text: String,

    /// Character formatting of the displayed text
    pub font: Option<Font>,

    /// Paragraph formatting
    pub par_format: Option<ParFormat>,
}

impl Hyperlink {
    /// Create a hyperlink.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            font: None,
            par_format: None,
        }
    }

    /// Set the font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the paragraph format.
    pub fn with_par_format(mut self, par_format: ParFormat) -> Self {
        self.par_format = Some(par_format);
        self
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref font) = self.font {
            font.collect_resources(resources);
        }
        if let Some(ref par_format) = self.par_format {
            par_format.collect_resources(resources);
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let url = escape_text(&self.url).replace('"', "%22");
        let shown = if self.text.is_empty() {
            escape_text(&self.url)
        } else {
            format_text(&self.text, true)
        };

        ctx.write(&format!(
            "{{\\field{{\\*\\fldinst {{HYPERLINK \"{}\"}}}}{{\\fldrslt {{",
            url
        ))?;
        write_in_font(ctx, self.font.as_ref(), &shown)?;
        ctx.write("}}}")
    }
}

/// Write `body`, wrapped in the font scope when a font is given.
pub(crate) fn write_in_font(
    ctx: &mut RenderContext<'_>,
    font: Option<&Font>,
    body: &str,
) -> Result<()> {
    match font {
        Some(font) => {
            let content = font.content(ctx.resources())?;
            ctx.write(&content)?;
            ctx.write(body)?;
            ctx.write(font.closing_content())
        }
        None => ctx.write(body),
    }
}

/// Escape RTF special characters and encode non-ASCII as `\uN?`.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            c if c.is_ascii() => escaped.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // \u takes a signed 16-bit value
                    escaped.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    escaped
}

fn paired_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<\s*(/?)\s*(b|strong|i|em|u)\s*>").expect("valid tag regex")
    })
}

fn single_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)<\s*(br|line|tab|page|sect|chdate|chdpl|chdpa|chtime|chpgn|pagenum|sectnum)\s*/?\s*>",
        )
        .expect("valid tag regex")
    })
}

/// Escape text and, if requested, convert HTML-like tags and line breaks.
pub fn format_text(text: &str, convert_tags: bool) -> String {
    let escaped = escape_text(text);
    if !convert_tags {
        return escaped;
    }

    let converted = paired_tag_regex().replace_all(&escaped, |caps: &Captures| {
        let closing = !caps[1].is_empty();
        let word = match caps[2].to_ascii_lowercase().as_str() {
            "b" | "strong" => "\\b",
            "i" | "em" => "\\i",
            _ => "\\ul",
        };
        if closing {
            if word == "\\ul" {
                "\\ulnone ".to_string()
            } else {
                format!("{}0 ", word)
            }
        } else {
            format!("{} ", word)
        }
    });

    let converted = single_tag_regex().replace_all(&converted, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "br" | "line" => "\\line ",
            "tab" => "\\tab ",
            "page" => "\\page ",
            "sect" => "\\sect ",
            "chdate" => "\\chdate ",
            "chdpl" => "\\chdpl ",
            "chdpa" => "\\chdpa ",
            "chtime" => "\\chtime ",
            "chpgn" | "pagenum" => "\\chpgn ",
            _ => "\\sectnum ",
        }
        .to_string()
    });

    converted.replace("\r\n", "\\line ").replace('\n', "\\line ")
}
