//! Embedded pictures.

use crate::detect::{detect_format_from_bytes, image_dimensions, ImageFormat};
use crate::error::{Error, Result};
use crate::model::{cm_to_twips, ParFormat, Resources};
use crate::render::RenderContext;
use std::path::Path;

/// Twips per pixel at 96 dpi.
const TWIPS_PER_PIXEL: u32 = 15;

/// Largest pixel dimension whose natural size fits an RTF numeric parameter.
const MAX_PIXEL_DIMENSION: u32 = i32::MAX as u32 / TWIPS_PER_PIXEL;

/// Hex digits per line of picture data.
const HEX_LINE_WIDTH: usize = 128;

/// A PNG or JPEG picture embedded in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<u8>,
    format: ImageFormat,
    pixel_width: u32,
    pixel_height: u32,
    width: Option<f32>,
    height: Option<f32>,

    /// Paragraph formatting; `None` keeps the image in the current paragraph
    pub par_format: Option<ParFormat>,
}

impl Image {
    /// Load an image file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!(
            "Loaded image {} ({} bytes)",
            path.as_ref().display(),
            data.len()
        );
        Self::from_bytes(data)
    }

    /// Create an image from PNG or JPEG bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = detect_format_from_bytes(&data)?;
        let (pixel_width, pixel_height) = image_dimensions(&data, format)?;
        if pixel_width == 0 || pixel_height == 0 {
            return Err(Error::InvalidImage(format!(
                "{} image has zero size",
                format
            )));
        }
        if pixel_width > MAX_PIXEL_DIMENSION || pixel_height > MAX_PIXEL_DIMENSION {
            return Err(Error::InvalidImage(format!(
                "{} image of {}x{} pixels is too large",
                format, pixel_width, pixel_height
            )));
        }

        Ok(Self {
            data,
            format,
            pixel_width,
            pixel_height,
            width: None,
            height: None,
            par_format: None,
        })
    }

    /// Detected format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Set the displayed width in centimeters.
    pub fn set_width(&mut self, width: f32) -> Result<()> {
        self.width = Some(check_size("width", width)?);
        Ok(())
    }

    /// Set the displayed height in centimeters.
    pub fn set_height(&mut self, height: f32) -> Result<()> {
        self.height = Some(check_size("height", height)?);
        Ok(())
    }

    /// Set the paragraph format.
    pub fn set_par_format(&mut self, par_format: ParFormat) {
        self.par_format = Some(par_format);
    }

    /// Displayed size in twips. A single given dimension keeps the aspect ratio.
    pub fn goal_size(&self) -> (u32, u32) {
        let natural_w = self.pixel_width * TWIPS_PER_PIXEL;
        let natural_h = self.pixel_height * TWIPS_PER_PIXEL;
        let ratio = self.pixel_height as f64 / self.pixel_width as f64;

        match (self.width, self.height) {
            (Some(w), Some(h)) => (cm_to_twips(w) as u32, cm_to_twips(h) as u32),
            (Some(w), None) => {
                let w = cm_to_twips(w) as u32;
                (w, (w as f64 * ratio).round() as u32)
            }
            (None, Some(h)) => {
                let h = cm_to_twips(h) as u32;
                ((h as f64 / ratio).round() as u32, h)
            }
            (None, None) => (natural_w, natural_h),
        }
    }

    pub(crate) fn collect_resources(&self, resources: &mut Resources) {
        if let Some(ref par_format) = self.par_format {
            par_format.collect_resources(resources);
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.stats_mut().add_image();

        let (goal_w, goal_h) = self.goal_size();
        ctx.write(&format!(
            "{{\\pict{}\\picw{}\\pich{}\\picwgoal{}\\pichgoal{}\r\n",
            self.format.blip_control_word(),
            self.pixel_width,
            self.pixel_height,
            goal_w,
            goal_h
        ))?;

        let mut line = String::with_capacity(HEX_LINE_WIDTH + 2);
        for byte in &self.data {
            line.push_str(&format!("{:02x}", byte));
            if line.len() >= HEX_LINE_WIDTH {
                line.push_str("\r\n");
                ctx.write(&line)?;
                line.clear();
            }
        }
        if !line.is_empty() {
            ctx.write(&line)?;
        }

        ctx.write("}")
    }
}

fn check_size(name: &str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDimension(format!("image {} {}", name, value)))
    }
}
