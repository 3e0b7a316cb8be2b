//! Image format detection and header inspection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image formats that can be embedded in RTF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl ImageFormat {
    /// Picture type control word (`\pngblip`, `\jpegblip`).
    pub fn blip_control_word(self) -> &'static str {
        match self {
            ImageFormat::Png => "\\pngblip",
            ImageFormat::Jpeg => "\\jpegblip",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// PNG signature: \x89PNG\r\n\x1a\n
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
/// JPEG start-of-image marker followed by the next marker prefix.
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detect the image format of a file from its first bytes.
///
/// # Example
/// ```no_run
/// use rtfcraft::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("logo.png").unwrap();
/// println!("Image format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 8];
    let read = reader.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
}

/// Detect the image format from bytes.
///
/// # Returns
/// * `Ok(ImageFormat)` for PNG or JPEG data
/// * `Err(Error::UnsupportedImage)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        Ok(ImageFormat::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Ok(ImageFormat::Jpeg)
    } else {
        Err(Error::UnsupportedImage)
    }
}

/// Check if bytes start with a supported image signature.
pub fn is_image_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Read pixel width and height from the image header.
pub fn image_dimensions(data: &[u8], format: ImageFormat) -> Result<(u32, u32)> {
    match format {
        ImageFormat::Png => png_dimensions(data),
        ImageFormat::Jpeg => jpeg_dimensions(data),
    }
}

fn png_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    // signature, IHDR length, "IHDR", width, height
    if data.len() < 24 || &data[12..16] != b"IHDR" {
        return Err(Error::InvalidImage("missing PNG IHDR chunk".to_string()));
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    Ok((width, height))
}

fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return Err(Error::InvalidImage(format!(
                "expected JPEG marker at offset {}",
                pos
            )));
        }
        let marker = data[pos + 1];
        match marker {
            // fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // standalone markers without a length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => break,
            _ => {}
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            // length(2) precision(1) height(2) width(2)
            if pos + 9 > data.len() {
                break;
            }
            let height = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let width = u16::from_be_bytes([data[pos + 7], data[pos + 8]]) as u32;
            return Ok((width, height));
        }
        pos += 2 + length;
    }

    Err(Error::InvalidImage("no JPEG frame header found".to_string()))
}
