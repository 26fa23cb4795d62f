//! Numbered PNG export with print-resolution metadata

use crate::io::configuration::{OUTPUT_EXTENSION, OUTPUT_NUMBER_WIDTH, OUTPUT_PREFIX};
use crate::io::error::{CompositionError, Result, WithPath};
use image::RgbaImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

/// Meters per inch, for the PNG physical pixel dimensions chunk
const METERS_PER_INCH: f64 = 0.0254;

/// Pixels per meter for a resolution given in dots per inch
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Sequence number of an output file name such as `composition_007.png`
///
/// Names with another prefix or a non-numeric suffix yield `None`.
pub fn sequence_number(file_name: &str) -> Option<usize> {
    let rest = file_name.strip_prefix(OUTPUT_PREFIX)?;
    let (digits, _) = rest.split_once('.').unwrap_or((rest, ""));
    digits.parse().ok()
}

/// File name for sequence number `index`
pub fn output_name(index: usize) -> String {
    format!(
        "{OUTPUT_PREFIX}{index:0width$}.{OUTPUT_EXTENSION}",
        width = OUTPUT_NUMBER_WIDTH
    )
}

/// Encode an RGBA image as PNG with a pHYs chunk for `dpi`
///
/// # Errors
///
/// Returns an export error if PNG encoding fails
pub fn encode_png(image: &RgbaImage, dpi: u32, path: &Path) -> Result<Vec<u8>> {
    let export_error = |source| CompositionError::ImageExport {
        path: path.to_path_buf(),
        source,
    };
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let ppu = pixels_per_meter(dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppu,
            yppu: ppu,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header().map_err(export_error)?;
        writer.write_image_data(image.as_raw()).map_err(export_error)?;
    }
    Ok(buf.into_inner())
}

/// Writes compositions as `composition_NNN.png`, continuing an existing sequence
#[derive(Debug)]
pub struct Exporter {
    directory: PathBuf,
    dpi: u32,
    next_index: usize,
}

impl Exporter {
    /// Prepare an output directory, creating it if needed
    ///
    /// Numbering starts one past the largest sequence number already present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - The directory cannot be listed
    pub fn new(directory: impl Into<PathBuf>, dpi: u32) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).with_path(&directory, "create directory")?;
        let next_index = last_sequence_number(&directory)? + 1;
        Ok(Self {
            directory,
            dpi,
            next_index,
        })
    }

    /// Sequence number the next export will use
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Path the next export will be written to
    pub fn next_path(&self) -> PathBuf {
        self.directory.join(output_name(self.next_index))
    }

    /// Encode and write one composition, advancing the sequence
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - PNG encoding fails
    /// - The file cannot be written
    pub fn export(&mut self, image: &RgbaImage) -> Result<PathBuf> {
        let path = self.next_path();
        let bytes = encode_png(image, self.dpi, &path)?;
        std::fs::write(&path, bytes).with_path(&path, "write composition")?;
        info!(path = %path.display(), "composition saved");
        self.next_index += 1;
        Ok(path)
    }
}

/// Largest sequence number among existing outputs, zero when there are none
fn last_sequence_number(directory: &Path) -> Result<usize> {
    let mut last = 0;
    for entry in std::fs::read_dir(directory).with_path(directory, "list directory")? {
        let entry = entry.with_path(directory, "list directory")?;
        if let Some(number) = entry.file_name().to_str().and_then(sequence_number) {
            last = last.max(number);
        }
    }
    Ok(last)
}
