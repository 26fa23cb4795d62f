//! Per-category color sampling from the module directory tree

use crate::color::palette::Palette;
use crate::io::configuration::{
    PALETTE_IMAGES_PER_CATEGORY, PALETTE_SAMPLES_PER_IMAGE, PALETTE_THUMBNAIL_SIZE,
};
use crate::io::error::Result;
use crate::io::source::{list_categories, list_files};
use image::Rgb;
use image::imageops::{self, FilterType};
use rand::RngCore;
use rand::seq::{IndexedRandom, index};
use std::path::Path;
use tracing::{debug, info};

/// Whether `path` looks like a raster image the palette sampler reads
fn is_sampled_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["png", "jpg", "jpeg"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Sample up to `count` distinct pixels of a thumbnail of `path`
fn sample_image(path: &Path, count: usize, rng: &mut dyn RngCore) -> Option<Vec<Rgb<u8>>> {
    let img = match image::open(path) {
        Ok(img) => img.into_rgb8(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "palette image unreadable");
            return None;
        }
    };
    let thumb = imageops::resize(
        &img,
        PALETTE_THUMBNAIL_SIZE,
        PALETTE_THUMBNAIL_SIZE,
        FilterType::Triangle,
    );
    let pixels: Vec<Rgb<u8>> = thumb.pixels().copied().collect();
    let amount = count.min(pixels.len());
    Some(
        index::sample(rng, pixels.len(), amount)
            .into_iter()
            .filter_map(|i| pixels.get(i).copied())
            .collect(),
    )
}

/// Build a palette with one color group per category directory under `root`
///
/// Each category contributes colors sampled from up to five of its images,
/// twelve pixels per image. Categories with no readable image are left out,
/// and a missing root gives an empty palette.
///
/// # Errors
///
/// Returns a file system error if an existing directory cannot be listed
pub fn extract_palettes(root: &Path, rng: &mut dyn RngCore) -> Result<Palette> {
    let mut palette = Palette::new();
    if !root.is_dir() {
        return Ok(palette);
    }
    for (name, dir) in list_categories(root)? {
        let files = list_files(&dir, is_sampled_image)?;
        let chosen: Vec<_> = files
            .choose_multiple(rng, PALETTE_IMAGES_PER_CATEGORY)
            .collect();
        let mut colors = Vec::new();
        for path in chosen {
            if let Some(sampled) = sample_image(path, PALETTE_SAMPLES_PER_IMAGE, rng) {
                colors.extend(sampled);
            }
        }
        if !colors.is_empty() {
            palette.insert(name, colors);
        }
    }
    info!(categories = palette.len(), "palettes extracted");
    Ok(palette)
}
