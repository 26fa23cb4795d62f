//! Category palettes and duotone pairs

use image::Rgb;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use std::collections::BTreeMap;
use tracing::debug;

/// Supplies colors grouped by module category
pub trait PaletteProvider {
    /// Colors for one category; unknown categories yield an empty slice
    fn palette_for(&self, category: &str) -> &[Rgb<u8>];

    /// Known categories in a stable order
    fn categories(&self) -> Vec<&str>;
}

/// Category to color list mapping, read-only during a composition
///
/// Categories are kept sorted so that drawing a random group from a seeded
/// source is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    groups: BTreeMap<String, Vec<Rgb<u8>>>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Append colors to a category, creating it if needed
    pub fn insert(&mut self, category: impl Into<String>, colors: impl IntoIterator<Item = Rgb<u8>>) {
        self.groups.entry(category.into()).or_default().extend(colors);
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no category has been registered
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl PaletteProvider for Palette {
    fn palette_for(&self, category: &str) -> &[Rgb<u8>] {
        self.groups.get(category).map_or(&[][..], Vec::as_slice)
    }

    fn categories(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }
}

/// Pick the color group a composition will use, if any category exists
pub fn choose_group<'p>(provider: &'p dyn PaletteProvider, rng: &mut dyn RngCore) -> &'p [Rgb<u8>] {
    match provider.categories().choose(rng) {
        Some(category) => provider.palette_for(category),
        None => &[],
    }
}

/// Uniformly random opaque color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb<u8> {
    Rgb([rng.random(), rng.random(), rng.random()])
}

/// Pick a color from a group, falling back to a random color when the group is empty
pub fn choose_color<R: Rng + ?Sized>(colors: &[Rgb<u8>], rng: &mut R) -> Rgb<u8> {
    if let Some(color) = colors.choose(rng) {
        *color
    } else {
        debug!("empty palette, using a random color");
        random_color(rng)
    }
}

/// Dark and light endpoints of a two-color luminance mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuotonePair {
    /// Color assigned to luminance 0
    pub dark: Rgb<u8>,
    /// Color assigned to luminance 255
    pub light: Rgb<u8>,
}

impl DuotonePair {
    /// Create a pair from explicit endpoints
    pub const fn new(dark: Rgb<u8>, light: Rgb<u8>) -> Self {
        Self { dark, light }
    }

    /// Soft, roughly complementary pair
    ///
    /// Dark channels are drawn from 20..=200; each light channel is the
    /// complement of its dark channel jittered by up to ±40 and clamped.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let dark: [u8; 3] = [
            rng.random_range(20..=200),
            rng.random_range(20..=200),
            rng.random_range(20..=200),
        ];
        let light = dark.map(|channel| {
            let jitter: i16 = rng.random_range(-40..40);
            (255 - i16::from(channel) + jitter).clamp(0, 255) as u8
        });
        Self::new(Rgb(dark), Rgb(light))
    }

    /// Build a pair from two `[r, g, b]` arrays, as stored in configuration
    pub const fn from_channels(channels: [[u8; 3]; 2]) -> Self {
        Self::new(Rgb(channels[0]), Rgb(channels[1]))
    }
}
