//! Label measurement for floatkit.
//!
//! [`CosmicMeasure`] shapes text with cosmic-text against the system font
//! database. [`ApproxMeasure`] is a font-free estimate with stable output,
//! used where real shaping is unavailable or unwanted (headless tests).

use ahash::RandomState;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use floatkit_core::{Font, FontFamily, Size, TextMeasure};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// Average advance as a multiple of the font size, for [`ApproxMeasure`].
pub const APPROX_ADVANCE_FACTOR: f32 = 0.5;

/// Entries a [`CosmicMeasure`] keeps before starting over.
pub const MAX_CACHED_MEASUREMENTS: usize = 256;

struct Engine {
    fs: FontSystem,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        let fs = FontSystem::new();
        Mutex::new(Engine { fs })
    })
}

fn attrs_for(font: &Font) -> Attrs<'_> {
    let family = match &font.family {
        FontFamily::SansSerif => Family::SansSerif,
        FontFamily::Serif => Family::Serif,
        FontFamily::Monospace => Family::Monospace,
        FontFamily::Named(name) => Family::Name(name.as_str()),
    };
    Attrs::new().family(family).weight(Weight(font.weight.0))
}

fn clamp_to_bounds(size: Size, bounds: Size) -> Size {
    // Non-positive bounds mean "unconstrained".
    let width = if bounds.width > 0.0 {
        size.width.min(bounds.width)
    } else {
        size.width
    };
    Size::new(width, size.height)
}

/// Shape a single line (no wrapping) and return its extent.
pub fn measure_line(text: &str, font: &Font) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }
    let px = font.size;
    let mut eng = engine().lock();
    let mut buf = Buffer::new(&mut eng.fs, Metrics::new(px, px * LINE_HEIGHT_FACTOR));
    {
        let mut b = buf.borrow_with(&mut eng.fs);
        b.set_size(None, None);
        b.set_text(text, &attrs_for(font), Shaping::Advanced, None);
        b.shape_until_scroll(true);
    }

    let mut width = 0.0f32;
    let mut lines = 0usize;
    for run in buf.layout_runs() {
        width = width.max(run.line_w);
        lines += 1;
    }
    Size::new(width, lines.max(1) as f32 * px * LINE_HEIGHT_FACTOR)
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    family: FontFamily,
    weight: u16,
    size_bits: u32,
}

impl MeasureKey {
    fn new(text: &str, font: &Font) -> Self {
        Self {
            text: text.to_owned(),
            family: font.family.clone(),
            weight: font.weight.0,
            size_bits: font.size.to_bits(),
        }
    }
}

/// cosmic-text backed measurer. Unconstrained line sizes are cached per
/// (text, font), up to [`MAX_CACHED_MEASUREMENTS`]; the bounds clamp is
/// applied on every call.
#[derive(Default)]
pub struct CosmicMeasure {
    cache: Mutex<HashMap<MeasureKey, Size, RandomState>>,
}

impl CosmicMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

impl TextMeasure for CosmicMeasure {
    fn size_that_fits(&self, text: &str, font: &Font, bounds: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let key = MeasureKey::new(text, font);
        if let Some(&size) = self.cache.lock().get(&key) {
            return clamp_to_bounds(size, bounds);
        }
        let size = measure_line(text, font);
        let mut cache = self.cache.lock();
        if cache.len() >= MAX_CACHED_MEASUREMENTS {
            log::trace!("measurement cache full, clearing {} entries", cache.len());
            cache.clear();
        }
        cache.insert(key, size);
        clamp_to_bounds(size, bounds)
    }
}

/// Font-free estimate: every grapheme advances `size * APPROX_ADVANCE_FACTOR`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn size_that_fits(&self, text: &str, font: &Font, bounds: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let graphemes = text.graphemes(true).count() as f32;
        let size = Size::new(
            graphemes * font.size * APPROX_ADVANCE_FACTOR,
            font.size * LINE_HEIGHT_FACTOR,
        );
        clamp_to_bounds(size, bounds)
    }
}
