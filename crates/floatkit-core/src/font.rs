/// Semantic font descriptor. Resolution to an actual face is left to the
/// text backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    /// Point size; also the em size used for measurement.
    pub size: f32,
    pub weight: FontWeight,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Named(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::REGULAR
    }
}

impl Font {
    pub fn system(size: f32) -> Self {
        Self {
            family: FontFamily::SansSerif,
            size,
            weight: FontWeight::REGULAR,
        }
    }

    pub fn bold_system(size: f32) -> Self {
        Self {
            weight: FontWeight::BOLD,
            ..Self::system(size)
        }
    }

    pub fn named(name: impl Into<String>, size: f32) -> Self {
        Self {
            family: FontFamily::Named(name.into()),
            ..Self::system(size)
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::system(12.0)
    }
}
