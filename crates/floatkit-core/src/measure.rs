use crate::{Font, Size};

/// Host text measurement: the size a single-line label needs to show `text`
/// in `font`, given the bounds it lives in.
///
/// Empty text must measure as [`Size::ZERO`].
pub trait TextMeasure {
    fn size_that_fits(&self, text: &str, font: &Font, bounds: Size) -> Size;
}

