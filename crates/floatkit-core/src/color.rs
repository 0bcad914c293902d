#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const BLUE: Color = Color(0, 0, 255, 255);
    pub const GREEN: Color = Color(0, 255, 0, 255);
    pub const GRAY: Color = Color(128, 128, 128, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    /// Lenient parse: malformed input falls back to opaque black.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    /// Strict parse of `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let s = hex.trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        match s.len() {
            6 => Some(Color(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Color(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Scales this color's alpha by `opacity` in `[0, 1]`.
    pub fn faded(self, opacity: f32) -> Self {
        let a = (self.3 as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }
}
