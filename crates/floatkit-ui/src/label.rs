use floatkit_core::animation::{AnimatedValue, AnimationSpec, Easing};
use floatkit_core::{Color, Duration, Font, Rect};

/// A static label composited into a widget, e.g. a text view's placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub frame: Rect,
}

impl Label {
    pub fn new(font: Font, color: Color) -> Self {
        Self {
            text: String::new(),
            font,
            color,
            frame: Rect::ZERO,
        }
    }
}

/// The secondary label whose frame and opacity animate between positions.
pub struct FloatingLabel {
    pub(crate) text: String,
    pub(crate) font: Font,
    pub(crate) color: Color,
    pub(crate) frame: AnimatedValue<Rect>,
    pub(crate) alpha: AnimatedValue<f32>,
}

impl FloatingLabel {
    pub(crate) fn new(frame: Rect, font: Font, color: Color, duration: Duration) -> Self {
        let spec = transition_spec(duration);
        Self {
            text: String::new(),
            font,
            color,
            frame: AnimatedValue::new(frame, spec),
            alpha: AnimatedValue::new(0.0, spec),
        }
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        let spec = transition_spec(duration);
        self.frame.set_spec(spec);
        self.alpha.set_spec(spec);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Frame as currently drawn, mid-animation included.
    pub fn frame(&self) -> Rect {
        *self.frame.get()
    }

    /// Frame the label settles on once animations finish.
    pub fn target_frame(&self) -> Rect {
        *self.frame.target()
    }

    pub fn alpha(&self) -> f32 {
        *self.alpha.get()
    }

    pub fn target_alpha(&self) -> f32 {
        *self.alpha.target()
    }

    /// Label color with the current opacity applied.
    pub fn rendered_color(&self) -> Color {
        self.color.faded(self.alpha())
    }
}

fn transition_spec(duration: Duration) -> AnimationSpec {
    AnimationSpec::tween(duration, Easing::EaseInOut)
}
