//! The floating-label state machine shared by [`FloatTextField`] and
//! [`FloatTextView`].
//!
//! A label is either [`LabelPosition::Collapsed`] (resting over the input,
//! transparent) or [`LabelPosition::Floated`] (raised above it, opaque).
//! Transitions flip the position immediately and animate the frame and
//! opacity toward the target; callers drive the animation with
//! [`FloatingLabelController::tick`].
//!
//! Both target frames are computed on the first transition that needs them
//! and cached for the lifetime of the controller. Resizing the widget later
//! does not invalidate them.
//!
//! [`FloatTextField`]: crate::FloatTextField
//! [`FloatTextView`]: crate::FloatTextView

use std::rc::Rc;

use floatkit_core::{Color, Duration, Font, Rect, TextMeasure, Vec2};

use crate::label::FloatingLabel;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
pub const FIELD_LABEL_OFFSET: f32 = 12.0;
pub const VIEW_LABEL_OFFSET: f32 = 10.0;
/// Resting origin of a text view's labels, inset to line up with its text.
pub const VIEW_LABEL_ORIGIN: Vec2 = Vec2::new(2.7, 5.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPosition {
    #[default]
    Collapsed,
    Floated,
}

/// Where a collapsed label rests inside the widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelAnchor {
    /// Vertically centered in the bounds (single-line fields).
    Centered,
    /// Fixed top-left origin (multi-line views).
    Pinned(Vec2),
}

impl LabelAnchor {
    pub fn default_offset(&self) -> f32 {
        match self {
            LabelAnchor::Centered => FIELD_LABEL_OFFSET,
            LabelAnchor::Pinned(_) => VIEW_LABEL_OFFSET,
        }
    }

    fn initial_frame(&self, bounds: Rect) -> Rect {
        match *self {
            LabelAnchor::Centered => Rect::new(0.0, bounds.h / 2.0, 0.0, 0.0),
            LabelAnchor::Pinned(p) => Rect::new(p.x, p.y, 0.0, 0.0),
        }
    }
}

/// How a collapse transition ended, reported once by [`FloatingLabelController::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The label reached its collapsed frame.
    Finished,
    /// A float transition was issued before the collapse finished.
    Interrupted,
}

#[derive(Clone, Copy, Debug)]
struct PendingCollapse {
    interrupted: bool,
}

pub struct FloatingLabelController {
    label: FloatingLabel,
    position: LabelPosition,
    anchor: LabelAnchor,
    offset: f32,
    duration: Duration,
    bounds: Rect,
    floated_frame: Option<Rect>,
    collapsed_frame: Option<Rect>,
    pending_collapse: Option<PendingCollapse>,
    measure: Rc<dyn TextMeasure>,
}

impl FloatingLabelController {
    pub fn new(anchor: LabelAnchor, bounds: Rect, measure: Rc<dyn TextMeasure>) -> Self {
        Self {
            label: FloatingLabel::new(
                anchor.initial_frame(bounds),
                Font::default(),
                Color::BLUE,
                DEFAULT_ANIMATION_DURATION,
            ),
            position: LabelPosition::Collapsed,
            anchor,
            offset: anchor.default_offset(),
            duration: DEFAULT_ANIMATION_DURATION,
            bounds,
            floated_frame: None,
            collapsed_frame: None,
            pending_collapse: None,
            measure,
        }
    }

    pub fn label(&self) -> &FloatingLabel {
        &self.label
    }

    pub fn position(&self) -> LabelPosition {
        self.position
    }

    pub fn is_floated(&self) -> bool {
        self.position == LabelPosition::Floated
    }

    pub fn anchor(&self) -> LabelAnchor {
        self.anchor
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn animation_duration(&self) -> Duration {
        self.duration
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cached raised frame, once a float transition has computed it.
    pub fn floated_frame(&self) -> Option<Rect> {
        cached(self.floated_frame)
    }

    /// Cached resting frame, once a collapse transition has computed it.
    pub fn collapsed_frame(&self) -> Option<Rect> {
        cached(self.collapsed_frame)
    }

    pub fn is_animating(&self) -> bool {
        self.label.frame.is_animating() || self.label.alpha.is_animating()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.text = text.into();
        self.relayout(self.bounds);
    }

    pub fn set_font(&mut self, font: Font) {
        self.label.font = font;
        self.relayout(self.bounds);
    }

    pub fn set_color(&mut self, color: Color) {
        self.label.color = color;
        self.relayout(self.bounds);
    }

    /// Applies to frames computed after this call; cached frames are kept.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.label.set_duration(duration);
    }

    pub fn begin_float_transition(&mut self) {
        if let Some(pending) = self.pending_collapse.as_mut() {
            pending.interrupted = true;
        }
        let floated = match cached(self.floated_frame) {
            Some(frame) => frame,
            None => {
                let resting = *self.label.frame.target();
                let frame = resting.translate(0.0, -(self.offset + resting.h));
                log::debug!(
                    "floating label {:?}: caching floated frame {frame:?}",
                    self.label.text
                );
                self.floated_frame = Some(frame);
                frame
            }
        };
        self.label.frame.set_target(floated);
        self.label.alpha.set_target(1.0);
        if self.position != LabelPosition::Floated {
            log::debug!("floating label {:?}: Collapsed -> Floated", self.label.text);
        }
        self.position = LabelPosition::Floated;
    }

    pub fn end_float_transition(&mut self) {
        let collapsed = match cached(self.collapsed_frame) {
            Some(frame) => frame,
            None => {
                let raised = *self.label.frame.target();
                let frame = raised.translate(0.0, self.offset + raised.h);
                log::debug!(
                    "floating label {:?}: caching collapsed frame {frame:?}",
                    self.label.text
                );
                self.collapsed_frame = Some(frame);
                frame
            }
        };
        self.label.frame.set_target(collapsed);
        self.label.alpha.set_target(0.0);
        if self.position != LabelPosition::Collapsed {
            log::debug!("floating label {:?}: Floated -> Collapsed", self.label.text);
        }
        self.position = LabelPosition::Collapsed;
        self.pending_collapse = Some(PendingCollapse { interrupted: false });
    }

    /// Re-measures the label against `bounds` and repositions it for the
    /// current state. Cached transition frames are left alone.
    pub fn relayout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let required = self
            .measure
            .size_that_fits(&self.label.text, &self.label.font, bounds.size());
        let old = *self.label.frame.target();
        let origin = match (self.position, self.anchor) {
            (LabelPosition::Floated, _) => old.origin(),
            (LabelPosition::Collapsed, LabelAnchor::Centered) => {
                Vec2::new(old.x, bounds.h / 2.0 - required.height / 2.0)
            }
            (LabelPosition::Collapsed, LabelAnchor::Pinned(p)) => p,
        };
        self.label
            .frame
            .snap_to(Rect::from_origin_size(origin, required));
    }

    /// Advances the label animations. Returns the outcome of a pending
    /// collapse once it is known.
    pub fn tick(&mut self) -> Option<TransitionOutcome> {
        let frame_running = self.label.frame.update();
        let alpha_running = self.label.alpha.update();
        let pending = self.pending_collapse?;
        let outcome = if pending.interrupted {
            TransitionOutcome::Interrupted
        } else if !frame_running && !alpha_running {
            TransitionOutcome::Finished
        } else {
            return None;
        };
        self.pending_collapse = None;
        Some(outcome)
    }
}

fn cached(frame: Option<Rect>) -> Option<Rect> {
    frame.filter(|f| !f.is_empty())
}
