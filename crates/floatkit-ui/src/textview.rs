use std::cell::{Ref, RefCell};
use std::ops::Range;
use std::rc::{Rc, Weak};

use floatkit_core::{Color, Duration, Font, Rect, TextMeasure};
use floatkit_text::CosmicMeasure;

use crate::controller::{
    FloatingLabelController, LabelAnchor, LabelPosition, TransitionOutcome, VIEW_LABEL_ORIGIN,
};
use crate::delegate::{DelegateSlot, Detached, TextViewDelegate};
use crate::input::TextInput;
use crate::label::Label;

/// Multi-line text input with a placeholder label and a floating label, both
/// pinned to the view's top-left text inset.
///
/// The placeholder shows while the text is empty and the view is not being
/// edited. The floating label rises once there is text to label.
/// Delegate callbacks receive a copy of the input and may call back into the
/// view.
pub struct FloatTextView {
    input: RefCell<TextInput>,
    controller: RefCell<FloatingLabelController>,
    placeholder: RefCell<Label>,
    placeholder_text: RefCell<String>,
    font: RefCell<Font>,
    text_color: RefCell<Color>,
    measure: Rc<dyn TextMeasure>,
    delegate: DelegateSlot<dyn TextViewDelegate>,
}

impl FloatTextView {
    pub fn new(bounds: Rect) -> Self {
        Self::with_measure(bounds, Rc::new(CosmicMeasure::new()))
    }

    pub fn with_measure(bounds: Rect, measure: Rc<dyn TextMeasure>) -> Self {
        let font = Font::default();
        let text_color = Color::BLACK;
        let mut controller = FloatingLabelController::new(
            LabelAnchor::Pinned(VIEW_LABEL_ORIGIN),
            bounds,
            measure.clone(),
        );
        controller.set_font(font.clone());
        controller.set_color(text_color);
        Self {
            input: RefCell::new(TextInput::new()),
            controller: RefCell::new(controller),
            placeholder: RefCell::new(Label::new(font.clone(), text_color)),
            placeholder_text: RefCell::new(String::new()),
            font: RefCell::new(font),
            text_color: RefCell::new(text_color),
            measure,
            delegate: DelegateSlot::new("text view"),
        }
    }

    // Configuration

    pub fn set_placeholder_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.placeholder.borrow_mut().text = text.clone();
        *self.placeholder_text.borrow_mut() = text;
        self.adjust_placeholder_frame();
    }

    pub fn set_label_text(&self, text: impl Into<String>) {
        self.controller.borrow_mut().set_text(text);
    }

    /// The view's font; shared by the placeholder and the floating label.
    pub fn set_font(&self, font: Font) {
        self.placeholder.borrow_mut().font = font.clone();
        self.controller.borrow_mut().set_font(font.clone());
        *self.font.borrow_mut() = font;
        self.adjust_placeholder_frame();
    }

    /// The view's text color; shared by the placeholder and the floating label.
    pub fn set_text_color(&self, color: Color) {
        self.placeholder.borrow_mut().color = color;
        self.controller.borrow_mut().set_color(color);
        *self.text_color.borrow_mut() = color;
    }

    /// Overrides the floating label's font, leaving the placeholder alone.
    pub fn set_label_font(&self, font: Font) {
        self.controller.borrow_mut().set_font(font);
    }

    /// Overrides the floating label's color, leaving the placeholder alone.
    pub fn set_label_color(&self, color: Color) {
        self.controller.borrow_mut().set_color(color);
    }

    pub fn set_label_offset(&self, offset: f32) {
        self.controller.borrow_mut().set_offset(offset);
    }

    pub fn set_animation_duration(&self, duration: Duration) {
        self.controller.borrow_mut().set_animation_duration(duration);
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.controller.borrow_mut().relayout(bounds);
        self.adjust_placeholder_frame();
    }

    /// Programmatic text change; no lifecycle events, placeholder refreshed.
    pub fn set_text(&self, text: impl Into<String>) {
        self.input.borrow_mut().set_text(text);
        self.handle_text_changed(&self.snapshot());
    }

    pub fn set_delegate<D: TextViewDelegate + 'static>(&self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate.set(weak);
    }

    pub fn clear_delegate(&self) {
        self.delegate.clear();
    }

    // State

    pub fn controller(&self) -> Ref<'_, FloatingLabelController> {
        self.controller.borrow()
    }

    pub fn position(&self) -> LabelPosition {
        self.controller.borrow().position()
    }

    pub fn placeholder_label(&self) -> Ref<'_, Label> {
        self.placeholder.borrow()
    }

    pub fn input(&self) -> Ref<'_, TextInput> {
        self.input.borrow()
    }

    pub fn text(&self) -> String {
        self.input.borrow().text().to_owned()
    }

    pub fn font(&self) -> Font {
        self.font.borrow().clone()
    }

    pub fn text_color(&self) -> Color {
        *self.text_color.borrow()
    }

    pub fn is_editing(&self) -> bool {
        self.input.borrow().is_editing()
    }

    /// Advances label animations; returns whether any are still running.
    pub fn tick(&self) -> bool {
        let outcome = self.controller.borrow_mut().tick();
        if outcome == Some(TransitionOutcome::Finished) {
            self.handle_text_changed(&self.snapshot());
        }
        self.controller.borrow().is_animating()
    }

    // Host drivers

    pub fn focus(&self) -> bool {
        if self.is_editing() {
            return true;
        }
        if !self.should_begin_editing(&self.snapshot()) {
            return false;
        }
        self.input.borrow_mut().set_editing(true);
        self.did_begin_editing(&self.snapshot());
        true
    }

    pub fn insert(&self, text: &str) -> bool {
        if !self.is_editing() {
            return false;
        }
        let range = self.input.borrow().selection();
        self.change(range, text)
    }

    pub fn delete_backward(&self) -> bool {
        if !self.is_editing() {
            return false;
        }
        let Some(range) = self.input.borrow().backspace_range() else {
            return false;
        };
        self.change(range, "")
    }

    pub fn select(&self, range: Range<usize>) {
        self.input.borrow_mut().select(range);
        self.did_change_selection(&self.snapshot());
    }

    /// A tap on a link inside the text. Returns whether the host may open it.
    pub fn open_url(&self, url: &str, range: Range<usize>) -> bool {
        self.should_interact_with_url(&self.snapshot(), url, range)
    }

    pub fn blur(&self) -> bool {
        if !self.is_editing() {
            return true;
        }
        if !self.should_end_editing(&self.snapshot()) {
            return false;
        }
        self.input.borrow_mut().set_editing(false);
        self.did_end_editing(&self.snapshot());
        true
    }

    /// Copy of the input handed to lifecycle callbacks, so a delegate may
    /// call back into the widget without tripping a live borrow.
    fn snapshot(&self) -> TextInput {
        self.input.borrow().clone()
    }

    fn change(&self, range: Range<usize>, replacement: &str) -> bool {
        if !self.should_change_text(&self.snapshot(), range.clone(), replacement) {
            return false;
        }
        self.input.borrow_mut().replace_range(range, replacement);
        self.did_change(&self.snapshot());
        true
    }

    fn handle_text_changed(&self, view: &TextInput) {
        let text = if view.is_empty() {
            self.placeholder_text.borrow().clone()
        } else {
            String::new()
        };
        self.placeholder.borrow_mut().text = text;
    }

    fn adjust_placeholder_frame(&self) {
        let bounds = self.controller.borrow().bounds();
        let mut placeholder = self.placeholder.borrow_mut();
        let size = self
            .measure
            .size_that_fits(&placeholder.text, &placeholder.font, bounds.size());
        placeholder.frame = Rect::from_origin_size(VIEW_LABEL_ORIGIN, size);
    }

    fn relay<R>(&self, event: &str, f: impl FnOnce(&dyn TextViewDelegate) -> R) -> R {
        match self.delegate.get() {
            Some(delegate) => {
                log::trace!("text view: relaying {event}");
                f(&*delegate)
            }
            None => f(&Detached),
        }
    }
}

impl TextViewDelegate for FloatTextView {
    fn should_begin_editing(&self, view: &TextInput) -> bool {
        self.relay("should_begin_editing", |d| d.should_begin_editing(view))
    }

    fn should_end_editing(&self, view: &TextInput) -> bool {
        self.handle_text_changed(view);
        self.relay("should_end_editing", |d| d.should_end_editing(view))
    }

    fn did_begin_editing(&self, view: &TextInput) {
        self.placeholder.borrow_mut().text.clear();
        if !view.is_empty() && self.position() == LabelPosition::Collapsed {
            self.controller.borrow_mut().begin_float_transition();
        }
        self.relay("did_begin_editing", |d| d.did_begin_editing(view));
    }

    fn did_end_editing(&self, view: &TextInput) {
        if view.is_empty() && self.position() == LabelPosition::Floated {
            self.controller.borrow_mut().end_float_transition();
        }
        self.relay("did_end_editing", |d| d.did_end_editing(view));
    }

    fn should_change_text(&self, view: &TextInput, range: Range<usize>, replacement: &str) -> bool {
        if !replacement.is_empty() && self.position() == LabelPosition::Collapsed {
            self.controller.borrow_mut().begin_float_transition();
        }
        self.relay("should_change_text", |d| d.should_change_text(view, range, replacement))
    }

    fn did_change(&self, view: &TextInput) {
        self.handle_text_changed(view);
        self.relay("did_change", |d| d.did_change(view));
    }

    fn did_change_selection(&self, view: &TextInput) {
        self.relay("did_change_selection", |d| d.did_change_selection(view));
    }

    fn should_interact_with_url(&self, view: &TextInput, url: &str, range: Range<usize>) -> bool {
        self.relay("should_interact_with_url", |d| {
            d.should_interact_with_url(view, url, range)
        })
    }
}
