use std::cell::{Cell, Ref, RefCell};
use std::ops::Range;
use std::rc::{Rc, Weak};

use floatkit_core::{Color, Duration, Font, Rect, TextMeasure};
use floatkit_text::CosmicMeasure;

use crate::controller::{FloatingLabelController, LabelAnchor, LabelPosition, TransitionOutcome};
use crate::delegate::{DelegateSlot, Detached, TextFieldDelegate};
use crate::input::TextInput;

/// Single-line text input whose label floats above it once the field is
/// focused or holds text.
///
/// The field is its own [`TextFieldDelegate`]: the host reports lifecycle
/// events to it (or uses the driver methods such as [`focus`](Self::focus)
/// and [`insert`](Self::insert)), it updates the label, then relays the same
/// event to the delegate set with [`set_delegate`](Self::set_delegate).
/// Callbacks receive a copy of the input, so a delegate may drive the field
/// (for example blur it from `should_return`) while being called.
pub struct FloatTextField {
    input: RefCell<TextInput>,
    controller: RefCell<FloatingLabelController>,
    placeholder: RefCell<String>,
    placeholder_visible: Cell<bool>,
    delegate: DelegateSlot<dyn TextFieldDelegate>,
}

impl FloatTextField {
    pub fn new(bounds: Rect) -> Self {
        Self::with_measure(bounds, Rc::new(CosmicMeasure::new()))
    }

    pub fn with_measure(bounds: Rect, measure: Rc<dyn TextMeasure>) -> Self {
        Self {
            input: RefCell::new(TextInput::new()),
            controller: RefCell::new(FloatingLabelController::new(
                LabelAnchor::Centered,
                bounds,
                measure,
            )),
            placeholder: RefCell::new(String::new()),
            placeholder_visible: Cell::new(true),
            delegate: DelegateSlot::new("text field"),
        }
    }

    // Configuration

    pub fn set_label_text(&self, text: impl Into<String>) {
        self.controller.borrow_mut().set_text(text);
    }

    pub fn set_label_font(&self, font: Font) {
        self.controller.borrow_mut().set_font(font);
    }

    pub fn set_label_color(&self, color: Color) {
        self.controller.borrow_mut().set_color(color);
    }

    pub fn set_label_offset(&self, offset: f32) {
        self.controller.borrow_mut().set_offset(offset);
    }

    pub fn set_animation_duration(&self, duration: Duration) {
        self.controller.borrow_mut().set_animation_duration(duration);
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        *self.placeholder.borrow_mut() = placeholder.into();
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.controller.borrow_mut().relayout(bounds);
    }

    /// Sets the text without raising lifecycle events, as a host does for
    /// programmatic changes. The label does not move.
    pub fn set_text(&self, text: impl Into<String>) {
        self.input.borrow_mut().set_text(text);
    }

    /// Installs `delegate` without taking ownership of it.
    pub fn set_delegate<D: TextFieldDelegate + 'static>(&self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate.set(weak);
    }

    pub fn clear_delegate(&self) {
        self.delegate.clear();
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_set()
    }

    // State

    pub fn controller(&self) -> Ref<'_, FloatingLabelController> {
        self.controller.borrow()
    }

    pub fn position(&self) -> LabelPosition {
        self.controller.borrow().position()
    }

    pub fn input(&self) -> Ref<'_, TextInput> {
        self.input.borrow()
    }

    pub fn text(&self) -> String {
        self.input.borrow().text().to_owned()
    }

    pub fn is_editing(&self) -> bool {
        self.input.borrow().is_editing()
    }

    pub fn placeholder(&self) -> String {
        self.placeholder.borrow().clone()
    }

    /// Placeholder the host should draw right now; blank while the label is
    /// (or is becoming) floated.
    pub fn displayed_placeholder(&self) -> String {
        if self.placeholder_visible.get() {
            self.placeholder()
        } else {
            String::new()
        }
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible.get()
    }

    /// Advances label animations; returns whether any are still running.
    pub fn tick(&self) -> bool {
        let mut controller = self.controller.borrow_mut();
        if controller.tick() == Some(TransitionOutcome::Finished) {
            self.placeholder_visible.set(true);
        }
        controller.is_animating()
    }

    // Host drivers

    /// Tries to enter edit mode. Returns whether the field is editing.
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

    /// Types `text` over the current selection. Returns whether it was applied.
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

    /// The clear button. Returns whether the text was cleared.
    pub fn clear(&self) -> bool {
        if !self.should_clear(&self.snapshot()) {
            return false;
        }
        self.input.borrow_mut().clear();
        true
    }

    /// The return key. Returns the delegate's answer.
    pub fn submit(&self) -> bool {
        self.should_return(&self.snapshot())
    }

    /// Tries to leave edit mode. Returns whether editing ended.
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
        if !self.should_change_characters(&self.snapshot(), range.clone(), replacement) {
            return false;
        }
        self.input.borrow_mut().replace_range(range, replacement);
        true
    }

    // Label transitions

    fn float_label(&self) {
        self.placeholder_visible.set(false);
        self.controller.borrow_mut().begin_float_transition();
    }

    fn collapse_label(&self) {
        self.controller.borrow_mut().end_float_transition();
    }

    fn relay<R>(&self, event: &str, f: impl FnOnce(&dyn TextFieldDelegate) -> R) -> R {
        match self.delegate.get() {
            Some(delegate) => {
                log::trace!("text field: relaying {event}");
                f(&*delegate)
            }
            None => f(&Detached),
        }
    }
}

impl TextFieldDelegate for FloatTextField {
    fn should_begin_editing(&self, field: &TextInput) -> bool {
        let allowed = self.relay("should_begin_editing", |d| d.should_begin_editing(field));
        if allowed {
            self.float_label();
        }
        allowed
    }

    fn did_begin_editing(&self, field: &TextInput) {
        if !field.is_empty() && self.position() == LabelPosition::Collapsed {
            self.float_label();
        }
        self.relay("did_begin_editing", |d| d.did_begin_editing(field));
    }

    fn should_end_editing(&self, field: &TextInput) -> bool {
        self.relay("should_end_editing", |d| d.should_end_editing(field))
    }

    fn did_end_editing(&self, field: &TextInput) {
        if field.is_empty() && self.position() == LabelPosition::Floated {
            self.collapse_label();
        }
        self.relay("did_end_editing", |d| d.did_end_editing(field));
    }

    fn should_change_characters(&self, field: &TextInput, range: Range<usize>, replacement: &str) -> bool {
        if !replacement.is_empty() && self.position() == LabelPosition::Collapsed {
            self.float_label();
        }
        self.relay("should_change_characters", |d| {
            d.should_change_characters(field, range, replacement)
        })
    }

    fn should_clear(&self, field: &TextInput) -> bool {
        self.relay("should_clear", |d| d.should_clear(field))
    }

    fn should_return(&self, field: &TextInput) -> bool {
        self.relay("should_return", |d| d.should_return(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floatkit_core::animation::{TestClock, reset_clock};
    use floatkit_text::ApproxMeasure;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 280.0, 44.0);

    fn field() -> FloatTextField {
        let f = FloatTextField::with_measure(BOUNDS, Rc::new(ApproxMeasure));
        f.set_label_text("First Name");
        f.set_placeholder("First Name");
        f
    }

    fn settle(f: &FloatTextField, clock: &TestClock) {
        clock.advance(f.controller().animation_duration() + Duration::from_millis(1));
        f.tick();
    }

    /// Records every callback it receives.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        allow_begin: Cell<bool>,
        allow_clear: Cell<bool>,
    }

    impl Recorder {
        fn new() -> Rc<Self> {
            let r = Rc::new(Self::default());
            r.allow_begin.set(true);
            r
        }

        fn log(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn trace(&self) -> String {
            self.calls.borrow().join("\n")
        }
    }

    impl TextFieldDelegate for Recorder {
        fn should_begin_editing(&self, _field: &TextInput) -> bool {
            self.log("should_begin_editing");
            self.allow_begin.get()
        }
        fn did_begin_editing(&self, field: &TextInput) {
            self.log(format!("did_begin_editing {:?}", field.text()));
        }
        fn should_end_editing(&self, _field: &TextInput) -> bool {
            self.log("should_end_editing");
            true
        }
        fn did_end_editing(&self, field: &TextInput) {
            self.log(format!("did_end_editing {:?}", field.text()));
        }
        fn should_change_characters(&self, _field: &TextInput, range: Range<usize>, replacement: &str) -> bool {
            self.log(format!("should_change_characters {range:?} {replacement:?}"));
            true
        }
        fn should_clear(&self, _field: &TextInput) -> bool {
            self.log("should_clear");
            self.allow_clear.get()
        }
        fn should_return(&self, _field: &TextInput) -> bool {
            self.log("should_return");
            false
        }
    }

    #[test]
    fn focus_floats_label_immediately() {
        let clock = TestClock::install();
        let f = field();
        let resting = f.controller().label().frame();

        assert!(f.focus());
        assert!(f.is_editing());
        assert_eq!(f.position(), LabelPosition::Floated);
        assert_eq!(f.displayed_placeholder(), "");

        let floated = f.controller().floated_frame().unwrap();
        assert!((floated.y - (resting.y - (12.0 + resting.h))).abs() < 1e-4);
        assert_eq!(f.controller().label().target_alpha(), 1.0);

        settle(&f, &clock);
        assert_eq!(f.controller().label().frame(), floated);
        reset_clock();
    }

    #[test]
    fn default_scenario_frame_math() {
        let _clock = TestClock::install();
        let f = field();
        let resting = f.controller().label().frame();
        let label_height = resting.h;
        // 44pt field: resting y centers the label
        assert!((resting.y - (22.0 - label_height / 2.0)).abs() < 1e-4);

        f.controller.borrow_mut().begin_float_transition();
        assert_eq!(f.position(), LabelPosition::Floated);
        let floated = f.controller().floated_frame().unwrap();
        assert!((floated.y - (resting.y - (12.0 + label_height))).abs() < 1e-4);
        assert_eq!(f.controller().animation_duration(), Duration::from_millis(300));
        reset_clock();
    }

    #[test]
    fn delegate_refusing_begin_blocks_editing_and_float() {
        let _clock = TestClock::install();
        let f = field();
        let recorder = Recorder::new();
        recorder.allow_begin.set(false);
        f.set_delegate(&recorder);

        assert!(!f.focus());
        assert!(!f.is_editing());
        assert_eq!(f.position(), LabelPosition::Collapsed);
        assert!(f.controller().floated_frame().is_none());
        assert_eq!(recorder.trace(), "should_begin_editing");
        reset_clock();
    }

    #[test]
    fn default_answers_without_delegate() {
        let _clock = TestClock::install();
        let f = field();
        let input = TextInput::new();
        assert!(!f.should_clear(&input));
        assert!(f.should_return(&input));
        assert!(f.should_end_editing(&input));
        assert!(f.should_change_characters(&input, 0..0, ""));
        assert!(f.should_begin_editing(&input));
        reset_clock();
    }

    #[test]
    fn clear_is_refused_by_default() {
        let _clock = TestClock::install();
        let f = field();
        f.focus();
        f.insert("Ada");
        assert!(!f.clear());
        assert_eq!(f.text(), "Ada");
        reset_clock();
    }

    #[test]
    fn typing_floats_once_per_session() {
        let clock = TestClock::install();
        let f = field();
        f.set_text("");
        // already editing, without a focus event
        let recorder = Recorder::new();
        f.set_delegate(&recorder);
        f.input.borrow_mut().set_editing(true);

        assert!(f.insert("A"));
        let floated = f.controller().floated_frame().unwrap();
        settle(&f, &clock);
        assert!(f.insert("d"));
        assert!(f.insert("a"));
        assert_eq!(f.text(), "Ada");
        assert_eq!(f.position(), LabelPosition::Floated);
        // no new transition was issued by the later inserts
        assert!(!f.controller().is_animating());
        assert_eq!(f.controller().floated_frame(), Some(floated));
        reset_clock();
    }

    #[test]
    fn blur_with_text_keeps_label_floated() {
        let clock = TestClock::install();
        let f = field();
        f.focus();
        f.insert("Grace");
        settle(&f, &clock);

        assert!(f.blur());
        assert!(!f.is_editing());
        assert_eq!(f.position(), LabelPosition::Floated);
        assert_eq!(f.displayed_placeholder(), "");
        reset_clock();
    }

    #[test]
    fn blur_when_empty_collapses_and_restores_placeholder() {
        let clock = TestClock::install();
        let f = field();
        f.focus();
        f.insert("G");
        assert!(f.delete_backward());
        settle(&f, &clock);

        assert!(f.blur());
        assert_eq!(f.position(), LabelPosition::Collapsed);
        assert_eq!(f.controller().label().target_alpha(), 0.0);
        // restored only once the collapse completes
        assert_eq!(f.displayed_placeholder(), "");
        clock.advance(Duration::from_millis(150));
        assert!(f.tick());
        assert_eq!(f.displayed_placeholder(), "");
        clock.advance(Duration::from_millis(151));
        assert!(!f.tick());
        assert_eq!(f.displayed_placeholder(), "First Name");
        reset_clock();
    }

    #[test]
    fn refocus_during_collapse_keeps_placeholder_hidden() {
        let clock = TestClock::install();
        let f = field();
        f.focus();
        settle(&f, &clock);
        f.blur();
        clock.advance(Duration::from_millis(100));
        f.tick();

        assert!(f.focus());
        settle(&f, &clock);
        settle(&f, &clock);
        assert_eq!(f.position(), LabelPosition::Floated);
        assert!(!f.is_placeholder_visible());
        reset_clock();
    }

    #[test]
    fn did_begin_with_existing_text_floats() {
        let _clock = TestClock::install();
        let f = field();
        f.set_text("Lovelace");
        f.did_begin_editing(&TextInput::with_text("Lovelace"));
        assert_eq!(f.position(), LabelPosition::Floated);
        reset_clock();
    }

    #[test]
    fn relays_every_event_in_order() {
        let _clock = TestClock::install();
        let f = field();
        let recorder = Recorder::new();
        recorder.allow_clear.set(true);
        f.set_delegate(&recorder);

        f.focus();
        f.insert("Hi");
        f.delete_backward();
        assert!(!f.submit());
        assert!(f.clear());
        f.blur();

        insta::assert_snapshot!(recorder.trace(), @r#"
        should_begin_editing
        did_begin_editing ""
        should_change_characters 0..0 "Hi"
        should_change_characters 1..2 ""
        should_return
        should_clear
        should_end_editing
        did_end_editing ""
        "#);
        assert_eq!(f.position(), LabelPosition::Collapsed);
        reset_clock();
    }

    /// Blurs the field it is attached to when return is pressed.
    #[derive(Default)]
    struct BlurOnReturn {
        field: RefCell<Weak<FloatTextField>>,
    }

    impl TextFieldDelegate for BlurOnReturn {
        fn should_return(&self, _field: &TextInput) -> bool {
            if let Some(field) = self.field.borrow().upgrade() {
                field.blur();
            }
            true
        }
    }

    #[test]
    fn delegate_can_blur_from_should_return() {
        let _clock = TestClock::install();
        let f = Rc::new(field());
        let delegate = Rc::new(BlurOnReturn::default());
        *delegate.field.borrow_mut() = Rc::downgrade(&f);
        f.set_delegate(&delegate);

        assert!(f.focus());
        assert!(f.submit());
        assert!(!f.is_editing());
        assert_eq!(f.position(), LabelPosition::Collapsed);
        reset_clock();
    }

    #[test]
    fn dropped_delegate_falls_back_to_defaults() {
        let _clock = TestClock::install();
        let f = field();
        {
            let recorder = Recorder::new();
            recorder.allow_clear.set(true);
            f.set_delegate(&recorder);
            assert!(f.has_delegate());
        }
        assert!(!f.should_clear(&TextInput::new()));
        assert!(!f.has_delegate());
        reset_clock();
    }

    #[test]
    fn attribute_changes_never_move_the_label_state() {
        let _clock = TestClock::install();
        let f = field();
        f.set_label_color(Color::GREEN);
        f.set_label_font(Font::system(15.0));
        f.set_label_offset(20.0);
        f.set_animation_duration(Duration::from_secs(1));
        assert_eq!(f.position(), LabelPosition::Collapsed);
        assert_eq!(f.controller().label().color(), Color::GREEN);
        assert_eq!(f.controller().offset(), 20.0);

        f.focus();
        f.set_label_text("Middle Name");
        assert_eq!(f.position(), LabelPosition::Floated);
        reset_clock();
    }
}
