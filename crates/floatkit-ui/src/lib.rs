//! Floating-label text inputs.
//!
//! [`FloatTextField`] and [`FloatTextView`] decorate an editable control
//! ([`TextInput`]) with a secondary label that rests over the input while it
//! is empty and floats above it once the user focuses or types. Both share
//! [`FloatingLabelController`] for the two-state transition and relay every
//! lifecycle callback to an optional external delegate.
//!
//! ```rust
//! use std::rc::Rc;
//! use floatkit_core::Rect;
//! use floatkit_text::ApproxMeasure;
//! use floatkit_ui::{FloatTextField, LabelPosition};
//!
//! let field = FloatTextField::with_measure(Rect::new(0.0, 0.0, 280.0, 44.0), Rc::new(ApproxMeasure));
//! field.set_label_text("First Name");
//! field.focus();
//! assert_eq!(field.position(), LabelPosition::Floated);
//! ```

pub mod config;
pub mod controller;
pub mod delegate;
pub mod input;
pub mod label;
pub mod textfield;
pub mod textview;

pub use config::{ConfigError, FieldConfig, FormConfig, LabelStyle, TextViewConfig};
pub use controller::{FloatingLabelController, LabelAnchor, LabelPosition, TransitionOutcome};
pub use delegate::{TextFieldDelegate, TextViewDelegate};
pub use input::TextInput;
pub use label::{FloatingLabel, Label};
pub use textfield::FloatTextField;
pub use textview::FloatTextView;
