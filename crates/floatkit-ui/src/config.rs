//! JSON form descriptions.
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "first", "label": { "text": "First Name", "color": "#0000FF", "font_size": 15 } }
//!   ],
//!   "text_views": [
//!     { "name": "notes", "label": { "text": "Enter text here" }, "placeholder": "Enter text here" }
//!   ]
//! }
//! ```
//!
//! Applying a config only touches label attributes; it never floats or
//! collapses a label.

use std::path::Path;

use floatkit_core::{Color, Duration, Font, FontFamily};
use serde::{Deserialize, Serialize};

use crate::textfield::FloatTextField;
use crate::textview::FloatTextView;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read form config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse form config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{name}`: animation duration must be positive")]
    NonPositiveDuration { name: String },
    #[error("`{name}`: label offset must be finite, got {value}")]
    InvalidOffset { name: String, value: f32 },
    #[error("`{name}`: font size must be positive, got {value}")]
    InvalidFontSize { name: String, value: f32 },
    #[error("`{name}`: invalid color `{value}`")]
    InvalidColor { name: String, value: String },
}

/// Floating label attributes shared by fields and text views.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelStyle {
    pub text: String,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub color: Option<String>,
    pub offset: Option<f32>,
    pub animation_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldConfig {
    pub name: String,
    pub label: LabelStyle,
    pub placeholder: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextViewConfig {
    pub name: String,
    pub label: LabelStyle,
    pub placeholder: Option<String>,
    /// View font size; the floating label follows it.
    pub font_size: Option<f32>,
    pub text_color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormConfig {
    pub fields: Vec<FieldConfig>,
    pub text_views: Vec<TextViewConfig>,
}

impl FormConfig {
    /// Parses and validates.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in &self.fields {
            field.label.validate(&field.name)?;
        }
        for view in &self.text_views {
            view.label.validate(&view.name)?;
            if let Some(size) = view.font_size {
                check_font_size(&view.name, size)?;
            }
            if let Some(color) = &view.text_color {
                parse_color(&view.name, color)?;
            }
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn text_view(&self, name: &str) -> Option<&TextViewConfig> {
        self.text_views.iter().find(|v| v.name == name)
    }
}

impl LabelStyle {
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.animation_ms == Some(0) {
            return Err(ConfigError::NonPositiveDuration {
                name: name.to_owned(),
            });
        }
        if let Some(offset) = self.offset
            && !offset.is_finite()
        {
            return Err(ConfigError::InvalidOffset {
                name: name.to_owned(),
                value: offset,
            });
        }
        if let Some(size) = self.font_size {
            check_font_size(name, size)?;
        }
        if let Some(color) = &self.color {
            parse_color(name, color)?;
        }
        Ok(())
    }

    /// The configured font, if any font attribute is set.
    pub fn font(&self) -> Option<Font> {
        if self.font_family.is_none() && self.font_size.is_none() {
            return None;
        }
        let base = Font::default();
        Some(Font {
            family: self
                .font_family
                .as_deref()
                .map(family_from_name)
                .unwrap_or(base.family),
            size: self.font_size.unwrap_or(base.size),
            ..base
        })
    }

    pub fn animation_duration(&self) -> Option<Duration> {
        self.animation_ms.map(Duration::from_millis)
    }
}

impl FieldConfig {
    pub fn apply(&self, field: &FloatTextField) -> Result<(), ConfigError> {
        self.label.validate(&self.name)?;
        let style = &self.label;
        field.set_label_text(style.text.clone());
        if let Some(font) = style.font() {
            field.set_label_font(font);
        }
        if let Some(color) = &style.color {
            field.set_label_color(parse_color(&self.name, color)?);
        }
        if let Some(offset) = style.offset {
            field.set_label_offset(offset);
        }
        if let Some(duration) = style.animation_duration() {
            field.set_animation_duration(duration);
        }
        if let Some(placeholder) = &self.placeholder {
            field.set_placeholder(placeholder.clone());
        }
        log::debug!("configured text field `{}`", self.name);
        Ok(())
    }
}

impl TextViewConfig {
    pub fn apply(&self, view: &FloatTextView) -> Result<(), ConfigError> {
        self.label.validate(&self.name)?;
        // View-wide attributes first; the label style may then override them.
        if let Some(size) = self.font_size {
            check_font_size(&self.name, size)?;
            view.set_font(view.font().with_size(size));
        }
        if let Some(color) = &self.text_color {
            view.set_text_color(parse_color(&self.name, color)?);
        }
        if let Some(placeholder) = &self.placeholder {
            view.set_placeholder_text(placeholder.clone());
        }
        let style = &self.label;
        view.set_label_text(style.text.clone());
        if let Some(font) = style.font() {
            view.set_label_font(font);
        }
        if let Some(color) = &style.color {
            view.set_label_color(parse_color(&self.name, color)?);
        }
        if let Some(offset) = style.offset {
            view.set_label_offset(offset);
        }
        if let Some(duration) = style.animation_duration() {
            view.set_animation_duration(duration);
        }
        log::debug!("configured text view `{}`", self.name);
        Ok(())
    }
}

fn family_from_name(name: &str) -> FontFamily {
    match name {
        "sans-serif" | "system" => FontFamily::SansSerif,
        "serif" => FontFamily::Serif,
        "monospace" => FontFamily::Monospace,
        other => FontFamily::Named(other.to_owned()),
    }
}

fn check_font_size(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFontSize {
            name: name.to_owned(),
            value,
        })
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, ConfigError> {
    Color::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelPosition;
    use floatkit_core::Rect;
    use floatkit_core::animation::{TestClock, reset_clock};
    use floatkit_text::ApproxMeasure;
    use std::rc::Rc;

    const FORM: &str = r##"{
        "fields": [
            { "name": "first", "label": { "text": "First Name", "color": "#0000FF", "font_size": 15 } },
            { "name": "middle", "label": { "text": "Middle Name", "color": "#00FF00", "offset": 20, "animation_ms": 1000 } },
            { "name": "last", "label": { "text": "Last Name", "animation_ms": 500 }, "placeholder": "Last Name" }
        ],
        "text_views": [
            { "name": "notes", "label": { "text": "Enter text here" }, "placeholder": "Enter text here", "font_size": 14 }
        ]
    }"##;

    #[test]
    fn parses_demo_form() {
        let form = FormConfig::from_json(FORM).unwrap();
        assert_eq!(form.fields.len(), 3);
        let middle = form.field("middle").unwrap();
        assert_eq!(middle.label.offset, Some(20.0));
        assert_eq!(middle.label.animation_duration(), Some(Duration::from_secs(1)));
        assert_eq!(form.text_view("notes").unwrap().font_size, Some(14.0));
        assert!(form.field("nickname").is_none());
    }

    #[test]
    fn applies_attributes_without_moving_labels() {
        let _clock = TestClock::install();
        let form = FormConfig::from_json(FORM).unwrap();
        let field = FloatTextField::with_measure(Rect::new(0.0, 0.0, 280.0, 44.0), Rc::new(ApproxMeasure));
        form.field("middle").unwrap().apply(&field).unwrap();

        let c = field.controller();
        assert_eq!(c.label().text(), "Middle Name");
        assert_eq!(c.label().color(), Color::GREEN);
        assert_eq!(c.offset(), 20.0);
        assert_eq!(c.animation_duration(), Duration::from_secs(1));
        assert_eq!(c.position(), LabelPosition::Collapsed);
        drop(c);

        let view = FloatTextView::with_measure(Rect::new(0.0, 0.0, 300.0, 120.0), Rc::new(ApproxMeasure));
        form.text_view("notes").unwrap().apply(&view).unwrap();
        assert_eq!(view.font().size, 14.0);
        assert_eq!(view.placeholder_label().text, "Enter text here");
        assert_eq!(view.position(), LabelPosition::Collapsed);
        reset_clock();
    }

    #[test]
    fn text_view_label_style_overrides_view_font_and_color() {
        let _clock = TestClock::install();
        let form = FormConfig::from_json(
            r##"{ "text_views": [ { "name": "v", "font_size": 14, "label": { "text": "L", "color": "#00FF00", "font_size": 20 } } ] }"##,
        )
        .unwrap();
        let view = FloatTextView::with_measure(Rect::new(0.0, 0.0, 300.0, 120.0), Rc::new(ApproxMeasure));
        form.text_view("v").unwrap().apply(&view).unwrap();

        assert_eq!(view.controller().label().color(), Color::GREEN);
        assert_eq!(view.controller().label().font().size, 20.0);
        assert_eq!(view.placeholder_label().font.size, 14.0);
        assert_eq!(view.placeholder_label().color, Color::BLACK);
        reset_clock();
    }

    #[test]
    fn rejects_zero_duration() {
        let err = FormConfig::from_json(
            r#"{ "fields": [ { "name": "x", "label": { "animation_ms": 0 } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveDuration { ref name } if name == "x"));
        assert_eq!(err.to_string(), "`x`: animation duration must be positive");
    }

    #[test]
    fn rejects_bad_color_and_font_size() {
        let err = FormConfig::from_json(
            r#"{ "fields": [ { "name": "c", "label": { "color": "blue" } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));

        let err = FormConfig::from_json(
            r#"{ "text_views": [ { "name": "v", "font_size": -3 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFontSize { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FormConfig::from_json("{ fields: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn font_family_names() {
        let style = LabelStyle {
            font_family: Some("Avenir".into()),
            ..Default::default()
        };
        assert_eq!(style.font().unwrap().family, FontFamily::Named("Avenir".into()));
        assert_eq!(style.font().unwrap().size, 12.0);
        assert_eq!(LabelStyle::default().font(), None);
    }
}
