//! Scripted form session: three floating-label fields and one text view,
//! stepped at 60 fps on a virtual clock so every frame can be logged.
//!
//! `cargo run -p form_demo -- [form.json]`, with `RUST_LOG=debug` for
//! transition logs.

use anyhow::Context;
use floatkit_core::Rect;
use floatkit_core::animation::TestClock;
use floatkit_core::{Duration, Instant};
use floatkit_ui::{FloatTextField, FloatTextView, FormConfig, TextFieldDelegate, TextInput};
use std::rc::Rc;

const DEFAULT_FORM: &str = include_str!("../form.json");
const FRAME: Duration = Duration::from_micros(16_667);
const FIELD_SIZE: (f32, f32) = (280.0, 44.0);

/// Keeps the last name field to letters only.
struct LettersOnly;

impl TextFieldDelegate for LettersOnly {
    fn should_change_characters(
        &self,
        _field: &TextInput,
        _range: std::ops::Range<usize>,
        replacement: &str,
    ) -> bool {
        let ok = replacement.chars().all(char::is_alphabetic);
        if !ok {
            log::info!("rejected {replacement:?}");
        }
        ok
    }

    fn should_clear(&self, _field: &TextInput) -> bool {
        true
    }
}

struct Form {
    fields: Vec<(String, FloatTextField)>,
    notes: FloatTextView,
}

impl Form {
    fn build(config: &FormConfig) -> anyhow::Result<Self> {
        let mut fields = Vec::new();
        for field_config in &config.fields {
            let field = FloatTextField::new(Rect::new(0.0, 0.0, FIELD_SIZE.0, FIELD_SIZE.1));
            field_config
                .apply(&field)
                .with_context(|| format!("applying field `{}`", field_config.name))?;
            fields.push((field_config.name.clone(), field));
        }

        let notes = FloatTextView::new(Rect::new(0.0, 0.0, 280.0, 120.0));
        if let Some(view_config) = config.text_views.first() {
            view_config
                .apply(&notes)
                .with_context(|| format!("applying text view `{}`", view_config.name))?;
        }
        Ok(Self { fields, notes })
    }

    fn field(&self, name: &str) -> anyhow::Result<&FloatTextField> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .with_context(|| format!("no field named `{name}`"))
    }

    fn tick(&self) -> bool {
        let mut animating = self.notes.tick();
        for (_, field) in &self.fields {
            animating |= field.tick();
        }
        animating
    }

    fn render(&self) {
        for (name, field) in &self.fields {
            let c = field.controller();
            let label = c.label();
            let frame = label.frame();
            log::info!(
                "{name:>7} {:?} text={:?} placeholder={:?} label=({:.1},{:.1} {:.0}x{:.0}) alpha={:.2}",
                c.position(),
                field.text(),
                field.displayed_placeholder(),
                frame.x,
                frame.y,
                frame.w,
                frame.h,
                label.alpha(),
            );
        }
        let c = self.notes.controller();
        log::info!(
            "  notes {:?} text={:?} placeholder={:?} alpha={:.2}",
            c.position(),
            self.notes.text(),
            self.notes.placeholder_label().text,
            c.label().alpha(),
        );
    }
}

/// Steps frames until every animation settles.
fn run_frames(form: &Form, clock: &TestClock) {
    let start = Instant::now();
    let mut frames = 0u32;
    while form.tick() {
        clock.advance(FRAME);
        frames += 1;
    }
    log::debug!("settled after {frames} frames ({:?} wall)", start.elapsed());
    form.render();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => FormConfig::from_path(&path).with_context(|| format!("loading {path}"))?,
        None => FormConfig::from_json(DEFAULT_FORM).context("parsing built-in form")?,
    };
    let clock = TestClock::install();
    let form = Form::build(&config)?;
    log::info!("Starting form demo with {} fields", form.fields.len());
    form.render();

    let letters_only = Rc::new(LettersOnly);
    let last = form.field("last")?;
    last.set_delegate(&letters_only);

    let first = form.field("first")?;
    first.focus();
    run_frames(&form, &clock);
    for ch in ["A", "d", "a"] {
        first.insert(ch);
    }
    first.blur();
    run_frames(&form, &clock);

    let middle = form.field("middle")?;
    middle.focus();
    run_frames(&form, &clock);
    middle.blur();
    run_frames(&form, &clock);

    last.focus();
    last.insert("Love1ace");
    last.insert("Lovelace");
    last.clear();
    last.blur();
    run_frames(&form, &clock);

    form.notes.focus();
    form.notes.insert("Remember the analytical engine.");
    run_frames(&form, &clock);
    form.notes.blur();
    run_frames(&form, &clock);

    log::info!("Form demo finished");
    Ok(())
}
