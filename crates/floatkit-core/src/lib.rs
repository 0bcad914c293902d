//! # Floatkit core
//!
//! Plain data shared by the floatkit crates:
//!
//! - [`Rect`], [`Size`], [`Vec2`]: label frames and widget bounds.
//! - [`Color`] and [`Font`]: semantic label styling.
//! - [`animation`]: a per-thread animation clock and [`AnimatedValue`],
//!   the property animator labels use for their frame and opacity.
//! - [`TextMeasure`]: the "size that fits" contract a text backend provides.
//!
//! Animations are pulled, not pushed: owners call `update()` once per frame
//! and read the current value back.
//!
//! ```rust
//! use floatkit_core::animation::{AnimatedValue, AnimationSpec, Easing, TestClock};
//! use floatkit_core::Duration;
//!
//! let clock = TestClock::install();
//! let mut alpha = AnimatedValue::new(
//!     0.0f32,
//!     AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
//! );
//! alpha.set_target(1.0);
//! clock.advance(Duration::from_millis(50));
//! assert!(alpha.update());
//! assert!((*alpha.get() - 0.5).abs() < 1e-3);
//! ```

pub mod animation;
pub mod color;
pub mod font;
pub mod geometry;
pub mod measure;
mod tests;

pub use animation::{AnimatedValue, AnimationSpec, Easing, Interpolate};
pub use color::*;
pub use font::*;
pub use geometry::*;
pub use measure::*;

pub use web_time::{Duration, Instant};
