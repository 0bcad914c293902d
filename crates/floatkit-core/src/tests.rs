#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::{Color, Font, FontFamily, FontWeight, Rect, Size, Vec2};
    use web_time::Duration;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_color_parse_hex_rejects_garbage() {
        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("zzzzzz"), None);
        assert_eq!(Color::parse_hex("#é12345"), None);
        assert_eq!(Color::from_hex("nope"), Color::BLACK);
    }

    #[test]
    fn test_color_faded() {
        assert_eq!(Color::BLUE.faded(0.5), Color(0, 0, 255, 128));
        assert_eq!(Color::BLUE.faded(2.0), Color::BLUE);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_empty_and_translate() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(4.0, 4.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());

        let moved = Rect::new(0.0, 14.8, 60.0, 15.6).translate(0.0, -27.6);
        assert_eq!(moved.size(), Size::new(60.0, 15.6));
        assert!((moved.y - -12.8).abs() < 1e-4);
    }

    #[test]
    fn test_font_defaults() {
        let f = Font::default();
        assert_eq!(f.size, 12.0);
        assert_eq!(f.family, FontFamily::SansSerif);
        assert_eq!(Font::bold_system(15.0).weight, FontWeight::BOLD);
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
        reset_clock();
    }

    #[test]
    fn test_retarget_restarts_from_current() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
        );
        a.set_target(1.0);
        clock.advance(Duration::from_millis(50));
        a.update();

        a.set_target(0.0);
        assert_eq!(*a.target(), 0.0);
        clock.advance(Duration::from_millis(50));
        a.update();
        assert!((*a.get() - 0.25).abs() < 1e-3);
        reset_clock();
    }

    #[test]
    fn test_zero_duration_completes_on_first_update() {
        let _clock = TestClock::install();
        let mut a = AnimatedValue::new(
            Rect::ZERO,
            AnimationSpec::tween(Duration::ZERO, Easing::EaseInOut),
        );
        a.set_target(Rect::new(0.0, -10.0, 5.0, 5.0));
        assert!(a.is_animating());
        assert!(!a.update());
        assert_eq!(*a.get(), Rect::new(0.0, -10.0, 5.0, 5.0));
        reset_clock();
    }

    #[test]
    fn test_snap_cancels_animation() {
        let _clock = TestClock::install();
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::default());
        a.set_target(1.0);
        a.snap_to(0.5);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), 0.5);
        assert_eq!(*a.target(), 0.5);
        reset_clock();
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        for e in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert!(e.interpolate(0.0).abs() < 1e-6);
            assert!((e.interpolate(1.0) - 1.0).abs() < 1e-6);
        }
    }
}
