//! Timed progress tween for the sphere/plane transition.

use std::time::Duration;

/// Length of one full morph.
pub const MORPH_DURATION: Duration = Duration::from_millis(2000);

/// Quadratic ease-in-out on `u` in [0, 1].
pub fn ease_in_out_quad(u: f64) -> f64 {
    if u < 0.5 {
        2.0 * u * u
    } else {
        -1.0 + (4.0 - 2.0 * u) * u
    }
}

/// An in-flight progress animation.
///
/// Time is accumulated from frame deltas rather than read from a wall
/// clock, so a paused tween simply stops receiving deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTween {
    start: f64,
    end: f64,
    duration: Duration,
    elapsed: Duration,
}

impl ProgressTween {
    /// Starts a tween from `start` (percent) toward the opposite mode:
    /// 100 when starting exactly at 0, otherwise 0.
    pub fn toggle_from(start: f64) -> Self {
        let end = if start == 0.0 { 100.0 } else { 0.0 };
        Self::new(start, end, MORPH_DURATION)
    }

    pub fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn target(&self) -> f64 {
        self.end
    }

    /// Fraction of the duration elapsed, in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current progress value.
    pub fn progress(&self) -> f64 {
        self.start + (self.end - self.start) * ease_in_out_quad(self.fraction())
    }

    pub fn is_finished(&self) -> bool {
        self.fraction() >= 1.0
    }

    /// Advances the tween and returns the new progress value.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-12);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-12);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_targets() {
        assert_eq!(ProgressTween::toggle_from(0.0).target(), 100.0);
        assert_eq!(ProgressTween::toggle_from(100.0).target(), 0.0);
        // Anything off zero rolls back to the globe
        assert_eq!(ProgressTween::toggle_from(42.0).target(), 0.0);
    }

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = ProgressTween::toggle_from(0.0);

        let half = tween.advance(MORPH_DURATION / 2);
        assert!((half - 50.0).abs() < 1e-9);
        assert!(!tween.is_finished());

        let done = tween.advance(MORPH_DURATION);
        assert_eq!(done, 100.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_tween_is_monotonic() {
        let mut tween = ProgressTween::toggle_from(100.0);
        let mut last = tween.progress();
        for _ in 0..40 {
            let next = tween.advance(Duration::from_millis(50));
            assert!(next <= last);
            last = next;
        }
        assert_eq!(last, 0.0);
    }
}
