//! Fixed-interval auto-rotation timer.

use std::time::Duration;

/// Time between auto-rotation steps.
pub const AUTO_ROTATE_INTERVAL: Duration = Duration::from_millis(50);

/// Yaw added per step, in degrees.
pub const AUTO_ROTATE_STEP_DEG: f64 = 0.3;

/// Interval timer driven by frame deltas.
///
/// `None` means the timer is cleared; starting it again begins a fresh
/// interval.
#[derive(Debug, Clone, Default)]
pub struct AutoRotator {
    pending: Option<Duration>,
}

impl AutoRotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts or clears the timer.
    pub fn set_running(&mut self, running: bool) {
        match (running, self.pending.is_some()) {
            (true, false) => self.pending = Some(Duration::ZERO),
            (false, true) => self.pending = None,
            _ => {}
        }
    }

    /// Advances the timer and returns how many intervals fired.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        let Some(pending) = self.pending.as_mut() else {
            return 0;
        };

        *pending += dt;
        let mut fired = 0;
        while *pending >= AUTO_ROTATE_INTERVAL {
            *pending -= AUTO_ROTATE_INTERVAL;
            fired += 1;
        }
        fired
    }
}

/// Applies `steps` auto-rotation steps to a yaw angle, wrapping at 360.
pub fn step_yaw(yaw: f64, steps: u32) -> f64 {
    (0..steps).fold(yaw, |yaw, _| (yaw + AUTO_ROTATE_STEP_DEG) % 360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_timer_never_fires() {
        let mut rotator = AutoRotator::new();
        assert_eq!(rotator.tick(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut rotator = AutoRotator::new();
        rotator.set_running(true);

        assert_eq!(rotator.tick(Duration::from_millis(30)), 0);
        assert_eq!(rotator.tick(Duration::from_millis(30)), 1);
        assert_eq!(rotator.tick(Duration::from_millis(140)), 3);
    }

    #[test]
    fn test_clearing_discards_partial_interval() {
        let mut rotator = AutoRotator::new();
        rotator.set_running(true);
        rotator.tick(Duration::from_millis(40));

        rotator.set_running(false);
        rotator.set_running(true);
        assert_eq!(rotator.tick(Duration::from_millis(20)), 0);
    }

    #[test]
    fn test_step_yaw_wraps() {
        assert!((step_yaw(0.0, 10) - 3.0).abs() < 1e-9);
        let wrapped = step_yaw(359.9, 1);
        assert!((wrapped - 0.2).abs() < 1e-9);
    }
}
