//! Projection state and the pointer/animation state machine.

use super::auto_rotate::{step_yaw, AutoRotator};
use super::tween::ProgressTween;
use crate::geo::MorphProjection;
use std::time::Duration;

/// Degrees of rotation per pointer pixel in sphere mode.
pub const SPHERE_DRAG_SENSITIVITY: f64 = 0.5;
/// Degrees of rotation per pointer pixel in plane mode.
pub const PLANE_DRAG_SENSITIVITY: f64 = 0.25;
/// Fraction at which the widget is considered to be in plane mode.
pub const PLANE_MODE_THRESHOLD: f64 = 0.5;

const MAX_PITCH: f64 = 90.0;

/// What the pointer and the tween are currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No pointer down, no tween in flight.
    #[default]
    Idle,
    /// Pointer held on the canvas. A tween interrupted by the drag is kept
    /// here and resumes on release.
    Dragging { paused: Option<ProgressTween> },
    /// Progress tween in flight.
    Animating(ProgressTween),
}

/// Progress, rotation and translation of the morphing globe.
#[derive(Debug, Clone)]
pub struct MorphState {
    /// Morph progress in percent, 0 = sphere, 100 = plane.
    progress: f64,
    /// (yaw, pitch) in degrees.
    rotation: [f64; 2],
    /// Offset of the projection center in view units.
    translation: [f64; 2],
    interaction: Interaction,
    auto_rotator: AutoRotator,
    auto_rotate_enabled: bool,
}

impl Default for MorphState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MorphState {
    pub fn new(auto_rotate_enabled: bool) -> Self {
        let mut state = Self {
            progress: 0.0,
            rotation: [0.0, 0.0],
            translation: [0.0, 0.0],
            interaction: Interaction::Idle,
            auto_rotator: AutoRotator::new(),
            auto_rotate_enabled,
        };
        state.sync_auto_rotation();
        state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress as a unit fraction.
    pub fn fraction(&self) -> f64 {
        self.progress / 100.0
    }

    pub fn rotation(&self) -> [f64; 2] {
        self.rotation
    }

    #[allow(dead_code)]
    pub fn translation(&self) -> [f64; 2] {
        self.translation
    }

    #[allow(dead_code)]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    /// True while a tween is in flight or paused under a drag.
    pub fn is_animating(&self) -> bool {
        matches!(
            self.interaction,
            Interaction::Animating(_) | Interaction::Dragging { paused: Some(_) }
        )
    }

    pub fn is_plane_mode(&self) -> bool {
        self.fraction() >= PLANE_MODE_THRESHOLD
    }

    /// Whether the auto-rotation timer is currently running.
    pub fn auto_rotation_active(&self) -> bool {
        self.auto_rotator.is_running()
    }

    pub fn set_auto_rotate_enabled(&mut self, enabled: bool) {
        self.auto_rotate_enabled = enabled;
        self.sync_auto_rotation();
    }

    /// Current drag sensitivity in degrees per pixel.
    pub fn drag_sensitivity(&self) -> f64 {
        if self.is_plane_mode() {
            PLANE_DRAG_SENSITIVITY
        } else {
            SPHERE_DRAG_SENSITIVITY
        }
    }

    pub fn pointer_down(&mut self) {
        let paused = match self.interaction {
            Interaction::Idle => None,
            Interaction::Animating(tween) => {
                log::debug!("Morph paused by drag at {:.1}%", self.progress);
                Some(tween)
            }
            Interaction::Dragging { .. } => return,
        };
        self.interaction = Interaction::Dragging { paused };
        self.sync_auto_rotation();
    }

    /// Applies a pointer delta (screen points) while dragging.
    pub fn pointer_moved(&mut self, dx: f64, dy: f64) {
        if !self.is_dragging() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let s = self.drag_sensitivity();
        self.rotation[0] += dx * s;
        self.rotation[1] = (self.rotation[1] - dy * s).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        let Interaction::Dragging { paused } = self.interaction else {
            return;
        };
        self.interaction = match paused {
            Some(tween) => Interaction::Animating(tween),
            None => Interaction::Idle,
        };
        self.sync_auto_rotation();
    }

    /// Starts the sphere/plane toggle. Returns false if it was ignored.
    pub fn trigger_animation(&mut self) -> bool {
        if self.interaction != Interaction::Idle {
            return false;
        }
        let tween = ProgressTween::toggle_from(self.progress);
        log::info!(
            "Morph started: {:.0}% -> {:.0}%",
            self.progress,
            tween.target()
        );
        self.interaction = Interaction::Animating(tween);
        self.sync_auto_rotation();
        true
    }

    /// Puts rotation and translation back to the origin.
    pub fn reset_view(&mut self) {
        self.rotation = [0.0, 0.0];
        self.translation = [0.0, 0.0];
    }

    /// Sets progress directly from the scrub slider. Ignored while a tween
    /// owns the progress.
    pub fn set_progress(&mut self, progress: f64) {
        if self.is_animating() || !progress.is_finite() {
            return;
        }
        self.progress = progress.clamp(0.0, 100.0);
        self.sync_auto_rotation();
    }

    /// Restores a view from shared parameters.
    pub fn restore_view(&mut self, progress: Option<f64>, yaw: Option<f64>, pitch: Option<f64>) {
        if let Some(progress) = progress {
            self.set_progress(progress);
        }
        if let Some(yaw) = yaw.filter(|v| v.is_finite()) {
            self.rotation[0] = yaw.rem_euclid(360.0);
        }
        if let Some(pitch) = pitch.filter(|v| v.is_finite()) {
            self.rotation[1] = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }
    }

    /// Advances the tween and the auto-rotation timer by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if let Interaction::Animating(mut tween) = self.interaction {
            self.progress = tween.advance(dt);
            if tween.is_finished() {
                log::info!("Morph finished at {:.0}%", self.progress);
                self.interaction = Interaction::Idle;
            } else {
                self.interaction = Interaction::Animating(tween);
            }
            self.sync_auto_rotation();
            return;
        }

        let steps = self.auto_rotator.tick(dt);
        if steps > 0 {
            self.rotation[0] = step_yaw(self.rotation[0], steps);
        }
    }

    /// Whether frames must keep coming without input.
    pub fn needs_repaint(&self) -> bool {
        matches!(self.interaction, Interaction::Animating(_)) || self.auto_rotation_active()
    }

    /// Label for the animate button.
    pub fn button_label(&self) -> &'static str {
        if self.is_animating() {
            "Animating..."
        } else if self.progress == 0.0 {
            "Unroll Globe"
        } else {
            "Roll to Globe"
        }
    }

    /// Projection for the current state.
    pub fn projection(&self) -> MorphProjection {
        MorphProjection::new(self.fraction(), self.rotation, self.translation)
    }

    fn sync_auto_rotation(&mut self) {
        let active = self.auto_rotate_enabled
            && !self.is_plane_mode()
            && self.interaction == Interaction::Idle;
        self.auto_rotator.set_running(active);
    }
}
