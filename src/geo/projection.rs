//! Sphere-to-plane morph projection.
//!
//! Each point is projected with both the orthographic and equirectangular
//! formulas and the two planar results are blended. Blending output
//! coordinates instead of projection parameters keeps the transition free of
//! jumps even though the two projections share no common parameterization.

use glam::{DVec2, DVec3};
use std::f64::consts::PI;

/// Width of the logical view box.
pub const VIEW_WIDTH: f64 = 800.0;
/// Height of the logical view box.
pub const VIEW_HEIGHT: f64 = 500.0;

/// Scale used when fully in sphere mode.
pub const SPHERE_SCALE: f64 = 200.0;
/// Scale used when fully flattened.
pub const PLANE_SCALE: f64 = 120.0;

/// Programmed yaw offset at alpha = 0 and alpha = 1 (degrees).
pub const BASE_ROTATION: (f64, f64) = (0.0, 0.0);

/// Orthographic projection of (λ, φ) in radians onto the unit disk.
pub fn orthographic_raw(lambda: f64, phi: f64) -> DVec2 {
    DVec2::new(phi.cos() * lambda.sin(), phi.sin())
}

/// Equirectangular projection of (λ, φ) in radians.
pub fn equirectangular_raw(lambda: f64, phi: f64) -> DVec2 {
    DVec2::new(lambda, phi)
}

/// Square-root easing of the morph fraction.
pub fn eased_alpha(t: f64) -> f64 {
    t.clamp(0.0, 1.0).sqrt()
}

/// Linear scale between the sphere and plane constants.
pub fn scale_for_alpha(alpha: f64) -> f64 {
    SPHERE_SCALE + (PLANE_SCALE - SPHERE_SCALE) * alpha
}

fn base_yaw_for_alpha(alpha: f64) -> f64 {
    BASE_ROTATION.0 + (BASE_ROTATION.1 - BASE_ROTATION.0) * alpha
}

/// Wraps an angle in radians into [-π, π].
pub fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}

/// Rotation of the sphere: yaw about the polar axis, then pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRotation {
    yaw: f64,
    cos_pitch: f64,
    sin_pitch: f64,
}

impl SphericalRotation {
    /// Creates a rotation from yaw and pitch in degrees.
    pub fn from_degrees(yaw: f64, pitch: f64) -> Self {
        let yaw = yaw.rem_euclid(360.0).to_radians();
        let pitch = pitch.to_radians();
        Self {
            yaw: wrap_longitude(yaw),
            cos_pitch: pitch.cos(),
            sin_pitch: pitch.sin(),
        }
    }

    /// Rotates (λ, φ) in radians.
    pub fn rotate(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_longitude(lambda + self.yaw);
        if self.sin_pitch == 0.0 {
            return (lambda, phi);
        }

        let cos_phi = phi.cos();
        let v = DVec3::new(lambda.cos() * cos_phi, lambda.sin() * cos_phi, phi.sin());
        let k = v.z * self.cos_pitch + v.x * self.sin_pitch;
        (
            v.y.atan2(v.x * self.cos_pitch - v.z * self.sin_pitch),
            k.clamp(-1.0, 1.0).asin(),
        )
    }
}

/// The blended projection for one frame.
#[derive(Debug, Clone, Copy)]
pub struct MorphProjection {
    alpha: f64,
    scale: f64,
    center: DVec2,
    rotation: SphericalRotation,
}

impl MorphProjection {
    /// Builds the projection for a morph fraction `t` in [0, 1], a user
    /// rotation `[yaw, pitch]` in degrees and a translation in view units.
    pub fn new(t: f64, rotation: [f64; 2], translation: [f64; 2]) -> Self {
        let alpha = eased_alpha(t);
        Self {
            alpha,
            scale: scale_for_alpha(alpha),
            center: DVec2::new(
                VIEW_WIDTH / 2.0 + translation[0],
                VIEW_HEIGHT / 2.0 + translation[1],
            ),
            rotation: SphericalRotation::from_degrees(
                base_yaw_for_alpha(alpha) + rotation[0],
                rotation[1],
            ),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[allow(dead_code)]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Applies the frame rotation to a lon/lat point in degrees.
    /// Returns radians.
    pub fn rotate(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.rotation.rotate(lon.to_radians(), lat.to_radians())
    }

    /// Projects an already rotated point (radians) into view-box units.
    pub fn project_rotated(&self, lambda: f64, phi: f64) -> DVec2 {
        let sphere = orthographic_raw(lambda, phi);
        let plane = equirectangular_raw(lambda, phi);
        let blended = sphere + (plane - sphere) * self.alpha;

        // Screen y grows downward
        DVec2::new(
            self.center.x + self.scale * blended.x,
            self.center.y - self.scale * blended.y,
        )
    }

    /// Projects a lon/lat point in degrees into view-box units.
    #[allow(dead_code)]
    pub fn project(&self, lon: f64, lat: f64) -> DVec2 {
        let (lambda, phi) = self.rotate(lon, lat);
        self.project_rotated(lambda, phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_scale_endpoints() {
        assert!((MorphProjection::new(0.0, [0.0, 0.0], [0.0, 0.0]).scale() - SPHERE_SCALE).abs() < EPS);
        assert!((MorphProjection::new(1.0, [0.0, 0.0], [0.0, 0.0]).scale() - PLANE_SCALE).abs() < EPS);
    }

    #[test]
    fn test_alpha_is_square_root_eased() {
        let projection = MorphProjection::new(0.25, [0.0, 0.0], [0.0, 0.0]);
        assert!((projection.alpha() - 0.5).abs() < EPS);
        assert!((projection.scale() - 160.0).abs() < EPS);
    }

    #[test]
    fn test_sphere_mode_projects_orthographically() {
        let projection = MorphProjection::new(0.0, [0.0, 0.0], [0.0, 0.0]);

        let center = projection.project(0.0, 0.0);
        assert!((center.x - 400.0).abs() < EPS);
        assert!((center.y - 250.0).abs() < EPS);

        // 90°E lies on the limb of the disk
        let limb = projection.project(90.0, 0.0);
        assert!((limb.x - (400.0 + SPHERE_SCALE)).abs() < EPS);

        let north = projection.project(0.0, 90.0);
        assert!((north.y - (250.0 - SPHERE_SCALE)).abs() < EPS);
    }

    #[test]
    fn test_plane_mode_projects_equirectangularly() {
        let projection = MorphProjection::new(1.0, [0.0, 0.0], [0.0, 0.0]);

        let p = projection.project(90.0, 45.0);
        assert!((p.x - (400.0 + PLANE_SCALE * PI / 2.0)).abs() < EPS);
        assert!((p.y - (250.0 - PLANE_SCALE * PI / 4.0)).abs() < EPS);
    }

    #[test]
    fn test_blend_is_between_endpoints() {
        let t = 0.36;
        let projection = MorphProjection::new(t, [0.0, 0.0], [0.0, 0.0]);
        let (lambda, phi) = (60f64.to_radians(), 30f64.to_radians());

        let sphere = orthographic_raw(lambda, phi);
        let plane = equirectangular_raw(lambda, phi);
        let expected = sphere + (plane - sphere) * 0.6;

        let p = projection.project(60.0, 30.0);
        assert!((p.x - (400.0 + projection.scale() * expected.x)).abs() < EPS);
        assert!((p.y - (250.0 - projection.scale() * expected.y)).abs() < EPS);
    }

    #[test]
    fn test_yaw_shifts_longitude() {
        let rotation = SphericalRotation::from_degrees(30.0, 0.0);
        let (lambda, phi) = rotation.rotate(0.0, 0.2);
        assert!((lambda - 30f64.to_radians()).abs() < EPS);
        assert!((phi - 0.2).abs() < EPS);

        // Large accumulated drag yaw wraps into range
        let rotation = SphericalRotation::from_degrees(750.0, 0.0);
        let (lambda, _) = rotation.rotate(0.0, 0.0);
        assert!((lambda - 30f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_pitch_tilts_toward_pole() {
        let rotation = SphericalRotation::from_degrees(0.0, 90.0);
        let (_, phi) = rotation.rotate(0.0, 0.0);
        assert!((phi - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_translation_moves_center() {
        let projection = MorphProjection::new(0.5, [0.0, 0.0], [12.0, -8.0]);
        assert!((projection.center().x - 412.0).abs() < EPS);
        assert!((projection.center().y - 242.0).abs() < EPS);
    }
}
