//! Camera for the rotating 3D scaling-relation view.

/// Camera azimuth in degrees for an animation frame at `fraction` of a
/// full turn. Wraps into `[0, 360)`.
pub fn azimuth_for_frame(fraction: f64) -> f64 {
    (360.0 * fraction).rem_euclid(360.0)
}

/// Orthographic camera looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation about the vertical (z) axis, degrees.
    pub azimuth: f64,
    /// Tilt above the x-y plane, degrees.
    pub elevation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 30.0,
        }
    }
}

impl Camera {
    /// Project a point onto the screen plane.
    pub fn project(&self, [x, y, z]: [f64; 3]) -> [f64; 2] {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        let screen_x = -x * sin_az + y * cos_az;
        let depth = x * cos_az + y * sin_az;
        let screen_y = z * cos_el - depth * sin_el;
        [screen_x, screen_y]
    }
}

/// Drives the camera azimuth from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turntable {
    /// Position within the current turn, `[0, 1)`.
    pub fraction: f64,
    /// Seconds per full turn.
    pub period: f64,
}

impl Default for Turntable {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            period: 20.0,
        }
    }
}

impl Turntable {
    /// Advance by `dt` seconds and return the new azimuth.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.period > 0.0 {
            self.fraction = (self.fraction + dt / self.period).rem_euclid(1.0);
        }
        self.azimuth()
    }

    pub fn azimuth(&self) -> f64 {
        azimuth_for_frame(self.fraction)
    }
}

/// Min-max scale each axis into `[-1, 1]` so axes with different ranges
/// rotate as a cube. A constant axis maps to 0.
pub fn normalize(points: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in points {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    points
        .iter()
        .map(|p| {
            let mut out = [0.0; 3];
            for axis in 0..3 {
                let range = max[axis] - min[axis];
                if range.abs() > f64::EPSILON {
                    out[axis] = 2.0 * (p[axis] - min[axis]) / range - 1.0;
                }
            }
            out
        })
        .collect()
}
