use crate::{Ray, Vec3};

/// Pitch limit in degrees; keeps `forward` away from the world up axis.
const PITCH_LIMIT: f32 = 89.0;

/// Depth below which projected points are treated as off-screen.
const NEAR_DEPTH: f32 = 0.1;

/// Snapshot of the parts of a camera that invalidate accumulated samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// First-person camera described by a position plus yaw/pitch in degrees.
///
/// Rays are generated from normalized device coordinates: `ndc_x` spans
/// `[-aspect, aspect]` and `ndc_y` spans `[-1, 1]` with +y up, which gives a
/// 90 degree vertical field of view.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_vectors();
        camera
    }

    /// Set the orientation directly. Pitch is clamped like [`Camera::rotate`].
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
        self
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.forward = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.right = self.forward.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.forward);
    }

    /// Move the camera by a world-space offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Turn the camera. Pitch is clamped to ±89 degrees.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Position and orientation, for detecting camera changes between frames.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Primary ray through a normalized device coordinate.
    pub fn get_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let direction = self.forward + self.right * ndc_x + self.up * ndc_y;
        Ray::new(self.position, direction.normalize())
    }

    /// Project a world point to pixel coordinates for debug overlays.
    ///
    /// Uses the same basis and aspect correction as [`Camera::get_ray`], so a
    /// point on a pixel's primary ray lands on that pixel. Returns `None` for
    /// points behind or too close to the camera.
    pub fn project_to_screen(&self, point: Vec3, width: u32, height: u32) -> Option<(i32, i32)> {
        let rel = point - self.position;
        let depth = rel.dot(self.forward);
        if depth <= NEAR_DEPTH {
            return None;
        }

        let aspect = width as f32 / height as f32;
        let screen_x = rel.dot(self.right) / depth / aspect;
        let screen_y = rel.dot(self.up) / depth;

        let x = ((screen_x + 1.0) * 0.5 * width as f32) as i32;
        let y = ((1.0 - (screen_y + 1.0) * 0.5) * height as f32) as i32;
        Some((x, y))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 0.0))
    }
}
