// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod camera;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use camera::{Camera, CameraState};
pub use interval::Interval;
pub use ray::Ray;

/// Extra vector operations the renderer relies on that glam spells differently.
pub trait Vec3Ext {
    /// Component by axis index (0=X, 1=Y, 2=Z). Indices past 2 clamp to Z.
    fn axis(&self, n: usize) -> f32;

    /// Unit-length copy, or the vector itself when its length is zero.
    fn normalize_or_self(self) -> Self;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn axis(&self, n: usize) -> f32 {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    fn normalize_or_self(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            self
        }
    }
}
