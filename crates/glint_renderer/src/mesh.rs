//! Triangle meshes placed in the world with their own BVH.

use crate::{HitRecord, Hittable, Ray, Triangle, TriangleBvh};
use glint_math::{Aabb, Vec3};

/// A collection of local-space triangles plus a placement.
///
/// The BVH is built over world-space copies of the triangles, so changing
/// the placement drops it and [`Mesh::build_bvh`] must run again before the
/// mesh contributes geometry.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    position: Vec3,
    scale: f32,
    bvh: Option<TriangleBvh>,
}

impl Mesh {
    /// Create an unplaced mesh (origin, scale 1) with no BVH yet.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            position: Vec3::ZERO,
            scale: 1.0,
            bvh: None,
        }
    }

    /// Move the placement by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.invalidate();
    }

    /// Set the uniform placement scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        if self.bvh.take().is_some() {
            log::debug!("Mesh placement changed; BVH dropped until rebuilt");
        }
    }

    /// Apply the placement and build the world-space BVH.
    ///
    /// A mesh without triangles builds nothing and keeps missing every ray.
    pub fn build_bvh(&mut self) {
        if self.triangles.is_empty() {
            self.bvh = None;
            return;
        }

        let world = self.world_triangles();
        let count = world.len();
        let start = std::time::Instant::now();
        let bvh = TriangleBvh::new(world);
        log::info!(
            "Built mesh BVH: {} triangles, {} nodes in {:.2?}",
            count,
            bvh.node_count(),
            start.elapsed()
        );
        self.bvh = Some(bvh);
    }

    /// Placed in one step, for callers that do not reposition afterwards.
    pub fn placed(mut self, position: Vec3, scale: f32) -> Self {
        self.position = position;
        self.scale = scale;
        self.build_bvh();
        self
    }

    /// Triangles with the placement applied, as fresh instances.
    pub fn world_triangles(&self) -> Vec<Triangle> {
        self.triangles
            .iter()
            .map(|tri| tri.transformed(self.scale, self.position))
            .collect()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bvh(&self) -> Option<&TriangleBvh> {
        self.bvh.as_ref()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    /// World-space bounds; empty until the BVH is built.
    pub fn bounding_box(&self) -> Aabb {
        self.bvh.as_ref().map_or(Aabb::EMPTY, |bvh| bvh.bounding_box())
    }

    /// Nearest-hit query against the placed mesh.
    pub fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.hit(ray, rec),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};

    /// Unit quad in the XY plane facing +Z, two triangles.
    fn quad() -> Vec<Triangle> {
        let m = Material::diffuse(Color::new(0.9, 0.9, 0.9));
        let (a, b, c, d) = (
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        );
        vec![Triangle::new(a, b, c, m), Triangle::new(a, c, d, m)]
    }

    #[test]
    fn test_unbuilt_mesh_misses() {
        let mesh = Mesh::new(quad());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!mesh.hit(&ray, &mut HitRecord::default()));
        assert_eq!(mesh.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn test_empty_mesh_builds_nothing() {
        let mut mesh = Mesh::new(vec![]);
        mesh.build_bvh();
        assert!(!mesh.has_bvh());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!mesh.hit(&ray, &mut HitRecord::default()));
    }

    #[test]
    fn test_placement_applied_before_build() {
        let mut mesh = Mesh::new(quad());
        mesh.set_scale(2.0);
        mesh.translate(Vec3::new(0.0, 1.0, -5.0));
        mesh.build_bvh();

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min(), Vec3::new(-1.0, 0.0, -5.0));
        assert_eq!(bbox.max(), Vec3::new(1.0, 2.0, -5.0));

        // Local triangles are untouched.
        assert_eq!(mesh.triangles()[0].vertices()[0], Vec3::new(-0.5, -0.5, 0.0));

        let ray = Ray::new(Vec3::new(0.9, 1.9, 0.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_reposition_requires_rebuild() {
        let mut mesh = Mesh::new(quad()).placed(Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!(mesh.has_bvh());

        mesh.translate(Vec3::new(10.0, 0.0, 0.0));
        assert!(!mesh.has_bvh());

        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(!mesh.hit(&ray, &mut HitRecord::default()));

        mesh.build_bvh();
        assert!(mesh.hit(&ray, &mut HitRecord::default()));
    }
}
