//! Everything a ray can hit: a sphere BVH, placed meshes and the ground.

use crate::{GroundPlane, HitRecord, Hittable, Mesh, Ray, Sphere, SphereBvh, FAR_T};

/// Read-only scene shared by all render workers.
///
/// There is no scene graph: each part is queried in turn against one
/// shared [`HitRecord`], so the globally nearest hit wins.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: SphereBvh,
    meshes: Vec<Mesh>,
    ground: Option<GroundPlane>,
}

impl Scene {
    /// Scene with the given spheres and the default ground plane.
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self {
            spheres: SphereBvh::new(spheres),
            meshes: Vec::new(),
            ground: Some(GroundPlane::default()),
        }
    }

    /// Add a mesh. Meshes without a built BVH contribute nothing.
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        if !mesh.has_bvh() {
            log::warn!(
                "Mesh with {} triangles added without a BVH; it will not be visible",
                mesh.triangles().len()
            );
        }
        self.meshes.push(mesh);
        self
    }

    /// Replace or remove the ground plane.
    pub fn with_ground(mut self, ground: Option<GroundPlane>) -> Self {
        self.ground = ground;
        self
    }

    pub fn spheres(&self) -> &SphereBvh {
        &self.spheres
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn ground(&self) -> Option<&GroundPlane> {
        self.ground.as_ref()
    }

    /// Nearest hit along `ray`, if any part of the scene is struck.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        let mut rec = HitRecord::with_budget(FAR_T);
        let mut hit = self.spheres.hit(ray, &mut rec);

        for mesh in &self.meshes {
            hit |= mesh.hit(ray, &mut rec);
        }

        if let Some(ground) = &self.ground {
            hit |= ground.hit(ray, &mut rec);
        }

        hit.then_some(rec)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
