//! The built-in demo scene.

use glint_math::Vec3;
use glint_renderer::{Color, Material, Mesh, Scene, Sphere};

/// Mirror ball flanked by four colored spheres over the ground plane.
pub fn demo_spheres() -> Vec<Sphere> {
    vec![
        Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::mirror(Color::ONE)),
        Sphere::new(
            Vec3::new(-2.0, 1.0, -2.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.2, 0.2)),
        ),
        Sphere::new(
            Vec3::new(-3.0, 1.0, -6.0),
            1.0,
            Material::diffuse(Color::new(0.2, 1.0, 0.2)),
        ),
        Sphere::new(
            Vec3::new(4.0, 1.0, -4.0),
            1.0,
            Material::diffuse(Color::new(0.2, 0.2, 1.0)),
        ),
        Sphere::new(
            Vec3::new(3.0, 1.0, -6.0),
            0.5,
            Material::diffuse(Color::new(1.0, 1.0, 0.2)),
        ),
    ]
}

/// Demo spheres plus any meshes that loaded.
pub fn demo_scene(meshes: Vec<Mesh>) -> Scene {
    meshes
        .into_iter()
        .fold(Scene::new(demo_spheres()), Scene::with_mesh)
}
