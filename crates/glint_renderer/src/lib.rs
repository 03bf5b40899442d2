//! Glint renderer - progressive CPU path tracing
//!
//! A Monte Carlo path tracer over spheres, triangle meshes and an infinite
//! ground plane, lit only by a constant sky. Frames are rendered in row
//! bands on a rayon pool and accumulated until the camera moves.

mod accumulator;
mod band;
mod bvh;
mod ground;
mod hittable;
mod integrator;
mod material;
mod mesh;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod triangle;

pub use accumulator::{quantize, tone_map, unpack_rgba, AccumulationBuffer, BandTarget, GAMMA};
pub use band::{row_bands, RowBand};
pub use bvh::{BvhConfig, BvhNode, SphereBvh, TriangleBvh};
pub use ground::GroundPlane;
pub use hittable::{HitRecord, Hittable, FAR_T, HIT_EPSILON};
pub use integrator::Integrator;
pub use material::{cosine_hemisphere, reflect, tangent_frame, Color, Material, SPAWN_OFFSET};
pub use mesh::Mesh;
pub use renderer::{wall_clock_tick, Dispatch, FrameStats, ProgressiveRenderer, RenderConfig};
pub use sampler::Sampler;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used throughout the renderer API
pub use glint_math::{Aabb, Camera, CameraState, Interval, Ray, Vec3};
