//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of nested boxes built by median split, generic over the
//! primitive type so spheres and triangles share one implementation.

use crate::{HitRecord, Hittable, Ray, Sphere, Triangle, HIT_EPSILON};
use glint_math::{Aabb, Vec3Ext};

/// Build limits for a BVH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvhConfig {
    /// Ranges at or below this size become leaves.
    pub leaf_max_size: usize,
    /// Nodes at this depth become leaves regardless of size.
    pub max_depth: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            leaf_max_size: 4,
            max_depth: 20,
        }
    }
}

/// BVH node - either a branch with two children or a leaf with primitives.
///
/// Each child is exclusively owned by its parent; traversal is strictly
/// top-down and never mutates the tree.
#[derive(Debug, Clone)]
pub enum BvhNode<P> {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode<P>>,
        right: Box<BvhNode<P>>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf { primitives: Vec<P>, bbox: Aabb },
    /// Tree over zero primitives; every query misses.
    Empty,
}

pub type SphereBvh = BvhNode<Sphere>;
pub type TriangleBvh = BvhNode<Triangle>;

impl<P: Hittable> BvhNode<P> {
    /// Create a BVH with the default leaf size and depth cap.
    pub fn new(primitives: Vec<P>) -> Self {
        Self::with_config(primitives, &BvhConfig::default())
    }

    /// Create a BVH with explicit build limits.
    pub fn with_config(primitives: Vec<P>, config: &BvhConfig) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }

        let count = primitives.len();
        let root = Self::build(primitives, 0, config);
        log::debug!(
            "Built BVH: {} primitives, {} nodes, depth {}",
            count,
            root.node_count(),
            root.depth()
        );
        root
    }

    /// Recursive median-split construction.
    ///
    /// The split axis cycles X, Y, Z with depth. Primitives are partitioned
    /// around the median bbox center on that axis, which keeps the tree
    /// balanced whatever the spatial distribution.
    fn build(mut primitives: Vec<P>, depth: usize, config: &BvhConfig) -> Self {
        let bbox = primitives.iter().fold(Aabb::EMPTY, |acc, p| {
            Aabb::surrounding(&acc, &p.bounding_box())
        });

        let n = primitives.len();
        if n <= config.leaf_max_size || depth >= config.max_depth {
            return BvhNode::Leaf { primitives, bbox };
        }

        let axis = depth % 3;
        let mid = n / 2;
        primitives.select_nth_unstable_by(mid, |a, b| {
            let a_center = a.bounding_box().centroid().axis(axis);
            let b_center = b.bounding_box().centroid().axis(axis);
            a_center.total_cmp(&b_center)
        });

        let right_primitives = primitives.split_off(mid);
        let left = Self::build(primitives, depth + 1, config);
        let right = Self::build(right_primitives, depth + 1, config);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }
}

impl<P> BvhNode<P> {
    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }

    /// Total number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Number of primitives stored across all leaves.
    pub fn primitive_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { primitives, .. } => primitives.len(),
            BvhNode::Branch { left, right, .. } => left.primitive_count() + right.primitive_count(),
        }
    }

    /// Depth of the deepest node; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty | BvhNode::Leaf { .. } => 0,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Walk node boxes top-down, stopping below `max_depth`.
    ///
    /// Debug overlays use this to draw the hierarchy as wireframe boxes.
    pub fn visit<F: FnMut(&Aabb, usize)>(&self, max_depth: usize, mut f: F) {
        self.visit_inner(0, max_depth, &mut f);
    }

    fn visit_inner<F: FnMut(&Aabb, usize)>(&self, depth: usize, max_depth: usize, f: &mut F) {
        if depth > max_depth {
            return;
        }
        match self {
            BvhNode::Empty => {}
            BvhNode::Leaf { bbox, .. } => f(bbox, depth),
            BvhNode::Branch { left, right, bbox } => {
                f(bbox, depth);
                left.visit_inner(depth + 1, max_depth, f);
                right.visit_inner(depth + 1, max_depth, f);
            }
        }
    }
}

/// True when a node's box can still hold a hit closer than `rec.t`.
#[inline]
fn worth_visiting(bbox: &Aabb, ray: &Ray, rec: &HitRecord) -> bool {
    match bbox.intersect(ray) {
        Some(t) => t.max >= HIT_EPSILON && t.min <= rec.t,
        None => false,
    }
}

impl<P: Hittable> Hittable for BvhNode<P> {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { primitives, bbox } => {
                if !worth_visiting(bbox, ray, rec) {
                    return false;
                }

                let mut hit_anything = false;
                for primitive in primitives {
                    hit_anything |= primitive.hit(ray, rec);
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !worth_visiting(bbox, ray, rec) {
                    return false;
                }

                // Left may tighten rec.t, letting right prune harder.
                let hit_left = left.hit(ray, rec);
                let hit_right = right.hit(ray, rec);
                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        BvhNode::bounding_box(self)
    }
}
