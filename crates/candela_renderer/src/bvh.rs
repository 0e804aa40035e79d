//! Bounding Volume Hierarchy acceleration structure.
//!
//! A binary tree built with a full-sweep Surface Area Heuristic over the
//! primitive centroids. The tree owns a reshuffled array of primitive
//! references; the primitives themselves stay owned by the scene. Nodes
//! live in a flat arena and leaves address contiguous ranges of the
//! reference array.

use std::cmp::Ordering;

use candela_math::{Aabb, Ray, Vec3};

use crate::primitive::{Hit, Primitive};

/// Lower bound on accepted hit parameters during traversal.
const T_MIN: f32 = 1e-3;

/// Ranges at or below this size become leaves without a split attempt.
const MIN_LEAF: usize = 4;

/// Maximum recursion depth of the builder.
const MAX_DEPTH: usize = 20;

/// Node surface areas at or below this give a degenerate SAH.
const AREA_EPSILON: f32 = 1e-12;

enum NodeKind {
    /// Contiguous range [start, end) of the primitive reference array.
    Leaf { start: usize, end: usize },
    /// Indices of the two children in the node arena.
    Internal { left: usize, right: usize },
}

struct BvhNode {
    bounds: Aabb,
    kind: NodeKind,
}

/// The nearest intersection found by a traversal.
pub struct PrimitiveHit<'a> {
    pub hit: Hit,
    pub primitive: &'a dyn Primitive,
}

/// Builder-side view of one primitive with its cached bounds and centroid.
struct BvhEntry<'a> {
    primitive: &'a dyn Primitive,
    bounds: Aabb,
    centroid: Vec3,
}

/// SAH-built BVH over externally owned primitives.
pub struct Bvh<'a> {
    primitives: Vec<&'a dyn Primitive>,
    nodes: Vec<BvhNode>,
    root: usize,
}

impl<'a> Bvh<'a> {
    /// Build a tree over the given primitives.
    pub fn build<I>(primitives: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Primitive>,
    {
        let mut entries: Vec<BvhEntry<'a>> = primitives
            .into_iter()
            .map(|primitive| {
                let bounds = primitive.aabb();
                BvhEntry {
                    primitive,
                    bounds,
                    centroid: bounds.centroid(),
                }
            })
            .collect();

        let mut nodes = Vec::new();
        let root = if entries.is_empty() {
            0
        } else {
            build_node(&mut nodes, &mut entries, 0, 0)
        };

        Bvh {
            primitives: entries.into_iter().map(|e| e.primitive).collect(),
            nodes,
            root,
        }
    }

    /// Number of primitives indexed by the tree.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Find the globally nearest hit along the ray.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<PrimitiveHit<'a>> {
        let root = self.nodes.get(self.root)?;
        let (t_entry, _) = root.bounds.hit(ray)?;

        let mut best = None;
        let mut best_t = f32::INFINITY;
        if t_entry < best_t {
            self.hit_node(self.root, ray, &mut best_t, &mut best);
        }
        best
    }

    fn hit_node(
        &self,
        index: usize,
        ray: &Ray,
        best_t: &mut f32,
        best: &mut Option<PrimitiveHit<'a>>,
    ) {
        match self.nodes[index].kind {
            NodeKind::Leaf { start, end } => {
                for &primitive in &self.primitives[start..end] {
                    if let Some(hit) = primitive.intersect(ray) {
                        if hit.t > T_MIN && hit.t < *best_t {
                            *best_t = hit.t;
                            *best = Some(PrimitiveHit { hit, primitive });
                        }
                    }
                }
            }
            NodeKind::Internal { left, right } => {
                let left_entry = self.nodes[left].bounds.hit(ray).map(|(t, _)| t);
                let right_entry = self.nodes[right].bounds.hit(ray).map(|(t, _)| t);

                // Descend into the nearer child first; skip the farther one
                // when the best hit already precedes its slab entry.
                let mut order = [(left, left_entry), (right, right_entry)];
                if entry_distance(right_entry) < entry_distance(left_entry) {
                    order.swap(0, 1);
                }

                for (child, entry) in order {
                    if let Some(entry) = entry {
                        if entry < *best_t {
                            self.hit_node(child, ray, best_t, best);
                        }
                    }
                }
            }
        }
    }
}

fn entry_distance(entry: Option<f32>) -> f32 {
    entry.unwrap_or(f32::INFINITY)
}

/// Recursively build the subtree for `entries`, which occupies the absolute
/// range starting at `start` of the final reference array. Returns the
/// arena index of the created node.
fn build_node<'a>(
    nodes: &mut Vec<BvhNode>,
    entries: &mut [BvhEntry<'a>],
    start: usize,
    depth: usize,
) -> usize {
    let count = entries.len();
    let mut bounds = Aabb::EMPTY;
    for entry in entries.iter() {
        bounds = bounds.union(&entry.bounds);
    }

    let leaf = |nodes: &mut Vec<BvhNode>| {
        nodes.push(BvhNode {
            bounds,
            kind: NodeKind::Leaf {
                start,
                end: start + count,
            },
        });
        nodes.len() - 1
    };

    if count <= MIN_LEAF || depth >= MAX_DEPTH {
        return leaf(nodes);
    }

    let Some((axis, split)) = find_best_split(entries, &bounds) else {
        return leaf(nodes);
    };

    // nth-element partition: centroids below `split` on the chosen axis do
    // not exceed those at or above it.
    entries.select_nth_unstable_by(split, |a, b| compare_on_axis(a, b, axis));

    let (left_half, right_half) = entries.split_at_mut(split);
    let left = build_node(nodes, left_half, start, depth + 1);
    let right = build_node(nodes, right_half, start + split, depth + 1);

    nodes.push(BvhNode {
        bounds,
        kind: NodeKind::Internal { left, right },
    });
    nodes.len() - 1
}

/// Full-sweep SAH over all three axes.
///
/// Returns the `(axis, split_index)` minimizing the split cost, or `None`
/// when no split beats a leaf. Ties keep the earliest axis and the smallest
/// index. A degenerate node box (vanishing or unbounded area, e.g. when the
/// range contains a plane) admits no split.
fn find_best_split(entries: &mut [BvhEntry<'_>], bounds: &Aabb) -> Option<(usize, usize)> {
    let count = entries.len();
    let node_area = bounds.surface_area();
    let leaf_cost = count as f32;

    let mut centroid_bounds = Aabb::EMPTY;
    for entry in entries.iter() {
        centroid_bounds.expand_point(entry.centroid);
    }

    let mut best = None;
    let mut best_cost = f32::INFINITY;
    let mut suffix = vec![Aabb::EMPTY; count];

    for axis in 0..3 {
        let extent = centroid_bounds.max[axis] - centroid_bounds.min[axis];
        if !(extent > 0.0) {
            continue;
        }

        entries.sort_unstable_by(|a, b| compare_on_axis(a, b, axis));

        // Right-suffix accumulated boxes: suffix[i] bounds [i, count)
        suffix[count - 1] = entries[count - 1].bounds;
        for i in (0..count - 1).rev() {
            suffix[i] = entries[i].bounds.union(&suffix[i + 1]);
        }

        let mut left = Aabb::EMPTY;
        for i in 0..count - 1 {
            left = left.union(&entries[i].bounds);

            let cost = if node_area.is_finite() && node_area > AREA_EPSILON {
                1.0 + left.surface_area() / node_area * (i + 1) as f32
                    + suffix[i + 1].surface_area() / node_area * (count - i - 1) as f32
            } else {
                leaf_cost
            };

            if cost < best_cost {
                best_cost = cost;
                best = Some((axis, i + 1));
            }
        }
    }

    if best_cost < leaf_cost {
        best
    } else {
        None
    }
}

fn compare_on_axis(a: &BvhEntry<'_>, b: &BvhEntry<'_>, axis: usize) -> Ordering {
    a.centroid[axis]
        .partial_cmp(&b.centroid[axis])
        .unwrap_or(Ordering::Equal)
}
