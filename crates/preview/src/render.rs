//! # Overlay Meshes
//!
//! Builds a flat ribbon for one sampled polyline. Offsets are computed in
//! local meters (`x` east / `y` north), then lifted onto the XZ plane at the
//! overlay height: `(x, y) → (x, height, y)`.
//!
//! ## Table of Contents
//! 1. Joint offsets
//! 2. Ribbon mesh

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use citytimeline_geo::Polyline;

/// Longest a mitered joint may stretch, in multiples of the half width
const MAX_MITER: f32 = 4.0;

// ============================================================================
// 1. Joint offsets
// ============================================================================

/// Left-hand unit normal of the segment `a → b`, zero for repeated points
fn segment_normal(a: Vec2, b: Vec2) -> Vec2 {
    let dir = (b - a).normalize_or_zero();
    Vec2::new(-dir.y, dir.x)
}

/// Offset from each vertex to the ribbon's left edge.
///
/// Interior vertices use a miter of the two adjacent segment normals, capped
/// at `MAX_MITER`; a full reversal falls back to the outgoing normal.
fn joint_offsets(points: &[Vec2], half_width: f32) -> Vec<Vec2> {
    let normals: Vec<Vec2> = points.windows(2).map(|w| segment_normal(w[0], w[1])).collect();
    let last = normals.len() - 1;

    (0..points.len())
        .map(|i| {
            let incoming = normals[i.saturating_sub(1)];
            let outgoing = normals[i.min(last)];
            let miter = (incoming + outgoing).normalize_or_zero();
            if miter == Vec2::ZERO {
                return outgoing * half_width;
            }
            let stretch = miter.dot(outgoing).abs().max(1.0 / MAX_MITER).recip();
            miter * half_width * stretch
        })
        .collect()
}

// ============================================================================
// 2. Ribbon mesh
// ============================================================================

/// Flat, upward-facing ribbon of `width` meters along `polyline`, at `height`.
///
/// Two vertices per polyline point (right edge, then left edge), two
/// triangles per segment. No UVs: the overlay material is a flat color.
pub fn polyline_ribbon(polyline: &Polyline, height: f32, width: f32) -> Mesh {
    let points: Vec<Vec2> = polyline
        .iter()
        .map(|p| Vec2::new(p.x as f32, p.y as f32))
        .collect();
    let offsets = joint_offsets(&points, width * 0.5);

    let mut positions = Vec::with_capacity(points.len() * 2);
    for (point, offset) in points.iter().zip(&offsets) {
        for edge in [*point - *offset, *point + *offset] {
            positions.push([edge.x, height, edge.y]);
        }
    }
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    let mut indices = Vec::with_capacity((points.len() - 1) * 6);
    for segment in 0..(points.len() - 1) as u32 {
        let (right, left) = (segment * 2, segment * 2 + 1);
        let (next_right, next_left) = (right + 2, left + 2);
        indices.extend_from_slice(&[right, left, next_right, left, next_left, next_right]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}
