//! Box vertex layout and topology
//!
//! Vertex numbering (0-based here):
//!
//! ```text
//!  0  1   rear wall, floor level          6  7   rear wall, ceiling level
//!  2  3   floor, open side                8  9   ceiling, open side
//!  4  5   left / right wall, floor       10 11   left / right wall, ceiling
//! ```
//!
//! The floor, ceiling and side walls each need their own copy of the
//! open-side corners because they sample the image at different places.

use glam::Vec3;

/// Ten triangles: rear wall, floor, ceiling, left wall, right wall.
pub const BOX_TRIANGLES: [[u32; 3]; 10] = [
    // rear wall
    [0, 7, 6],
    [0, 1, 7],
    // floor
    [0, 2, 1],
    [1, 2, 3],
    // ceiling
    [6, 7, 9],
    [6, 9, 8],
    // left
    [0, 10, 4],
    [0, 6, 10],
    // right
    [1, 5, 11],
    [1, 11, 7],
];

/// For each vertex, the rear-wall vertex it extrudes from.
pub(crate) const REAR_CORNER_OF: [usize; 12] = [0, 1, 0, 1, 0, 1, 6, 7, 6, 7, 6, 7];

/// Whether the vertex lies on the rear wall.
pub(crate) fn is_rear(index: usize) -> bool {
    REAR_CORNER_OF[index] == index
}

/// Box-space positions. The rear wall spans `x in [0, width]`,
/// `y in [0, height]` at `z = 0`; the box extends toward +Z by each open-side
/// vertex's depth.
pub fn box_positions(width: f32, height: f32, depths: &[f32; 12]) -> [Vec3; 12] {
    std::array::from_fn(|i| {
        let corner = REAR_CORNER_OF[i];
        let x = if corner % 2 == 0 { 0.0 } else { width };
        let y = if corner < 6 { 0.0 } else { height };
        let z = if is_rear(i) { 0.0 } else { depths[i] };
        Vec3::new(x, y, z)
    })
}
