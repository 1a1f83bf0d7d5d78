//! Texture coordinates for tube rings.
//!
//! U runs around each ring in `[0, 1]`; the seam duplicate gets `u = 1`.
//! V is the arc length from the start of the pipe in world units, so a
//! texture tiles at the same rate on pipes of any length.

use crate::frame::OrientedFrame;

/// Cumulative arc length at every frame, starting at zero.
///
/// Non-decreasing by construction.
///
/// # Example
///
/// ```
/// use mesh_pipe::{arc_lengths, OrientedFrame};
/// use nalgebra::{Point3, UnitQuaternion};
///
/// let frames = [
///     OrientedFrame::new(Point3::new(0.0, 0.0, 0.0), UnitQuaternion::identity()),
///     OrientedFrame::new(Point3::new(0.0, 3.0, 4.0), UnitQuaternion::identity()),
/// ];
/// assert_eq!(arc_lengths(&frames), vec![0.0, 5.0]);
/// ```
#[must_use]
pub fn arc_lengths(frames: &[OrientedFrame]) -> Vec<f64> {
    let mut total = 0.0;
    let mut lengths = Vec::with_capacity(frames.len());
    let mut previous = None;

    for frame in frames {
        if let Some(prev) = previous {
            total += nalgebra::distance(&prev, &frame.position);
        }
        lengths.push(total);
        previous = Some(frame.position);
    }

    lengths
}

/// UV of ring slot `slot` (0..=`edge_count`) at arc length `v`.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn ring_uv(slot: usize, edge_count: usize, v: f64) -> (f32, f32) {
    let u = if slot >= edge_count {
        1.0
    } else {
        slot as f32 / edge_count as f32
    };
    (u, v as f32)
}

/// Planar UV of a disc vertex: the raw circumferential direction.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn planar_uv(sin: f64, cos: f64) -> (f32, f32) {
    (sin as f32, cos as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, UnitQuaternion};

    fn frame_at(x: f64, y: f64, z: f64) -> OrientedFrame {
        OrientedFrame::new(Point3::new(x, y, z), UnitQuaternion::identity())
    }

    #[test]
    fn arc_lengths_accumulate() {
        let frames = [
            frame_at(0.0, 0.0, 0.0),
            frame_at(0.0, 0.0, 2.0),
            frame_at(0.0, 0.0, 2.0),
            frame_at(3.0, 0.0, 2.0),
        ];
        assert_eq!(arc_lengths(&frames), vec![0.0, 2.0, 2.0, 5.0]);
    }

    #[test]
    fn arc_lengths_empty() {
        assert!(arc_lengths(&[]).is_empty());
    }

    #[test]
    fn ring_uv_wraps_at_seam() {
        assert_eq!(ring_uv(0, 8, 3.0), (0.0, 3.0));
        assert_eq!(ring_uv(2, 8, 3.0), (0.25, 3.0));
        assert_eq!(ring_uv(8, 8, 3.0), (1.0, 3.0));
    }

    #[test]
    fn planar_uv_is_direction() {
        assert_eq!(planar_uv(0.0, 1.0), (0.0, 1.0));
        assert_eq!(planar_uv(-1.0, 0.0), (-1.0, 0.0));
    }
}
