//! Frame sampling along a waypoint polyline.
//!
//! Interior waypoints are rounded with a quadratic Bezier between two
//! control points pulled back along the adjoining segments. Each corner
//! is sampled `curved_segment_count + 1` times, and a roll correction is
//! carried through every corner so ring vertex 0 does not jump between
//! consecutive frames.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::config::PipeConfig;
use crate::frame::{OrientedFrame, WORLD_UP, look_rotation};

/// Parameter step used to estimate the bend plane at a sample.
const TANGENT_EPSILON: f64 = 0.001;

/// Clearance, in ring thicknesses, kept between an end cap and the
/// first or last rounded corner.
const CAP_CLEARANCE: f64 = 2.5;

/// Sine of the tangent turn below which a sample has no bend plane.
const MIN_BEND_SINE: f64 = 1e-12;

/// Ordered frames for one pipe plus the indices eligible for rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSequence {
    /// Start frame, corner samples, end frame.
    pub frames: Vec<OrientedFrame>,
    /// First and last sample of every rounded corner.
    pub corner_markers: Vec<usize>,
}

impl FrameSequence {
    /// Number of frames.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether the sequence has no frames.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// First frame, if any.
    #[must_use]
    pub fn first(&self) -> Option<&OrientedFrame> {
        self.frames.first()
    }

    /// Last frame, if any.
    #[must_use]
    pub fn last(&self) -> Option<&OrientedFrame> {
        self.frames.last()
    }

    /// Frames at the corner markers, in order.
    pub fn corner_frames(&self) -> impl Iterator<Item = &OrientedFrame> {
        self.corner_markers.iter().filter_map(|&i| self.frames.get(i))
    }
}

/// Samples oriented frames through a waypoint polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSampler {
    /// Control point pull-back distance.
    pub curvature: f64,
    /// Ring collar thickness, reserved on short segments.
    pub ring_thickness: f64,
    /// Sampling steps per corner.
    pub curved_segment_count: usize,
}

impl FrameSampler {
    /// Create a sampler.
    #[must_use]
    pub const fn new(curvature: f64, ring_thickness: f64, curved_segment_count: usize) -> Self {
        Self {
            curvature,
            ring_thickness,
            curved_segment_count,
        }
    }

    /// Create a sampler from the relevant fields of a pipe configuration.
    #[must_use]
    pub const fn from_config(config: &PipeConfig) -> Self {
        Self::new(
            config.curvature,
            config.ring_thickness,
            config.curved_segment_count,
        )
    }

    /// Sample frames along `points`.
    ///
    /// The first and last frames sit exactly on the first and last
    /// waypoints. With fewer than three points no corner exists and the
    /// result is just the start and end frame. Fewer than two points
    /// yield an empty sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pipe::FrameSampler;
    /// use nalgebra::Point3;
    ///
    /// let points = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(0.0, 0.0, 10.0),
    ///     Point3::new(10.0, 0.0, 10.0),
    /// ];
    /// let frames = FrameSampler::new(1.0, 0.5, 4).sample(&points);
    ///
    /// assert_eq!(frames.len(), 7);
    /// assert_eq!(frames.corner_markers, vec![1, 5]);
    /// ```
    #[must_use]
    pub fn sample(&self, points: &[Point3<f64>]) -> FrameSequence {
        if points.len() < 2 {
            return FrameSequence::default();
        }

        let segments = self.curved_segment_count.max(1);
        let corners = points.len() - 2;
        let mut sequence = FrameSequence {
            frames: Vec::with_capacity(2 + corners * (segments + 1)),
            corner_markers: Vec::with_capacity(corners * 2),
        };

        let start = OrientedFrame::looking(points[0], &(points[0] - points[1]), &WORLD_UP);
        let mut twist = TwistTracker::new(start.rotation);
        sequence.frames.push(start);

        for corner in 1..points.len() - 1 {
            let (prev, next) = self.control_points(points, corner);
            let bezier = CornerCurve {
                prev,
                corner: points[corner],
                next,
            };

            for step in 0..=segments {
                #[allow(clippy::cast_precision_loss)]
                let t = step as f64 / segments as f64;
                let position = bezier.position(t);
                let raw = bezier.rotation(t, &twist.previous_up());
                let rotation = if step == 0 {
                    twist.begin_segment(raw)
                } else {
                    twist.continue_segment(raw)
                };

                sequence.frames.push(OrientedFrame::new(position, rotation));
                if step == 0 || step == segments {
                    sequence.corner_markers.push(sequence.frames.len() - 1);
                }
            }
        }

        let end = points[points.len() - 1];
        sequence
            .frames
            .push(OrientedFrame::new(end, twist.previous));

        sequence
    }

    /// Control points bracketing the interior waypoint `corner`.
    fn control_points(&self, points: &[Point3<f64>], corner: usize) -> (Point3<f64>, Point3<f64>) {
        let last = points.len() - 1;
        let here = points[corner];
        let prev = self.pull_back(here, points[corner - 1], corner == 1);
        let next = self.pull_back(here, points[corner + 1], corner + 1 == last);
        (prev, next)
    }

    /// Point between `neighbour` and `corner` where the rounded corner
    /// begins.
    ///
    /// Normally `curvature` away from the corner. Short segments fall back
    /// to a point near the middle so control points of adjacent corners
    /// never cross. A neighbour that is a pipe end keeps room for its cap.
    /// The start and end checks are independent: on a three-point pipe the
    /// single corner keeps clearance toward both caps, not just the first.
    fn pull_back(
        &self,
        corner: Point3<f64>,
        neighbour: Point3<f64>,
        neighbour_is_end: bool,
    ) -> Point3<f64> {
        let span = corner - neighbour;
        let length = span.norm();
        let dir = span.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);

        if neighbour_is_end {
            let clearance = self.ring_thickness * CAP_CLEARANCE;
            if length > self.curvature + clearance {
                corner - dir * self.curvature
            } else {
                neighbour + dir * clearance
            }
        } else if length > self.curvature * 2.0 + self.ring_thickness {
            corner - dir * self.curvature
        } else {
            nalgebra::center(&corner, &neighbour) + dir * (self.ring_thickness / 2.0)
        }
    }
}

/// Quadratic Bezier through one rounded corner.
struct CornerCurve {
    prev: Point3<f64>,
    corner: Point3<f64>,
    next: Point3<f64>,
}

impl CornerCurve {
    fn chords(&self, t: f64) -> (Point3<f64>, Point3<f64>) {
        (self.prev.lerp(&self.corner, t), self.corner.lerp(&self.next, t))
    }

    fn position(&self, t: f64) -> Point3<f64> {
        let (a, b) = self.chords(t);
        a.lerp(&b, t)
    }

    /// Rotation whose forward follows the curve backwards and whose up is
    /// the normal of the bend plane.
    ///
    /// The bend plane is measured on unit tangents, so it does not depend
    /// on the pull-back distance. A straight corner has no bend plane;
    /// `fallback_up` is used instead.
    fn rotation(&self, t: f64, fallback_up: &Vector3<f64>) -> UnitQuaternion<f64> {
        let tangent = self.tangent(t);
        let ahead = self.tangent(t + TANGENT_EPSILON);

        match tangent.cross(&ahead).try_normalize(MIN_BEND_SINE) {
            Some(binormal) => look_rotation(&tangent, &binormal),
            None => look_rotation(&tangent, fallback_up),
        }
    }

    /// Unit backwards tangent at `t`.
    ///
    /// Falls back to the overall corner direction where the chord vanishes,
    /// as happens at an end whose control point sits on the corner.
    fn tangent(&self, t: f64) -> Vector3<f64> {
        let (a, b) = self.chords(t);
        (a - b)
            .try_normalize(f64::EPSILON)
            .or_else(|| (self.prev - self.next).try_normalize(f64::EPSILON))
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Roll correction carried from one corner to the next.
struct TwistTracker {
    previous: UnitQuaternion<f64>,
    offset: f64,
}

impl TwistTracker {
    const fn new(start: UnitQuaternion<f64>) -> Self {
        Self {
            previous: start,
            offset: 0.0,
        }
    }

    fn previous_up(&self) -> Vector3<f64> {
        self.previous * Vector3::y()
    }

    /// Measure the roll between the last frame and the first raw frame of
    /// a new corner and pick the signed correction that cancels it.
    fn begin_segment(&mut self, raw: UnitQuaternion<f64>) -> UnitQuaternion<f64> {
        let delta = self.previous.angle_to(&raw);
        let positive = raw * roll(delta);
        let negative = raw * roll(-delta);

        self.offset = if self.previous.angle_to(&positive) <= self.previous.angle_to(&negative) {
            delta
        } else {
            -delta
        };

        self.continue_segment(raw)
    }

    fn continue_segment(&mut self, raw: UnitQuaternion<f64>) -> UnitQuaternion<f64> {
        let rotation = raw * roll(self.offset);
        self.previous = rotation;
        rotation
    }
}

/// Rotation about local forward.
fn roll(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}
