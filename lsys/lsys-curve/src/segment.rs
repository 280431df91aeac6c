//! Cutting a flat sample stream into discrete polylines.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::{CurveStream, StreamElement};

/// Per-polyline vertex buffers, the sole interface to the renderer.
///
/// Positions and normals are grouped per segment with segments concatenated
/// in scan order; `verts_per_curve[i]` gives the vertex count of segment `i`.
///
/// # Invariant
///
/// `verts_per_curve.iter().sum::<u32>() as usize == positions.len()`, and
/// `positions.len() == normals.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveBuffers {
    /// Vertex positions, all segments concatenated.
    pub positions: Vec<Point3<f64>>,
    /// Vertex normals, parallel to `positions`.
    pub normals: Vec<Vector3<f64>>,
    /// Vertex count per polyline segment.
    pub verts_per_curve: Vec<u32>,
}

impl CurveBuffers {
    /// Number of polyline segments.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        self.verts_per_curve.len()
    }

    /// Total vertex count across all segments.
    #[must_use]
    pub fn total_vertices(&self) -> usize {
        self.positions.len()
    }

    /// `true` if no segments survived segmentation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verts_per_curve.is_empty()
    }

    /// Iterate over per-segment `(positions, normals)` slices.
    pub fn curves(&self) -> impl Iterator<Item = (&[Point3<f64>], &[Vector3<f64>])> {
        CurveIter {
            buffers: self,
            segment: 0,
            offset: 0,
        }
    }
}

struct CurveIter<'a> {
    buffers: &'a CurveBuffers,
    segment: usize,
    offset: usize,
}

impl<'a> Iterator for CurveIter<'a> {
    type Item = (&'a [Point3<f64>], &'a [Vector3<f64>]);

    fn next(&mut self) -> Option<Self::Item> {
        let count = *self.buffers.verts_per_curve.get(self.segment)? as usize;
        let start = self.offset;
        let end = start + count;
        self.segment += 1;
        self.offset = end;
        Some((
            &self.buffers.positions[start..end],
            &self.buffers.normals[start..end],
        ))
    }
}

/// Cut a flat element stream into discrete polylines.
///
/// Scans the stream with a running count of samples since the last break. A
/// break occurs at a break element (or a legacy zero-normal sample) and at
/// the final element of the stream; the breaking element itself is never
/// added to the buffers. On each break:
///
/// - count 1: the lone point is removed again (a single point cannot form a
///   polyline)
/// - count > 1: the count is recorded and the segment kept
/// - count 0: nothing to do
///
/// Note that the final element is consumed as a break even when it is a real
/// sample, so a stream that does not end in an explicit break loses its last
/// point. Generators always terminate lineages with a break, which makes the
/// final element a break in practice.
#[must_use]
pub fn segment_stream(stream: &CurveStream) -> CurveBuffers {
    let mut buffers = CurveBuffers::default();
    let mut count: u32 = 0;
    let mut segment_start = 0usize;

    let elements = stream.elements();
    for (i, element) in elements.iter().enumerate() {
        let at_end = i + 1 == elements.len();
        if at_end || element.is_break() {
            match count {
                0 => {}
                1 => {
                    // Lone point: pop it back out of the buffers.
                    buffers.positions.truncate(segment_start);
                    buffers.normals.truncate(segment_start);
                }
                kept => buffers.verts_per_curve.push(kept),
            }
            count = 0;
            segment_start = buffers.positions.len();
            continue;
        }

        if let StreamElement::Sample(point) = element {
            buffers.positions.push(point.position);
            buffers.normals.push(point.normal);
            count += 1;
        }
    }

    debug_assert_eq!(
        buffers.verts_per_curve.iter().map(|&c| c as usize).sum::<usize>(),
        buffers.positions.len(),
    );
    buffers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::CurvePoint;

    fn sample(x: f64) -> CurvePoint {
        CurvePoint::new(Point3::new(x, 0.0, 0.0), Vector3::z())
    }

    fn stream_of(spec: &[Option<f64>]) -> CurveStream {
        let mut stream = CurveStream::new();
        for entry in spec {
            match entry {
                Some(x) => stream.push_sample(sample(*x)),
                None => stream.push_break(),
            }
        }
        stream
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let buffers = segment_stream(&CurveStream::new());
        assert!(buffers.is_empty());
        assert_eq!(buffers.total_vertices(), 0);
    }

    #[test]
    fn five_points_then_break_then_lone_point() {
        // Five samples, a break, and a trailing lone sample: one kept
        // segment of five, the trailing point discarded.
        let stream = stream_of(&[
            Some(0.0),
            Some(1.0),
            Some(2.0),
            Some(3.0),
            Some(4.0),
            None,
            Some(5.0),
        ]);

        let buffers = segment_stream(&stream);
        assert_eq!(buffers.verts_per_curve, vec![5]);
        assert_eq!(buffers.total_vertices(), 5);
        assert_eq!(buffers.positions[4].x, 4.0);
    }

    #[test]
    fn lone_point_before_break_is_discarded() {
        let stream = stream_of(&[Some(0.0), None, Some(1.0), Some(2.0), Some(3.0), None]);

        let buffers = segment_stream(&stream);
        assert_eq!(buffers.verts_per_curve, vec![2]);
        // The lone leading point was truncated back out.
        assert_eq!(buffers.positions[0].x, 1.0);
    }

    #[test]
    fn consecutive_breaks_collapse() {
        let stream = stream_of(&[Some(0.0), Some(1.0), None, None, None, Some(2.0), Some(3.0), None]);

        let buffers = segment_stream(&stream);
        assert_eq!(buffers.verts_per_curve, vec![2, 2]);
        assert_eq!(buffers.total_vertices(), 4);
    }

    #[test]
    fn final_element_acts_as_break() {
        // No explicit trailing break: the last sample is consumed as the
        // end-of-stream break and never added.
        let stream = stream_of(&[Some(0.0), Some(1.0), Some(2.0), Some(3.0)]);

        let buffers = segment_stream(&stream);
        assert_eq!(buffers.verts_per_curve, vec![3]);
        assert_eq!(buffers.total_vertices(), 3);
    }

    #[test]
    fn legacy_zero_normal_sample_breaks_segment() {
        let mut stream = CurveStream::new();
        stream.push_sample(sample(0.0));
        stream.push_sample(sample(1.0));
        stream.push_sample(CurvePoint::new(Point3::origin(), Vector3::zeros()));
        stream.push_sample(sample(2.0));
        stream.push_sample(sample(3.0));
        stream.push_break();

        let buffers = segment_stream(&stream);
        assert_eq!(buffers.verts_per_curve, vec![2, 2]);
        // The sentinel itself never lands in the buffers.
        assert!(buffers.normals.iter().all(|n| *n != Vector3::zeros()));
        assert_eq!(buffers.total_vertices(), 4);
    }

    #[test]
    fn curves_iterator_matches_counts() {
        let stream = stream_of(&[
            Some(0.0),
            Some(1.0),
            Some(2.0),
            None,
            Some(3.0),
            Some(4.0),
            None,
        ]);

        let buffers = segment_stream(&stream);
        let segments: Vec<_> = buffers.curves().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].0.len(), 3);
        assert_eq!(segments[1].0.len(), 2);
        assert_eq!(segments[1].0[0].x, 3.0);
    }

    #[test]
    fn counts_sum_to_total_vertices() {
        let stream = stream_of(&[
            Some(0.0),
            Some(1.0),
            None,
            Some(2.0),
            None,
            Some(3.0),
            Some(4.0),
            Some(5.0),
            None,
        ]);

        let buffers = segment_stream(&stream);
        let sum: u32 = buffers.verts_per_curve.iter().sum();
        assert_eq!(sum as usize, buffers.total_vertices());
        assert_eq!(buffers.positions.len(), buffers.normals.len());
    }
}
