//! Curve sample points and the element stream produced by evaluation.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One emitted curve sample.
///
/// The normal is the generator's transformed +Z axis and is **not**
/// normalized: anisotropic scale in the accumulated transform changes its
/// length. Consumers that need unit normals normalize downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    /// Sample position.
    pub position: Point3<f64>,
    /// Surface normal at the sample (length carries scale).
    pub normal: Vector3<f64>,
}

impl CurvePoint {
    /// Create a new curve point.
    #[must_use]
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// `true` if the normal is exactly zero.
    ///
    /// A zero normal is never a legitimate surface normal; legacy encodings
    /// of the stream used it as the segment-break marker, and
    /// [`segment_stream`](crate::segment_stream) still honors it as one.
    #[must_use]
    pub fn has_zero_normal(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

/// One element of a [`CurveStream`].
///
/// A terminated expansion lineage is marked with an explicit [`Break`]
/// variant rather than a sentinel sample, so a break can never be confused
/// with geometry.
///
/// [`Break`]: StreamElement::Break
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StreamElement {
    /// An emitted curve sample.
    Sample(CurvePoint),
    /// End of the current polyline segment.
    Break,
}

impl StreamElement {
    /// `true` if this element ends a segment.
    ///
    /// Covers the explicit [`StreamElement::Break`] variant and, for
    /// compatibility with legacy sentinel-encoded streams, any sample whose
    /// normal is exactly zero.
    #[must_use]
    pub fn is_break(&self) -> bool {
        match self {
            Self::Break => true,
            Self::Sample(p) => p.has_zero_normal(),
        }
    }
}

/// The ordered point+break stream produced by one evaluation run.
///
/// Elements appear in emission order; segment boundaries are embedded as
/// [`StreamElement::Break`] markers and resolved by
/// [`segment_stream`](crate::segment_stream).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveStream {
    elements: Vec<StreamElement>,
}

impl CurveStream {
    /// Create an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample.
    pub fn push_sample(&mut self, point: CurvePoint) {
        self.elements.push(StreamElement::Sample(point));
    }

    /// Append a segment break.
    pub fn push_break(&mut self) {
        self.elements.push(StreamElement::Break);
    }

    /// All elements in emission order.
    #[must_use]
    pub fn elements(&self) -> &[StreamElement] {
        &self.elements
    }

    /// Iterate over the samples only, skipping breaks.
    pub fn samples(&self) -> impl Iterator<Item = &CurvePoint> {
        self.elements.iter().filter_map(|e| match e {
            StreamElement::Sample(p) => Some(p),
            StreamElement::Break => None,
        })
    }

    /// Total element count, breaks included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` if no elements have been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_normal_is_detected() {
        let p = CurvePoint::new(Point3::new(1.0, 2.0, 3.0), Vector3::zeros());
        assert!(p.has_zero_normal());

        let q = CurvePoint::new(Point3::origin(), Vector3::new(0.0, 0.0, 1e-12));
        assert!(!q.has_zero_normal());
    }

    #[test]
    fn break_variants() {
        assert!(StreamElement::Break.is_break());

        let sentinel = StreamElement::Sample(CurvePoint::new(Point3::origin(), Vector3::zeros()));
        assert!(sentinel.is_break());

        let sample = StreamElement::Sample(CurvePoint::new(Point3::origin(), Vector3::z()));
        assert!(!sample.is_break());
    }

    #[test]
    fn stream_push_and_iterate() {
        let mut stream = CurveStream::new();
        stream.push_sample(CurvePoint::new(Point3::origin(), Vector3::z()));
        stream.push_break();
        stream.push_sample(CurvePoint::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()));

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.samples().count(), 2);
        assert!(!stream.is_empty());
    }
}
