//! Curve sample streams for procedural geometry generation.
//!
//! This crate provides the data types exchanged between a curve generator and
//! a renderer:
//!
//! - [`CurvePoint`] - One emitted sample (position + un-normalized normal)
//! - [`StreamElement`] - A sample or an explicit segment break
//! - [`CurveStream`] - The ordered element stream produced by evaluation
//! - [`CurveBuffers`] - Per-polyline vertex buffers ready for a renderer
//!
//! The generator appends samples as it walks its expansion, and appends a
//! break whenever an expansion lineage terminates. [`segment_stream`] then
//! cuts the flat stream into discrete polylines, discarding degenerate
//! single-point segments.
//!
//! # Example
//!
//! ```
//! use lsys_curve::{CurvePoint, CurveStream, segment_stream};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut stream = CurveStream::new();
//! for i in 0..4 {
//!     stream.push_sample(CurvePoint::new(
//!         Point3::new(f64::from(i), 0.0, 0.0),
//!         Vector3::z(),
//!     ));
//! }
//! stream.push_break();
//!
//! let buffers = segment_stream(&stream);
//! assert_eq!(buffers.verts_per_curve, vec![4]);
//! assert_eq!(buffers.positions.len(), 4);
//! ```
//!
//! # Layer 0 Crate
//!
//! Zero renderer dependencies: usable from CLI tools, servers, WASM, or any
//! engine that consumes plain vertex buffers.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/lsys-curve/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::doc_markdown
)]

mod point;
mod segment;

pub use point::{CurvePoint, CurveStream, StreamElement};
pub use segment::{segment_stream, CurveBuffers};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
