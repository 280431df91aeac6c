//! Affine transform mini-language for the lsys generator.
//!
//! Grammars describe geometry with compact whitespace-token transform
//! strings such as `"rx -2 tx 0.1 sa 0.996"`. This crate provides:
//!
//! - [`Xform`] - An affine transform over `Matrix4<f64>` with elementary
//!   constructors and composition
//! - [`parse_xform`] - The mini-language parser
//! - [`XformCache`] - Memoized parse results keyed by the literal string
//!
//! # Mini-language
//!
//! | Opcode | Operands | Meaning |
//! |--------|----------|---------|
//! | `s`    | x y z    | non-uniform scale |
//! | `sa`   | a        | uniform scale |
//! | `t`    | x y z    | translation |
//! | `tx`/`ty`/`tz` | v | single-axis translation |
//! | `rx`/`ry`/`rz` | a | rotation about X/Y/Z, degrees |
//!
//! Reading left to right, each opcode's transform applies *after* the
//! transforms already accumulated. The empty string is the identity.
//! Unknown opcodes and malformed operands are reported via `tracing::warn!`
//! and skipped; parsing always produces a transform.
//!
//! # Example
//!
//! ```
//! use lsys_xform::parse_xform;
//! use nalgebra::Point3;
//!
//! let xform = parse_xform("tx 1 ty 2 tz 3");
//! let p = xform.transform_point(Point3::origin());
//! assert!((p.x - 1.0).abs() < 1e-12);
//! assert!((p.y - 2.0).abs() < 1e-12);
//! assert!((p.z - 3.0).abs() < 1e-12);
//! ```

#![doc(html_root_url = "https://docs.rs/lsys-xform/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::doc_markdown
)]

mod cache;
mod parse;
mod transform;

pub use cache::XformCache;
pub use parse::parse_xform;
pub use transform::Xform;
