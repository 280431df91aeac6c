//! Stochastic L-system curve generator.
//!
//! This umbrella crate re-exports the lsys-* crates, providing a unified
//! API for the whole pipeline: grammar text in, renderable polyline
//! buffers out.
//!
//! # Quick Start
//!
//! ```
//! use lsys::prelude::*;
//!
//! let xml = r#"
//!     <rules max_depth="20">
//!         <rule name="entry">
//!             <call count="3" transforms="rz 120" rule="arm"/>
//!         </rule>
//!         <rule name="arm" max_depth="12">
//!             <call transforms="rz 5.6 tx 0.1 sa 0.996" rule="arm"/>
//!             <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
//!         </rule>
//!     </rules>
//! "#;
//!
//! let buffers = evaluate_str(xml, &EvalConfig::default()).unwrap();
//! assert!(buffers.curve_count() >= 1);
//! for (positions, normals) in buffers.curves() {
//!     assert_eq!(positions.len(), normals.len());
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`curve`] - Sample streams, segmentation, renderer-facing buffers
//! - [`xform`] - The transform-string mini-language and its cache
//! - [`grammar`] - XML grammar model, parser, validation
//! - [`eval`] - Weighted selection and the stack-based evaluator
//!
//! # Pipeline
//!
//! Grammar text is parsed into an immutable rule set, every referenced
//! transform literal is parsed once into a cache, the evaluator expands
//! the `entry` rule with an explicit work stack (bounded by the grammar's
//! global depth ceiling), and the resulting point+break stream is cut into
//! per-curve vertex buffers for the renderer.

#![doc(html_root_url = "https://docs.rs/lsys/0.7.0")]
#![warn(missing_docs)]

/// Curve sample streams and segmentation (re-export of `lsys-curve`).
pub mod curve {
    pub use lsys_curve::*;
}

/// Transform mini-language and cache (re-export of `lsys-xform`).
pub mod xform {
    pub use lsys_xform::*;
}

/// Grammar model, parser, and validation (re-export of `lsys-grammar`).
pub mod grammar {
    pub use lsys_grammar::*;
}

/// Weighted selection and evaluation (re-export of `lsys-eval`).
pub mod eval {
    pub use lsys_eval::*;
}

// Most-used entry points at the crate root.
pub use lsys_curve::{segment_stream, CurveBuffers, CurvePoint, CurveStream, StreamElement};
pub use lsys_eval::{build_cache, evaluate_str, EvalConfig, Evaluator, WeightScope};
pub use lsys_grammar::{parse_rules_str, validate, RuleSet};
pub use lsys_xform::{parse_xform, Xform, XformCache};

/// Prelude for convenient glob imports.
pub mod prelude {
    pub use lsys_curve::{segment_stream, CurveBuffers, CurvePoint, CurveStream, StreamElement};
    pub use lsys_eval::{
        build_cache, evaluate_str, EvalConfig, EvalError, Evaluator, RuleSelector, WeightScope,
    };
    pub use lsys_grammar::{
        parse_rules_str, validate, Call, GrammarError, Instance, Rule, RuleSet, ENTRY_RULE,
    };
    pub use lsys_xform::{parse_xform, Xform, XformCache};
}
