//! Stochastic L-system evaluation for the lsys curve generator.
//!
//! This crate turns a loaded [`RuleSet`](lsys_grammar::RuleSet) into the
//! curve sample stream the renderer consumes:
//!
//! - [`RuleSelector`] - Weighted selection among same-named rule variants
//! - [`Evaluator`] - The explicit-stack expansion engine
//! - [`EvalConfig`] / [`WeightScope`] - Per-run configuration
//! - [`evaluate_str`] - Parse + validate + evaluate + segment in one call
//!
//! # Determinism
//!
//! One seeded `StdRng` drives a whole run; draws are consumed in a fixed,
//! stack-order-determined sequence, and every scan over rules follows
//! declaration order. The same grammar, ceiling, and seed reproduce
//! byte-identical output, so regression tests can assert on exact streams.
//!
//! # Example
//!
//! ```
//! use lsys_eval::{evaluate_str, EvalConfig};
//!
//! let buffers = evaluate_str(r#"
//!     <rules max_depth="12">
//!         <rule name="entry" max_depth="8">
//!             <call transforms="rz 5.6 tx 0.1 sa 0.996" rule="entry"/>
//!             <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
//!         </rule>
//!     </rules>
//! "#, &EvalConfig::default()).expect("should evaluate");
//!
//! assert!(buffers.curve_count() >= 1);
//! ```

#![doc(html_root_url = "https://docs.rs/lsys-eval/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::doc_markdown
)]

mod config;
mod error;
mod eval;
mod select;

pub use config::{EvalConfig, WeightScope};
pub use error::{EvalError, Result};
pub use eval::{build_cache, evaluate_str, Evaluator};
pub use select::RuleSelector;
