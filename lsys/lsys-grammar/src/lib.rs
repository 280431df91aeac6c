//! Rule grammar loader for the lsys procedural curve generator.
//!
//! This crate parses the XML grammar format into an immutable [`RuleSet`]
//! and validates its reference structure before evaluation.
//!
//! # Grammar format
//!
//! A document is a `<rules>` root with a global `max_depth` attribute and
//! any number of `<rule>` children:
//!
//! - `<rule name="..." [max_depth] [successor] [weight]>` - one production;
//!   several rules may share a name to form weighted variants
//! - `<call rule="..." [transforms] [count]/>` - recursive expansion edge
//! - `<instance [transforms] [shape]/>` - geometry emission site (the shape
//!   tag may also be a nested `<shape>` element)
//!
//! Transform attributes hold strings in the `lsys-xform` mini-language and
//! are kept as literals here; parsing them into matrices is the transform
//! cache's job.
//!
//! # Example
//!
//! ```
//! use lsys_grammar::{parse_rules_str, validate};
//!
//! let xml = r#"
//!     <rules max_depth="30">
//!         <rule name="entry">
//!             <call count="14" transforms="rz 5" rule="hbox"/>
//!         </rule>
//!         <rule name="hbox">
//!             <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
//!         </rule>
//!     </rules>
//! "#;
//!
//! let rules = parse_rules_str(xml).expect("should parse");
//! let report = validate(&rules).expect("should validate");
//! assert_eq!(rules.max_depth, 30);
//! assert!(report.warnings.is_empty());
//! ```
//!
//! # Determinism
//!
//! Rule declaration order is preserved end to end; nothing in this crate
//! iterates a hash map. Downstream selection and evaluation rely on that.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for the model types

#![doc(html_root_url = "https://docs.rs/lsys-grammar/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]

mod error;
mod parser;
mod types;
mod validation;

pub use error::{GrammarError, Result};
pub use parser::parse_rules_str;
pub use types::{Call, Instance, Rule, RuleSet};
pub use validation::{validate, ValidationReport, ENTRY_RULE};
