//! Stack-based grammar evaluation.
//!
//! Expansion is driven by an explicit LIFO work stack instead of recursion,
//! so depth is enforced structurally and a deep or malformed grammar cannot
//! blow the call stack. Nodes live only for the duration of one `run` call.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use lsys_curve::{segment_stream, CurveBuffers, CurvePoint, CurveStream};
use lsys_grammar::{parse_rules_str, validate, RuleSet, ENTRY_RULE};
use lsys_xform::{Xform, XformCache};

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::select::RuleSelector;

/// One pending expansion on the work stack.
#[derive(Debug, Clone, Copy)]
struct StackNode {
    /// Resolved rule variant index into the rule set.
    rule_index: usize,
    /// Call-expansion depth; starts at 0 for the root, +1 per call edge.
    depth: u32,
    /// Transform accumulated along this lineage.
    xform: Xform,
}

/// Build a transform cache covering every literal a rule set references.
///
/// Run before evaluation so that evaluator lookups can never miss.
#[must_use]
pub fn build_cache(rules: &RuleSet) -> XformCache {
    let mut cache = XformCache::new();
    for literal in rules.transform_literals() {
        cache.parse(literal);
    }
    cache
}

/// Evaluates a rule set into a [`CurveStream`].
///
/// # Example
///
/// ```
/// use lsys_eval::{build_cache, EvalConfig, Evaluator};
/// use lsys_grammar::parse_rules_str;
///
/// let rules = parse_rules_str(r#"
///     <rules max_depth="8">
///         <rule name="entry">
///             <call transforms="tx 0.5" rule="entry"/>
///             <instance transforms="" shape="curve"/>
///         </rule>
///     </rules>
/// "#).expect("should parse");
///
/// let cache = build_cache(&rules);
/// let evaluator = Evaluator::new(&rules, &cache, EvalConfig::default());
/// let stream = evaluator.run().expect("should evaluate");
/// assert!(!stream.is_empty());
/// ```
#[derive(Debug)]
pub struct Evaluator<'a> {
    rules: &'a RuleSet,
    cache: &'a XformCache,
    selector: RuleSelector<'a>,
    config: EvalConfig,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over a loaded rule set and a pre-populated
    /// transform cache (see [`build_cache`]).
    #[must_use]
    pub fn new(rules: &'a RuleSet, cache: &'a XformCache, config: EvalConfig) -> Self {
        let selector = RuleSelector::new(rules, config.weight_scope);
        Self {
            rules,
            cache,
            selector,
            config,
        }
    }

    /// Run one evaluation to completion.
    ///
    /// The stream is rebuilt from scratch on every call; running twice with
    /// the same configuration produces identical output.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownRule`] if selection hits a rule name no
    /// rule declares. No partial stream is returned.
    pub fn run(&self) -> Result<CurveStream> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut stream = CurveStream::new();
        let mut stack: Vec<StackNode> = Vec::new();

        let root = self.pick(ENTRY_RULE, &mut rng)?;
        stack.push(StackNode {
            rule_index: root,
            depth: 0,
            xform: Xform::identity(),
        });

        while let Some(node) = stack.pop() {
            let rule = &self.rules.rules[node.rule_index];
            let ceiling = rule.effective_ceiling(self.rules.max_depth);

            // Safety valve: bound stack growth no matter what per-rule
            // ceilings say. Checked against the stack size, not the node's
            // depth.
            if stack.len() as u32 >= self.rules.max_depth {
                stream.push_break();
                continue;
            }

            if node.depth >= ceiling {
                // This lineage ends here; optionally hand the transform to
                // a successor rule at the same depth.
                if let Some(successor) = &rule.successor {
                    let index = self.pick(successor, &mut rng)?;
                    let next_ceiling =
                        self.rules.rules[index].effective_ceiling(self.rules.max_depth);
                    // A successor already at or past its own ceiling would
                    // terminate on the very next pop; pushing it could
                    // ping-pong forever between ceiling-bound rules.
                    if next_ceiling > node.depth {
                        stack.push(StackNode {
                            rule_index: index,
                            depth: node.depth,
                            xform: node.xform,
                        });
                    }
                }
                stream.push_break();
                continue;
            }

            // One running matrix carries through calls and instances alike.
            let mut xform = node.xform;

            for call in &rule.calls {
                let step = self.lookup(&call.transforms);
                for _ in 0..call.effective_count() {
                    xform = xform.then(&step);
                    let index = self.pick(&call.rule, &mut rng)?;
                    stack.push(StackNode {
                        rule_index: index,
                        depth: node.depth + 1,
                        xform,
                    });
                }
            }

            for instance in &rule.instances {
                let step = self.lookup(&instance.transforms);
                xform = xform.then(&step);
                stream.push_sample(CurvePoint::new(
                    xform.translation_part(),
                    xform.transform_vector(Vector3::z()),
                ));

                if self.config.progress_every != 0 && stream.len() % self.config.progress_every == 0
                {
                    debug!("emitted {} stream elements", stream.len());
                }
            }
        }

        Ok(stream)
    }

    fn pick(&self, name: &str, rng: &mut StdRng) -> Result<usize> {
        self.selector
            .pick(name, rng)
            .ok_or_else(|| EvalError::UnknownRule { name: name.into() })
    }

    fn lookup(&self, transforms: &str) -> Xform {
        match self.cache.get(transforms) {
            Some(xform) => xform,
            None => {
                // The cache is built from the rule set before evaluation,
                // so a miss means the caller skipped build_cache.
                warn!("transform cache miss for '{transforms}', using identity");
                Xform::identity()
            }
        }
    }
}

/// Parse, validate, evaluate, and segment a grammar document in one call.
///
/// Validation warnings are logged; validation and parse failures abort
/// before any expansion happens.
///
/// # Errors
///
/// Returns [`EvalError::Grammar`] for parse/validation failures and
/// [`EvalError::UnknownRule`] for selection failures.
pub fn evaluate_str(xml: &str, config: &EvalConfig) -> Result<CurveBuffers> {
    let rules = parse_rules_str(xml)?;
    let report = validate(&rules)?;
    for warning in &report.warnings {
        warn!("grammar validation: {warning}");
    }

    let cache = build_cache(&rules);
    let evaluator = Evaluator::new(&rules, &cache, *config);
    let stream = evaluator.run()?;
    Ok(segment_stream(&stream))
}
