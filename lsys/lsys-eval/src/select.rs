//! Weighted rule selection.

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::Rng;

use lsys_grammar::RuleSet;

use crate::config::WeightScope;

/// Picks one rule variant for a name, with probability proportional to the
/// variants' effective weights.
///
/// Weight sums are precomputed once per rule set. Selection walks rules in
/// declaration order only, so a fixed seed and a fixed draw sequence always
/// reproduce the same indices.
#[derive(Debug)]
pub struct RuleSelector<'a> {
    rules: &'a RuleSet,
    scope: WeightScope,
    /// Sum of every rule's effective weight, name-independent.
    global_sum: u64,
    /// Per-name sums of effective weights.
    name_sums: HashMap<&'a str, u64>,
}

impl<'a> RuleSelector<'a> {
    /// Build a selector over `rules` with the given draw-bound scope.
    #[must_use]
    pub fn new(rules: &'a RuleSet, scope: WeightScope) -> Self {
        let mut global_sum = 0u64;
        let mut name_sums: HashMap<&str, u64> = HashMap::new();
        for rule in &rules.rules {
            let weight = u64::from(rule.effective_weight());
            global_sum += weight;
            *name_sums.entry(rule.name.as_str()).or_insert(0) += weight;
        }

        Self {
            rules,
            scope,
            global_sum,
            name_sums,
        }
    }

    /// The precomputed name-independent weight sum.
    #[must_use]
    pub fn global_weight_sum(&self) -> u64 {
        self.global_sum
    }

    /// Pick the index of one rule bearing `name`.
    ///
    /// Returns `None` when no rule bears `name`, without consuming a draw;
    /// callers must treat that as fatal rather than substituting an index.
    ///
    /// Under [`WeightScope::Global`] the draw is taken over the sum of
    /// *all* rules' weights and the walk subtracts every rule's weight in
    /// declaration order, returning the first matching rule at or after the
    /// drawn bucket (wrapping to the first variant when the draw falls
    /// after the last matching bucket). Under [`WeightScope::PerName`] the
    /// draw is taken over the named variants alone, which makes selection
    /// exactly proportional.
    #[must_use]
    pub fn pick(&self, name: &str, rng: &mut StdRng) -> Option<usize> {
        let name_sum = *self.name_sums.get(name)?;

        match self.scope {
            WeightScope::Global => {
                let mut n = rng.gen_range(0..self.global_sum) as i64;
                let mut first_match = None;
                for (index, rule) in self.rules.rules.iter().enumerate() {
                    let weight = i64::from(rule.effective_weight());
                    if rule.name == name {
                        if first_match.is_none() {
                            first_match = Some(index);
                        }
                        if n < weight {
                            return Some(index);
                        }
                    }
                    n -= weight;
                }
                // Draw landed after the last matching bucket: wrap.
                first_match
            }
            WeightScope::PerName => {
                let mut n = rng.gen_range(0..name_sum) as i64;
                for (index, rule) in self.rules.rules.iter().enumerate() {
                    if rule.name != name {
                        continue;
                    }
                    let weight = i64::from(rule.effective_weight());
                    if n < weight {
                        return Some(index);
                    }
                    n -= weight;
                }
                // Unreachable: name_sum covers every matching bucket.
                None
            }
        }
    }
}
