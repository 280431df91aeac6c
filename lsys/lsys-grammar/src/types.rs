//! The parsed rule-set model.
//!
//! A grammar is an ordered list of named productions. Order matters
//! everywhere: weighted selection and expansion both scan rules in
//! declaration order, never in map order, so evaluation stays
//! deterministic.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A complete parsed grammar: the global depth ceiling plus every rule in
/// declaration order.
///
/// Multiple rules may share a name; they are *variants* of that name,
/// disambiguated by weight at selection time. The rule set is immutable
/// once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSet {
    /// Grammar-wide depth ceiling; also bounds evaluator stack growth.
    pub max_depth: u32,
    /// All rules in declaration order.
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// `true` if at least one rule bears `name`.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    /// Number of variants sharing `name`.
    #[must_use]
    pub fn variant_count(&self, name: &str) -> usize {
        self.rules.iter().filter(|r| r.name == name).count()
    }

    /// Every transform-string literal referenced by any call or instance,
    /// in declaration order (duplicates included).
    ///
    /// Used to pre-populate a transform cache before evaluation begins.
    pub fn transform_literals(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().flat_map(|rule| {
            rule.calls
                .iter()
                .map(|c| c.transforms.as_str())
                .chain(rule.instances.iter().map(|i| i.transforms.as_str()))
        })
    }
}

/// One named grammar production.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Rule name; shared names form weighted variants.
    pub name: String,
    /// Recursive expansion edges, in declaration order.
    pub calls: Vec<Call>,
    /// Geometry emission sites, in declaration order.
    pub instances: Vec<Instance>,
    /// Per-rule depth ceiling override (0 or absent means "use global").
    pub max_depth: Option<u32>,
    /// Rule name to switch to when the ceiling is reached.
    pub successor: Option<String>,
    /// Selection weight; 0 or unset counts as 1.
    pub weight: u32,
}

impl Rule {
    /// The weight used in selection: declared weight, or 1 when unset/zero.
    #[must_use]
    pub fn effective_weight(&self) -> u32 {
        if self.weight == 0 {
            1
        } else {
            self.weight
        }
    }

    /// The depth ceiling that applies to this rule: its own override when
    /// positive, else the grammar-wide ceiling.
    #[must_use]
    pub fn effective_ceiling(&self, global_max_depth: u32) -> u32 {
        match self.max_depth {
            Some(d) if d > 0 => d,
            _ => global_max_depth,
        }
    }
}

/// A recursive expansion edge: recurse into `rule` under `transforms`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// Transform-string literal composed once per repetition (empty string
    /// is the identity).
    pub transforms: String,
    /// Target rule name.
    pub rule: String,
    /// Repetition count; 0 or unset counts as 1. Each repetition compounds
    /// the transform once more and expands the target again.
    pub count: u32,
}

impl Call {
    /// The repetition count used in expansion: declared count, or 1 when
    /// unset/zero.
    #[must_use]
    pub fn effective_count(&self) -> u32 {
        if self.count == 0 {
            1
        } else {
            self.count
        }
    }
}

/// A geometry emission site: emit one sample under `transforms`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instance {
    /// Transform-string literal composed before emission.
    pub transforms: String,
    /// Geometry tag; recorded but currently unused beyond presence.
    pub shape: String,
}
