//! Grammar validation utilities.
//!
//! Checks the reference structure of a parsed [`RuleSet`] before evaluation:
//! every call and successor must resolve to a declared rule name, and an
//! `entry` rule must exist. Structural problems are errors; suspicious but
//! evaluable constructs are warnings.

use std::collections::HashSet;

use crate::error::{GrammarError, Result};
use crate::types::RuleSet;

/// Name of the rule every evaluation starts from.
pub const ENTRY_RULE: &str = "entry";

/// Validation outcome for a structurally sound grammar.
#[derive(Debug)]
pub struct ValidationReport {
    /// Rule names reachable from `entry`, in discovery order.
    pub reachable_rules: Vec<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

/// Validate a rule set.
///
/// This checks:
/// - An `entry` rule exists
/// - Every call target resolves to a declared rule name
/// - Every successor resolves to a declared rule name
///
/// Warnings are reported for rules unreachable from `entry` and for
/// successor cycles (which terminate a lineage only if some member's own
/// ceiling rises above the depth at which the cycle is entered).
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn validate(rules: &RuleSet) -> Result<ValidationReport> {
    if !rules.has_rule(ENTRY_RULE) {
        return Err(GrammarError::NoEntryRule);
    }

    // Every reference must resolve.
    for rule in &rules.rules {
        for call in &rule.calls {
            if !rules.has_rule(&call.rule) {
                return Err(GrammarError::undefined_rule(
                    &call.rule,
                    format!("call in rule '{}'", rule.name),
                ));
            }
        }
        if let Some(successor) = &rule.successor {
            if !rules.has_rule(successor) {
                return Err(GrammarError::undefined_rule(
                    successor,
                    format!("successor of rule '{}'", rule.name),
                ));
            }
        }
    }

    let mut warnings = Vec::new();
    let reachable = reachable_from_entry(rules);

    // Unreachable rules are legal but usually a typo.
    let reachable_set: HashSet<&str> = reachable.iter().map(String::as_str).collect();
    for rule in &rules.rules {
        if !reachable_set.contains(rule.name.as_str()) {
            let warning = format!("rule '{}' is unreachable from '{ENTRY_RULE}'", rule.name);
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
    }

    // Successor cycles keep switching rules at the ceiling; they only make
    // progress when some member raises its own ceiling.
    for name in successor_cycle_entries(rules) {
        warnings.push(format!(
            "successor chain from rule '{name}' forms a cycle; lineages end there unless a member raises its depth ceiling"
        ));
    }

    Ok(ValidationReport {
        reachable_rules: reachable,
        warnings,
    })
}

/// Rule names reachable from `entry` via calls and successors, in
/// declaration-driven discovery order.
fn reachable_from_entry(rules: &RuleSet) -> Vec<String> {
    let mut order = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut frontier = vec![ENTRY_RULE];

    while let Some(name) = frontier.pop() {
        if !seen.insert(name) {
            continue;
        }
        order.push(name.to_owned());

        for rule in rules.rules.iter().filter(|r| r.name == name) {
            for call in &rule.calls {
                if !seen.contains(call.rule.as_str()) {
                    frontier.push(&call.rule);
                }
            }
            if let Some(successor) = &rule.successor {
                if !seen.contains(successor.as_str()) {
                    frontier.push(successor);
                }
            }
        }
    }

    order
}

/// Names whose successor chain loops back to themselves.
fn successor_cycle_entries(rules: &RuleSet) -> Vec<String> {
    let mut entries = Vec::new();
    let mut reported: HashSet<&str> = HashSet::new();

    for rule in &rules.rules {
        if rule.successor.is_none() || reported.contains(rule.name.as_str()) {
            continue;
        }

        // Follow the name-level successor relation from this rule.
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = rule.name.as_str();
        loop {
            if !visited.insert(current) {
                if current == rule.name {
                    reported.insert(rule.name.as_str());
                    entries.push(rule.name.clone());
                }
                break;
            }
            // A name's successor set may branch across variants; following
            // the first declared successor is enough to flag the common
            // self- and two-cycles without a full SCC pass.
            match rules
                .rules
                .iter()
                .find(|r| r.name == current && r.successor.is_some())
                .and_then(|r| r.successor.as_deref())
            {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::parser::parse_rules_str;

    #[test]
    fn valid_grammar_passes() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry"><call rule="leaf"/></rule>
                <rule name="leaf"><instance transforms="tx 1" shape="curve"/></rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        let report = validate(&rules).expect("should validate");
        assert_eq!(report.reachable_rules[0], "entry");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_entry_is_an_error() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="leaf"><instance transforms="tx 1" shape="curve"/></rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        assert!(matches!(validate(&rules), Err(GrammarError::NoEntryRule)));
    }

    #[test]
    fn undefined_call_target_is_an_error() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry"><call rule="ghost"/></rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        assert!(matches!(
            validate(&rules),
            Err(GrammarError::UndefinedRule { .. })
        ));
    }

    #[test]
    fn undefined_successor_is_an_error() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry" successor="ghost"><call rule="entry"/></rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        assert!(matches!(
            validate(&rules),
            Err(GrammarError::UndefinedRule { .. })
        ));
    }

    #[test]
    fn unreachable_rule_warns() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry"><call rule="entry"/></rule>
                <rule name="orphan"><instance transforms="" shape="curve"/></rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        let report = validate(&rules).expect("should validate");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("orphan"));
    }

    #[test]
    fn successor_self_cycle_warns() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry" max_depth="5" successor="entry">
                    <call rule="entry"/>
                </rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        let report = validate(&rules).expect("should validate");
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("successor chain")));
    }

    #[test]
    fn successor_two_cycle_warns() {
        let xml = r#"
            <rules max_depth="30">
                <rule name="entry" max_depth="5" successor="other">
                    <call rule="entry"/>
                </rule>
                <rule name="other" max_depth="5" successor="entry">
                    <call rule="other"/>
                </rule>
            </rules>
        "#;

        let rules = parse_rules_str(xml).unwrap();
        let report = validate(&rules).expect("should validate");
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("successor chain")));
    }
}
