//! End-to-end tests over the classic ribbon sculpture grammar.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use lsys::prelude::*;

/// The ribbon sculpture: fourteen interleaved arms, each a stochastic mix
/// of straight runs and turns that hand control back to the chooser rule
/// when their depth budget runs out.
const RIBBON: &str = r#"<rules max_depth="30">
    <rule name="entry">
        <call count="14" transforms="rz 5" rule="hbox"/>
    </rule>
    <rule name="hbox"><call rule="r"/></rule>
    <rule name="r"><call rule="forward"/></rule>
    <rule name="r"><call rule="turn"/></rule>
    <rule name="r"><call rule="turn2"/></rule>
    <rule name="r"><call rule="turn4"/></rule>
    <rule name="r"><call rule="turn3"/></rule>
    <rule name="forward" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="rz 5.6 tx 0.1 sa 0.996" rule="forward"/>
    </rule>
    <rule name="turn" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="rz 5.6 tx 0.1 sa 0.996" rule="turn"/>
    </rule>
    <rule name="turn2" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="rz -5.6 tx 0.1 sa 0.996" rule="turn2"/>
    </rule>
    <rule name="turn3" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="ry -5.6 tx 0.1 sa 0.996" rule="turn3"/>
    </rule>
    <rule name="turn4" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="ry -5.6 tx 0.1 sa 0.996" rule="turn4"/>
    </rule>
    <rule name="turn5" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="rx -5.6 tx 0.1 sa 0.996" rule="turn5"/>
    </rule>
    <rule name="turn6" max_depth="90" successor="r">
        <call rule="dbox"/>
        <call transforms="rx -5.6 tx 0.1 sa 0.996" rule="turn6"/>
    </rule>
    <rule name="dbox">
        <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
    </rule>
</rules>
"#;

fn quiet() -> EvalConfig {
    EvalConfig::default().with_progress_every(0)
}

#[test]
fn ribbon_evaluates_to_nonempty_segments() {
    let buffers = evaluate_str(RIBBON, &quiet()).expect("ribbon should evaluate");

    assert!(!buffers.is_empty(), "expected at least one segment");
    assert!(buffers.total_vertices() > 0);

    // Every kept segment is a real polyline.
    for count in &buffers.verts_per_curve {
        assert!(*count > 1, "degenerate segment of length {count}");
    }

    // The per-segment counts account for every emitted vertex.
    let sum: u32 = buffers.verts_per_curve.iter().sum();
    assert_eq!(sum as usize, buffers.total_vertices());
    assert_eq!(buffers.positions.len(), buffers.normals.len());
}

#[test]
fn ribbon_emits_no_zero_normals() {
    let buffers = evaluate_str(RIBBON, &quiet()).expect("ribbon should evaluate");
    for (_, normals) in buffers.curves() {
        for n in normals {
            assert!(n.norm() > 0.0, "zero normal leaked into the buffers");
        }
    }
}

#[test]
fn ribbon_is_deterministic_for_a_fixed_seed() {
    let a = evaluate_str(RIBBON, &quiet()).expect("first run");
    let b = evaluate_str(RIBBON, &quiet()).expect("second run");
    assert_eq!(a, b, "same seed must reproduce byte-identical buffers");
}

#[test]
fn ribbon_seed_changes_the_sculpture() {
    let a = evaluate_str(RIBBON, &quiet()).expect("seed 42");
    let b = evaluate_str(RIBBON, &quiet().with_seed(1)).expect("seed 1");
    assert_ne!(a, b, "different seeds should pick different turn variants");
}

#[test]
fn ribbon_weight_scope_is_observable() {
    let global = evaluate_str(RIBBON, &quiet()).expect("global scope");
    let per_name = evaluate_str(RIBBON, &quiet().with_weight_scope(WeightScope::PerName))
        .expect("per-name scope");

    // The chooser rule "r" has five variants; the draw-bound scope shifts
    // how often each fires, which shows up in the geometry.
    assert_ne!(global, per_name);
}

#[test]
fn ribbon_grammar_structure() {
    let rules = parse_rules_str(RIBBON).expect("ribbon should parse");
    assert_eq!(rules.max_depth, 30);
    assert_eq!(rules.variant_count("r"), 5);

    let report = validate(&rules).expect("ribbon should validate");
    // turn5/turn6 are declared but nothing reaches them.
    assert!(report.warnings.iter().any(|w| w.contains("turn5")));
    assert!(report.warnings.iter().any(|w| w.contains("turn6")));
}

#[test]
fn ribbon_cache_covers_every_distinct_literal() {
    let rules = parse_rules_str(RIBBON).expect("ribbon should parse");
    let cache = build_cache(&rules);

    // Seven distinct literals: the arm fan-out, four step transforms, the
    // dbox scale, and the empty string from transform-less calls.
    assert_eq!(cache.len(), 7);
    assert!(cache.contains(""));
    assert!(cache.contains("rz 5.6 tx 0.1 sa 0.996"));
    assert!(cache.contains("s 0.55 2.0 1.25"));
}

#[test]
fn self_referential_rule_with_unit_ceiling_breaks_once() {
    // The per-rule ceiling closes the lineage after a single expansion no
    // matter how high the global valve sits.
    let xml = r#"
        <rules max_depth="30">
            <rule name="entry" max_depth="1">
                <call transforms="tx 1" rule="entry"/>
            </rule>
        </rules>
    "#;

    let rules = parse_rules_str(xml).expect("should parse");
    let cache = build_cache(&rules);
    let stream = Evaluator::new(&rules, &cache, quiet())
        .run()
        .expect("should evaluate");

    let breaks = stream
        .elements()
        .iter()
        .filter(|e| matches!(e, StreamElement::Break))
        .count();
    assert_eq!(breaks, 1);
    assert_eq!(stream.samples().count(), 0);

    // And the whole pipeline yields no renderable segments.
    let buffers = evaluate_str(xml, &quiet()).expect("pipeline");
    assert!(buffers.is_empty());
}

#[test]
fn unknown_rule_reference_fails_closed() {
    let xml = r#"
        <rules max_depth="10">
            <rule name="entry"><call rule="nothing"/></rule>
        </rules>
    "#;

    match evaluate_str(xml, &quiet()) {
        Err(EvalError::Grammar(GrammarError::UndefinedRule { name, .. })) => {
            assert_eq!(name, "nothing");
        }
        other => panic!("expected an undefined-rule error, got {other:?}"),
    }
}
