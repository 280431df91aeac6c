//! Benchmarks for grammar evaluation.
//!
//! Run with: cargo bench -p lsys-eval

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lsys_eval::{build_cache, evaluate_str, EvalConfig, Evaluator};
use lsys_grammar::parse_rules_str;

/// A branching grammar bounded only by the global valve; stresses the work
/// stack and the weighted selector.
const BRANCHING: &str = r#"
<rules max_depth="18">
    <rule name="entry">
        <call count="6" transforms="rz 60" rule="limb"/>
    </rule>
    <rule name="limb">
        <call transforms="rz 5.6 tx 0.1 sa 0.996" rule="limb"/>
        <call rule="node"/>
    </rule>
    <rule name="limb" weight="2">
        <call transforms="ry -5.6 tx 0.1 sa 0.996" rule="limb"/>
        <call rule="node"/>
    </rule>
    <rule name="node">
        <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
    </rule>
</rules>
"#;

fn bench_evaluate(c: &mut Criterion) {
    let rules = parse_rules_str(BRANCHING).expect("bench grammar parses");
    let cache = build_cache(&rules);
    let config = EvalConfig::default().with_progress_every(0);

    c.bench_function("evaluate_branching", |b| {
        b.iter(|| {
            let evaluator = Evaluator::new(black_box(&rules), &cache, config);
            evaluator.run().expect("bench grammar evaluates")
        });
    });

    c.bench_function("evaluate_str_pipeline", |b| {
        b.iter(|| evaluate_str(black_box(BRANCHING), &config).expect("pipeline succeeds"));
    });
}

fn bench_cache_build(c: &mut Criterion) {
    let rules = parse_rules_str(BRANCHING).expect("bench grammar parses");

    c.bench_function("build_cache", |b| {
        b.iter(|| build_cache(black_box(&rules)));
    });
}

criterion_group!(benches, bench_evaluate, bench_cache_build);
criterion_main!(benches);
