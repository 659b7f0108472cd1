#![allow(clippy::unwrap_used)]

use nestcloud::{
    build_dataset, reorder, reorder_by_name, Error, GenerationContext, GeneratorConfig, Label,
    LeafOrdering, ReorderConfig,
};
use std::collections::BTreeMap;

fn generator() -> GeneratorConfig {
    GeneratorConfig::new()
        .with_spread(1000.0)
        .with_mean_branching(3.0)
        .with_max_branching(5)
        .with_continue_probability(1.0)
        .with_branching_decay(0.5)
}

#[test]
fn generate_build_reorder() -> nestcloud::Result<()> {
    for seed in 0..20 {
        let mut ctx = GenerationContext::seeded(seed);
        let points = generator().generate(&mut ctx, [100.0, 100.0])?;
        let dataset = build_dataset(&points)?;
        assert_eq!(dataset.len(), points.len());

        if dataset.len() < 2 {
            assert!(matches!(
                reorder(&dataset, &ReorderConfig::new()),
                Err(Error::DegenerateInput { .. })
            ));
            continue;
        }

        let ordered = reorder_by_name(&dataset, "ward", "euclidean")?;
        assert_eq!(ordered.len(), dataset.len());
        assert_eq!(ordered.linkage().unwrap().n_merges(), dataset.len() - 1);

        let mut before: BTreeMap<Label, usize> = BTreeMap::new();
        for l in dataset.labels() {
            *before.entry(*l).or_default() += 1;
        }
        let mut after: BTreeMap<Label, usize> = BTreeMap::new();
        for l in ordered.labels() {
            *after.entry(*l).or_default() += 1;
        }
        assert_eq!(before, after);
    }
    Ok(())
}

#[test]
fn runaway_config_trips_guard() -> nestcloud::Result<()> {
    // p = 1 with decay = 1 never emits a leaf batch.
    let config = generator().with_branching_decay(1.0).with_max_depth(40);
    let mut ctx = GenerationContext::seeded(99);
    assert!(matches!(
        config.generate(&mut ctx, [0.0, 0.0]),
        Err(Error::Configuration { name: "max_depth", .. })
    ));

    Ok(())
}

#[test]
fn larger_first_order_covers_every_row() -> nestcloud::Result<()> {
    let mut ctx = GenerationContext::seeded(99);
    let points = generator().with_branching_decay(0.0).generate(&mut ctx, [0.0, 0.0])?;
    let dataset = build_dataset(&points)?;
    if dataset.len() < 2 {
        return Ok(());
    }
    let ordered = reorder(
        &dataset,
        &ReorderConfig::new().with_leaf_ordering(LeafOrdering::LargerFirst),
    )?;
    let order = ordered.leaf_order().unwrap();
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..dataset.len()).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn independent_contexts_do_not_share_groups() -> nestcloud::Result<()> {
    let config = GeneratorConfig::new().with_continue_probability(0.0);
    let mut a = GenerationContext::seeded(1);
    let mut b = GenerationContext::seeded(2);

    let pa = config.generate(&mut a, [0.0, 0.0])?;
    let pb = config.generate(&mut b, [0.0, 0.0])?;
    assert!(pa.iter().all(|p| p.group == 1));
    assert!(pb.iter().all(|p| p.group == 1));
    Ok(())
}

#[test]
fn empty_and_single_inputs() {
    assert!(matches!(build_dataset(&[]), Err(Error::InvalidInput(_))));

    let one = build_dataset(&[nestcloud::Point {
        x: 0.0,
        y: 0.0,
        group: 1,
        depth: 0,
    }])
    .unwrap();
    assert!(matches!(
        reorder(&one, &ReorderConfig::new()),
        Err(Error::DegenerateInput { n_rows: 1, .. })
    ));
}
