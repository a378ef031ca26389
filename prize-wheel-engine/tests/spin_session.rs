use prize_wheel_engine::{
    OptionField, OptionStore, OptionUpdate, PrizeOption, SpinEngine, SpinRefusal, WheelConfig,
    slice_under_pointer,
};

fn engine(seed: u64) -> SpinEngine {
    SpinEngine::with_seed(OptionStore::default(), seed)
}

#[test]
fn repeated_spins_land_on_announced_slice_and_never_unspin() {
    let mut engine = engine(0xFACE_B00C);
    let mut last = engine.rotation_degrees();
    for _ in 0..200 {
        let ticket = engine.spin().expect("default wheel spins");
        assert!(ticket.plan.to > last);
        assert_eq!(
            slice_under_pointer(ticket.plan.to, engine.store().len()),
            Some(ticket.index)
        );
        last = ticket.plan.to;
        let winner = engine.finish_spin().expect("pending winner").clone();
        assert_eq!(winner, ticket.winner);
        assert!(winner.weight() > 0.0);
    }
    assert_eq!(engine.spins(), 200);
}

#[test]
fn same_seed_replays_same_winners() {
    let mut first = engine(42);
    let mut second = engine(42);
    for _ in 0..25 {
        let a = first.spin().unwrap();
        let b = second.spin().unwrap();
        assert_eq!(a.index, b.index);
        assert!((a.plan.to - b.plan.to).abs() < f64::EPSILON);
        first.finish_spin();
        second.finish_spin();
    }
}

#[test]
fn editing_panel_flow_gates_the_spin_trigger() {
    let mut engine = engine(7);
    let added = engine.add_option().expect("room for a sixth option");
    assert_eq!(added, 6);
    engine.update_option(
        added,
        OptionUpdate::from_input(OptionField::Probability, "15"),
    );
    assert!(!engine.can_spin());
    assert_eq!(
        engine.view().warning.as_deref(),
        Some("Total probability must equal 100% (Current: 115%)")
    );
    assert!(matches!(
        engine.spin(),
        Err(SpinRefusal::InvalidTotal { .. })
    ));

    // Six even shares of 16.7 overshoot to 100.2.
    engine.even_distribute();
    assert!(!engine.can_spin());
    assert_eq!(
        engine.view().warning.as_deref(),
        Some("Total probability must equal 100% (Current: 100%)")
    );

    assert!(engine.remove_option(added));
    engine.even_distribute();
    assert!(engine.can_spin());
    assert!(engine.view().warning.is_none());

    while engine.add_option().is_some() {}
    assert_eq!(engine.store().len(), 8);
    assert!(!engine.view().can_add);

    let ids: Vec<u32> = engine.store().iter().map(|o| o.id).collect();
    for id in ids {
        engine.remove_option(id);
    }
    assert_eq!(engine.store().len(), 2);
    assert!(!engine.view().can_remove);
}

#[test]
fn custom_config_changes_spin_distance() {
    let config = WheelConfig::from_json_str(r#"{"extra_spin_degrees": 720.0}"#).unwrap();
    let store = OptionStore::new(
        vec![
            PrizeOption::new(1, "Left", 50.0),
            PrizeOption::new(2, "Right", 50.0),
        ],
        config,
    )
    .unwrap();
    let mut engine = SpinEngine::with_seed(store, 3);
    let ticket = engine.spin().unwrap();
    assert!(ticket.plan.to < 720.0);
    assert!(ticket.plan.to > 360.0);
}
