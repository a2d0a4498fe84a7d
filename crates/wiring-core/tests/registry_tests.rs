//! Dynamic registry properties

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use wiring_core::{DelegationEntry, DelegationError, DynamicRegistry};
use wiring_test_utils::{
    probe_registry, DoubleComponent, DoubleProvider, NegateComponent, NegateProvider, OtherProbe,
    Probe, TripleProvider,
};

#[test]
fn probe_registry_dispatches_per_pair() {
    let registry = probe_registry();
    let doubled = registry
        .invoke::<Probe, DoubleComponent, (), i64>(&Probe { value: 21 }, ())
        .unwrap();
    let negated = registry
        .invoke::<OtherProbe, NegateComponent, (), i64>(&OtherProbe { value: 5 }, ())
        .unwrap();
    assert_eq!(doubled, 42);
    assert_eq!(negated, -5);

    // components are not shared between contexts
    let err = registry
        .invoke::<OtherProbe, DoubleComponent, (), i64>(&OtherProbe { value: 1 }, ())
        .unwrap_err();
    assert!(err.is_missing());
}

#[test]
fn conflict_names_both_providers() {
    let registry = probe_registry();
    let err = registry
        .register::<Probe, DoubleComponent, TripleProvider, _, _>(|probe: &Probe, ()| probe.value * 3)
        .unwrap_err();

    match err {
        DelegationError::ConflictingResolution {
            existing,
            attempted,
            ..
        } => {
            assert!(existing.ends_with("DoubleProvider"));
            assert!(attempted.ends_with("TripleProvider"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn manifest_lists_short_names() {
    let manifest: Vec<String> = probe_registry()
        .manifest()
        .iter()
        .map(|entry| entry.short().to_string())
        .collect();
    assert_eq!(
        manifest,
        vec![
            "OtherProbe / NegateComponent -> NegateProvider".to_string(),
            "Probe / DoubleComponent -> DoubleProvider".to_string(),
        ]
    );
}

#[test]
fn manifest_serializes_as_json() {
    let manifest = probe_registry().manifest();
    let json = serde_json::to_string(&manifest).unwrap();
    let back: Vec<DelegationEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, manifest);
}

#[test]
fn concurrent_invocations_agree() {
    let registry = Arc::new(probe_registry());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .invoke::<Probe, DoubleComponent, (), i64>(&Probe { value: i }, ())
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, (0..8).map(|i| i * 2).collect::<Vec<_>>());
}

#[test]
fn handlers_may_reenter_the_registry() {
    let registry = Arc::new(probe_registry());
    let inner = Arc::clone(&registry);
    registry
        .register::<OtherProbe, DoubleComponent, DoubleProvider, _, _>(move |probe: &OtherProbe, ()| {
            inner
                .invoke::<Probe, DoubleComponent, (), i64>(&Probe { value: probe.value }, ())
                .unwrap_or_default()
        })
        .unwrap();

    let value = registry
        .invoke::<OtherProbe, DoubleComponent, (), i64>(&OtherProbe { value: 4 }, ())
        .unwrap();
    assert_eq!(value, 8);
}

proptest! {
    #[test]
    fn invocation_is_deterministic(value in any::<i32>()) {
        let registry = probe_registry();
        let probe = Probe { value: i64::from(value) };
        let first = registry.invoke::<Probe, DoubleComponent, (), i64>(&probe, ()).unwrap();
        let second = registry.invoke::<Probe, DoubleComponent, (), i64>(&probe, ()).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, i64::from(value) * 2);
    }

    // Any sequence of registrations: identical ones are no-ops, different
    // ones are rejected, and the first provider for each pair wins.
    #[test]
    fn first_registration_wins(choices in proptest::collection::vec(any::<bool>(), 1..16)) {
        let registry = DynamicRegistry::new();
        let first = choices[0];

        for use_double in &choices {
            let result = if *use_double {
                registry.register::<Probe, DoubleComponent, DoubleProvider, _, _>(|p: &Probe, ()| p.value * 2)
            } else {
                registry.register::<Probe, DoubleComponent, TripleProvider, _, _>(|p: &Probe, ()| p.value * 3)
            };
            prop_assert_eq!(result.is_ok(), *use_double == first);
        }

        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.resolves_to::<Probe, DoubleComponent, DoubleProvider>(), first);
        prop_assert_eq!(registry.resolves_to::<Probe, DoubleComponent, TripleProvider>(), !first);
    }

    #[test]
    fn manifest_order_ignores_registration_order(double_first in any::<bool>()) {
        let registry = DynamicRegistry::new();
        let register_double = |r: &DynamicRegistry| {
            r.register::<Probe, DoubleComponent, DoubleProvider, _, _>(|p: &Probe, ()| p.value * 2)
        };
        let register_negate = |r: &DynamicRegistry| {
            r.register::<Probe, NegateComponent, NegateProvider, _, _>(|p: &Probe, ()| -p.value)
        };
        if double_first {
            register_double(&registry).unwrap();
            register_negate(&registry).unwrap();
        } else {
            register_negate(&registry).unwrap();
            register_double(&registry).unwrap();
        }

        let mut expected = registry.manifest();
        expected.sort();
        prop_assert_eq!(registry.manifest(), expected);
        prop_assert_eq!(registry.manifest(), probe_manifest());
    }
}

fn probe_manifest() -> Vec<DelegationEntry> {
    let registry = DynamicRegistry::new();
    registry
        .register::<Probe, NegateComponent, NegateProvider, _, _>(|p: &Probe, ()| -p.value)
        .unwrap();
    registry
        .register::<Probe, DoubleComponent, DoubleProvider, _, _>(|p: &Probe, ()| p.value * 2)
        .unwrap();
    registry.manifest()
}
