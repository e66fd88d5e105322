//! Tests for the two-level curve registry: lookup misses, registration,
//! replacement, removal, and shared curve lifetime.

use std::sync::Arc;

use animation_curves::{
    AnimationCurve, CurveError, CurveRegistry, CurveSet, InterpolationMode,
};

const WALK: &str = "animations/hero_walk.anim";
const RUN: &str = "animations/hero_run.anim";

fn scalar_curve(end_value: f32) -> Arc<AnimationCurve> {
    Arc::new(AnimationCurve::from_keyframes(1, &[0, 1000], &[0.0, end_value]).unwrap())
}

#[test]
fn test_get_curve_on_unregistered_keys_returns_none() {
    let registry = CurveRegistry::new();
    assert!(registry.get_curve(WALK, "spine").is_none());
    assert!(registry.get_curve_set(WALK).is_none());

    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "spine", scalar_curve(1.0));
    // Known source, unknown target: still a plain miss.
    assert!(registry.get_curve(WALK, "head").is_none());
}

#[test]
fn test_add_then_get_returns_the_same_curve() {
    let mut registry = CurveRegistry::new();
    let curve = scalar_curve(1.0);
    registry.add_curve(WALK, "spine", Arc::clone(&curve));

    let fetched = registry.get_curve(WALK, "spine").unwrap();
    assert!(Arc::ptr_eq(&curve, &fetched));
}

#[test]
fn test_remove_curve_then_get_returns_none() {
    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "spine", scalar_curve(1.0));

    assert!(registry.remove_curve(WALK, "spine").is_some());
    assert!(registry.get_curve(WALK, "spine").is_none());
    // Removing again is a miss, not an error.
    assert!(registry.remove_curve(WALK, "spine").is_none());
    assert!(registry.remove_curve(RUN, "spine").is_none());
}

#[test]
fn test_overwrite_returns_the_replaced_curve() {
    let mut registry = CurveRegistry::new();
    let first = scalar_curve(1.0);
    let second = scalar_curve(2.0);

    assert!(registry
        .add_curve(WALK, "spine", Arc::clone(&first))
        .is_none());
    let replaced = registry
        .add_curve(WALK, "spine", Arc::clone(&second))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &replaced));

    let fetched = registry.get_curve(WALK, "spine").unwrap();
    assert!(Arc::ptr_eq(&second, &fetched));
}

#[test]
fn test_create_curve_set_then_populate() {
    let mut registry = CurveRegistry::new();
    let spine = registry
        .create_curve(1, &[0, 1000], &[0.0, 1.0])
        .unwrap();
    let head = registry.create_curve(1, &[0, 500], &[0.0, 2.0]).unwrap();

    let set = registry.create_curve_set(WALK);
    set.insert("spine", spine);
    set.insert("head", head);

    assert_eq!(registry.get_curve_set(WALK).unwrap().len(), 2);
    assert!(registry.get_curve(WALK, "spine").is_some());
    assert!(registry.get_curve(WALK, "head").is_some());
}

#[test]
fn test_create_curve_set_replaces_existing() {
    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "spine", scalar_curve(1.0));

    let set = registry.create_curve_set(WALK);
    assert!(set.is_empty());
    assert!(registry.get_curve(WALK, "spine").is_none());
}

#[test]
fn test_add_curve_set_replaces_the_whole_set() {
    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "spine", scalar_curve(1.0));
    registry.add_curve(WALK, "head", scalar_curve(2.0));

    let mut replacement = CurveSet::new();
    replacement.insert("pelvis", scalar_curve(3.0));
    let previous = registry.add_curve_set(WALK, replacement).unwrap();
    assert_eq!(previous.len(), 2);

    let set = registry.get_curve_set(WALK).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.get("pelvis").is_some());
    assert!(set.get("spine").is_none());
}

#[test]
fn test_removal_does_not_invalidate_held_curves() {
    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "spine", scalar_curve(4.0));

    let held = registry.get_curve(WALK, "spine").unwrap();
    registry.remove_curve_set(WALK);
    assert!(registry.get_curve_set(WALK).is_none());

    // The consumer's handle keeps the curve alive and evaluable.
    let mut dst = [0.0];
    held.evaluate(500.0, &mut dst, InterpolationMode::Linear)
        .unwrap();
    assert_eq!(dst[0], 2.0);
}

#[test]
fn test_factory_propagates_configuration_errors() {
    let registry = CurveRegistry::new();
    let err = registry.create_curve(3, &[0, 1000], &[0.0; 5]).unwrap_err();
    assert!(matches!(err, CurveError::KeyArrayMismatch { .. }));
    assert!(matches!(
        registry.create_curve(1, &[], &[]).unwrap_err(),
        CurveError::EmptyCurve
    ));
}

#[test]
fn test_keys_are_case_sensitive_exact_match() {
    let mut registry = CurveRegistry::new();
    registry.add_curve(WALK, "Spine", scalar_curve(1.0));
    assert!(registry.get_curve(WALK, "spine").is_none());
    assert!(registry.get_curve(&WALK.to_uppercase(), "Spine").is_none());
    assert!(registry.get_curve(WALK, "Spine").is_some());
}

#[test]
fn test_source_accounting_and_clear() {
    let mut registry = CurveRegistry::with_capacity(2);
    assert!(registry.is_empty());

    registry.add_curve(WALK, "spine", scalar_curve(1.0));
    registry.add_curve(RUN, "spine", scalar_curve(2.0));
    assert_eq!(registry.source_count(), 2);
    let mut ids: Vec<&str> = registry.source_ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![RUN, WALK]);

    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.get_curve(WALK, "spine").is_none());
}

#[test]
fn test_curve_set_iteration() {
    let mut set = CurveSet::new();
    set.insert("spine", scalar_curve(1.0));
    set.insert("head", scalar_curve(2.0));

    let mut targets: Vec<&str> = set.target_ids().collect();
    targets.sort_unstable();
    assert_eq!(targets, vec!["head", "spine"]);
    assert_eq!(set.iter().count(), 2);

    assert!(set.remove("head").is_some());
    assert_eq!(set.len(), 1);
}
