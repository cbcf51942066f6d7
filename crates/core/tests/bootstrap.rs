//! Bootstrap wiring and subsystem rebuilds

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kitsy_core::engine::Object;
use kitsy_core::sdk::START_GAME;
use kitsy_core::{Kitsy, KitsyConfig, Value};
use parking_lot::Mutex;
use serde_json::json;

#[test]
fn test_start_applies_registry_before_running() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let starts = Arc::new(AtomicUsize::new(0));
    {
        let starts = starts.clone();
        kitsy
            .before(START_GAME, move |_| {
                starts.fetch_add(1, Ordering::SeqCst);
                Value::Null
            })
            .unwrap();
    }
    kitsy.inject("VAR_X", " /*booted*/");
    kitsy.install_bootstrap(&engine).unwrap();
    assert!(!kitsy.is_applied());

    assert_eq!(engine.call(START_GAME, &[]).unwrap(), json!("started"));
    assert!(kitsy.is_applied());
    assert_eq!(starts.load(Ordering::SeqCst), 1);
    assert!(common::script_texts(&engine)[0].contains("/*booted*/"));

    // The bootstrap is gone; the composed start stays
    assert_eq!(engine.call(START_GAME, &[]).unwrap(), json!("started"));
    assert_eq!(starts.load(Ordering::SeqCst), 2);
}

fn suffix(args: &[Value], tail: &str) -> Value {
    json!([format!("{}{}", args[0].as_str().unwrap_or_default(), tail)])
}

fn count_starts(kitsy: &Kitsy) -> Arc<AtomicUsize> {
    let starts = Arc::new(AtomicUsize::new(0));
    let counter = starts.clone();
    kitsy
        .before(START_GAME, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::Null
        })
        .unwrap();
    starts
}

#[test]
fn test_two_registries_share_one_engine() {
    let (engine, _) = common::engine();
    let first = common::kitsy();
    let second = common::kitsy();
    first.before("load_game", |args: &[Value]| suffix(args, "1")).unwrap();
    second.before("load_game", |args: &[Value]| suffix(args, "2")).unwrap();
    let first_starts = count_starts(&first);
    let second_starts = count_starts(&second);

    assert!(first.install_bootstrap(&engine).unwrap());
    assert!(second.install_bootstrap(&engine).unwrap());
    for _ in 0..3 {
        assert_eq!(engine.call(START_GAME, &[]).unwrap(), json!("started"));
    }

    assert!(first.is_applied());
    assert!(second.is_applied());
    assert_eq!(first_starts.load(Ordering::SeqCst), 3);
    assert_eq!(second_starts.load(Ordering::SeqCst), 3);
    // Applied in install order, so the second registry's hook is outermost
    assert_eq!(engine.call("load_game", &[json!("a")]).unwrap(), json!("a21"));
}

#[test]
fn test_same_registry_installed_twice() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let starts = count_starts(&kitsy);

    assert!(kitsy.install_bootstrap(&engine).unwrap());
    assert!(!kitsy.install_bootstrap(&engine).unwrap());
    for _ in 0..3 {
        assert_eq!(engine.call(START_GAME, &[]).unwrap(), json!("started"));
    }

    assert!(kitsy.is_applied());
    assert_eq!(starts.load(Ordering::SeqCst), 3);
    assert_eq!(kitsy.hook_counts(START_GAME), (1, 0));
}

#[test]
fn test_later_registry_hooks_start() {
    let (engine, _) = common::engine();
    let first = common::kitsy();
    let second = common::kitsy();
    first.inject("VAR_X", " /*first*/");
    let starts = count_starts(&second);

    first.install_bootstrap(&engine).unwrap();
    second.install_bootstrap(&engine).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.call(START_GAME, &[]).unwrap(), json!("started"));
    }

    assert_eq!(starts.load(Ordering::SeqCst), 3);
    assert!(common::script_texts(&engine)[0].contains("/*first*/"));
    assert!(!common::script_texts(&engine)[0].contains("/*first*/ /*first*/"));
}

#[test]
fn test_bootstrap_after_start_installs_fresh_wrapper() {
    let (engine, _) = common::engine();
    let first = common::kitsy();
    let second = common::kitsy();
    let second_starts = count_starts(&second);

    first.install_bootstrap(&engine).unwrap();
    engine.call(START_GAME, &[]).unwrap();
    assert!(second.install_bootstrap(&engine).unwrap());
    assert!(!second.is_applied());

    engine.call(START_GAME, &[]).unwrap();
    engine.call(START_GAME, &[]).unwrap();
    assert!(second.is_applied());
    assert_eq!(second_starts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_bootstrap_needs_start_function() {
    let engine = Arc::new(kitsy_core::Engine::new());
    assert!(common::kitsy().install_bootstrap(&engine).is_err());
}

#[test]
fn test_subsystems_rebuilt_in_order() {
    let (engine, _) = common::engine();
    let built = Arc::new(Mutex::new(Vec::new()));
    for name in ["scriptModule", "dialogBuffer"] {
        let built = built.clone();
        engine.register_subsystem(name, move |_| {
            built.lock().push(name);
            Object::new().with_value("generation", json!(1))
        });
    }

    let kitsy = Kitsy::with_config(&KitsyConfig {
        reinit: vec!["dialogBuffer".into(), "renderer".into(), "scriptModule".into()],
        ..KitsyConfig::default()
    });
    let report = kitsy.apply(&engine).unwrap().unwrap();

    assert_eq!(report.subsystems, 2);
    assert_eq!(*built.lock(), vec!["dialogBuffer", "scriptModule"]);
}
