//! Dialogue tags end to end

mod common;

use std::sync::Arc;

use kitsy_core::sdk::{DIALOG_EXIT, LOAD_GAME, RESET_GAME};
use kitsy_core::Value;
use parking_lot::Mutex;
use serde_json::json;

type Calls = Arc<Mutex<Vec<Vec<Value>>>>;

fn recorder(calls: &Calls) -> impl Fn(&Value, &[Value]) -> Value + Send + Sync + 'static {
    let calls = calls.clone();
    move |_env, params| {
        calls.lock().push(params.to_vec());
        Value::Null
    }
}

#[test]
fn test_immediate_tag_runs_when_reached() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let calls: Calls = Default::default();

    assert!(kitsy.add_dialog_tag("shake", recorder(&calls)).unwrap());
    kitsy.apply(&engine).unwrap();

    engine.run_dialog("hello {shake 3} there", &json!({}));
    assert_eq!(*calls.lock(), vec![vec![json!(3.0)]]);
}

#[test]
fn test_load_game_rewrites_convenience_syntax() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    kitsy.add_dialog_tag("shake", |_: &Value, _: &[Value]| Value::Null).unwrap();
    kitsy.apply(&engine).unwrap();

    let loaded = engine
        .call(LOAD_GAME, &[json!("hi (shake 2) \\(shake) (other 1)\n(shake\n1)")])
        .unwrap();
    assert_eq!(loaded, json!("hi {shake 2} (shake) (other 1)\n(shake\n1)"));
}

#[test]
fn test_duplicate_tag_keeps_first_handler() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let first: Calls = Default::default();
    let second: Calls = Default::default();

    assert!(kitsy.add_dialog_tag("t", recorder(&first)).unwrap());
    assert!(!kitsy.add_dialog_tag("t", recorder(&second)).unwrap());
    assert_eq!(kitsy.dialog_tags(), vec!["t".to_string()]);
    kitsy.apply(&engine).unwrap();

    engine.run_dialog("{t}", &Value::Null);
    assert_eq!(first.lock().len(), 1);
    assert!(second.lock().is_empty());
}

#[test]
fn test_deferred_tag_drains_in_order_on_exit() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let calls: Calls = Default::default();

    kitsy.add_deferred_dialog_tag("exit", recorder(&calls)).unwrap();
    kitsy.apply(&engine).unwrap();

    engine.run_dialog(r#"{exit "a"}{exit "b"}"#, &Value::Null);
    assert!(calls.lock().is_empty());
    assert_eq!(kitsy.pending_dialog_calls("exit"), Some(2));

    engine.call(DIALOG_EXIT, &[]).unwrap();
    assert_eq!(*calls.lock(), vec![vec![json!("a")], vec![json!("b")]]);
    assert_eq!(kitsy.pending_dialog_calls("exit"), Some(0));

    // Nothing queued, nothing runs
    engine.call(DIALOG_EXIT, &[]).unwrap();
    assert_eq!(calls.lock().len(), 2);
}

#[test]
fn test_reset_drops_pending_calls() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let calls: Calls = Default::default();

    kitsy.add_deferred_dialog_tag("exit", recorder(&calls)).unwrap();
    kitsy.apply(&engine).unwrap();

    engine.run_dialog("{exit 1}", &Value::Null);
    engine.call(RESET_GAME, &[]).unwrap();
    engine.call(DIALOG_EXIT, &[]).unwrap();

    assert!(calls.lock().is_empty());
}

#[test]
fn test_dual_tag_registers_both_variants() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();
    let calls: Calls = Default::default();

    assert!(kitsy.add_dual_dialog_tag("give", recorder(&calls)).unwrap());
    assert_eq!(kitsy.dialog_tags(), vec!["giveNow".to_string(), "give".to_string()]);
    kitsy.apply(&engine).unwrap();

    engine.run_dialog("{giveNow 1}{give 2}", &Value::Null);
    assert_eq!(*calls.lock(), vec![vec![json!(1.0)]]);

    engine.call(DIALOG_EXIT, &[]).unwrap();
    assert_eq!(*calls.lock(), vec![vec![json!(1.0)], vec![json!(2.0)]]);
}
