//! Attribute macros

mod common;

use kitsy_core::{dialog_tag, hook, Resume, Value};
use serde_json::json;

#[hook(before = "load_game")]
fn shout(args: &[Value]) -> Value {
    json!([args[0].as_str().unwrap_or_default().to_uppercase()])
}

#[hook(after = "onExitDialog", asynchronous)]
fn wait_for_close(_args: Vec<Value>, resume: Resume) {
    resume.resume();
}

#[dialog_tag("wave", dual)]
fn wave(_env: &Value, params: &[Value]) -> Value {
    params.first().cloned().unwrap_or(Value::Null)
}

#[test]
fn test_generated_register_functions() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();

    shout_register(&kitsy).unwrap();
    wait_for_close_register(&kitsy).unwrap();
    assert!(wave_register(&kitsy).unwrap());
    assert!(!wave_register(&kitsy).unwrap());

    assert_eq!(kitsy.hook_counts("load_game"), (3, 0));
    assert_eq!(kitsy.dialog_tags(), vec!["waveNow".to_string(), "wave".to_string()]);

    kitsy.apply(&engine).unwrap();
    assert_eq!(engine.call("load_game", &[json!("hi")]).unwrap(), json!("HI"));
    assert_eq!(engine.run_dialog("{waveNow 7}", &Value::Null), vec![json!(7.0)]);
}
