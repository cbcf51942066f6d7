//! Source injection through the registry

mod common;

use kitsy_core::{InjectError, KitsyError, SearchPattern};

#[test]
fn test_inject_inserts_after_literal() {
    let (engine, executor) = common::engine();
    let kitsy = common::kitsy();

    assert!(kitsy.inject("VAR_X", "; console.log('patched')"));
    let report = kitsy.apply(&engine).unwrap().unwrap();
    assert_eq!(report.injections, 1);

    let texts = common::script_texts(&engine);
    assert_eq!(
        texts[0],
        "var VAR_X; console.log('patched') = 1; function startExportedGame() {}"
    );
    assert_eq!(texts[1], "function load_game(data) { return data; }");
    assert_eq!(executor.executed.lock().as_slice(), &texts[..1]);
}

#[test]
fn test_duplicate_inject_applied_once() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();

    assert!(kitsy.inject("return data;", " /*x*/"));
    assert!(!kitsy.inject("return data;", " /*x*/"));
    kitsy.apply(&engine).unwrap();

    let texts = common::script_texts(&engine);
    assert_eq!(texts[1].matches("/*x*/").count(), 1);
}

#[test]
fn test_later_injection_sees_earlier_patch() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();

    kitsy.inject("VAR_X", " /*marker*/");
    kitsy.inject(SearchPattern::regex(r"/\*(\w+)\*/").unwrap(), "/*$1 seen*/");
    kitsy.apply(&engine).unwrap();

    assert!(common::script_texts(&engine)[0].starts_with("var VAR_X /*marker seen*/ = 1;"));
}

#[test]
fn test_computed_replacement() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();

    kitsy.inject_with(SearchPattern::regex(r"function (\w+)\(data\)").unwrap(), |caps| {
        format!("function {}(data, extra)", &caps[1])
    });
    kitsy.apply(&engine).unwrap();

    assert_eq!(
        common::script_texts(&engine)[1],
        "function load_game(data, extra) { return data; }"
    );
}

#[test]
fn test_missing_target_halts_remaining_steps() {
    let (engine, _) = common::engine();
    let kitsy = common::kitsy();

    kitsy.inject("VAR_X", " /*first*/");
    kitsy.inject("NOT_IN_PAGE", "!");
    kitsy.inject("return data;", " /*third*/");
    kitsy.before(kitsy_core::sdk::LOAD_GAME, |_| serde_json::json!(["hooked"])).unwrap();

    let err = kitsy.apply(&engine).unwrap_err();
    assert!(matches!(
        err,
        KitsyError::Inject(InjectError::TargetNotFound { ref pattern }) if pattern == "\"NOT_IN_PAGE\""
    ));

    let texts = common::script_texts(&engine);
    assert!(texts[0].contains("/*first*/"));
    assert!(!texts[1].contains("/*third*/"));

    // Hooks were never composed and the pass is not retried
    assert_eq!(
        engine.call(kitsy_core::sdk::LOAD_GAME, &[serde_json::json!("raw")]).unwrap(),
        "raw"
    );
    assert!(kitsy.is_applied());
    assert!(kitsy.apply(&engine).unwrap().is_none());
}
