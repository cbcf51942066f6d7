//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use kitsy_core::engine::{host_fn, load_document, Engine, ScriptExecutor, ScriptKey};
use kitsy_core::sdk;
use kitsy_core::{Kitsy, KitsyConfig, Value};
use parking_lot::Mutex;

/// Records every script handed to it
#[derive(Default)]
pub struct RecordingExecutor {
    pub executed: Mutex<Vec<String>>,
}

impl ScriptExecutor for RecordingExecutor {
    fn execute(&self, _engine: &Engine, _key: ScriptKey, source: &str) {
        self.executed.lock().push(source.to_string());
    }
}

pub const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script>var VAR_X = 1; function startExportedGame() {}</script>
<script type="text/javascript">function load_game(data) { return data; }</script>
</head>
<body></body>
</html>"#;

/// An engine with the stock functions the toolkit hooks
pub fn engine() -> (Arc<Engine>, Arc<RecordingExecutor>) {
    let engine = Arc::new(Engine::with_document(load_document(PAGE)));
    let executor = Arc::new(RecordingExecutor::default());
    engine.set_executor(executor.clone());

    engine
        .define(sdk::LOAD_GAME, host_fn(|args| args.first().cloned().unwrap_or(Value::Null)))
        .unwrap();
    engine.define(sdk::DIALOG_EXIT, host_fn(|_| Value::Null)).unwrap();
    engine.define(sdk::RESET_GAME, host_fn(|_| Value::Null)).unwrap();
    engine
        .define(sdk::START_GAME, host_fn(|_| Value::String("started".into())))
        .unwrap();

    (engine, executor)
}

/// A registry that rebuilds no subsystems
pub fn kitsy() -> Arc<Kitsy> {
    Arc::new(Kitsy::with_config(&KitsyConfig {
        reinit: vec![],
        ..KitsyConfig::default()
    }))
}

pub fn script_texts(engine: &Engine) -> Vec<String> {
    engine
        .document()
        .read()
        .iter()
        .map(|(_, el)| el.text().to_string())
        .collect()
}
