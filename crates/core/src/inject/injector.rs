//! Applying injections to the script document

use kitsy_engine::{Engine, ScriptKey};

use super::{InjectError, InjectionRequest};

/// Apply one injection to the engine's script document
///
/// The first element in document order whose text matches, other than the
/// currently executing script, is replaced by a patched copy at the same
/// position. The copy is then handed to the engine's script executor.
#[tracing::instrument(skip_all, fields(pattern = %request.pattern))]
pub fn apply_injection(engine: &Engine, request: &InjectionRequest) -> Result<ScriptKey, InjectError> {
    let key = {
        let mut document = engine.document().write();
        let current = document.current_script();

        let (target, patched) = document
            .iter()
            .filter(|(key, _)| Some(*key) != current)
            .find(|(_, el)| request.pattern.is_match(el.text()))
            .map(|(key, el)| (key, request.pattern.substitute(el.text(), &request.replacement)))
            .ok_or_else(|| InjectError::TargetNotFound {
                pattern: request.pattern.to_string(),
            })?;
        let patched = patched.map_err(|e| InjectError::Pattern {
            pattern: request.pattern.to_string(),
            message: e.to_string(),
        })?;

        document.replace(target, patched)?
    };

    engine.execute_script(key)?;
    tracing::debug!("Injected into script element");
    Ok(key)
}
