//! Engine object graph
//!
//! The host exposes its state as a tree of named members. Functions live in
//! the leaves and are addressed by [`FnPath`](crate::FnPath).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::EngineError;

/// A callable member of the object graph
///
/// `Value::Null` stands in for "no value" both as an argument and as a return.
pub type HostFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Wrap a closure as a [`HostFn`]
pub fn host_fn<F>(f: F) -> HostFn
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A single member of an [`Object`]
#[derive(Clone)]
pub enum Member {
    Object(Object),
    Function(HostFn),
    Value(Value),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
            Member::Function(_) => f.write_str("Function"),
            Member::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// A named collection of members
#[derive(Debug, Clone, Default)]
pub struct Object {
    members: HashMap<String, Member>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a function member
    pub fn with_fn<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.members
            .insert(name.to_string(), Member::Function(host_fn(f)));
        self
    }

    /// Builder-style insert of a plain value
    pub fn with_value(mut self, name: &str, value: Value) -> Self {
        self.members.insert(name.to_string(), Member::Value(value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn insert(&mut self, name: &str, member: Member) -> Option<Member> {
        self.members.insert(name.to_string(), member)
    }

    pub fn remove(&mut self, name: &str) -> Option<Member> {
        self.members.remove(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Read a member as a function
    pub fn function(&self, name: &str) -> Option<HostFn> {
        match self.members.get(name) {
            Some(Member::Function(f)) => Some(f.clone()),
            _ => None,
        }
    }

    /// Walk `segments` from this object, failing if any step is missing
    pub fn walk(&self, segments: &[String]) -> Result<&Object, EngineError> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            current = match current.members.get(segment) {
                Some(Member::Object(obj)) => obj,
                Some(_) => return Err(EngineError::NotAnObject(joined(segments, depth))),
                None => return Err(EngineError::UnknownPath(joined(segments, depth))),
            };
        }
        Ok(current)
    }

    /// Mutable walk, failing if any step is missing
    pub fn walk_mut(&mut self, segments: &[String]) -> Result<&mut Object, EngineError> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            current = match current.members.get_mut(segment) {
                Some(Member::Object(obj)) => obj,
                Some(_) => return Err(EngineError::NotAnObject(joined(segments, depth))),
                None => return Err(EngineError::UnknownPath(joined(segments, depth))),
            };
        }
        Ok(current)
    }

    /// Mutable walk that creates missing intermediate objects
    pub fn walk_or_create(&mut self, segments: &[String]) -> Result<&mut Object, EngineError> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            let member = current
                .members
                .entry(segment.clone())
                .or_insert_with(|| Member::Object(Object::new()));
            current = match member {
                Member::Object(obj) => obj,
                _ => return Err(EngineError::NotAnObject(joined(segments, depth))),
            };
        }
        Ok(current)
    }
}

fn joined(segments: &[String], depth: usize) -> String {
    segments[..=depth].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &str) -> Vec<String> {
        path.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_walk_nested() {
        let mut root = Object::new();
        root.insert(
            "dialogBuffer",
            Member::Object(Object::new().with_fn("EndDialog", |_| json!(1))),
        );

        let buffer = root.walk(&segs("dialogBuffer")).unwrap();
        let end = buffer.function("EndDialog").unwrap();
        assert_eq!(end(&[]), json!(1));
    }

    #[test]
    fn test_walk_reports_failing_prefix() {
        let mut root = Object::new();
        root.insert("a", Member::Object(Object::new().with_value("b", json!(2))));

        assert_eq!(
            root.walk(&segs("a.b.c")).unwrap_err(),
            EngineError::NotAnObject("a.b".into())
        );
        assert_eq!(
            root.walk(&segs("x.y")).unwrap_err(),
            EngineError::UnknownPath("x".into())
        );
    }

    #[test]
    fn test_walk_or_create() {
        let mut root = Object::new();
        root.walk_or_create(&segs("a.b"))
            .unwrap()
            .insert("f", Member::Function(host_fn(|_| Value::Null)));

        assert!(root.walk(&segs("a.b")).unwrap().function("f").is_some());
    }
}
