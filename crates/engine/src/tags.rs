//! Dialogue tag dispatch
//!
//! Dialogue text carries tags in the engine's native brace syntax, e.g.
//! `{exit "room" 3 4}`. The interpreter looks each tag name up in the
//! [`TagTable`] and calls the registered function with the dialogue
//! environment and the parsed parameters.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// A dialogue tag implementation: `(environment, parameters) -> result`
pub type TagFn = Arc<dyn Fn(&Value, &[Value]) -> Value + Send + Sync>;

/// Tag name to implementation table
#[derive(Default)]
pub struct TagTable {
    tags: DashMap<String, TagFn>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag, replacing any previous implementation
    pub fn insert(&self, name: &str, f: TagFn) -> bool {
        let replaced = self.tags.insert(name.to_string(), f).is_some();
        if replaced {
            tracing::debug!("Replaced dialogue tag '{}'", name);
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<TagFn> {
        self.tags.get(name).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// A tag found in dialogue text
#[derive(Debug, Clone, PartialEq)]
pub struct TagInvocation {
    pub name: String,
    pub params: Vec<Value>,
}

/// Scan dialogue text for `{name params...}` tags in textual order
///
/// Braces inside double-quoted parameters do not end a tag. Unterminated
/// tags are ignored.
pub fn scan_tags(text: &str) -> Vec<TagInvocation> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let body_start = &rest[open + 1..];
        let Some(close) = find_close(body_start) else {
            break;
        };

        let body = &body_start[..close];
        let mut tokens = tokenize(body).into_iter();
        if let Some(Token::Word(name)) = tokens.next() {
            found.push(TagInvocation {
                name,
                params: tokens.map(Token::into_value).collect(),
            });
        }

        rest = &body_start[close + 1..];
    }

    found
}

fn find_close(body: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, ch) in body.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '}' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

enum Token {
    Word(String),
    Quoted(String),
}

impl Token {
    fn into_value(self) -> Value {
        match self {
            Token::Quoted(s) => Value::String(s),
            Token::Word(w) => match w.parse::<f64>() {
                Ok(n) => serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .unwrap_or(Value::String(w)),
                Err(_) => Value::String(w),
            },
        }
    }
}

fn tokenize(body: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
        } else if ch == '"' {
            chars.next();
            let quoted: String = chars.by_ref().take_while(|c| *c != '"').collect();
            tokens.push(Token::Quoted(quoted));
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '"' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_tags_in_order() {
        let tags = scan_tags(r#"hello {exit "room two" 3 4} and {end}"#);
        assert_eq!(
            tags,
            vec![
                TagInvocation {
                    name: "exit".into(),
                    params: vec![json!("room two"), json!(3.0), json!(4.0)],
                },
                TagInvocation {
                    name: "end".into(),
                    params: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_quoted_brace_does_not_close() {
        let tags = scan_tags(r#"{say "a } b"}"#);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].params, vec![json!("a } b")]);
    }

    #[test]
    fn test_unterminated_tag_ignored() {
        assert!(scan_tags("{never closed").is_empty());
    }

    #[test]
    fn test_table_insert_replaces() {
        let table = TagTable::new();
        assert!(!table.insert("a", Arc::new(|_: &Value, _: &[Value]| json!(1))));
        assert!(table.insert("a", Arc::new(|_: &Value, _: &[Value]| json!(2))));
        let f = table.get("a").unwrap();
        assert_eq!(f(&Value::Null, &[]), json!(2));
    }
}
