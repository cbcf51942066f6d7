//! Search patterns and replacements for source injections

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};

#[derive(Debug, Clone)]
enum Matcher {
    /// Plain text; the replacement is inserted right after the first match
    Literal,
    /// Regex; the first match is replaced, `$n` groups expanded
    First(Regex),
    /// Regex; every match is replaced, `$n` groups expanded
    All(Regex),
}

/// What an injection searches for in script text
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    matcher: Matcher,
}

impl SearchPattern {
    /// Match plain text, inserting the replacement after it
    pub fn literal(text: &str) -> Self {
        Self {
            source: text.to_string(),
            matcher: Matcher::Literal,
        }
    }

    /// Replace the first match of `regex`
    pub fn first(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            matcher: Matcher::First(regex),
        }
    }

    /// Replace every match of `regex`
    pub fn all(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            matcher: Matcher::All(regex),
        }
    }

    /// Compile `pattern` and replace its first match
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::first)
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Literal => text.contains(self.source.as_str()),
            Matcher::First(regex) | Matcher::All(regex) => regex.is_match(text),
        }
    }

    /// Apply the substitution to `text`
    ///
    /// Text without a match is returned unchanged. Only a computed
    /// replacement on a literal pattern compiles a regex, to hand the closure
    /// its captures; that is the one case that can fail.
    pub fn substitute(
        &self,
        text: &str,
        replacement: &Replacement,
    ) -> Result<String, regex::Error> {
        match &self.matcher {
            Matcher::Literal => {
                let Some(start) = text.find(self.source.as_str()) else {
                    return Ok(text.to_string());
                };
                let end = start + self.source.len();
                let insert = match replacement {
                    Replacement::Text(s) => s.clone(),
                    Replacement::Computed(f) => {
                        let regex = Regex::new(&regex::escape(&self.source))?;
                        match regex.captures_at(text, start) {
                            Some(caps) => f(&caps),
                            None => return Ok(text.to_string()),
                        }
                    }
                };
                let mut out = String::with_capacity(text.len() + insert.len());
                out.push_str(&text[..end]);
                out.push_str(&insert);
                out.push_str(&text[end..]);
                Ok(out)
            }
            Matcher::First(regex) => Ok(replace_n(regex, text, 1, replacement)),
            Matcher::All(regex) => Ok(replace_n(regex, text, 0, replacement)),
        }
    }

    fn kind(&self) -> u8 {
        match self.matcher {
            Matcher::Literal => 0,
            Matcher::First(_) => 1,
            Matcher::All(_) => 2,
        }
    }
}

fn replace_n(regex: &Regex, text: &str, limit: usize, replacement: &Replacement) -> String {
    match replacement {
        Replacement::Text(s) => regex.replacen(text, limit, s.as_str()).into_owned(),
        Replacement::Computed(f) => regex
            .replacen(text, limit, |caps: &Captures| f(caps))
            .into_owned(),
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.source == other.source
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.matcher {
            Matcher::Literal => write!(f, "{:?}", self.source),
            Matcher::First(_) => write!(f, "/{}/", self.source),
            Matcher::All(_) => write!(f, "/{}/g", self.source),
        }
    }
}

impl From<&str> for SearchPattern {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for SearchPattern {
    fn from(text: String) -> Self {
        Self::literal(&text)
    }
}

impl From<Regex> for SearchPattern {
    fn from(regex: Regex) -> Self {
        Self::first(regex)
    }
}

/// Closure computing replacement text from a match
pub type ReplaceFn = Arc<dyn Fn(&Captures) -> String + Send + Sync>;

/// Wrap a closure as a [`ReplaceFn`]
pub fn replace_fn<F>(f: F) -> ReplaceFn
where
    F: Fn(&Captures) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Text spliced in by an injection
#[derive(Clone)]
pub enum Replacement {
    Text(String),
    Computed(ReplaceFn),
}

impl PartialEq for Replacement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Replacement::Text(a), Replacement::Text(b)) => a == b,
            (Replacement::Computed(a), Replacement::Computed(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Replacement::Computed(_) => f.write_str("Computed"),
        }
    }
}

/// Replacement text given as possibly nested pieces
///
/// Pieces are flattened depth-first and concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Many(Vec<Fragment>),
}

impl Fragment {
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Fragment::Text(s) => out.push_str(s),
            Fragment::Many(parts) => parts.iter().for_each(|p| p.flatten_into(out)),
        }
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Fragment::Text(s.to_string())
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Fragment::Text(s)
    }
}

impl<T: Into<Fragment>> From<Vec<T>> for Fragment {
    fn from(parts: Vec<T>) -> Self {
        Fragment::Many(parts.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Fragment>, const N: usize> From<[T; N]> for Fragment {
    fn from(parts: [T; N]) -> Self {
        Fragment::Many(parts.into_iter().map(Into::into).collect())
    }
}
