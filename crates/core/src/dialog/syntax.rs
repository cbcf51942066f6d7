//! Convenience tag syntax
//!
//! Dialogue authors may write `(tag params)` instead of the engine's native
//! `{tag params}`, which is easier to type in the editor. Registered tags are
//! rewritten to the native form when game data is loaded. A leading
//! backslash, `\(tag params)`, keeps the parentheses and drops the backslash
//! so the syntax can be shown literally. The closing parenthesis of an
//! escaped call may be escaped too, `\(tag params\)`; that backslash is
//! dropped as well.
//!
//! A call is recognised when `(` is immediately followed by the tag name and
//! then either `)` or whitespace plus at least one parameter character. The
//! call ends at the first `)` that is outside double quotes and not closing a
//! nested `(`. Calls never span lines.

/// Rewrite every convenience call to `tag` in `input`
pub fn convert_tag_syntax(input: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];

        let escaped = rest.starts_with("\\(");
        let open = if escaped { 1 } else { 0 };

        if rest[open..].starts_with('(') {
            if let Some(len) = match_call(&rest[open + 1..], tag, escaped) {
                let inner = &rest[open + 1..open + 1 + len];
                if escaped {
                    out.push('(');
                    out.push_str(inner.strip_suffix('\\').unwrap_or(inner));
                    out.push(')');
                } else {
                    out.push('{');
                    out.push_str(inner);
                    out.push('}');
                }
                i += open + 1 + len + 1;
                continue;
            }
        }

        let ch = rest.chars().next().unwrap_or_default();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

/// Length of the call body (tag plus parameters) if `after_paren` starts a
/// call to `tag`, not counting the closing `)`
fn match_call(after_paren: &str, tag: &str, escaped: bool) -> Option<usize> {
    let after_tag = after_paren.strip_prefix(tag)?;

    if after_tag.starts_with(')') {
        return Some(tag.len());
    }
    if escaped && after_tag.starts_with("\\)") {
        return Some(tag.len() + 1);
    }

    let ws_len: usize = after_tag
        .chars()
        .take_while(|c| c.is_whitespace() && *c != '\n')
        .map(char::len_utf8)
        .sum();
    if ws_len == 0 {
        return None;
    }

    let params = &after_tag[ws_len..];
    let close = find_call_end(params)?;
    if close == 0 {
        return None;
    }

    Some(tag.len() + ws_len + close)
}

fn find_call_end(params: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut depth = 0usize;

    for (i, ch) in params.char_indices() {
        match ch {
            '\n' => return None,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_call_with_params() {
        assert_eq!(
            convert_tag_syntax(r#"hi (exit "room" 3 4) bye"#, "exit"),
            r#"hi {exit "room" 3 4} bye"#
        );
    }

    #[test]
    fn test_converts_bare_call() {
        assert_eq!(convert_tag_syntax("(end)", "end"), "{end}");
    }

    #[test]
    fn test_escaped_call_stays_literal() {
        assert_eq!(
            convert_tag_syntax(r#"type \(exit "a") to leave"#, "exit"),
            r#"type (exit "a") to leave"#
        );
    }

    #[test]
    fn test_escaped_closing_paren_dropped() {
        assert_eq!(
            convert_tag_syntax(r#"type \(exit "a"\) to leave"#, "exit"),
            r#"type (exit "a") to leave"#
        );
        assert_eq!(convert_tag_syntax(r"say \(end\)", "end"), "say (end)");
    }

    #[test]
    fn test_unescaped_call_keeps_backslash_before_paren() {
        assert_eq!(
            convert_tag_syntax(r#"(exit "a"\)"#, "exit"),
            r#"{exit "a"\}"#
        );
    }

    #[test]
    fn test_other_tags_untouched() {
        assert_eq!(
            convert_tag_syntax("(exitNow x) (exits) (exit)", "exit"),
            "(exitNow x) (exits) {exit}"
        );
    }

    #[test]
    fn test_quoted_paren_does_not_close() {
        assert_eq!(
            convert_tag_syntax(r#"(say "a ) b")"#, "say"),
            r#"{say "a ) b"}"#
        );
    }

    #[test]
    fn test_nested_parens() {
        assert_eq!(
            convert_tag_syntax("(eval (1 + 2))", "eval"),
            "{eval (1 + 2)}"
        );
    }

    #[test]
    fn test_call_does_not_span_lines() {
        let input = "(exit \"a\"\n)";
        assert_eq!(convert_tag_syntax(input, "exit"), input);
    }

    #[test]
    fn test_empty_params_not_a_call() {
        assert_eq!(convert_tag_syntax("(exit )", "exit"), "(exit )");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        assert_eq!(
            convert_tag_syntax("héllo (end) wörld", "end"),
            "héllo {end} wörld"
        );
    }
}
