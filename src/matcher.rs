//! Path-pattern compilation and matching.
//!
//! A pattern is a template like `/users/{user_id}` — literal runs matched
//! byte-for-byte (path separators included) interleaved with `{name}`
//! placeholders. Patterns are compiled once at registration time; matching a
//! request path against a compiled [`Pattern`] is a pure function of its two
//! inputs with no side effects.
//!
//! Matching is total-length: the whole path against the whole pattern. A
//! placeholder captures a non-empty run of characters within a single path
//! segment — it never crosses a `/` — greedily, up to the next literal run.
//! `/users/{id}` matches `/users/42` with `id = "42"`, and does not match
//! `/users/42/posts` or `/users/`.

use std::collections::HashMap;

use crate::error::Error;

/// Placeholder name → captured substring, produced fresh per request.
///
/// Keys are exactly the placeholder names declared in the matched pattern.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, PartialEq)]
enum Token {
    Literal(String),
    Param(String),
}

/// A compiled path pattern.
///
/// Created by [`Pattern::parse`] when a route is registered; malformed
/// templates are rejected there, so matching never fails structurally.
#[derive(Debug)]
pub struct Pattern {
    raw: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compiles a path template.
    ///
    /// Rejected templates: unclosed `{`, stray `}`, an empty or duplicate
    /// placeholder name, and two placeholders with no literal between them
    /// (there is no unambiguous way to split such a capture).
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            reason,
        };

        let mut tokens = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        let mut rest = pattern;

        while !rest.is_empty() {
            let Some(open) = rest.find('{') else {
                if rest.contains('}') {
                    return Err(invalid("stray `}`".to_owned()));
                }
                tokens.push(Token::Literal(rest.to_owned()));
                break;
            };

            if open > 0 {
                let literal = &rest[..open];
                if literal.contains('}') {
                    return Err(invalid("stray `}`".to_owned()));
                }
                tokens.push(Token::Literal(literal.to_owned()));
            }

            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unclosed `{`".to_owned()))?;
            let name = &after[..close];
            if name.is_empty() {
                return Err(invalid("empty placeholder name".to_owned()));
            }
            if name.contains('{') {
                return Err(invalid(format!("nested `{{` in placeholder `{name}`")));
            }
            if names.contains(&name) {
                return Err(invalid(format!("duplicate placeholder `{name}`")));
            }
            if matches!(tokens.last(), Some(Token::Param(_))) {
                return Err(invalid(format!(
                    "placeholder `{name}` directly follows another placeholder"
                )));
            }
            names.push(name);
            tokens.push(Token::Param(name.to_owned()));
            rest = &after[close + 1..];
        }

        Ok(Self {
            raw: pattern.to_owned(),
            tokens,
        })
    }

    /// The template text this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a concrete request path against this pattern.
    ///
    /// Returns the extracted placeholder values on a full structural match,
    /// `None` otherwise. A non-match is a normal negative outcome, not an
    /// error.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::new();
        match_tokens(&self.tokens, path, &mut params).then_some(params)
    }
}

/// Matches the remaining tokens against the remaining path.
///
/// A placeholder capture is greedy up to the rightmost in-segment occurrence
/// of the literal that follows it, but backtracks to earlier occurrences when
/// the remainder of the pattern cannot match from there — a capture may
/// itself contain the delimiting literal, as in `/{a}x{b}y` against `/axbxy`
/// (`a = "a"`, `b = "bx"`). Backtracking is bounded by the segment.
fn match_tokens(tokens: &[Token], rest: &str, params: &mut PathParams) -> bool {
    let Some((token, tail)) = tokens.split_first() else {
        return rest.is_empty();
    };

    match token {
        Token::Literal(literal) => match rest.strip_prefix(literal.as_str()) {
            Some(rest) => match_tokens(tail, rest, params),
            None => false,
        },
        Token::Param(name) => {
            // The capture stays inside the current path segment and is
            // never empty.
            let segment_end = rest.find('/').unwrap_or(rest.len());
            match tail.first() {
                Some(Token::Literal(literal)) => {
                    for end in (1..=segment_end).rev() {
                        if !rest.is_char_boundary(end)
                            || !rest[end..].starts_with(literal.as_str())
                        {
                            continue;
                        }
                        params.insert(name.clone(), rest[..end].to_owned());
                        if match_tokens(tail, &rest[end..], params) {
                            return true;
                        }
                        params.remove(name);
                    }
                    false
                }
                // A trailing placeholder takes the rest of the segment;
                // adjacent placeholders are rejected at parse time.
                _ => {
                    if segment_end == 0 {
                        return false;
                    }
                    params.insert(name.clone(), rest[..segment_end].to_owned());
                    match_tokens(tail, &rest[segment_end..], params)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn literal_pattern_requires_exact_path() {
        let p = Pattern::parse("/home").unwrap();
        assert_eq!(p.matches("/home"), Some(PathParams::new()));
        assert_eq!(p.matches("/home/"), None);
        assert_eq!(p.matches("/hom"), None);
        assert_eq!(p.matches("/home/extra"), None);
    }

    #[test]
    fn extracts_single_placeholder() {
        let p = Pattern::parse("/users/{id}").unwrap();
        assert_eq!(p.matches("/users/42"), Some(params(&[("id", "42")])));
        assert_eq!(p.matches("/users/alice"), Some(params(&[("id", "alice")])));
    }

    #[test]
    fn extracts_multiple_placeholders() {
        let p = Pattern::parse("/a/{x}/b/{y}").unwrap();
        assert_eq!(
            p.matches("/a/1/b/two"),
            Some(params(&[("x", "1"), ("y", "two")]))
        );
    }

    #[test]
    fn no_partial_match() {
        let p = Pattern::parse("/users/{id}").unwrap();
        assert_eq!(p.matches("/users/5/extra"), None);
        assert_eq!(p.matches("/user/5"), None);
    }

    #[test]
    fn placeholder_never_crosses_a_segment() {
        let p = Pattern::parse("/files/{name}").unwrap();
        assert_eq!(p.matches("/files/a/b"), None);
    }

    #[test]
    fn placeholder_capture_must_be_non_empty() {
        let p = Pattern::parse("/users/{id}").unwrap();
        assert_eq!(p.matches("/users/"), None);
    }

    #[test]
    fn greedy_up_to_trailing_literal() {
        let p = Pattern::parse("/files/{name}.txt").unwrap();
        assert_eq!(
            p.matches("/files/report.v2.txt"),
            Some(params(&[("name", "report.v2")]))
        );
        assert_eq!(p.matches("/files/.txt"), None);
    }

    #[test]
    fn literal_between_placeholders() {
        let p = Pattern::parse("/{owner}-{repo}/issues").unwrap();
        assert_eq!(
            p.matches("/rust-lang-rust/issues"),
            Some(params(&[("owner", "rust-lang"), ("repo", "rust")]))
        );
    }

    #[test]
    fn backtracks_when_a_capture_contains_the_following_literal() {
        // The greedy split binds `a = "axb"` first, leaving nothing valid
        // for `b`; the matcher must retry the earlier `x` instead of
        // reporting a structurally valid path as no-match.
        let p = Pattern::parse("/{a}x{b}y").unwrap();
        assert_eq!(
            p.matches("/axbxy"),
            Some(params(&[("a", "a"), ("b", "bx")]))
        );

        // Greediness is still preferred when both splits would match.
        let p = Pattern::parse("/{a}-{b}").unwrap();
        assert_eq!(
            p.matches("/one-two-three"),
            Some(params(&[("a", "one-two"), ("b", "three")]))
        );
    }

    #[test]
    fn rejects_malformed_templates() {
        for bad in ["/users/{id", "/users/id}", "/users/{}", "/{a}/{a}", "/{a}{b}"] {
            assert!(
                matches!(Pattern::parse(bad), Err(Error::InvalidPattern { .. })),
                "expected `{bad}` to be rejected"
            );
        }
    }

    #[test]
    fn as_str_preserves_template_text() {
        let p = Pattern::parse("/users/{id}").unwrap();
        assert_eq!(p.as_str(), "/users/{id}");
    }
}
