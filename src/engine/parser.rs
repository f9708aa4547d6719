//! Shallow command-line decomposition.
//!
//! This parser classifies a line and extracts the tokens the validator needs;
//! it is deliberately not a POSIX shell. Quotes only group characters into a
//! token and detect the one structurally malformed input we care about
//! (an unterminated quote). Everything else — expansions, redirections,
//! control flow — passes through as plain tokens.

use crate::ParsedCommand;

/// The CLI verb every recognized invocation starts with.
pub const CLI_VERB: &str = "usacloud";

/// Structurally malformed input the tokenizer cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    UnterminatedQuote { quote: char },
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseFailure::UnterminatedQuote { quote } => {
                write!(f, "unterminated {quote} quote")
            }
        }
    }
}

/// Decompose `line` into `{main, sub, flags, positionals}`.
///
/// A line whose first token is not the CLI verb yields `main == None` and
/// parses successfully; the line simply is not an invocation. Tokens before
/// the verb (e.g. `env FOO=1`) are skipped. A token directly after the verb
/// that starts with `-` is treated as a flag of the tool itself, not as a
/// main command.
pub fn parse(line: &str) -> Result<ParsedCommand, ParseFailure> {
    let mut work = line.trim();
    while let Some(rest) = work.strip_prefix('#') {
        work = rest.trim_start();
    }

    let tokens = tokenize(work)?;
    let mut parsed = ParsedCommand::default();

    let Some(verb_idx) = tokens.iter().position(|t| t == CLI_VERB) else {
        return Ok(parsed);
    };

    let mut rest = tokens[verb_idx + 1..].iter();
    let mut lookahead = rest.next();

    if let Some(tok) = lookahead {
        if !tok.starts_with('-') {
            parsed.main = Some(tok.clone());
            lookahead = rest.next();
        }
    }
    if parsed.main.is_some() {
        if let Some(tok) = lookahead {
            if !tok.starts_with('-') {
                parsed.sub = Some(tok.clone());
                lookahead = rest.next();
            }
        }
    }

    // Remaining tokens: flags, flag values, positionals. Only a `--long`
    // flag without an inline `=value` absorbs the following token.
    let mut pending_value_for: Option<String> = None;
    while let Some(tok) = lookahead {
        if tok.starts_with('-') {
            let long = tok.starts_with("--");
            let name = tok.trim_start_matches('-');
            match name.split_once('=') {
                Some((name, value)) => {
                    parsed.flags.insert(name.to_string(), Some(value.to_string()));
                    pending_value_for = None;
                }
                None => {
                    parsed.flags.insert(name.to_string(), None);
                    pending_value_for = long.then(|| name.to_string());
                }
            }
        } else if let Some(name) = pending_value_for.take() {
            parsed.flags.insert(name, Some(tok.clone()));
        } else {
            parsed.positionals.push(tok.clone());
        }
        lookahead = rest.next();
    }

    Ok(parsed)
}

/// Whitespace tokenization with single/double quote grouping. Quote
/// characters are kept in the token text; the content is not interpreted.
fn tokenize(s: &str) -> Result<Vec<String>, ParseFailure> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;

    for ch in s.chars() {
        match in_quote {
            Some(q) => {
                current.push(ch);
                if ch == q {
                    in_quote = None;
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    in_quote = Some(ch);
                    current.push(ch);
                } else if ch.is_whitespace() {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(ch);
                }
            }
        }
    }

    if let Some(quote) = in_quote {
        return Err(ParseFailure::UnterminatedQuote { quote });
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_invocation_decomposes() {
        let p = parse("usacloud server list --zone=is1a --output-type json web-1").unwrap();
        assert_eq!(p.main.as_deref(), Some("server"));
        assert_eq!(p.sub.as_deref(), Some("list"));
        assert_eq!(p.flags.get("zone"), Some(&Some("is1a".to_string())));
        assert_eq!(p.flags.get("output-type"), Some(&Some("json".to_string())));
        assert_eq!(p.positionals, vec!["web-1"]);
    }

    #[test]
    fn non_invocation_parses_trivially() {
        let p = parse("echo hello world").unwrap();
        assert_eq!(p.main, None);
        assert_eq!(p.sub, None);
        assert!(p.flags.is_empty());
        assert!(p.positionals.is_empty());
    }

    #[test]
    fn verb_alone_has_no_main() {
        let p = parse("usacloud").unwrap();
        assert_eq!(p.main, None);
    }

    #[test]
    fn flag_directly_after_verb_is_not_a_main() {
        let p = parse("usacloud --version").unwrap();
        assert_eq!(p.main, None);
        assert!(p.flags.contains_key("version"));
    }

    #[test]
    fn tokens_before_the_verb_are_skipped() {
        let p = parse("env TERM=dumb usacloud disk list").unwrap();
        assert_eq!(p.main.as_deref(), Some("disk"));
        assert_eq!(p.sub.as_deref(), Some("list"));
    }

    #[test]
    fn short_flags_do_not_absorb_values() {
        let p = parse("usacloud server list -o csv").unwrap();
        assert_eq!(p.flags.get("o"), Some(&None));
        assert_eq!(p.positionals, vec!["csv"]);
    }

    #[test]
    fn quoted_tokens_stay_whole() {
        let p = parse("usacloud note create --name \"my note\" body.txt").unwrap();
        assert_eq!(p.flags.get("name"), Some(&Some("\"my note\"".to_string())));
        assert_eq!(p.positionals, vec!["body.txt"]);
    }

    #[test]
    fn unterminated_quote_is_a_parse_failure() {
        assert_eq!(
            parse("usacloud note create --name \"my note"),
            Err(ParseFailure::UnterminatedQuote { quote: '"' })
        );
        assert_eq!(
            parse("usacloud server read 'web"),
            Err(ParseFailure::UnterminatedQuote { quote: '\'' })
        );
    }

    #[test]
    fn leading_comment_marker_is_discarded() {
        let p = parse("# usacloud server list").unwrap();
        assert_eq!(p.main.as_deref(), Some("server"));
    }
}
