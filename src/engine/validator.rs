//! Per-line validation.
//!
//! Stateless across lines: each call parses the line, checks the command
//! catalogue, and collects findings. Nothing here aborts — errors travel as
//! [`Issue`] values, and the driver decides what an error means for the
//! stream (strict mode) or the exit code (validate-only mode).

use log::trace;

use crate::engine::{catalog, parser, suggest};
use crate::messages::{MessageKey, Messages};
use crate::{Issue, IssueKind, Severity, Suggestion, ValidationResult};

pub struct Validator<'a> {
    messages: &'a Messages,
}

impl<'a> Validator<'a> {
    pub fn new(messages: &'a Messages) -> Self {
        Self { messages }
    }

    /// Validate one line. Returns `None` when the line is not a CLI
    /// invocation or produced no findings.
    pub fn validate(&self, line: &str, line_no: usize) -> Option<ValidationResult> {
        if !line.contains(parser::CLI_VERB) {
            return None;
        }

        let parsed = match parser::parse(line) {
            Ok(parsed) => parsed,
            Err(failure) => {
                let quote = match failure {
                    parser::ParseFailure::UnterminatedQuote { quote } => quote.to_string(),
                };
                return Some(ValidationResult {
                    line_no,
                    line: line.to_string(),
                    issues: vec![Issue {
                        kind: IssueKind::ParseError,
                        severity: Severity::Error,
                        component: line.trim().to_string(),
                        message: self.messages.format(MessageKey::UnterminatedQuote, &[&quote]),
                    }],
                    suggestions: Vec::new(),
                    deprecation: None,
                });
            }
        };

        let main = parsed.main.as_deref()?;
        trace!("validating line {line_no}: main={main:?} sub={:?}", parsed.sub);

        let mut issues: Vec<Issue> = Vec::new();
        let mut suggestions: Vec<Suggestion> = Vec::new();
        let mut deprecation = None;

        if let Some(dep) = catalog::deprecation_of(main) {
            // Deprecation wins over every other main-command check.
            let message = match dep.replacement {
                Some(replacement) => {
                    self.messages.format(MessageKey::DeprecatedWithReplacement, &[main, replacement])
                }
                None => self.messages.format(MessageKey::DeprecatedNoReplacement, &[main, dep.note]),
            };
            issues.push(Issue {
                kind: IssueKind::DeprecatedCommand,
                severity: Severity::Warning,
                component: main.to_string(),
                message,
            });
            deprecation = Some(dep);

            if let Some(replacement) = dep.replacement {
                suggestions.push(Suggestion { candidate: replacement.to_string(), score: 1.0 });
            }

            // The subcommand is judged against the replacement's table, but
            // the finding names the command the user actually wrote.
            if let Some(sub) = parsed.sub.as_deref() {
                let accepted = dep
                    .replacement
                    .map(|replacement| catalog::is_valid_sub(replacement, sub))
                    .unwrap_or(false);
                if !accepted {
                    issues.push(Issue {
                        kind: IssueKind::InvalidSubcommand,
                        severity: Severity::Error,
                        component: sub.to_string(),
                        message: self.messages.format(MessageKey::UnknownSubcommand, &[main, sub]),
                    });
                }
            }
        } else if !catalog::is_valid_main(main) {
            let canonical = main.to_ascii_lowercase();
            if canonical != main && catalog::is_valid_main(&canonical) {
                issues.push(Issue {
                    kind: IssueKind::InvalidMainCommand,
                    severity: Severity::Error,
                    component: main.to_string(),
                    message: self.messages.format(MessageKey::CaseSensitiveCommand, &[main]),
                });
                suggestions.push(Suggestion { candidate: canonical, score: 1.0 });
            } else {
                issues.push(Issue {
                    kind: IssueKind::InvalidMainCommand,
                    severity: Severity::Error,
                    component: main.to_string(),
                    message: self.messages.format(MessageKey::UnknownMainCommand, &[main]),
                });
                suggestions.extend(suggest::suggest(
                    main,
                    catalog::main_names(),
                    suggest::DEFAULT_MAX_DISTANCE,
                    suggest::DEFAULT_MAX_RESULTS,
                ));
            }
        } else if let Some(sub) = parsed.sub.as_deref() {
            if !catalog::is_valid_sub(main, sub) {
                issues.push(Issue {
                    kind: IssueKind::InvalidSubcommand,
                    severity: Severity::Error,
                    component: sub.to_string(),
                    message: self.messages.format(MessageKey::UnknownSubcommand, &[main, sub]),
                });
                suggestions.extend(suggest::suggest(
                    sub,
                    catalog::sub_names(main),
                    suggest::DEFAULT_MAX_DISTANCE,
                    suggest::DEFAULT_MAX_RESULTS,
                ));
            }
        }

        if issues.is_empty() {
            return None;
        }

        Some(ValidationResult {
            line_no,
            line: line.to_string(),
            issues,
            suggestions,
            deprecation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Language;

    fn validate(line: &str) -> Option<ValidationResult> {
        let messages = Messages::new(Language::En);
        Validator::new(&messages).validate(line, 1)
    }

    #[test]
    fn non_invocations_are_skipped() {
        assert!(validate("echo hello").is_none());
        assert!(validate("usacloud").is_none());
        assert!(validate("usacloud --version").is_none());
    }

    #[test]
    fn valid_invocations_produce_nothing() {
        assert!(validate("usacloud server list").is_none());
        assert!(validate("usacloud disk read --zone=is1a mydisk").is_none());
    }

    #[test]
    fn unknown_main_gets_a_ranked_suggestion() {
        let result = validate("usacloud serv list").unwrap();
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.kind, IssueKind::InvalidMainCommand);
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.component, "serv");
        assert!(result.has_errors());

        // "self" ties "server" at distance 2 and wins the lexicographic
        // tie-break, so "server" is present but not necessarily first.
        let server = result
            .suggestions
            .iter()
            .find(|s| s.candidate == "server")
            .expect("server should be suggested for serv");
        assert!(server.score >= 0.5);
        for pair in result.suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn deprecated_main_with_replacement() {
        let result = validate("usacloud iso-image list").unwrap();
        let kinds: Vec<_> = result.issues.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IssueKind::DeprecatedCommand));
        assert!(!kinds.contains(&IssueKind::InvalidMainCommand));

        let dep = result.deprecation.unwrap();
        assert_eq!(dep.replacement, Some("cdrom"));
        assert_eq!(result.suggestions[0].candidate, "cdrom");
        assert_eq!(result.suggestions[0].score, 1.0);

        // `list` is a valid cdrom subcommand, so no subcommand issue.
        assert!(!result.issues.iter().any(|i| i.kind == IssueKind::InvalidSubcommand));
    }

    #[test]
    fn deprecated_main_reports_bad_sub_against_replacement() {
        // `boot` exists nowhere under cdrom.
        let result = validate("usacloud iso-image boot").unwrap();
        let sub_issue = result
            .issues
            .iter()
            .find(|i| i.kind == IssueKind::InvalidSubcommand)
            .unwrap();
        assert_eq!(sub_issue.component, "boot");
        // The message names what the user wrote, not the replacement.
        assert!(sub_issue.message.contains("iso-image"));
    }

    #[test]
    fn deprecated_without_replacement_flags_subcommand() {
        let result = validate("usacloud summary show").unwrap();
        let kinds: Vec<_> = result.issues.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IssueKind::DeprecatedCommand));
        assert!(kinds.contains(&IssueKind::InvalidSubcommand));
        assert_eq!(result.deprecation.unwrap().replacement, None);
    }

    #[test]
    fn deprecated_without_sub_is_a_lone_warning() {
        let result = validate("usacloud summary").unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueKind::DeprecatedCommand);
        assert!(!result.has_errors());
    }

    #[test]
    fn wrong_case_offers_the_canonical_form() {
        let result = validate("usacloud Server list").unwrap();
        assert_eq!(result.issues[0].kind, IssueKind::InvalidMainCommand);
        assert_eq!(result.suggestions[0].candidate, "server");
        assert_eq!(result.suggestions[0].score, 1.0);
    }

    #[test]
    fn unknown_sub_is_ranked_against_the_subcommand_table() {
        let result = validate("usacloud server lst").unwrap();
        assert_eq!(result.issues[0].kind, IssueKind::InvalidSubcommand);
        assert_eq!(result.issues[0].component, "lst");
        assert_eq!(result.suggestions[0].candidate, "list");
    }

    #[test]
    fn unterminated_quote_surfaces_as_parse_error() {
        let result = validate("usacloud note create --name \"my note").unwrap();
        assert_eq!(result.issues[0].kind, IssueKind::ParseError);
        assert!(result.has_errors());
    }
}
