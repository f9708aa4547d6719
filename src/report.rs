//! Diagnostic rendering.
//!
//! Turns a [`ValidationResult`] into the multi-line block users see: a
//! heading with the line number and overall classification, the offending
//! line with a caret under the bad token, per-issue messages, ranked
//! suggestions, and deprecation guidance. All prose comes from the message
//! catalogues; this module only arranges it.

use std::fmt::Write as _;

use crate::messages::{MessageKey, Messages};
use crate::{IssueKind, Severity, ValidationResult};

/// Migration documentation referenced from deprecation findings.
pub const MIGRATION_GUIDE_URL: &str = "https://docs.usacloud.jp/usacloud/upgrade/v1_0_0/";

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub struct Reporter<'a> {
    color: bool,
    messages: &'a Messages,
}

impl<'a> Reporter<'a> {
    pub fn new(color: bool, messages: &'a Messages) -> Self {
        Self { color, messages }
    }

    /// Render one finding block. The uncolored output contains no escape
    /// sequences at all, so golden comparisons can run on it directly.
    pub fn render(&self, result: &ValidationResult) -> String {
        let palette = ansi::Palette::new(self.color);
        let mut out = String::new();

        let severity = result
            .issues
            .iter()
            .map(|i| i.severity)
            .min()
            .unwrap_or(Severity::Info);
        let heading = self.messages.format(
            MessageKey::LineHeading,
            &[&result.line_no.to_string(), self.severity_label(severity)],
        );
        let _ = writeln!(out, "{}", palette.bold(palette.paint(heading, self.severity_color(severity))));

        let _ = writeln!(out, "  {}", result.line);
        if let Some((column, width)) = self.caret_span(result) {
            let _ = writeln!(
                out,
                "  {}{}",
                " ".repeat(column),
                palette.paint("^".repeat(width.max(1)), ansi::YELLOW)
            );
        }

        for issue in &result.issues {
            let label = self.severity_label(issue.severity);
            let _ = writeln!(
                out,
                "  {}: {}",
                palette.paint(label, self.severity_color(issue.severity)),
                issue.message
            );
        }

        let wants_suggestions = result
            .issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::InvalidMainCommand | IssueKind::InvalidSubcommand));
        if wants_suggestions && !result.suggestions.is_empty() {
            let listed: Vec<&str> =
                result.suggestions.iter().take(5).map(|s| s.candidate.as_str()).collect();
            let _ = writeln!(
                out,
                "  {}",
                palette.paint(self.messages.format(MessageKey::DidYouMean, &[&listed.join(", ")]), ansi::CYAN)
            );
        }

        if let Some(dep) = &result.deprecation {
            if let Some(replacement) = dep.replacement {
                let _ = writeln!(
                    out,
                    "  {}",
                    palette.paint(
                        self.messages.format(MessageKey::ReplacementHint, &[replacement]),
                        ansi::BLUE
                    )
                );
            }
            let _ = writeln!(
                out,
                "  {}",
                palette.dim(self.messages.format(MessageKey::MigrationGuide, &[MIGRATION_GUIDE_URL]))
            );
        }

        out
    }

    fn severity_label(&self, severity: Severity) -> &'static str {
        let key = match severity {
            Severity::Error => MessageKey::SeverityError,
            Severity::Warning => MessageKey::SeverityWarning,
            Severity::Info => MessageKey::SeverityInfo,
        };
        self.messages.text(key)
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::BLUE,
        }
    }

    /// Column and width of the caret under the first issue whose component
    /// occurs in the line. `None` for whole-line findings.
    fn caret_span(&self, result: &ValidationResult) -> Option<(usize, usize)> {
        let issue = result.issues.iter().find(|i| {
            !i.component.is_empty() && i.component != result.line.trim() && result.line.contains(&i.component)
        })?;
        let byte_col = result.line.find(&issue.component)?;
        let column = result.line[..byte_col].chars().count();
        Some((column, issue.component.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{Language, Messages};
    use crate::{Issue, Suggestion};

    fn sample() -> ValidationResult {
        ValidationResult {
            line_no: 3,
            line: "usacloud serv list".to_string(),
            issues: vec![Issue {
                kind: IssueKind::InvalidMainCommand,
                severity: Severity::Error,
                component: "serv".to_string(),
                message: "unknown command: serv".to_string(),
            }],
            suggestions: vec![Suggestion { candidate: "server".to_string(), score: 0.5 }],
            deprecation: None,
        }
    }

    #[test]
    fn plain_output_has_no_escape_sequences() {
        let messages = Messages::new(Language::En);
        let rendered = Reporter::new(false, &messages).render(&sample());
        assert!(!rendered.contains('\x1b'));
        assert!(rendered.contains("line 3: error"));
        assert!(rendered.contains("usacloud serv list"));
        assert!(rendered.contains("did you mean server?"));
    }

    #[test]
    fn colored_output_strips_down_to_the_plain_form() {
        let messages = Messages::new(Language::En);
        let plain = Reporter::new(false, &messages).render(&sample());
        let colored = Reporter::new(true, &messages).render(&sample());
        let stripped: String = {
            // Remove CSI sequences: ESC '[' ... final byte in @-~.
            let mut out = String::new();
            let mut chars = colored.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '\x1b' && chars.peek() == Some(&'[') {
                    chars.next();
                    for d in chars.by_ref() {
                        if ('@'..='~').contains(&d) {
                            break;
                        }
                    }
                } else {
                    out.push(c);
                }
            }
            out
        };
        assert_eq!(stripped, plain);
    }

    #[test]
    fn caret_points_at_the_component() {
        let messages = Messages::new(Language::En);
        let rendered = Reporter::new(false, &messages).render(&sample());
        let lines: Vec<&str> = rendered.lines().collect();
        // "  usacloud serv list"
        // "           ^^^^"
        let caret_line = lines[2];
        assert_eq!(caret_line, format!("  {}{}", " ".repeat(9), "^".repeat(4)));
    }

    #[test]
    fn deprecation_block_lists_replacement_and_guide() {
        let messages = Messages::new(Language::En);
        let mut result = sample();
        result.issues = vec![Issue {
            kind: IssueKind::DeprecatedCommand,
            severity: Severity::Warning,
            component: "iso-image".to_string(),
            message: "iso-image is deprecated; use cdrom instead".to_string(),
        }];
        result.line = "usacloud iso-image list".to_string();
        result.deprecation =
            Some(crate::DeprecationInfo { replacement: Some("cdrom"), note: "renamed" });
        result.suggestions = vec![Suggestion { candidate: "cdrom".to_string(), score: 1.0 }];

        let rendered = Reporter::new(false, &messages).render(&result);
        assert!(rendered.contains("recommended replacement: cdrom"));
        assert!(rendered.contains(MIGRATION_GUIDE_URL));
        // Deprecation alone is not an unknown command, so no "did you mean".
        assert!(!rendered.contains("did you mean"));
    }

    #[test]
    fn japanese_catalogue_drives_the_prose() {
        let messages = Messages::new(Language::Ja);
        let rendered = Reporter::new(false, &messages).render(&sample());
        assert!(rendered.contains("3行目: エラー"));
        assert!(rendered.contains("もしかして: server ?"));
    }
}
