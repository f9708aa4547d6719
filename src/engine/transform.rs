//! Rule pipeline application.

use log::debug;

use crate::{ChangeRecord, Rule, TransformResult, rules};

/// The idempotence sentinel and audit trail. A line carrying this substring
/// never receives a second annotation comment.
pub const UPDATE_COMMENT_MARKER: &str = "# usacloud-update:";

/// True for lines the pipeline must pass through untouched: blank lines and
/// lines whose first non-whitespace character starts a comment.
pub fn is_passthrough(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Applies the rule catalogue, in order, to one line at a time.
pub struct TransformEngine {
    rules: Vec<Rule>,
}

impl TransformEngine {
    /// Engine over the default catalogue. Building the catalogue compiles
    /// every pattern, so a malformed rule panics here, before any input is
    /// read.
    pub fn new() -> Self {
        Self::with_rules(rules::get())
    }

    /// Engine over an explicit rule list (tests use this to isolate rules).
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run the pipeline over `line`.
    ///
    /// Rules fire in catalogue order against the current (possibly already
    /// rewritten) text. After the first rewrite the annotation comment is
    /// appended; the marker check keeps it unique even when several rules
    /// fire on the same line.
    pub fn apply(&self, line: &str) -> TransformResult {
        if is_passthrough(line) {
            return TransformResult::unchanged(line);
        }

        let mut current = line.to_string();
        let mut changes: Vec<ChangeRecord> = Vec::new();

        for rule in &self.rules {
            let outcome = rule.apply(&current);
            if !outcome.matched {
                continue;
            }

            debug!("rule {} fired: {:?} => {:?}", rule.name, outcome.before, outcome.after);
            current = outcome.line;
            if !current.contains(UPDATE_COMMENT_MARKER) {
                current.push_str(&format!(" {} {} ({})", UPDATE_COMMENT_MARKER, rule.reason, rule.url));
            }
            changes.push(ChangeRecord {
                rule_name: rule.name,
                before_fragment: outcome.before,
                after_fragment: outcome.after,
            });
        }

        TransformResult { line_after: current, changed: !changes.is_empty(), changes }
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TransformEngine {
        TransformEngine::new()
    }

    #[test]
    fn blank_and_comment_lines_pass_through() {
        for line in ["", "   ", "# usacloud iso-image list", "  # comment"] {
            let res = engine().apply(line);
            assert_eq!(res.line_after, line);
            assert!(!res.changed);
            assert!(res.changes.is_empty());
        }
    }

    #[test]
    fn lines_without_the_verb_are_untouched() {
        let line = "echo iso-image --output-type=csv";
        let res = engine().apply(line);
        assert_eq!(res.line_after, line);
        assert!(!res.changed);
    }

    #[test]
    fn annotation_is_appended_once() {
        // Two rules fire on this line; the marker must appear exactly once.
        let res = engine().apply("usacloud iso-image list --output-type=csv");
        assert!(res.changed);
        assert_eq!(res.changes.len(), 2);
        assert_eq!(res.line_after.matches(UPDATE_COMMENT_MARKER).count(), 1);
    }

    #[test]
    fn change_records_follow_catalogue_order() {
        let res = engine().apply("usacloud iso-image list --output-type=csv");
        // output-type-csv-tsv is declared before iso-image-to-cdrom.
        assert_eq!(res.changes[0].rule_name, "output-type-csv-tsv");
        assert_eq!(res.changes[1].rule_name, "iso-image-to-cdrom");
    }

    #[test]
    fn apply_is_idempotent_on_its_own_output() {
        let inputs = [
            "usacloud server list --output-type=csv",
            "usacloud disk read --selector name=mydisk",
            "usacloud iso-image list",
            "usacloud startup-script list",
            "usacloud ipv4 read",
            "usacloud product-disk list",
            "usacloud summary",
            "usacloud object-storage list",
            "usacloud ojs put file.txt",
            "usacloud server list --zone = all",
            "usacloud server list --zone= all -o tsv",
        ];
        for input in inputs {
            let first = engine().apply(input);
            let second = engine().apply(&first.line_after);
            assert!(!second.changed, "second pass changed {:?} into {:?}", first.line_after, second.line_after);
            assert_eq!(second.line_after, first.line_after);
        }
    }

    #[test]
    fn unchanged_result_has_no_records() {
        let res = engine().apply("usacloud server list");
        assert!(!res.changed);
        assert!(res.changes.is_empty());
        assert_eq!(res.line_after, "usacloud server list");
    }
}
