extern crate self as usacloud_update;

use regex::{Captures, Regex};

#[macro_use]
mod macros;
mod api;
mod driver;
mod engine;
mod error;
mod messages;
mod report;
mod rules;

pub mod golden;

pub use api::{UpdateOutcome, transform_line, update, update_with, validate_script};
pub use driver::{Config, Driver, MAX_LINE_BYTES, Mode, OUTPUT_HEADER};
pub use engine::{RunStats, TransformEngine, Validator};
pub use error::Error;
pub use messages::{Language, MessageKey, Messages};
pub use report::Reporter;

// --- Core data model ---------------------------------------------------------

/// Replacement function of a rewrite rule.
///
/// Receives the full capture set of one pattern match and returns the
/// rewritten *fragment* (everything the match covered beyond the preserved
/// capture-1 prefix, see [`Rule`]).
pub type Replacer = Box<dyn Fn(&Captures<'_>) -> String + Send + Sync>;

/// A rewrite rule: a stable name, a pattern, a replacement function, and the
/// human-readable justification attached to every line the rule rewrites.
///
/// Patterns follow one structural convention: capture group 1 is the context
/// prefix (the CLI-verb anchor, or leading whitespace for whole-line rules)
/// and is carried into the output verbatim. The [`Replacer`] produces the new
/// text for the remainder of the match. Change records report only that
/// remainder, so stats rows show `--output-type=csv`, not the whole line.
pub struct Rule {
    /// Stable kebab-case identifier, used in change records and tests.
    pub name: &'static str,
    /// Compiled pattern (static, created via the `regex!` macro).
    pub pattern: &'static Regex,
    /// Fragment replacement function.
    pub replacer: Replacer,
    /// Why the rewrite is needed.
    pub reason: &'static str,
    /// Documentation link backing up `reason`.
    pub url: &'static str,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("replacer", &"<function>")
            .field("url", &self.url)
            .finish()
    }
}

/// Result of applying a single [`Rule`] to a line.
///
/// `matched == false` implies `line` equals the input and both fragments are
/// empty.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub line: String,
    pub matched: bool,
    pub before: String,
    pub after: String,
}

impl Rule {
    /// Apply this rule to `line`.
    ///
    /// Rules are pure: the same input always yields the same outcome. All
    /// occurrences on the line are rewritten; the reported fragments come
    /// from the first occurrence.
    pub fn apply(&self, line: &str) -> RuleOutcome {
        let Some(caps) = self.pattern.captures(line) else {
            return RuleOutcome {
                line: line.to_string(),
                matched: false,
                before: String::new(),
                after: String::new(),
            };
        };

        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or("");
        let prefix_len = caps.get(1).map(|m| m.len()).unwrap_or(0);
        let before = whole[prefix_len..].trim().to_string();
        let after = (self.replacer)(&caps).trim().to_string();

        let rewritten = self
            .pattern
            .replace_all(line, |c: &Captures<'_>| {
                let prefix = c.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}{}", prefix, (self.replacer)(c))
            })
            .into_owned();

        RuleOutcome { line: rewritten, matched: true, before, after }
    }
}

/// A structured note that a specific rule fired on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub rule_name: &'static str,
    /// The trimmed matched fragment, before rewriting.
    pub before_fragment: String,
    /// The trimmed replacement fragment.
    pub after_fragment: String,
}

/// Outcome of running the full rule pipeline over one line.
///
/// `changes` is empty iff `changed` is false.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub line_after: String,
    pub changed: bool,
    pub changes: Vec<ChangeRecord>,
}

impl TransformResult {
    pub(crate) fn unchanged(line: &str) -> Self {
        Self { line_after: line.to_string(), changed: false, changes: Vec::new() }
    }
}

/// A shell command line decomposed into its CLI parts.
///
/// `main == None` means the line is not a recognized CLI invocation; such
/// lines are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub main: Option<String>,
    pub sub: Option<String>,
    /// Flag name (without leading dashes) to optional value.
    pub flags: std::collections::HashMap<String, Option<String>>,
    pub positionals: Vec<String>,
}

/// What went wrong on a line, as classified by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    ParseError,
    InvalidMainCommand,
    InvalidSubcommand,
    DeprecatedCommand,
    SyntaxError,
    QualityWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// The offending token.
    pub component: String,
    pub message: String,
}

/// A ranked replacement candidate for an unknown token.
///
/// Score 1.0 denotes an exact known replacement (a deprecation target or the
/// canonical spelling); lower scores are fuzzy matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub candidate: String,
    pub score: f64,
}

/// Metadata for a deprecated main command.
///
/// `replacement == None` means there is no automatic substitute; the user
/// must redesign that part of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecationInfo {
    pub replacement: Option<&'static str>,
    pub note: &'static str,
}

/// All findings for one line.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub line_no: usize,
    pub line: String,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
    pub deprecation: Option<DeprecationInfo>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

/// Which path a line took through the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Blank or comment line, emitted verbatim.
    Passthrough,
    /// Ran the full transform pipeline.
    Transformed,
    /// Validate-only mode, transformation skipped.
    ValidatedOnly,
    /// Replayed from the performance-mode line cache.
    Replayed,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessingStage::Passthrough => "passthrough",
            ProcessingStage::Transformed => "transformed",
            ProcessingStage::ValidatedOnly => "validated-only",
            ProcessingStage::Replayed => "replayed",
        };
        f.write_str(s)
    }
}

/// Per-line output of the integration driver.
#[derive(Debug, Clone)]
pub struct LineResult {
    pub line_no: usize,
    pub original: String,
    pub transform: TransformResult,
    pub validation: Option<ValidationResult>,
    pub stage: ProcessingStage,
    /// Advisory confidence in `[0.1, 1.0]`; see the driver for the formula.
    pub confidence: f64,
}
