//! Streaming integration driver.
//!
//! Composes the engine into the line loop behind the binary and the public
//! API: read a line, validate it, gate on strict mode, transform it, emit the
//! result plus stats rows and rendered findings. Lines are processed strictly
//! in input order, one at a time; there is no intra-line parallelism, which
//! is what makes strict mode's "valid prefix" contract meaningful.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::time::Instant;

use log::debug;

use crate::engine::{self, TransformEngine, Validator};
use crate::error::Error;
use crate::messages::{Language, Messages};
use crate::report::Reporter;
use crate::{LineResult, ProcessingStage, TransformResult, ValidationResult};

/// Upper bound on a single input line. Longer lines are a fatal input error.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// First line of every transformed output stream. Fixed text, not
/// configuration.
pub const OUTPUT_HEADER: &str =
    "# Updated for usacloud v1.1 by usacloud-update — DO NOT EDIT ABOVE THIS LINE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Rewrite every line; findings are advisory.
    #[default]
    Transform,
    /// No rewriting; render findings and report errors through the exit code.
    ValidateOnly,
    /// Like `Transform`, but the first validation error stops the stream.
    /// Lines already emitted stay emitted: the output is a valid prefix, and
    /// callers that need atomicity should write to a temporary file and
    /// rename on success.
    Strict,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Emit per-change stats rows and advisory findings to the stats stream.
    pub stats: bool,
    /// ANSI color in rendered findings.
    pub color: bool,
    pub language: Language,
    /// Cache per-line results by exact line content. Unbounded; trades
    /// memory for time on repetitive inputs.
    pub performance: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Transform,
            stats: true,
            color: false,
            language: Language::default(),
            performance: false,
        }
    }
}

#[derive(Clone)]
struct CachedLine {
    transform: TransformResult,
    validation: Option<ValidationResult>,
    confidence: f64,
}

pub struct Driver {
    config: Config,
    engine: TransformEngine,
    messages: Messages,
    cache: Option<HashMap<String, CachedLine>>,
    stats: engine::RunStats,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        let messages = Messages::new(config.language);
        let cache = config.performance.then(HashMap::new);
        Self { config, engine: TransformEngine::new(), messages, cache, stats: engine::RunStats::default() }
    }

    pub fn stats(&self) -> &engine::RunStats {
        &self.stats
    }

    /// Run the full stream loop. Returns the process exit code.
    ///
    /// I/O failures, overlong lines, and invalid UTF-8 abort with an error;
    /// validation findings never do, except for the strict-mode gate.
    pub fn drive(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        stats_out: &mut dyn Write,
    ) -> Result<i32, Error> {
        let started = Instant::now();
        // Messages is Copy; the reporter must not borrow self across the loop.
        let messages = self.messages;
        let reporter = Reporter::new(self.config.color, &messages);
        let mut saw_error = false;

        if self.config.mode != Mode::ValidateOnly {
            writeln!(output, "{OUTPUT_HEADER}").map_err(Error::Output)?;
        }

        let mut line_no = 0usize;
        let mut buf: Vec<u8> = Vec::new();
        loop {
            buf.clear();
            let n = input.read_until(b'\n', &mut buf).map_err(Error::Input)?;
            if n == 0 {
                break;
            }
            line_no += 1;

            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            if buf.len() > MAX_LINE_BYTES {
                return Err(Error::LineTooLong { line_no, limit: MAX_LINE_BYTES });
            }
            let line = std::str::from_utf8(&buf)
                .map_err(|_| Error::InvalidUtf8 { line_no })?
                .to_string();

            let result = self.process_line(&line, line_no);

            self.stats.total_lines += 1;
            if result.stage != ProcessingStage::Passthrough {
                self.stats.processed_lines += 1;
            }
            if result.transform.changed {
                self.stats.transformed_lines += 1;
            }
            self.stats.record_confidence(result.confidence);

            if let Some(validation) = &result.validation {
                self.stats.pre_validation_issues += validation.issues.len();
                if validation
                    .issues
                    .iter()
                    .any(|i| i.kind == crate::IssueKind::DeprecatedCommand)
                {
                    self.stats.deprecated_commands += 1;
                }

                let render = self.config.mode == Mode::ValidateOnly || self.config.stats;
                if render {
                    write!(stats_out, "{}", reporter.render(validation)).map_err(Error::Output)?;
                }
                if validation.has_errors() {
                    saw_error = true;
                    if self.config.mode == Mode::Strict {
                        if !render {
                            write!(stats_out, "{}", reporter.render(validation))
                                .map_err(Error::Output)?;
                        }
                        self.stats.elapsed = started.elapsed();
                        debug!("strict mode stop at line {line_no}\n{}", self.stats.summary());
                        return Ok(1);
                    }
                }
            }

            if self.config.mode != Mode::ValidateOnly {
                writeln!(output, "{}", result.transform.line_after).map_err(Error::Output)?;
                if self.config.stats {
                    for change in &result.transform.changes {
                        writeln!(
                            stats_out,
                            "#L{:<4} {} => {} [{}]",
                            result.line_no,
                            change.before_fragment,
                            change.after_fragment,
                            change.rule_name
                        )
                        .map_err(Error::Output)?;
                    }
                }
            }
        }

        self.stats.elapsed = started.elapsed();
        debug!("run finished\n{}", self.stats.summary());

        let exit = match self.config.mode {
            Mode::ValidateOnly if saw_error => 1,
            _ => 0,
        };
        Ok(exit)
    }

    fn process_line(&mut self, line: &str, line_no: usize) -> LineResult {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(line) {
                let hit = hit.clone();
                self.stats.cache_hits += 1;
                let mut validation = hit.validation;
                if let Some(v) = validation.as_mut() {
                    v.line_no = line_no;
                }
                return LineResult {
                    line_no,
                    original: line.to_string(),
                    transform: hit.transform,
                    validation,
                    stage: ProcessingStage::Replayed,
                    confidence: hit.confidence,
                };
            }
            self.stats.cache_misses += 1;
        }

        let passthrough = engine::is_passthrough(line);
        let validation = if passthrough {
            None
        } else {
            Validator::new(&self.messages).validate(line, line_no)
        };

        let transform = if self.config.mode == Mode::ValidateOnly {
            TransformResult::unchanged(line)
        } else {
            self.engine.apply(line)
        };

        let confidence = confidence_for(&transform, validation.as_ref());
        let stage = if passthrough {
            ProcessingStage::Passthrough
        } else if self.config.mode == Mode::ValidateOnly {
            ProcessingStage::ValidatedOnly
        } else {
            ProcessingStage::Transformed
        };

        if let Some(cache) = &mut self.cache {
            cache.insert(
                line.to_string(),
                CachedLine {
                    transform: transform.clone(),
                    validation: validation.clone(),
                    confidence,
                },
            );
        }

        LineResult { line_no, original: line.to_string(), transform, validation, stage, confidence }
    }
}

/// Advisory confidence: 1.0, ×0.9 per pre-validation issue, ×0.8 per
/// post-validation issue (reserved), ×0.7 per rule conflict, floored at 0.1.
fn confidence_for(transform: &TransformResult, validation: Option<&ValidationResult>) -> f64 {
    let mut confidence = 1.0f64;
    if let Some(validation) = validation {
        for _ in &validation.issues {
            confidence *= 0.9;
        }
    }
    for _ in 0..rule_conflicts(transform) {
        confidence *= 0.7;
    }
    confidence.max(0.1)
}

/// A conflict is a later change rewriting text an earlier change produced:
/// the later `before` fragment overlaps an earlier `after` fragment.
fn rule_conflicts(transform: &TransformResult) -> usize {
    let changes = &transform.changes;
    let mut conflicts = 0;
    for (idx, later) in changes.iter().enumerate() {
        for earlier in &changes[..idx] {
            if !earlier.after_fragment.is_empty()
                && later.before_fragment.contains(&earlier.after_fragment)
            {
                conflicts += 1;
            }
        }
    }
    conflicts
}
