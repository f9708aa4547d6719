//! Line processing engine.
//!
//! This module is the processing core behind the public API and the driver.
//! Handling one line is a fixed pipeline:
//!
//! ```text
//! raw line ── parser::parse ────────┐        (parser.rs)
//!                                   │
//!                                   v
//!                    Validator::validate      (validator.rs)
//!                      - catalogue lookups    (catalog.rs)
//!                      - near-miss ranking    (suggest.rs)
//!                                   │
//!                                   v
//!                  TransformEngine::apply     (transform.rs)
//!                      - rule catalogue, in order
//!                      - annotation comment
//!                                   │
//!                                   v
//!                      TransformResult + ValidationResult
//! ```
//!
//! Validation never feeds into transformation; the only coupling is the
//! driver's strict-mode gate, which may stop the stream before a line is
//! transformed at all.
//!
//! ## Responsibilities by module
//!
//! - `transform.rs`: applies the rule catalogue to one line and appends the
//!   `# usacloud-update:` annotation comment.
//! - `parser.rs`: shallow, quote-aware decomposition of a command line into
//!   main/sub/flags/positionals.
//! - `catalog.rs`: the static tables of valid mains, subcommands per main,
//!   and deprecations.
//! - `suggest.rs`: bounded Levenshtein ranking for "did you mean".
//! - `validator.rs`: combines the three above into per-line findings.
//! - `stats.rs`: run counters reported by the driver.
//!
//! All shared state (rule catalogue, command catalogue) is immutable after
//! construction, so engines and validators can be used from parallel
//! invocations freely.

#[path = "engine/catalog.rs"]
pub(crate) mod catalog;
#[path = "engine/parser.rs"]
pub(crate) mod parser;
#[path = "engine/stats.rs"]
mod stats;
#[path = "engine/suggest.rs"]
pub(crate) mod suggest;
#[path = "engine/transform.rs"]
mod transform;
#[path = "engine/validator.rs"]
mod validator;

pub use stats::RunStats;
pub use transform::{TransformEngine, UPDATE_COMMENT_MARKER, is_passthrough};
pub use validator::Validator;
