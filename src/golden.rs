//! Golden-output regression harness.
//!
//! Runs the driver in transform mode with a fixed configuration over a
//! frozen input file and compares the output byte-for-byte against a sibling
//! expected-output file. This is the primary regression guard for the rule
//! catalogue: any change to a pattern, a reason string, or the annotation
//! format shows up as a golden diff.
//!
//! Updating of golden files is controlled with the `USACLOUD_UPDATE_GOLDEN`
//! environment variable: set it to `overwrite` to rewrite the expected file
//! from the current output instead of comparing.

use std::fs;
use std::path::Path;

use crate::driver::{Config, Mode};
use crate::messages::Language;

pub const UPDATE_ENV: &str = "USACLOUD_UPDATE_GOLDEN";

/// The configuration golden runs are frozen against: plain transform mode,
/// no stats stream, no color, English messages.
fn golden_config() -> Config {
    Config {
        mode: Mode::Transform,
        stats: false,
        color: false,
        language: Language::En,
        performance: false,
    }
}

/// Compare the transformation of `input_path` against `golden_path`.
///
/// Panics with a labelled diff on mismatch, which is the desired behavior
/// inside `#[test]` functions. With `USACLOUD_UPDATE_GOLDEN=overwrite` the
/// golden file is rewritten and the comparison skipped.
pub fn assert_matches(input_path: &Path, golden_path: &Path) {
    let script = fs::read_to_string(input_path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", input_path.display()));

    let outcome = crate::api::update_with(&script, &golden_config())
        .unwrap_or_else(|err| panic!("transforming {} failed: {err}", input_path.display()));
    let actual = outcome.output;

    if std::env::var(UPDATE_ENV).as_deref() == Ok("overwrite") {
        fs::write(golden_path, &actual)
            .unwrap_or_else(|err| panic!("failed to write {}: {err}", golden_path.display()));
        return;
    }

    let expected = fs::read_to_string(golden_path).unwrap_or_else(|_| {
        panic!(
            "missing golden file {}; run with {UPDATE_ENV}=overwrite to create it",
            golden_path.display()
        )
    });

    if actual != expected {
        panic!(
            "output differs from {}:\n{}\nrun with {UPDATE_ENV}=overwrite to accept the new output",
            golden_path.display(),
            first_diff(&expected, &actual)
        );
    }
}

/// A compact description of the first differing line.
fn first_diff(expected: &str, actual: &str) -> String {
    for (idx, (exp, act)) in expected.lines().zip(actual.lines()).enumerate() {
        if exp != act {
            return format!("line {}:\n  expected: {exp}\n  actual:   {act}", idx + 1);
        }
    }
    let (exp_count, act_count) = (expected.lines().count(), actual.lines().count());
    format!("line counts differ: expected {exp_count}, actual {act_count}")
}
